/// Keplerian orbital mechanics: pure math, no engine dependencies.
///
/// Uses f64 throughout. Only convert to f32 at the scene-unit step.
use glam::{DVec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::api::error::{OrreryError, Result};

const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Julian Day of J2000.0 (January 1, 2000, 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Epoch used when the caller does not ask for a specific one.
pub const DEFAULT_EPOCH_JD: f64 = 2_460_000.0;

/// Scene units per AU for objects placed from real orbital elements.
pub const AU_TO_SCENE: f32 = 15.0;

/// Samples in an orbit path polyline (closed: first == last).
pub const ORBIT_PATH_SAMPLES: usize = 101;

/// Gaussian mean motion for a = 1 AU, degrees per day.
const MEAN_MOTION_DEG_PER_DAY: f64 = 0.985_607_668_6;

/// Fixed-point iteration count. Deterministic cost; loses accuracy as e -> 1.
const FIXED_POINT_ITERATIONS: usize = 10;

/// Keplerian elements of a heliocentric orbit. Angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    /// Semi-major axis (AU)
    pub a: f64,
    /// Eccentricity, [0, 1)
    pub e: f64,
    /// Inclination
    pub i: f64,
    /// Longitude of the ascending node
    pub om: f64,
    /// Argument of periapsis
    pub w: f64,
    /// Mean anomaly at `epoch_jd`
    pub ma: f64,
    /// Julian Day the mean anomaly refers to, when the source provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epoch_jd: Option<f64>,
}

impl OrbitalElements {
    pub fn new(a: f64, e: f64, i: f64, om: f64, w: f64, ma: f64) -> Self {
        Self { a, e, i, om, w, ma, epoch_jd: None }
    }

    pub fn with_epoch(mut self, epoch_jd: f64) -> Self {
        self.epoch_jd = Some(epoch_jd);
        self
    }

    /// Reject element sets the solver would turn into NaN or nonsense.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("a", self.a),
            ("e", self.e),
            ("i", self.i),
            ("om", self.om),
            ("w", self.w),
            ("ma", self.ma),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(OrreryError::invalid(field, value));
            }
        }
        if self.a <= 0.0 {
            return Err(OrreryError::invalid("a", self.a));
        }
        if !(0.0..1.0).contains(&self.e) {
            return Err(OrreryError::invalid("e", self.e));
        }
        if let Some(epoch) = self.epoch_jd {
            if !epoch.is_finite() {
                return Err(OrreryError::invalid("epoch", epoch));
            }
        }
        Ok(())
    }

    /// Mean anomaly (degrees) at `epoch_jd`, propagated with two-body mean
    /// motion when the elements carry their own epoch.
    pub fn mean_anomaly_at(&self, epoch_jd: f64) -> f64 {
        match self.epoch_jd {
            Some(element_epoch) => {
                let n = MEAN_MOTION_DEG_PER_DAY / self.a.powf(1.5);
                self.ma + n * (epoch_jd - element_epoch)
            }
            None => self.ma,
        }
    }
}

/// How Kepler's equation is solved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeplerMethod {
    /// `E = M + e·sin(E)`, exactly ten iterations, no convergence check.
    #[default]
    FixedPoint,
    /// Newton-Raphson with a residual check; accurate at high eccentricity.
    Newton,
}

impl KeplerMethod {
    /// Eccentric anomaly (radians) for a mean anomaly in radians.
    pub fn solve(self, mean_anomaly: f64, eccentricity: f64) -> f64 {
        match self {
            KeplerMethod::FixedPoint => solve_kepler_fixed_point(mean_anomaly, eccentricity),
            KeplerMethod::Newton => solve_kepler_newton(mean_anomaly, eccentricity),
        }
    }
}

/// Fixed-point iteration of `E = M + e·sin(E)`.
/// Known precision limit: ten rounds leave visible error for e above ~0.9.
pub fn solve_kepler_fixed_point(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let mut ea = mean_anomaly;
    for _ in 0..FIXED_POINT_ITERATIONS {
        ea = mean_anomaly + eccentricity * ea.sin();
    }
    ea
}

/// Solve Kepler's equation: E - e·sin(E) = M
/// Using Newton-Raphson iteration.
pub fn solve_kepler_newton(mean_anomaly: f64, eccentricity: f64) -> f64 {
    // Starting at pi keeps the iteration stable for e close to 1.
    let mut ea = if eccentricity > 0.8 {
        std::f64::consts::PI
    } else {
        mean_anomaly
    };
    for _ in 0..15 {
        let delta = ea - eccentricity * ea.sin() - mean_anomaly;
        let derivative = 1.0 - eccentricity * ea.cos();
        ea -= delta / derivative;
        if delta.abs() < 1e-12 {
            break;
        }
    }
    ea
}

/// Everything the solver derives on the way to a position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSolution {
    /// Heliocentric ecliptic position (AU)
    pub position: DVec3,
    /// Distance from the focus (AU)
    pub radius: f64,
    /// Eccentric anomaly (radians)
    pub eccentric_anomaly: f64,
    /// True anomaly (radians)
    pub true_anomaly: f64,
}

/// Full solve with an explicit Kepler method.
pub fn solve(elements: &OrbitalElements, epoch_jd: f64, method: KeplerMethod) -> OrbitSolution {
    let e = elements.e;
    let i = elements.i * DEG_TO_RAD;
    let om = elements.om * DEG_TO_RAD;
    let w = elements.w * DEG_TO_RAD;
    let m = elements.mean_anomaly_at(epoch_jd) * DEG_TO_RAD;

    let ea = method.solve(m, e);
    let nu = 2.0 * ((1.0 + e).sqrt() * (ea / 2.0).sin()).atan2((1.0 - e).sqrt() * (ea / 2.0).cos());
    let r = elements.a * (1.0 - e * ea.cos());

    // Perifocal coordinates
    let x_orb = r * nu.cos();
    let y_orb = r * nu.sin();

    // 3-1-3 rotation: w about z, i about x, om about z
    let (sin_w, cos_w) = w.sin_cos();
    let (sin_i, cos_i) = i.sin_cos();
    let (sin_om, cos_om) = om.sin_cos();

    let x = x_orb * (cos_w * cos_om - sin_w * sin_om * cos_i)
        - y_orb * (sin_w * cos_om + cos_w * sin_om * cos_i);
    let y = x_orb * (cos_w * sin_om + sin_w * cos_om * cos_i)
        + y_orb * (cos_w * cos_om * cos_i - sin_w * sin_om);
    let z = x_orb * sin_w * sin_i + y_orb * cos_w * sin_i;

    OrbitSolution {
        position: DVec3::new(x, y, z),
        radius: r,
        eccentric_anomaly: ea,
        true_anomaly: nu,
    }
}

/// Heliocentric position (AU) using the fixed-point solver.
/// Callers validate the elements first; see [`OrbitalElements::validate`].
pub fn solve_position(elements: &OrbitalElements, epoch_jd: f64) -> DVec3 {
    solve(elements, epoch_jd, KeplerMethod::FixedPoint).position
}

/// Sweep the mean anomaly through a full revolution. Returns `samples` points (AU);
/// the last point closes the loop.
pub fn orbit_path(elements: &OrbitalElements, samples: usize, method: KeplerMethod) -> Vec<DVec3> {
    let steps = samples.saturating_sub(1).max(1);
    (0..samples)
        .map(|k| {
            let mut swept = *elements;
            swept.ma = k as f64 / steps as f64 * 360.0;
            swept.epoch_jd = None;
            solve(&swept, DEFAULT_EPOCH_JD, method).position
        })
        .collect()
}

/// AU position -> scene units (axis order kept).
pub fn to_scene(position: DVec3, scale: f32) -> Vec3 {
    position.as_vec3() * scale
}

/// Convert Unix milliseconds to days from J2000.
pub fn unix_ms_to_days(unix_ms: f64) -> f64 {
    // J2000.0 is 2000-01-01T12:00:00Z = 946_728_000_000 ms
    (unix_ms - 946_728_000_000.0) / 86_400_000.0
}

/// Convert days from J2000 to (year, month, day).
pub fn days_to_date(days_from_j2000: f64) -> (i32, u32, u32) {
    let jd = days_from_j2000 + J2000_JD;
    let z = (jd + 0.5).floor() as i64;
    let a = if z < 2299161 {
        z
    } else {
        let alpha = ((z as f64 - 1867216.25) / 36524.25).floor() as i64;
        z + 1 + alpha - alpha / 4
    };
    let b = a + 1524;
    let c = ((b as f64 - 122.1) / 365.25).floor() as i64;
    let d = (365.25 * c as f64).floor() as i64;
    let e = ((b - d) as f64 / 30.6001).floor() as i64;

    let day = (b - d - (30.6001 * e as f64).floor() as i64) as u32;
    let month = if e < 14 { (e - 1) as u32 } else { (e - 13) as u32 };
    let year = if month > 2 { (c - 4716) as i32 } else { (c - 4715) as i32 };

    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elements(a: f64, e: f64, i: f64, om: f64, w: f64, ma: f64) -> OrbitalElements {
        OrbitalElements::new(a, e, i, om, w, ma)
    }

    #[test]
    fn circular_orbit_radius_equals_a() {
        for step in 0..36 {
            let el = elements(2.5, 0.0, 10.0, 80.0, 73.0, step as f64 * 10.0);
            let sol = solve(&el, DEFAULT_EPOCH_JD, KeplerMethod::FixedPoint);
            assert!((sol.radius - 2.5).abs() < 1e-12, "r = {}", sol.radius);
            assert!((sol.position.length() - 2.5).abs() < 1e-9);
        }
    }

    #[test]
    fn zero_mean_anomaly_is_periapsis() {
        let el = elements(1.46, 0.22, 10.8, 304.3, 178.9, 0.0);
        let sol = solve(&el, DEFAULT_EPOCH_JD, KeplerMethod::FixedPoint);
        assert_eq!(sol.true_anomaly, 0.0);
        assert!((sol.radius - 1.46 * (1.0 - 0.22)).abs() < 1e-12);
    }

    #[test]
    fn positions_are_finite_and_deterministic() {
        let mut e = 0.0;
        while e < 0.9 {
            let el = elements(1.0 + e, e, 23.0, 45.0, 120.0, 250.0);
            let first = solve_position(&el, DEFAULT_EPOCH_JD);
            let second = solve_position(&el, DEFAULT_EPOCH_JD);
            assert!(first.is_finite(), "e = {e} gave {first:?}");
            assert_eq!(first, second);
            e += 0.05;
        }
    }

    #[test]
    fn flat_orbit_stays_in_plane() {
        let el = elements(1.0, 0.1, 0.0, 0.0, 0.0, 90.0);
        let p = solve_position(&el, DEFAULT_EPOCH_JD);
        assert!(p.z.abs() < 1e-12);
    }

    #[test]
    fn newton_converges_where_fixed_point_lags() {
        let (m, e) = (0.3, 0.97);
        let newton = solve_kepler_newton(m, e);
        let residual = newton - e * newton.sin() - m;
        assert!(residual.abs() < 1e-10, "residual = {residual}");

        let fixed = solve_kepler_fixed_point(m, e);
        let fixed_residual = fixed - e * fixed.sin() - m;
        assert!(fixed_residual.abs() > residual.abs());
    }

    #[test]
    fn methods_agree_for_low_eccentricity() {
        let fixed = solve_kepler_fixed_point(1.5, 0.0167);
        let newton = solve_kepler_newton(1.5, 0.0167);
        assert!((fixed - newton).abs() < 1e-12);
    }

    #[test]
    fn validate_rejects_bad_elements() {
        assert!(elements(1.0, 0.5, 0.0, 0.0, 0.0, 0.0).validate().is_ok());
        assert!(elements(f64::NAN, 0.5, 0.0, 0.0, 0.0, 0.0).validate().is_err());
        assert!(elements(-1.0, 0.5, 0.0, 0.0, 0.0, 0.0).validate().is_err());
        assert!(elements(1.0, 1.0, 0.0, 0.0, 0.0, 0.0).validate().is_err());
        assert!(elements(1.0, 0.2, 0.0, f64::INFINITY, 0.0, 0.0).validate().is_err());
    }

    #[test]
    fn mean_anomaly_propagates_from_element_epoch() {
        // a = 1 AU advances ~0.9856 deg/day
        let el = elements(1.0, 0.0, 0.0, 0.0, 0.0, 10.0).with_epoch(DEFAULT_EPOCH_JD);
        let later = el.mean_anomaly_at(DEFAULT_EPOCH_JD + 10.0);
        assert!((later - (10.0 + 9.856_076_686)).abs() < 1e-9);
        // Without an element epoch the mean anomaly is taken as-is
        let plain = elements(1.0, 0.0, 0.0, 0.0, 0.0, 10.0);
        assert_eq!(plain.mean_anomaly_at(DEFAULT_EPOCH_JD + 10.0), 10.0);
    }

    #[test]
    fn orbit_path_closes() {
        let el = elements(2.77, 0.08, 10.6, 80.3, 73.6, 0.0);
        let path = orbit_path(&el, ORBIT_PATH_SAMPLES, KeplerMethod::FixedPoint);
        assert_eq!(path.len(), ORBIT_PATH_SAMPLES);
        assert!((path[0] - path[ORBIT_PATH_SAMPLES - 1]).length() < 1e-6);
    }

    #[test]
    fn scene_scale_is_fifteen_per_au() {
        let scene = to_scene(DVec3::new(1.0, -2.0, 0.5), AU_TO_SCENE);
        assert_eq!(scene, Vec3::new(15.0, -30.0, 7.5));
    }

    #[test]
    fn unix_epoch_maps_to_j2000() {
        assert!((unix_ms_to_days(946_728_000_000.0)).abs() < 1e-12);
        assert!((unix_ms_to_days(946_728_000_000.0 + 86_400_000.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn date_j2000_epoch() {
        let (year, month, day) = days_to_date(0.0);
        assert_eq!((year, month, day), (2000, 1, 1));
    }

    #[test]
    fn date_known_date() {
        // March 20, 2000 = J2000 + 79 days (approx)
        let (year, month, day) = days_to_date(79.0);
        assert_eq!(year, 2000);
        assert_eq!(month, 3);
        assert!(day >= 20 && day <= 21, "day = {day}");
    }

    #[test]
    fn date_negative_days() {
        let (year, _month, _day) = days_to_date(-365.0);
        assert_eq!(year, 1999);
    }
}
