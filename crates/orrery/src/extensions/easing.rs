//! Pure easing and interpolation helpers for camera paths.
//! No dependencies on bodies or the scene, just math.

use glam::Vec3;
use std::f32::consts::PI;

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity (no easing).
    Linear,
    /// Slow start and end.
    QuadInOut,
    /// Half-cosine: slow start and end, gentler than quadratic.
    #[default]
    SineInOut,
}

impl Easing {
    /// Apply the easing function to a normalized time value `t` in [0, 1].
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::SineInOut => 0.5 * (1.0 - (t * PI).cos()),
        }
    }
}

/// Linear interpolation between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linear interpolation between two points.
#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// Interpolate between two points with easing applied to `t`.
#[inline]
pub fn ease_vec3(a: Vec3, b: Vec3, t: f32, easing: Easing) -> Vec3 {
    lerp_vec3(a, b, easing.apply(t))
}

/// Move `current` a fixed fraction of the way to `target` (exponential approach).
#[inline]
pub fn approach_vec3(current: Vec3, target: Vec3, factor: f32) -> Vec3 {
    lerp_vec3(current, target, factor.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_fixed() {
        for easing in [Easing::Linear, Easing::QuadInOut, Easing::SineInOut] {
            assert!(easing.apply(0.0).abs() < 1e-6, "{easing:?}");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?}");
        }
    }

    #[test]
    fn sine_in_out_is_half_at_midpoint() {
        assert!((Easing::SineInOut.apply(0.5) - 0.5).abs() < 1e-6);
        assert!(Easing::SineInOut.apply(0.1) < 0.1);
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
    }

    #[test]
    fn approach_closes_a_fraction_of_the_gap() {
        let p = approach_vec3(Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0), 0.02);
        assert!((p.x - 2.0).abs() < 1e-5);
    }

    #[test]
    fn ease_vec3_uses_curve() {
        let p = ease_vec3(Vec3::ZERO, Vec3::splat(10.0), 0.5, Easing::SineInOut);
        assert!((p - Vec3::splat(5.0)).length() < 1e-4);
        assert!((lerp(2.0, 4.0, 0.25) - 2.5).abs() < 1e-6);
    }
}
