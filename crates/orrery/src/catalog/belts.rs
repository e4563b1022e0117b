//! Procedural small-body populations: the main belt (three bands), Jupiter's
//! trojans, the Kuiper belt, the scattered disk and a token Oort cloud.
//!
//! Generation is seeded, so a given seed always yields the same belts.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_3, TAU};

use crate::catalog::bodies::Rgb;
use crate::core::rng::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeltKind {
    Inner,
    Middle,
    Outer,
    Trojans,
    Kuiper,
    Scattered,
    Oort,
}

impl BeltKind {
    pub const ALL: [BeltKind; 7] = [
        BeltKind::Inner,
        BeltKind::Middle,
        BeltKind::Outer,
        BeltKind::Trojans,
        BeltKind::Kuiper,
        BeltKind::Scattered,
        BeltKind::Oort,
    ];

    pub fn index(self) -> usize {
        match self {
            BeltKind::Inner => 0,
            BeltKind::Middle => 1,
            BeltKind::Outer => 2,
            BeltKind::Trojans => 3,
            BeltKind::Kuiper => 4,
            BeltKind::Scattered => 5,
            BeltKind::Oort => 6,
        }
    }
}

/// Composition tag of a belt entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmallBodyType {
    /// Carbonaceous
    C,
    /// Silicaceous
    S,
    /// Metallic
    M,
    TrojanL4,
    TrojanL5,
    Icy,
    Rocky,
    Reddish,
    Scattered,
    Cometary,
}

impl SmallBodyType {
    pub fn color(self) -> Rgb {
        match self {
            SmallBodyType::C => [0.4, 0.26, 0.13],
            SmallBodyType::S => [0.6, 0.6, 0.6],
            SmallBodyType::M => [0.5, 0.4, 0.3],
            SmallBodyType::TrojanL4 | SmallBodyType::TrojanL5 => [0.35, 0.25, 0.15],
            SmallBodyType::Icy => [0.6, 0.7, 0.8],
            SmallBodyType::Rocky => [0.5, 0.4, 0.3],
            SmallBodyType::Reddish => [0.7, 0.5, 0.4],
            SmallBodyType::Scattered => [0.6, 0.3, 0.2],
            SmallBodyType::Cometary => [0.8, 0.6, 0.9],
        }
    }
}

/// One small body on a circular orbit. Position is derived from
/// `radius`, `angle` and `height`; it is never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct AsteroidBeltEntry {
    pub radius: f64,
    pub angle: f64,
    /// Fixed offset above or below the ecliptic.
    pub height: f32,
    pub orbit_speed: f64,
    pub rotation: Vec3,
    pub rotation_speed: Vec3,
    pub size: f32,
    pub kind: SmallBodyType,
}

impl AsteroidBeltEntry {
    pub fn new(radius: f64, angle: f64, orbit_speed: f64) -> Self {
        Self {
            radius,
            angle,
            height: 0.0,
            orbit_speed,
            rotation: Vec3::ZERO,
            rotation_speed: Vec3::ZERO,
            size: 0.05,
            kind: SmallBodyType::S,
        }
    }

    /// Advance along the orbit and tumble, each scaled by its own damping.
    pub fn advance(&mut self, delta: f64, orbit_damping: f64, tumble_damping: f64) {
        self.rotation += self.rotation_speed * (delta * tumble_damping) as f32;
        self.angle += self.orbit_speed * delta * orbit_damping;
    }

    pub fn position(&self) -> Vec3 {
        let (sin, cos) = self.angle.sin_cos();
        Vec3::new(
            (cos * self.radius) as f32,
            self.height,
            (sin * self.radius) as f32,
        )
    }
}

#[derive(Debug, Clone)]
pub struct AsteroidBelt {
    pub kind: BeltKind,
    pub entries: Vec<AsteroidBeltEntry>,
}

/// Shape of one generated band.
struct BandSpec {
    count: usize,
    inner: f64,
    outer: f64,
    height: f64,
    /// Random jitter added to evenly spaced angles; `None` scatters uniformly.
    angle_jitter: Option<f64>,
    speed_base: f64,
    speed_jitter: f64,
    spin: f64,
    size_base: f64,
    size_jitter: f64,
    /// Cumulative thresholds for the composition roll.
    mix: &'static [(f64, SmallBodyType)],
}

const MAIN_INNER_MIX: &[(f64, SmallBodyType)] =
    &[(0.5, SmallBodyType::C), (0.8, SmallBodyType::S), (1.0, SmallBodyType::M)];
const MAIN_MIDDLE_MIX: &[(f64, SmallBodyType)] =
    &[(0.4, SmallBodyType::C), (0.75, SmallBodyType::S), (1.0, SmallBodyType::M)];
const MAIN_OUTER_MIX: &[(f64, SmallBodyType)] =
    &[(0.3, SmallBodyType::C), (0.7, SmallBodyType::S), (1.0, SmallBodyType::M)];
const KUIPER_MIX: &[(f64, SmallBodyType)] = &[
    (0.3, SmallBodyType::Icy),
    (0.6, SmallBodyType::Rocky),
    (1.0, SmallBodyType::Reddish),
];
const SCATTERED_MIX: &[(f64, SmallBodyType)] = &[(1.0, SmallBodyType::Scattered)];
const OORT_MIX: &[(f64, SmallBodyType)] = &[(1.0, SmallBodyType::Cometary)];

fn band(rng: &mut Rng, spec: &BandSpec) -> Vec<AsteroidBeltEntry> {
    (0..spec.count)
        .map(|i| {
            let angle = match spec.angle_jitter {
                Some(jitter) => i as f64 / spec.count as f64 * TAU + rng.next_f64() * jitter,
                None => rng.next_f64() * TAU,
            };
            let radius = rng.range(spec.inner, spec.outer);
            let size = rng.range(spec.size_base, spec.size_base + spec.size_jitter);
            let roll = rng.next_f64();
            let kind = spec
                .mix
                .iter()
                .find(|(threshold, _)| roll < *threshold)
                .map(|(_, kind)| *kind)
                .unwrap_or(spec.mix[spec.mix.len() - 1].1);
            AsteroidBeltEntry {
                radius,
                angle,
                height: rng.spread(spec.height / 2.0) as f32,
                orbit_speed: spec.speed_base + rng.next_f64() * spec.speed_jitter,
                rotation: random_rotation(rng),
                rotation_speed: random_spin(rng, spec.spin),
                size: size as f32,
                kind,
            }
        })
        .collect()
}

fn random_rotation(rng: &mut Rng) -> Vec3 {
    let pi = std::f64::consts::PI;
    Vec3::new(
        (rng.next_f64() * pi) as f32,
        (rng.next_f64() * pi) as f32,
        (rng.next_f64() * pi) as f32,
    )
}

fn random_spin(rng: &mut Rng, half_width: f64) -> Vec3 {
    Vec3::new(
        rng.spread(half_width) as f32,
        rng.spread(half_width) as f32,
        rng.spread(half_width) as f32,
    )
}

/// Jupiter's trojans cluster 60° ahead (L4) and behind (L5) at Jupiter's distance.
fn trojans(rng: &mut Rng) -> Vec<AsteroidBeltEntry> {
    const JUPITER_DIST: f64 = 25.0;
    const PER_POINT: usize = 50;
    let mut entries = Vec::with_capacity(PER_POINT * 2);
    for (base, kind) in [(FRAC_PI_3, SmallBodyType::TrojanL4), (-FRAC_PI_3, SmallBodyType::TrojanL5)] {
        for _ in 0..PER_POINT {
            let angle = base + rng.spread(0.5);
            let radius = JUPITER_DIST + rng.spread(2.0);
            let size = rng.range(0.02, 0.07) as f32;
            entries.push(AsteroidBeltEntry {
                radius,
                angle,
                height: rng.spread(0.5) as f32,
                orbit_speed: 0.000084,
                rotation: Vec3::ZERO,
                rotation_speed: random_spin(rng, 0.0075),
                size,
                kind,
            });
        }
    }
    entries
}

/// Generate every belt collection in display order.
pub fn generate_belts(seed: u64) -> Vec<AsteroidBelt> {
    let mut rng = Rng::new(seed);
    let specs = [
        (BeltKind::Inner, BandSpec {
            count: 150, inner: 19.5, outer: 21.5, height: 0.8, angle_jitter: Some(0.5),
            speed_base: 0.003, speed_jitter: 0.002, spin: 0.01,
            size_base: 0.01, size_jitter: 0.06, mix: MAIN_INNER_MIX,
        }),
        (BeltKind::Middle, BandSpec {
            count: 200, inner: 21.5, outer: 23.5, height: 1.0, angle_jitter: Some(0.5),
            speed_base: 0.0025, speed_jitter: 0.002, spin: 0.01,
            size_base: 0.01, size_jitter: 0.07, mix: MAIN_MIDDLE_MIX,
        }),
        (BeltKind::Outer, BandSpec {
            count: 150, inner: 23.5, outer: 25.5, height: 1.2, angle_jitter: Some(0.5),
            speed_base: 0.002, speed_jitter: 0.0015, spin: 0.01,
            size_base: 0.01, size_jitter: 0.08, mix: MAIN_OUTER_MIX,
        }),
    ];

    let mut belts: Vec<AsteroidBelt> = specs
        .iter()
        .map(|(kind, spec)| AsteroidBelt { kind: *kind, entries: band(&mut rng, spec) })
        .collect();

    belts.push(AsteroidBelt { kind: BeltKind::Trojans, entries: trojans(&mut rng) });

    let outer_specs = [
        (BeltKind::Kuiper, BandSpec {
            count: 200, inner: 44.0, outer: 58.0, height: 3.0, angle_jitter: Some(1.0),
            speed_base: 0.0000015, speed_jitter: 0.000002, spin: 0.005,
            size_base: 0.03, size_jitter: 0.08, mix: KUIPER_MIX,
        }),
        (BeltKind::Scattered, BandSpec {
            count: 80, inner: 58.0, outer: 80.0, height: 10.0, angle_jitter: None,
            speed_base: 0.0000008, speed_jitter: 0.000001, spin: 0.004,
            size_base: 0.04, size_jitter: 0.1, mix: SCATTERED_MIX,
        }),
        (BeltKind::Oort, BandSpec {
            count: 50, inner: 80.0, outer: 120.0, height: 20.0, angle_jitter: None,
            speed_base: 0.0000003, speed_jitter: 0.0000005, spin: 0.0025,
            size_base: 0.05, size_jitter: 0.12, mix: OORT_MIX,
        }),
    ];
    belts.extend(
        outer_specs
            .iter()
            .map(|(kind, spec)| AsteroidBelt { kind: *kind, entries: band(&mut rng, spec) }),
    );
    belts
}
