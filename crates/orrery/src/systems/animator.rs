//! Time-driven motion of every catalog body, moon, belt entry and orbit ring.
//!
//! Static descriptors stay in the registry; this module owns the mutable
//! runtime state (pivot angles, spins, belt entries, ring pulses), indexed by
//! the same [`BodyId`]/[`MoonId`] the registry uses.

use glam::Vec3;
use std::f64::consts::TAU;

use crate::api::types::{BodyId, BodyKind, MoonId};
use crate::catalog::belts::AsteroidBelt;
use crate::catalog::bodies::{CelestialBody, Rgb};
use crate::core::registry::CelestialRegistry;
use crate::core::rng::Rng;
use crate::extensions::pivot::{Pivot, PivotGraph, PivotIndex};
use crate::renderer::traits::{Axis, MaterialProperty, NodeId, RenderTarget};
use crate::systems::layers::{LayerId, LayerVisibility};

/// The Sun sits at the scene origin and never moves.
pub const SUN_POSITION: Vec3 = Vec3::ZERO;

// ── Rates (radians per animation step) ──────────────────────────────

const SUN_SPIN: f64 = 0.002;
const PLANET_SPIN: f64 = 0.01;
const MOON_SPIN: f64 = 0.02;
/// Moons orbit at a tenth of their catalog speed.
const MOON_ORBIT_SCALE: f64 = 0.1;
const STARFIELD_SPIN: f64 = 0.0001;

/// Rings beyond this distance pulse.
const PULSE_MIN_DIST: f32 = 40.0;
/// Rings beyond this distance are drawn brighter.
const FAR_RING_DIST: f32 = 45.0;

/// Per-category multipliers applied to orbital motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Damping {
    /// Planet orbit and spin.
    pub orbit: f64,
    /// Moon orbit and spin.
    pub moon: f64,
    /// Belt orbits and starfield drift.
    pub belt: f64,
    /// Sun spin and belt tumble.
    pub spin: f64,
}

impl Damping {
    pub const NONE: Damping = Damping::uniform(1.0);

    pub const fn uniform(factor: f64) -> Self {
        Self { orbit: factor, moon: factor, belt: factor, spin: factor }
    }

    /// Near-frozen motion used while the eclipse tour runs. The Sun and the
    /// belt tumble keep spinning at full rate.
    pub const fn cinematic() -> Self {
        Self { orbit: 0.08, moon: 0.6, belt: 0.06, spin: 1.0 }
    }
}

impl Default for Damping {
    fn default() -> Self {
        Self::NONE
    }
}

// ── Orbit rings ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingStyle {
    pub color: Rgb,
    pub glow: f32,
    pub opacity: f32,
}

/// Ring colour and strength by body type, with distant rings brighter.
pub fn ring_style(kind: BodyKind, dist: f32) -> RingStyle {
    let (color, glow, opacity) = match kind {
        BodyKind::Dwarf => ([0.8, 0.6, 0.0], 0.08, 0.04),
        BodyKind::Asteroid => ([0.6, 0.3, 0.15], 0.06, 0.03),
        BodyKind::Tno => ([0.4, 0.15, 0.5], 0.1, 0.05),
        BodyKind::Planet if dist < 20.0 => ([0.3, 0.5, 0.7], 0.03, 0.02),
        BodyKind::Planet if dist < 35.0 => ([0.5, 0.4, 0.7], 0.05, 0.03),
        BodyKind::Planet => ([0.7, 0.3, 0.4], 0.07, 0.04),
    };
    if dist > FAR_RING_DIST {
        RingStyle { color, glow: glow * 1.2, opacity: opacity * 1.3 }
    } else {
        RingStyle { color, glow, opacity }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pulse {
    speed: f64,
    phase: f64,
    /// (emissive, opacity) read off the ring on the first pulse.
    baseline: Option<(f32, f32)>,
}

/// The circle a body travels on, drawn around the Sun.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitRing {
    pub body: BodyId,
    pub radius: f32,
    pub color: Rgb,
    pub emissive: f32,
    pub opacity: f32,
    pulse: Option<Pulse>,
}

impl OrbitRing {
    fn new(body: BodyId, descriptor: &CelestialBody, rng: &mut Rng) -> Self {
        let style = ring_style(descriptor.kind, descriptor.dist);
        let pulse = (descriptor.dist > PULSE_MIN_DIST).then(|| Pulse {
            speed: rng.range(0.002, 0.005),
            phase: rng.next_f64() * TAU,
            baseline: None,
        });
        Self {
            body,
            radius: descriptor.dist,
            color: style.color,
            emissive: style.glow,
            opacity: style.opacity,
            pulse,
        }
    }

    pub fn pulses(&self) -> bool {
        self.pulse.is_some()
    }

    /// Scale emissive and opacity around the baseline captured on the first call.
    fn apply_pulse(&mut self, wall_ms: f64) {
        let Some(pulse) = self.pulse.as_mut() else {
            return;
        };
        let (emissive, opacity) = *pulse.baseline.get_or_insert((self.emissive, self.opacity));
        let value = ((wall_ms * pulse.speed + pulse.phase).sin() * 0.3 + 0.7) as f32;
        self.emissive = emissive * value;
        self.opacity = opacity * (0.8 + 0.2 * value);
    }
}

// ── Animator ────────────────────────────────────────────────────────

struct BodyPivots {
    orbit: PivotIndex,
    moons: Vec<PivotIndex>,
}

pub struct BodyAnimator {
    graph: PivotGraph,
    bodies: Vec<BodyPivots>,
    /// Catalog speeds, cached so advancing never touches the registry.
    body_speeds: Vec<f64>,
    moon_speeds: Vec<Vec<f64>>,
    belts: Vec<AsteroidBelt>,
    rings: Vec<OrbitRing>,
    sun_spin: f64,
    starfield_spin: f64,
}

impl BodyAnimator {
    pub fn new(registry: &CelestialRegistry, belts: Vec<AsteroidBelt>, seed: u64) -> Self {
        let mut graph = PivotGraph::new();
        let mut rng = Rng::new(seed ^ 0x0A11_0F_0B17);
        let mut bodies = Vec::with_capacity(registry.bodies().len());
        let mut rings = Vec::with_capacity(registry.bodies().len());

        for (id, body) in registry.ids().zip(registry.bodies()) {
            let orbit = graph.add_root(Pivot::new(body.dist, body.initial_angle));
            let moons = body
                .moons
                .iter()
                .map(|m| graph.add_child(orbit, Pivot::new(m.dist, m.initial_angle)))
                .collect();
            bodies.push(BodyPivots { orbit, moons });
            rings.push(OrbitRing::new(id, body, &mut rng));
        }
        graph.propagate();

        Self {
            graph,
            bodies,
            body_speeds: registry.bodies().iter().map(|b| b.speed).collect(),
            moon_speeds: registry
                .bodies()
                .iter()
                .map(|b| b.moons.iter().map(|m| m.speed).collect())
                .collect(),
            belts,
            rings,
            sun_spin: 0.0,
            starfield_spin: 0.0,
        }
    }

    /// Advance every motion by `delta` steps with one damping factor.
    /// A factor of 0 leaves every orbital angle and spin untouched.
    pub fn advance(&mut self, delta: f64, damping: f64) {
        self.advance_with(delta, Damping::uniform(damping));
    }

    pub fn advance_with(&mut self, delta: f64, damping: Damping) {
        for (i, pivots) in self.bodies.iter().enumerate() {
            if let Some(p) = self.graph.local_mut(pivots.orbit) {
                p.angle += self.body_speeds[i] * delta * damping.orbit;
                p.spin += PLANET_SPIN * delta * damping.orbit;
            }
            for (m, moon) in pivots.moons.iter().enumerate() {
                if let Some(p) = self.graph.local_mut(*moon) {
                    p.angle += self.moon_speeds[i][m] * MOON_ORBIT_SCALE * delta * damping.moon;
                    p.spin += MOON_SPIN * delta * damping.moon;
                }
            }
        }
        for belt in &mut self.belts {
            for entry in &mut belt.entries {
                entry.advance(delta, damping.belt, damping.spin);
            }
        }
        self.sun_spin += SUN_SPIN * delta * damping.spin;
        self.starfield_spin += STARFIELD_SPIN * delta * damping.belt;
        self.graph.propagate();
    }

    /// Pulse distant orbit rings from wall-clock time, independent of the
    /// simulated clock.
    pub fn pulse_rings(&mut self, wall_ms: f64) {
        for ring in &mut self.rings {
            ring.apply_pulse(wall_ms);
        }
    }

    // ── Queries ──

    pub fn body_position(&self, id: BodyId) -> Option<Vec3> {
        let pivots = self.bodies.get(id.index())?;
        self.graph.world_position(pivots.orbit)
    }

    pub fn moon_position(&self, id: MoonId) -> Option<Vec3> {
        let pivot = self.moon_pivot(id)?;
        self.graph.world_position(pivot)
    }

    pub fn body_angle(&self, id: BodyId) -> Option<f64> {
        let pivots = self.bodies.get(id.index())?;
        self.graph.local(pivots.orbit).map(|p| p.angle)
    }

    pub fn body_spin(&self, id: BodyId) -> Option<f64> {
        let pivots = self.bodies.get(id.index())?;
        self.graph.local(pivots.orbit).map(|p| p.spin)
    }

    /// Place a body on its orbit directly. Returns false for an unknown id.
    pub fn set_body_angle(&mut self, id: BodyId, angle: f64) -> bool {
        let Some(pivots) = self.bodies.get(id.index()) else {
            return false;
        };
        match self.graph.local_mut(pivots.orbit) {
            Some(p) => {
                p.angle = angle;
                self.graph.propagate();
                true
            }
            None => false,
        }
    }

    pub fn moon_angle(&self, id: MoonId) -> Option<f64> {
        let pivot = self.moon_pivot(id)?;
        self.graph.local(pivot).map(|p| p.angle)
    }

    pub fn set_moon_angle(&mut self, id: MoonId, angle: f64) -> bool {
        let Some(pivot) = self.moon_pivot(id) else {
            return false;
        };
        match self.graph.local_mut(pivot) {
            Some(p) => {
                p.angle = angle;
                self.graph.propagate();
                true
            }
            None => false,
        }
    }

    fn moon_pivot(&self, id: MoonId) -> Option<PivotIndex> {
        self.bodies.get(id.body.index())?.moons.get(id.moon as usize).copied()
    }

    pub fn belts(&self) -> &[AsteroidBelt] {
        &self.belts
    }

    pub fn rings(&self) -> &[OrbitRing] {
        &self.rings
    }

    pub fn sun_spin(&self) -> f64 {
        self.sun_spin
    }

    pub fn starfield_spin(&self) -> f64 {
        self.starfield_spin
    }

    // ── Output ──

    /// Push every animated transform and ring material to the renderer.
    /// Nodes the renderer does not know are skipped.
    pub fn sync(&self, target: &mut dyn RenderTarget, layers: &LayerVisibility) {
        if let Some(sun) = target.renderable(NodeId::Sun) {
            sun.set_rotation(Axis::Y, self.sun_spin as f32);
        }
        if let Some(stars) = target.renderable(NodeId::Starfield) {
            stars.set_rotation(Axis::Y, self.starfield_spin as f32);
        }

        let show_moons = layers.is_visible(LayerId::Moons);
        for (b, pivots) in self.bodies.iter().enumerate() {
            let body = BodyId(b as u32);
            if let (Some(node), Some(local), Some(world)) = (
                target.renderable(NodeId::Body(body)),
                self.graph.local(pivots.orbit),
                self.graph.world_position(pivots.orbit),
            ) {
                node.set_position(world);
                node.set_rotation(Axis::Y, local.spin as f32);
            }
            for (m, pivot) in pivots.moons.iter().enumerate() {
                let id = NodeId::Moon(MoonId::new(body, m as u32));
                if let (Some(node), Some(local), Some(world)) = (
                    target.renderable(id),
                    self.graph.local(*pivot),
                    self.graph.world_position(*pivot),
                ) {
                    node.set_position(world);
                    node.set_rotation(Axis::Y, local.spin as f32);
                    node.set_visible(show_moons);
                }
            }
        }

        let show_orbits = layers.is_visible(LayerId::Orbits);
        for ring in &self.rings {
            if let Some(node) = target.renderable(NodeId::OrbitRing(ring.body)) {
                node.set_visible(show_orbits);
                node.set_material_property(MaterialProperty::EmissiveIntensity, ring.emissive);
                node.set_material_property(MaterialProperty::Opacity, ring.opacity);
            }
        }

        for belt in &self.belts {
            let visible = layers.is_visible(LayerId::Belt(belt.kind));
            for (i, entry) in belt.entries.iter().enumerate() {
                let id = NodeId::BeltEntry { belt: belt.kind, index: i as u32 };
                if let Some(node) = target.renderable(id) {
                    node.set_position(entry.position());
                    node.set_rotation(Axis::X, entry.rotation.x);
                    node.set_rotation(Axis::Y, entry.rotation.y);
                    node.set_rotation(Axis::Z, entry.rotation.z);
                    node.set_visible(visible);
                }
            }
        }
    }
}
