//! Scripted eclipse tour: five timed phases that move the camera along fixed
//! waypoints and dim the lights around a staged Sun-Earth-Moon alignment.
//!
//! The tour runs on wall-clock time, independent of the simulation speed.
//! While it is active the caller damps body motion (see
//! [`Damping::cinematic`](crate::systems::animator::Damping::cinematic)) and
//! skips the follow controller.

use glam::Vec3;
use std::f64::consts::PI;

use crate::api::types::{BodyId, EclipseKind, MoonId};
use crate::core::registry::CelestialRegistry;
use crate::extensions::easing::{approach_vec3, lerp_vec3, Easing};
use crate::renderer::camera::CameraRig;
use crate::systems::animator::BodyAnimator;
use crate::systems::lighting::{SceneLighting, STARFIELD_DIMMED, STARFIELD_OPACITY};

pub const PHASE_COUNT: usize = 5;
pub const DEFAULT_PHASE_MS: f32 = 12_000.0;
/// Fraction of the remaining distance covered per tick while approaching
/// the first waypoint.
const APPROACH_FACTOR: f32 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraWaypoint {
    pub position: Vec3,
    pub target: Vec3,
}

const fn waypoint(position: [f32; 3], target: [f32; 3]) -> CameraWaypoint {
    CameraWaypoint {
        position: Vec3::from_array(position),
        target: Vec3::from_array(target),
    }
}

/// Wide alignment view, side view, close to Earth, totality, shadow on Earth.
pub const WAYPOINTS: [CameraWaypoint; PHASE_COUNT] = [
    waypoint([0.0, 20.0, 40.0], [0.0, 0.0, 0.0]),
    waypoint([25.0, 5.0, 0.0], [15.0, 0.0, 0.0]),
    waypoint([16.0, 2.0, 3.0], [15.0, 0.0, 0.0]),
    waypoint([14.0, 1.0, 1.0], [0.0, 0.0, 0.0]),
    waypoint([15.0, 8.0, 5.0], [15.0, 0.0, 0.0]),
];

/// Lighting values for one tick. `None` leaves the current value alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseEffects {
    pub ambient: Option<f32>,
    pub corona_opacity: Option<f32>,
}

/// Ambient and corona schedule as a function of phase and in-phase progress.
pub fn phase_effects(phase: usize, progress: f32) -> PhaseEffects {
    let (ambient, corona_opacity) = match phase {
        0 => (None, Some(0.0)),
        1 => (Some(0.5 - 0.25 * progress), None),
        2 => (Some(0.4 - 0.35 * progress), Some(0.3 * progress)),
        3 => (Some(0.08), Some(0.85)),
        4 => (Some(0.08 + 0.5 * progress), Some(0.85 - 0.9 * progress)),
        _ => (None, None),
    };
    PhaseEffects { ambient, corona_opacity }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Narration {
    pub title: &'static str,
    pub description: &'static str,
}

const SOLAR_NARRATION: [Narration; PHASE_COUNT] = [
    Narration {
        title: "Phase 1: Getting Ready (Alignment)",
        description: "We start far away so you can see the Sun, Earth and Moon line up. Think of it \
                      as three friends standing in a row — from our view, they look perfect when \
                      they line up. This helps you see how the solar eclipse can happen.",
    },
    Narration {
        title: "Phase 2: First Contact (Moon Moves In)",
        description: "Now the Moon slowly moves between the Earth and the Sun. You will see the Sun \
                      start to look a little bitten — that's the Moon covering it. Take your time, \
                      watch the motion.",
    },
    Narration {
        title: "Phase 3: Approaching Totality (Shadow Grows)",
        description: "The Moon's shadow stretches over the Earth. The light will change and things \
                      will get dimmer — like when clouds pass over the sun. We'll move closer so you \
                      can feel the scale.",
    },
    Narration {
        title: "Phase 4: Total Solar Eclipse (The Corona)",
        description: "For a brief magical moment the Sun is hidden and we can see the corona — a \
                      beautiful glowing ring. It's one of the most stunning sights in space. We'll \
                      slow down so you can enjoy every second.",
    },
    Narration {
        title: "Phase 5: The Shadow Passes (Ending)",
        description: "The Moon moves on and sunlight returns. The shadow sweeps away and everything \
                      goes back to normal. We'll pull back so you can see the full scene again.",
    },
];

const LUNAR_NARRATION: [Narration; PHASE_COUNT] = [
    Narration {
        title: "Phase 1: Getting Ready (Alignment)",
        description: "We start far away so you can see the Sun, Earth and Moon line up. Think of it \
                      as three friends standing in a row — but this time Earth is in the middle, \
                      blocking sunlight from reaching the Moon. This helps you see how the lunar \
                      eclipse can happen.",
    },
    Narration {
        title: "Phase 2: Entering Earth's Shadow (Penumbra)",
        description: "Now the Moon slowly moves into Earth's shadow. You will see the Moon start to \
                      look a little darker — that's Earth's shadow covering it. The Moon doesn't \
                      disappear, it just gets dimmer as Earth blocks the sunlight.",
    },
    Narration {
        title: "Phase 3: Deeper Shadow (Umbra Approaches)",
        description: "The Moon moves deeper into Earth's shadow. The light will change and the Moon \
                      will get much darker — like when you stand in someone's shadow. We'll move \
                      closer so you can see how Earth completely blocks direct sunlight.",
    },
    Narration {
        title: "Phase 4: Total Lunar Eclipse (Complete Shadow)",
        description: "For a moment the Moon is completely in Earth's shadow! Even though no direct \
                      sunlight reaches it, the Moon doesn't completely disappear. Some light still \
                      reaches it after bending through Earth's atmosphere, which is why we can still \
                      see it faintly.",
    },
    Narration {
        title: "Phase 5: Leaving the Shadow (Ending)",
        description: "The Moon moves out of Earth's shadow and returns to its normal bright color. \
                      The shadow passes away and everything goes back to normal. We'll pull back so \
                      you can see the full scene again.",
    },
];

pub fn narration(kind: EclipseKind, phase: usize) -> Option<&'static Narration> {
    match kind {
        EclipseKind::Solar => SOLAR_NARRATION.get(phase),
        EclipseKind::Lunar => LUNAR_NARRATION.get(phase),
    }
}

/// Everything the tour reads and writes besides its own state.
pub struct TourContext<'a> {
    pub animator: &'a mut BodyAnimator,
    pub rig: &'a mut CameraRig,
    pub lighting: &'a mut SceneLighting,
}

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourStep {
    /// No tour is running.
    Idle,
    /// Still running; `entered` is set on the tick a new phase begins.
    Running { phase: usize, entered: bool },
    /// The last phase completed and everything was restored.
    Finished,
}

#[derive(Debug, Clone)]
struct TourState {
    kind: EclipseKind,
    phase: usize,
    elapsed_ms: f32,
    saved_earth: f64,
    saved_moon: f64,
    saved_ambient: f32,
}

pub struct EclipseTourController {
    earth: Option<BodyId>,
    moon: Option<MoonId>,
    phase_ms: f32,
    state: Option<TourState>,
}

impl EclipseTourController {
    /// Resolves Earth and its first moon by name. Without them the tour
    /// can never start.
    pub fn new(registry: &CelestialRegistry, phase_ms: f32) -> Self {
        let earth = registry.find("Earth");
        let moon = earth
            .filter(|id| registry.body(*id).is_some_and(|b| !b.moons.is_empty()))
            .map(|id| MoonId::new(id, 0));
        Self {
            earth,
            moon,
            phase_ms: if phase_ms > 0.0 { phase_ms } else { DEFAULT_PHASE_MS },
            state: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    pub fn kind(&self) -> Option<EclipseKind> {
        self.state.as_ref().map(|s| s.kind)
    }

    pub fn phase(&self) -> Option<usize> {
        self.state.as_ref().map(|s| s.phase)
    }

    /// Progress through the current phase, in [0, 1).
    pub fn progress(&self) -> f32 {
        self.state.as_ref().map_or(0.0, |s| s.elapsed_ms / self.phase_ms)
    }

    pub fn progress_percent(&self) -> f32 {
        self.progress() * 100.0
    }

    pub fn narration(&self) -> Option<&'static Narration> {
        let state = self.state.as_ref()?;
        narration(state.kind, state.phase)
    }

    /// Start a tour, or stop the running one. Returns whether a tour is now active.
    pub fn start(&mut self, kind: EclipseKind, ctx: &mut TourContext<'_>) -> bool {
        if self.is_active() {
            self.stop(ctx);
            return false;
        }
        let (Some(earth), Some(moon)) = (self.earth, self.moon) else {
            log::warn!("eclipse tour unavailable: Earth or its Moon is missing");
            return false;
        };
        let (Some(saved_earth), Some(saved_moon)) =
            (ctx.animator.body_angle(earth), ctx.animator.moon_angle(moon))
        else {
            log::warn!("eclipse tour unavailable: Earth or its Moon has no pivot");
            return false;
        };

        ctx.animator.set_body_angle(earth, 0.0);
        let moon_angle = match kind {
            EclipseKind::Solar => 0.0,
            EclipseKind::Lunar => PI,
        };
        ctx.animator.set_moon_angle(moon, moon_angle);

        ctx.lighting.spawn_corona();
        ctx.lighting.set_starfield_opacity(STARFIELD_DIMMED);
        ctx.lighting.ui_hidden = true;

        self.state = Some(TourState {
            kind,
            phase: 0,
            elapsed_ms: 0.0,
            saved_earth,
            saved_moon,
            saved_ambient: ctx.lighting.ambient(),
        });
        log::info!("{kind:?} eclipse tour started");
        true
    }

    /// Restore everything the tour changed. No-op when idle.
    pub fn stop(&mut self, ctx: &mut TourContext<'_>) {
        let Some(state) = self.state.take() else {
            return;
        };
        if let Some(earth) = self.earth {
            ctx.animator.set_body_angle(earth, state.saved_earth);
        }
        if let Some(moon) = self.moon {
            ctx.animator.set_moon_angle(moon, state.saved_moon);
        }
        ctx.lighting.set_ambient(state.saved_ambient);
        ctx.lighting.remove_corona();
        ctx.lighting.set_starfield_opacity(STARFIELD_OPACITY);
        ctx.lighting.ui_hidden = false;
        log::info!("{:?} eclipse tour ended", state.kind);
    }

    pub fn tick(&mut self, wall_delta_ms: f32, ctx: &mut TourContext<'_>) -> TourStep {
        let phase_ms = self.phase_ms;
        let Some(state) = self.state.as_mut() else {
            return TourStep::Idle;
        };

        state.elapsed_ms += wall_delta_ms.max(0.0);
        let mut entered = false;
        if state.elapsed_ms >= phase_ms {
            state.phase += 1;
            state.elapsed_ms = 0.0;
            entered = true;
            if state.phase >= PHASE_COUNT {
                self.stop(ctx);
                return TourStep::Finished;
            }
        }

        let phase = state.phase;
        let progress = state.elapsed_ms / phase_ms;
        let current = WAYPOINTS[phase];
        if phase > 0 {
            let previous = WAYPOINTS[phase - 1];
            let t = Easing::SineInOut.apply(progress);
            ctx.rig.position = lerp_vec3(previous.position, current.position, t);
            ctx.rig.target = lerp_vec3(previous.target, current.target, t);
        } else {
            ctx.rig.position = approach_vec3(ctx.rig.position, current.position, APPROACH_FACTOR);
            ctx.rig.target = approach_vec3(ctx.rig.target, current.target, APPROACH_FACTOR);
        }

        let effects = phase_effects(phase, progress);
        if let Some(ambient) = effects.ambient {
            ctx.lighting.set_ambient(ambient);
        }
        if let Some(opacity) = effects.corona_opacity {
            ctx.lighting.set_corona_opacity(opacity);
        }

        TourStep::Running { phase, entered }
    }
}
