use glam::Vec3;

use crate::api::types::{BodyId, EclipseKind, MoonId};
use crate::renderer::bloom::BloomMode;
use crate::systems::layers::LayerId;

/// User intents the simulation understands.
/// The UI layer produces them; the simulation applies them at the start of a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Set the speed multiplier (0 tracks the wall clock). Negative values are ignored.
    SetSpeedMultiplier(f64),
    /// Add to the speed multiplier, clamped to [0, 10].
    AdjustSpeed(f64),
    TogglePause,
    ToggleLayer(LayerId),
    FollowPlanet(BodyId),
    FollowMoon(MoonId),
    FollowSun,
    StopFollowing,
    /// Same as `StopFollowing`.
    ResetView,
    /// Toggles: a second start while a tour runs stops it.
    StartEclipseTour(EclipseKind),
    StopEclipseTour,
    SetBloomMode(BloomMode),
    SetBloomStrength(f32),
    /// Ray cast from the camera, e.g. for a click.
    Pick { origin: Vec3, direction: Vec3 },
}

impl Intent {
    /// Decode the compact form used by the JS bridge: `kind` plus three
    /// float arguments. Unknown kinds and malformed arguments yield `None`.
    ///
    /// | kind | intent | args |
    /// |---|---|---|
    /// | 1 | SetSpeedMultiplier | a = multiplier |
    /// | 2 | AdjustSpeed | a = delta |
    /// | 3 | TogglePause | |
    /// | 4 | ToggleLayer | a = layer code |
    /// | 5 | FollowPlanet | a = body |
    /// | 6 | FollowMoon | a = body, b = moon |
    /// | 7 | FollowSun | |
    /// | 8 | StopFollowing | |
    /// | 9 | ResetView | |
    /// | 10 | StartEclipseTour | a = 0 solar, 1 lunar |
    /// | 11 | StopEclipseTour | |
    /// | 12 | SetBloomMode | a = 0 auto, 1 manual |
    /// | 13 | SetBloomStrength | a = strength |
    pub fn from_wire(kind: u32, a: f32, b: f32, _c: f32) -> Option<Intent> {
        let index = |v: f32| (v.is_finite() && v >= 0.0).then_some(v as u32);
        let intent = match kind {
            1 => Intent::SetSpeedMultiplier(a as f64),
            2 => Intent::AdjustSpeed(a as f64),
            3 => Intent::TogglePause,
            4 => Intent::ToggleLayer(LayerId::from_code(index(a)?)?),
            5 => Intent::FollowPlanet(BodyId(index(a)?)),
            6 => Intent::FollowMoon(MoonId::new(BodyId(index(a)?), index(b)?)),
            7 => Intent::FollowSun,
            8 => Intent::StopFollowing,
            9 => Intent::ResetView,
            10 => Intent::StartEclipseTour(match index(a)? {
                0 => EclipseKind::Solar,
                1 => EclipseKind::Lunar,
                _ => return None,
            }),
            11 => Intent::StopEclipseTour,
            12 => Intent::SetBloomMode(match index(a)? {
                0 => BloomMode::Auto,
                1 => BloomMode::Manual,
                _ => return None,
            }),
            13 => Intent::SetBloomStrength(a),
            _ => return None,
        };
        Some(intent)
    }
}

/// A queue of pending intents.
/// The UI pushes at any time; the simulation drains once per tick.
pub struct IntentQueue {
    intents: Vec<Intent>,
}

impl IntentQueue {
    pub fn new() -> Self {
        Self {
            intents: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, intent: Intent) {
        self.intents.push(intent);
    }

    /// Take every pending intent in arrival order.
    pub fn drain(&mut self) -> Vec<Intent> {
        std::mem::take(&mut self.intents)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Intent> {
        self.intents.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }
}

impl Default for IntentQueue {
    fn default() -> Self {
        Self::new()
    }
}
