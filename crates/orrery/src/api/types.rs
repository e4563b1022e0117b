use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Index of a body in the static catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

impl BodyId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A moon, addressed by its parent body and its position in the parent's moon list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoonId {
    pub body: BodyId,
    pub moon: u32,
}

impl MoonId {
    pub fn new(body: BodyId, moon: u32) -> Self {
        Self { body, moon }
    }
}

/// Catalog classification of a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    Planet,
    Dwarf,
    Asteroid,
    Tno,
}

/// Which alignment the eclipse tour stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EclipseKind {
    /// Moon between Sun and Earth.
    Solar,
    /// Earth between Sun and Moon.
    Lunar,
}

/// The dynamic collections filled by the data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchedKind {
    NearEarth,
    Sentry,
    Comet,
    FamousAsteroid,
}

impl FetchedKind {
    pub const ALL: [FetchedKind; 4] = [
        FetchedKind::FamousAsteroid,
        FetchedKind::NearEarth,
        FetchedKind::Sentry,
        FetchedKind::Comet,
    ];

    /// Stable numeric tag used on the JS side of the bridge.
    pub fn code(self) -> u32 {
        match self {
            FetchedKind::NearEarth => 0,
            FetchedKind::Sentry => 1,
            FetchedKind::Comet => 2,
            FetchedKind::FamousAsteroid => 3,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(FetchedKind::NearEarth),
            1 => Some(FetchedKind::Sentry),
            2 => Some(FetchedKind::Comet),
            3 => Some(FetchedKind::FamousAsteroid),
            _ => None,
        }
    }
}

/// An event communicated from Rust to the UI layer via the frame buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SimEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl SimEvent {
    pub const FLOATS: usize = 4;

    /// a = year, b = month, c = day of the simulated date.
    pub const DATE: f32 = 1.0;
    /// a = follow kind (0 none, 1 planet, 2 moon, 3 sun), b = body, c = moon.
    pub const FOLLOW_CHANGED: f32 = 2.0;
    /// a = eclipse kind (0 solar, 1 lunar), b = phase.
    pub const TOUR_PHASE: f32 = 3.0;
    /// Tour finished or was stopped.
    pub const TOUR_ENDED: f32 = 4.0;
    /// a = pick kind (1 body, 2 moon), b = body, c = moon.
    pub const SELECTED: f32 = 5.0;
    /// a = fetched kind code, b = objects merged.
    pub const FETCH_MERGED: f32 = 6.0;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}
