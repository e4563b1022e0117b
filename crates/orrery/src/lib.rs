pub mod api;
pub mod core;
pub mod catalog;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod provider;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::orrery::Orrery;
pub use api::config::SimConfig;
pub use api::error::{OrreryError, Result};
pub use api::types::{BodyId, MoonId, BodyKind, EclipseKind, FetchedKind, SimEvent};
pub use catalog::bodies::{CelestialBody, MoonDescriptor, CATALOG};
pub use catalog::belts::{AsteroidBelt, AsteroidBeltEntry, BeltKind};
pub use catalog::records::{RawRecord, parse_records};
pub use core::clock::{SimulationClock, FixedTimestep, WallClock, SystemWallClock, FixedWallClock};
pub use core::orbit::{OrbitalElements, KeplerMethod, solve_position};
pub use core::registry::{CelestialRegistry, FetchedObject};
pub use core::scene::{SceneBuffer, NodeState};
pub use renderer::camera::{CameraRig, CameraFrame};
pub use renderer::bloom::{BloomController, BloomMode, BloomParams, PresentPath};
pub use renderer::traits::{NodeId, Renderable, RenderTarget};
pub use input::queue::{Intent, IntentQueue};
pub use bridge::protocol::FrameLayout;
pub use provider::{DataProvider, FetchBatch, FetchSender, FetchInbox, load_real_objects};
pub use systems::follow::FollowTarget;
pub use systems::layers::{LayerId, LayerVisibility};
pub use systems::eclipse::EclipseTourController;

// Extensions: decoupled math helpers
pub use extensions::{Easing, lerp, lerp_vec3, PivotGraph, Pivot, PivotIndex};
