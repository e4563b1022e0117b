//! Math helpers shared by the animator and the camera controllers.
//! Decoupled from the registry and the scene.

pub mod easing;
pub mod pivot;

pub use easing::{Easing, lerp, lerp_vec3, ease_vec3, approach_vec3};
pub use pivot::{PivotGraph, Pivot, PivotIndex};
