pub mod bloom;
pub mod camera;
pub mod traits;

// Re-export key types for convenient access
pub use bloom::{BloomController, BloomMode, BloomParams, PresentPath};
pub use traits::{Axis, MaterialProperty, NodeId, RenderTarget, Renderable};
