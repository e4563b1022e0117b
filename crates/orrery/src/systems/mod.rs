pub mod animator;
pub mod eclipse;
pub mod follow;
pub mod layers;
pub mod lighting;
pub mod picking;
