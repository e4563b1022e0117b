pub mod clock;
pub mod orbit;
pub mod registry;
pub mod rng;
pub mod scene;
