//! Contract between the simulation and whatever draws it.
//!
//! The simulation never owns meshes or materials. It addresses scene objects
//! by [`NodeId`] and pushes transforms and material values through
//! [`Renderable`]; the host (the JS renderer behind the frame buffer, or a
//! native backend) decides how they look.

use glam::Vec3;

use crate::api::error::Result;
use crate::api::types::{BodyId, FetchedKind, MoonId};
use crate::catalog::belts::BeltKind;
use crate::renderer::bloom::BloomParams;

/// Every object the simulation positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeId {
    Sun,
    Body(BodyId),
    Moon(MoonId),
    /// Orbit ring drawn around the Sun at a body's distance.
    OrbitRing(BodyId),
    BeltEntry { belt: BeltKind, index: u32 },
    Fetched { kind: FetchedKind, index: u32 },
    Corona,
    Starfield,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialProperty {
    EmissiveIntensity,
    Opacity,
}

/// A scene object the renderer exposes to the simulation.
pub trait Renderable {
    fn set_position(&mut self, position: Vec3);
    fn set_rotation(&mut self, axis: Axis, angle: f32);
    fn set_visible(&mut self, visible: bool);
    fn world_position(&self) -> Vec3;
    fn set_material_property(&mut self, property: MaterialProperty, value: f32);
}

/// The rendering collaborator as a whole.
pub trait RenderTarget {
    /// The object for `node`, or `None` if the renderer has none.
    fn renderable(&mut self, node: NodeId) -> Option<&mut dyn Renderable>;

    /// Draw through the post-processing (bloom) composer.
    fn composite(&mut self, bloom: &BloomParams) -> Result<()>;

    /// Draw straight to the screen, bypassing post-processing.
    fn render_direct(&mut self);
}
