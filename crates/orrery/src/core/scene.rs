use std::collections::HashMap;

use glam::Vec3;

use crate::api::error::{OrreryError, Result};
use crate::renderer::bloom::BloomParams;
use crate::renderer::traits::{Axis, MaterialProperty, NodeId, RenderTarget, Renderable};

/// Last values pushed to one scene object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeState {
    pub position: Vec3,
    /// Euler angles (x, y, z).
    pub rotation: Vec3,
    pub visible: bool,
    pub emissive: f32,
    pub opacity: f32,
}

impl Default for NodeState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            visible: true,
            emissive: 0.0,
            opacity: 1.0,
        }
    }
}

impl Renderable for NodeState {
    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn set_rotation(&mut self, axis: Axis, angle: f32) {
        match axis {
            Axis::X => self.rotation.x = angle,
            Axis::Y => self.rotation.y = angle,
            Axis::Z => self.rotation.z = angle,
        }
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn world_position(&self) -> Vec3 {
        self.position
    }

    fn set_material_property(&mut self, property: MaterialProperty, value: f32) {
        match property {
            MaterialProperty::EmissiveIntensity => self.emissive = value,
            MaterialProperty::Opacity => self.opacity = value,
        }
    }
}

/// In-memory render target: a flat, insertion-ordered store of node states.
/// The web bridge serializes it into the frame buffer for the JS renderer.
/// Designed for a few thousand nodes.
pub struct SceneBuffer {
    nodes: Vec<(NodeId, NodeState)>,
    index: HashMap<NodeId, usize>,
    composite_available: bool,
    last_bloom: Option<BloomParams>,
    frames: u64,
}

impl SceneBuffer {
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            composite_available: true,
            last_bloom: None,
            frames: 0,
        }
    }

    pub fn get(&self, node: NodeId) -> Option<&NodeState> {
        self.index.get(&node).map(|&i| &self.nodes[i].1)
    }

    pub fn get_mut(&mut self, node: NodeId) -> &mut NodeState {
        let next = self.nodes.len();
        let i = *self.index.entry(node).or_insert(next);
        if i == next {
            self.nodes.push((node, NodeState::default()));
        }
        &mut self.nodes[i].1
    }

    pub fn iter(&self) -> impl Iterator<Item = &(NodeId, NodeState)> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Mark the compositor as (un)usable, e.g. when the host reports a failure.
    pub fn set_composite_available(&mut self, available: bool) {
        self.composite_available = available;
    }

    /// Bloom parameters of the last composited frame; `None` if it went direct.
    pub fn last_bloom(&self) -> Option<BloomParams> {
        self.last_bloom
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for SceneBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderTarget for SceneBuffer {
    fn renderable(&mut self, node: NodeId) -> Option<&mut dyn Renderable> {
        Some(self.get_mut(node))
    }

    fn composite(&mut self, bloom: &BloomParams) -> Result<()> {
        if !self.composite_available {
            return Err(OrreryError::Rendering("compositor unavailable".into()));
        }
        self.last_bloom = Some(*bloom);
        self.frames += 1;
        Ok(())
    }

    fn render_direct(&mut self) {
        self.last_bloom = None;
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::BodyId;
    use crate::renderer::bloom::{present, PresentPath};

    #[test]
    fn nodes_are_created_on_first_touch() {
        let mut scene = SceneBuffer::new();
        assert!(scene.get(NodeId::Sun).is_none());
        scene.get_mut(NodeId::Sun).set_position(Vec3::ONE);
        scene.get_mut(NodeId::Body(BodyId(2))).set_visible(false);
        scene.get_mut(NodeId::Sun).set_rotation(Axis::Y, 0.5);
        assert_eq!(scene.len(), 2);
        let sun = scene.get(NodeId::Sun).unwrap();
        assert_eq!(sun.position, Vec3::ONE);
        assert_eq!(sun.rotation.y, 0.5);
        assert!(!scene.get(NodeId::Body(BodyId(2))).unwrap().visible);
    }

    #[test]
    fn insertion_order_is_kept() {
        let mut scene = SceneBuffer::new();
        scene.get_mut(NodeId::Corona);
        scene.get_mut(NodeId::Sun);
        let order: Vec<_> = scene.iter().map(|(id, _)| *id).collect();
        assert_eq!(order, vec![NodeId::Corona, NodeId::Sun]);
    }

    #[test]
    fn material_properties() {
        let mut scene = SceneBuffer::new();
        let node = scene.get_mut(NodeId::OrbitRing(BodyId(9)));
        node.set_material_property(MaterialProperty::Opacity, 0.25);
        node.set_material_property(MaterialProperty::EmissiveIntensity, 0.07);
        let node = scene.get(NodeId::OrbitRing(BodyId(9))).unwrap();
        assert_eq!((node.opacity, node.emissive), (0.25, 0.07));
    }

    #[test]
    fn present_falls_back_every_frame_while_broken() {
        let mut scene = SceneBuffer::new();
        let bloom = BloomParams { strength: 1.0, radius: 0.8, threshold: 0.05 };
        assert_eq!(present(&mut scene, &bloom), PresentPath::Composited);
        assert_eq!(scene.last_bloom(), Some(bloom));

        scene.set_composite_available(false);
        for _ in 0..3 {
            assert_eq!(present(&mut scene, &bloom), PresentPath::Direct);
        }
        assert_eq!(scene.last_bloom(), None);
        assert_eq!(scene.frames(), 4);

        scene.set_composite_available(true);
        assert_eq!(present(&mut scene, &bloom), PresentPath::Composited);
    }
}
