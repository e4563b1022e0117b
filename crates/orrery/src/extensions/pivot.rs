//! Pivot hierarchy: each node orbits its parent's origin on the ecliptic
//! (rotation about +Y) and spins independently of that orbit.
//!
//! Usage:
//! ```text
//! let mut graph = PivotGraph::new();
//! let earth = graph.add_root(Pivot::new(15.0, 3.45));
//! let moon = graph.add_child(earth, Pivot::new(2.5, 1.2));
//! graph.propagate();
//! let p = graph.world_position(moon);
//! ```

use glam::{Quat, Vec3};

/// Handle into a [`PivotGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PivotIndex(u32);

impl PivotIndex {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Local orbital state of one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pivot {
    /// Distance from the parent's origin.
    pub radius: f32,
    /// Orbital angle around the parent (radians). Only sin/cos are read,
    /// so it is left unwrapped.
    pub angle: f64,
    /// Self-rotation about the body's own Y axis. Does not affect children.
    pub spin: f64,
}

impl Pivot {
    pub fn new(radius: f32, angle: f64) -> Self {
        Self { radius, angle, spin: 0.0 }
    }

    /// Offset from the parent's origin.
    pub fn offset(&self) -> Vec3 {
        Quat::from_rotation_y(self.angle as f32) * Vec3::new(self.radius, 0.0, 0.0)
    }
}

#[derive(Debug, Clone)]
struct PivotNode {
    parent: Option<PivotIndex>,
    local: Pivot,
    world: Vec3,
}

/// Arena of pivots. Parents are always inserted before their children, so
/// one forward pass propagates world positions.
#[derive(Debug, Default, Clone)]
pub struct PivotGraph {
    nodes: Vec<PivotNode>,
    /// Set when any local changes, cleared after propagate.
    dirty: bool,
}

impl PivotGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_root(&mut self, local: Pivot) -> PivotIndex {
        self.push(None, local)
    }

    pub fn add_child(&mut self, parent: PivotIndex, local: Pivot) -> PivotIndex {
        self.push(Some(parent), local)
    }

    fn push(&mut self, parent: Option<PivotIndex>, local: Pivot) -> PivotIndex {
        let index = PivotIndex(self.nodes.len() as u32);
        self.nodes.push(PivotNode { parent, local, world: Vec3::ZERO });
        self.dirty = true;
        index
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn local(&self, index: PivotIndex) -> Option<&Pivot> {
        self.nodes.get(index.index()).map(|n| &n.local)
    }

    pub fn local_mut(&mut self, index: PivotIndex) -> Option<&mut Pivot> {
        self.dirty = true;
        self.nodes.get_mut(index.index()).map(|n| &mut n.local)
    }

    pub fn parent(&self, index: PivotIndex) -> Option<PivotIndex> {
        self.nodes.get(index.index()).and_then(|n| n.parent)
    }

    /// Iterate every local mutably, e.g. for a bulk advance.
    pub fn locals_mut(&mut self) -> impl Iterator<Item = &mut Pivot> {
        self.dirty = true;
        self.nodes.iter_mut().map(|n| &mut n.local)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Recompute world positions from locals.
    pub fn propagate(&mut self) {
        if !self.dirty {
            return;
        }
        for i in 0..self.nodes.len() {
            let origin = match self.nodes[i].parent {
                Some(p) => self.nodes[p.index()].world,
                None => Vec3::ZERO,
            };
            self.nodes[i].world = origin + self.nodes[i].local.offset();
        }
        self.dirty = false;
    }

    /// World position as of the last propagate.
    pub fn world_position(&self, index: PivotIndex) -> Option<Vec3> {
        self.nodes.get(index.index()).map(|n| n.world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn root_orbits_origin() {
        let mut graph = PivotGraph::new();
        let p = graph.add_root(Pivot::new(10.0, 0.0));
        graph.propagate();
        assert!(approx(graph.world_position(p).unwrap(), Vec3::new(10.0, 0.0, 0.0)));

        graph.local_mut(p).unwrap().angle = FRAC_PI_2;
        graph.propagate();
        // Rotation about +Y carries +X toward -Z
        assert!(approx(graph.world_position(p).unwrap(), Vec3::new(0.0, 0.0, -10.0)));
    }

    #[test]
    fn child_follows_parent() {
        let mut graph = PivotGraph::new();
        let planet = graph.add_root(Pivot::new(15.0, 0.0));
        let moon = graph.add_child(planet, Pivot::new(2.5, 0.0));
        graph.propagate();
        assert!(approx(graph.world_position(moon).unwrap(), Vec3::new(17.5, 0.0, 0.0)));

        graph.local_mut(planet).unwrap().angle = FRAC_PI_2;
        graph.propagate();
        assert!(approx(graph.world_position(moon).unwrap(), Vec3::new(2.5, 0.0, -15.0)));
    }

    #[test]
    fn spin_does_not_move_children() {
        let mut graph = PivotGraph::new();
        let planet = graph.add_root(Pivot::new(15.0, 0.0));
        let moon = graph.add_child(planet, Pivot::new(2.5, 0.0));
        graph.propagate();
        let before = graph.world_position(moon).unwrap();
        graph.local_mut(planet).unwrap().spin = 1.3;
        graph.propagate();
        assert_eq!(graph.world_position(moon).unwrap(), before);
    }

    #[test]
    fn propagate_clears_dirty() {
        let mut graph = PivotGraph::new();
        graph.add_root(Pivot::new(1.0, 0.0));
        assert!(graph.is_dirty());
        graph.propagate();
        assert!(!graph.is_dirty());
        assert_eq!(graph.parent(PivotIndex(0)), None);
    }
}
