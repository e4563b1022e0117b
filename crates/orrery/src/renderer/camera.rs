use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Canonical overview position.
pub const DEFAULT_POSITION: Vec3 = Vec3::new(0.0, 30.0, 70.0);
/// Zoom bounds at startup.
pub const STARTUP_ZOOM: (f32, f32) = (8.0, 200.0);
/// Zoom bounds after following stops.
pub const WIDE_ZOOM: (f32, f32) = (0.1, 1000.0);

/// Orbit-style camera state shared with the camera-control collaborator:
/// an eye position, a look-at target and the allowed eye-target distance.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    pub position: Vec3,
    pub target: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
}

/// Wire form of the camera: eye then target.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct CameraFrame {
    pub position: [f32; 3],
    pub target: [f32; 3],
}

impl CameraFrame {
    pub const FLOATS: usize = 6;
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            position: DEFAULT_POSITION,
            target: Vec3::ZERO,
            min_distance: STARTUP_ZOOM.0,
            max_distance: STARTUP_ZOOM.1,
        }
    }
}

impl CameraRig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the overview with wide zoom bounds.
    pub fn reset(&mut self) {
        self.position = DEFAULT_POSITION;
        self.target = Vec3::ZERO;
        self.set_zoom_bounds(WIDE_ZOOM.0, WIDE_ZOOM.1);
    }

    pub fn set_zoom_bounds(&mut self, min: f32, max: f32) {
        self.min_distance = min.min(max);
        self.max_distance = max.max(min);
    }

    /// Place the eye and aim in one step.
    pub fn look_from(&mut self, position: Vec3, target: Vec3) {
        self.position = position;
        self.target = target;
    }

    /// Move eye and target together, keeping the view direction.
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
        self.target += delta;
    }

    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.position.distance(point)
    }

    /// Pull the eye along the view ray so the distance sits inside the zoom bounds.
    pub fn clamp_zoom(&mut self) {
        let offset = self.position - self.target;
        let len = offset.length();
        if len <= f32::EPSILON {
            return;
        }
        let clamped = len.clamp(self.min_distance, self.max_distance);
        if clamped != len {
            self.position = self.target + offset * (clamped / len);
        }
    }

    pub fn frame(&self) -> CameraFrame {
        CameraFrame {
            position: self.position.to_array(),
            target: self.target.to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_overview() {
        let rig = CameraRig::new();
        assert_eq!(rig.position, Vec3::new(0.0, 30.0, 70.0));
        assert_eq!(rig.target, Vec3::ZERO);
        assert_eq!((rig.min_distance, rig.max_distance), STARTUP_ZOOM);
    }

    #[test]
    fn reset_widens_zoom() {
        let mut rig = CameraRig::new();
        rig.look_from(Vec3::splat(5.0), Vec3::ONE);
        rig.set_zoom_bounds(1.0, 2.0);
        rig.reset();
        assert_eq!(rig.position, DEFAULT_POSITION);
        assert_eq!((rig.min_distance, rig.max_distance), WIDE_ZOOM);
    }

    #[test]
    fn translate_keeps_offset() {
        let mut rig = CameraRig::new();
        let before = rig.position - rig.target;
        rig.translate(Vec3::new(3.0, -1.0, 2.0));
        assert_eq!(rig.position - rig.target, before);
        assert_eq!(rig.target, Vec3::new(3.0, -1.0, 2.0));
    }

    #[test]
    fn clamp_zoom_pulls_eye_in() {
        let mut rig = CameraRig::new();
        rig.look_from(Vec3::new(0.0, 0.0, 500.0), Vec3::ZERO);
        rig.set_zoom_bounds(10.0, 100.0);
        rig.clamp_zoom();
        assert!((rig.distance() - 100.0).abs() < 1e-3);
        assert!(rig.position.x.abs() < 1e-6);
    }

    #[test]
    fn bounds_are_ordered() {
        let mut rig = CameraRig::new();
        rig.set_zoom_bounds(50.0, 5.0);
        assert_eq!((rig.min_distance, rig.max_distance), (5.0, 50.0));
    }

    #[test]
    fn frame_is_flat() {
        let rig = CameraRig::new();
        let frame = rig.frame();
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&frame));
        assert_eq!(floats.len(), CameraFrame::FLOATS);
        assert_eq!(floats[1], 30.0);
    }
}
