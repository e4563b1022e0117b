use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::renderer::traits::RenderTarget;

/// Distance from the Sun at which the bloom is strongest.
const NEAR: f32 = 10.0;
/// Distance beyond which the bloom stays at its weakest.
const FAR: f32 = 100.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BloomMode {
    /// Strength follows the camera's distance to the Sun.
    #[default]
    Auto,
    /// Strength is set by the user.
    Manual,
}

/// Parameters handed to the composer each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BloomParams {
    pub strength: f32,
    pub radius: f32,
    pub threshold: f32,
}

#[derive(Debug, Clone)]
pub struct BloomController {
    mode: BloomMode,
    manual_strength: f32,
    params: BloomParams,
}

impl Default for BloomController {
    fn default() -> Self {
        Self {
            mode: BloomMode::Auto,
            manual_strength: 1.0,
            params: BloomParams { strength: 1.5, radius: 1.0, threshold: 0.05 },
        }
    }
}

impl BloomController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_mode(&mut self, mode: BloomMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> BloomMode {
        self.mode
    }

    /// Set the manual strength (non-negative). Has no visible effect in auto mode.
    pub fn set_strength(&mut self, strength: f32) {
        if strength.is_finite() {
            self.manual_strength = strength.max(0.0);
        }
    }

    /// Recompute for the current camera position; the Sun sits at `sun`.
    pub fn update(&mut self, camera: Vec3, sun: Vec3) -> BloomParams {
        let n = ((camera.distance(sun) - NEAR) / (FAR - NEAR)).clamp(0.0, 1.0);
        let closeness = 1.0 - n;
        let (strength, radius) = match self.mode {
            BloomMode::Auto => (0.5 + closeness, 0.6 + closeness * 0.4),
            BloomMode::Manual => (self.manual_strength, 0.6 + closeness * 0.2),
        };
        self.params.strength = strength;
        self.params.radius = radius;
        self.params
    }

    pub fn params(&self) -> BloomParams {
        self.params
    }
}

/// How the last frame reached the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentPath {
    Composited,
    Direct,
}

/// Draw through the composer, falling back to direct rendering on failure.
/// The fallback is decided per frame, so a recovered composer is used again.
pub fn present(target: &mut dyn RenderTarget, bloom: &BloomParams) -> PresentPath {
    match target.composite(bloom) {
        Ok(()) => PresentPath::Composited,
        Err(e) => {
            log::warn!("{e}; rendering without post-processing");
            target.render_direct();
            PresentPath::Direct
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_is_strongest_near_the_sun() {
        let mut bloom = BloomController::new();
        let near = bloom.update(Vec3::new(5.0, 0.0, 0.0), Vec3::ZERO);
        assert!((near.strength - 1.5).abs() < 1e-6);
        assert!((near.radius - 1.0).abs() < 1e-6);

        let far = bloom.update(Vec3::new(0.0, 0.0, 500.0), Vec3::ZERO);
        assert!((far.strength - 0.5).abs() < 1e-6);
        assert!((far.radius - 0.6).abs() < 1e-6);
    }

    #[test]
    fn auto_midpoint() {
        let mut bloom = BloomController::new();
        let mid = bloom.update(Vec3::new(55.0, 0.0, 0.0), Vec3::ZERO);
        assert!((mid.strength - 1.0).abs() < 1e-5);
        assert!((mid.radius - 0.8).abs() < 1e-5);
    }

    #[test]
    fn manual_keeps_user_strength() {
        let mut bloom = BloomController::new();
        bloom.set_mode(BloomMode::Manual);
        bloom.set_strength(2.25);
        let p = bloom.update(Vec3::new(5.0, 0.0, 0.0), Vec3::ZERO);
        assert_eq!(p.strength, 2.25);
        assert!((p.radius - 0.8).abs() < 1e-6);
        assert_eq!(p.threshold, 0.05);
    }

    #[test]
    fn negative_strength_is_clamped() {
        let mut bloom = BloomController::new();
        bloom.set_mode(BloomMode::Manual);
        bloom.set_strength(-3.0);
        assert_eq!(bloom.update(Vec3::ZERO, Vec3::ZERO).strength, 0.0);
    }
}
