//! Scene-wide lighting the eclipse tour drives: ambient intensity, the
//! corona ring around the Sun, and the starfield's opacity.
//!
//! The Sun's point light is owned by the renderer and never changes; only
//! the values here are pushed each frame.

/// Ambient intensity at startup.
pub const DEFAULT_AMBIENT: f32 = 0.5;
/// Starfield opacity outside the tour.
pub const STARFIELD_OPACITY: f32 = 0.9;
/// Starfield opacity while the tour runs.
pub const STARFIELD_DIMMED: f32 = 0.65;

/// Flat ring shown around the Sun during totality. Always faces the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corona {
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Always within [0, 1].
    pub opacity: f32,
}

impl Default for Corona {
    fn default() -> Self {
        Self {
            inner_radius: 5.2,
            outer_radius: 8.0,
            opacity: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SceneLighting {
    ambient: f32,
    corona: Option<Corona>,
    starfield_opacity: f32,
    /// Set while UI chrome should be hidden (cinematic mode).
    pub ui_hidden: bool,
}

impl SceneLighting {
    pub fn new() -> Self {
        Self {
            ambient: DEFAULT_AMBIENT,
            corona: None,
            starfield_opacity: STARFIELD_OPACITY,
            ui_hidden: false,
        }
    }

    pub fn ambient(&self) -> f32 {
        self.ambient
    }

    pub fn set_ambient(&mut self, intensity: f32) {
        self.ambient = intensity.max(0.0);
    }

    /// Spawn a fresh, fully transparent corona, replacing any existing one.
    pub fn spawn_corona(&mut self) {
        self.corona = Some(Corona::default());
    }

    pub fn remove_corona(&mut self) {
        self.corona = None;
    }

    pub fn corona(&self) -> Option<&Corona> {
        self.corona.as_ref()
    }

    /// No-op when no corona exists.
    pub fn set_corona_opacity(&mut self, opacity: f32) {
        if let Some(corona) = self.corona.as_mut() {
            corona.opacity = opacity.clamp(0.0, 1.0);
        }
    }

    pub fn starfield_opacity(&self) -> f32 {
        self.starfield_opacity
    }

    pub fn set_starfield_opacity(&mut self, opacity: f32) {
        self.starfield_opacity = opacity.clamp(0.0, 1.0);
    }
}

impl Default for SceneLighting {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let lighting = SceneLighting::new();
        assert_eq!(lighting.ambient(), 0.5);
        assert_eq!(lighting.starfield_opacity(), 0.9);
        assert!(lighting.corona().is_none());
        assert!(!lighting.ui_hidden);
    }

    #[test]
    fn corona_opacity_is_clamped() {
        let mut lighting = SceneLighting::new();
        lighting.set_corona_opacity(0.5);
        assert!(lighting.corona().is_none());

        lighting.spawn_corona();
        let corona = lighting.corona().unwrap();
        assert_eq!((corona.inner_radius, corona.outer_radius, corona.opacity), (5.2, 8.0, 0.0));

        lighting.set_corona_opacity(-0.05);
        assert_eq!(lighting.corona().unwrap().opacity, 0.0);
        lighting.set_corona_opacity(1.4);
        assert_eq!(lighting.corona().unwrap().opacity, 1.0);

        lighting.remove_corona();
        assert!(lighting.corona().is_none());
    }
}
