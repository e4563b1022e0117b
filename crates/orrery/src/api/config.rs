use serde::{Deserialize, Serialize};

use crate::api::error::Result;
use crate::core::orbit::KeplerMethod;

/// Configuration for the simulation, optionally supplied as JSON by the host.
/// Every field falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed timestep in milliseconds (default: 1000/60).
    pub fixed_dt_ms: f32,
    /// Tick rate the speed multiplier is defined against (default: 60).
    pub frames_per_second: f64,
    /// Simulated milliseconds per second of ticks at multiplier 1 (default: one day).
    pub base_ms_per_tick: f64,
    /// Speed multiplier at startup (default: 0.4).
    pub initial_speed: f64,
    /// Multiplier substituted while tracking wall-clock time (speed 0).
    pub realtime_multiplier: f64,
    /// Scene units per astronomical unit for fetched objects.
    pub au_to_scene: f32,
    /// Length of one eclipse tour phase in milliseconds.
    pub eclipse_phase_ms: f32,
    /// Simulated start date. `None` starts at the host's current date.
    pub start_days_from_j2000: Option<f64>,
    /// Maximum near-earth objects kept from one feed.
    pub neo_limit: usize,
    /// Maximum sentry-risk objects kept from one feed.
    pub sentry_limit: usize,
    /// Maximum comets kept from one feed.
    pub comet_limit: usize,
    /// Seed for belt generation and comet placement.
    pub belt_seed: u64,
    /// Kepler equation solver used for fetched objects.
    pub kepler_method: KeplerMethod,
    /// Maximum number of events per frame (default: 64).
    pub max_events: usize,
    /// Node records reserved in the frame buffer (default: 4096).
    pub max_nodes: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fixed_dt_ms: 1000.0 / 60.0,
            frames_per_second: 60.0,
            base_ms_per_tick: 86_400_000.0,
            initial_speed: 0.4,
            realtime_multiplier: 0.0001,
            au_to_scene: 15.0,
            eclipse_phase_ms: 12_000.0,
            start_days_from_j2000: None,
            neo_limit: 30,
            sentry_limit: 20,
            comet_limit: 15,
            belt_seed: 0x5EED_0F_A57E_401D,
            kepler_method: KeplerMethod::FixedPoint,
            max_events: 64,
            max_nodes: 4096,
        }
    }
}

impl SimConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Simulated milliseconds that make up one animation step at multiplier 1.
    pub fn ms_per_step(&self) -> f64 {
        self.base_ms_per_tick / self.frames_per_second
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = SimConfig::from_json(r#"{ "initial_speed": 2.0, "neo_limit": 5 }"#).unwrap();
        assert_eq!(config.initial_speed, 2.0);
        assert_eq!(config.neo_limit, 5);
        assert_eq!(config.au_to_scene, 15.0);
        assert_eq!(config.eclipse_phase_ms, 12_000.0);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(SimConfig::from_json("{ initial_speed: }").is_err());
    }

    #[test]
    fn one_step_is_a_sixtieth_of_a_day() {
        let config = SimConfig::default();
        assert_eq!(config.ms_per_step(), 1_440_000.0);
    }
}
