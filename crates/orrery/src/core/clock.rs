//! Simulated calendar time and the fixed-step accumulator that drives it.

use crate::api::config::SimConfig;
use crate::core::orbit::{days_to_date, unix_ms_to_days};

/// Source of wall-clock time. Native hosts use [`SystemWallClock`]; the
/// browser bridge supplies `Date.now()`.
pub trait WallClock {
    /// Milliseconds since the Unix epoch.
    fn now_unix_ms(&self) -> f64;
}

/// Wall clock backed by `std::time::SystemTime`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemWallClock;

impl WallClock for SystemWallClock {
    fn now_unix_ms(&self) -> f64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }
}

/// A clock frozen at a fixed instant. Useful for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedWallClock(pub f64);

impl WallClock for FixedWallClock {
    fn now_unix_ms(&self) -> f64 {
        self.0
    }
}

/// Owns the simulated date, the speed multiplier and the pause flag.
///
/// A multiplier of 0 means "track the wall clock": the date snaps to now on
/// every tick and a tiny stand-in multiplier keeps dependent motion alive.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    days_from_j2000: f64,
    speed: f64,
    paused: bool,
    ms_per_step: f64,
    realtime_multiplier: f64,
    step_ms: f64,
    last_multiplier: f64,
}

impl SimulationClock {
    pub fn new(config: &SimConfig, start_days_from_j2000: f64) -> Self {
        Self {
            days_from_j2000: start_days_from_j2000,
            speed: config.initial_speed.max(0.0),
            paused: false,
            ms_per_step: config.ms_per_step(),
            realtime_multiplier: config.realtime_multiplier,
            step_ms: 1000.0 / config.frames_per_second,
            last_multiplier: 0.0,
        }
    }

    /// Advance one tick. Returns the simulated milliseconds that elapsed.
    ///
    /// `wall_delta_ms` is normally one fixed step; longer deltas advance
    /// proportionally so a slow host does not slow the calendar.
    pub fn tick(&mut self, wall_delta_ms: f64, wall: &dyn WallClock) -> f64 {
        if self.paused {
            self.last_multiplier = 0.0;
            return 0.0;
        }
        let ticks = (wall_delta_ms / self.step_ms).max(0.0);
        if self.speed == 0.0 {
            self.days_from_j2000 = unix_ms_to_days(wall.now_unix_ms());
            self.last_multiplier = self.realtime_multiplier * ticks;
            return self.ms_per_step * self.last_multiplier;
        }
        self.last_multiplier = self.speed * ticks;
        let simulated_ms = self.ms_per_step * self.last_multiplier;
        self.days_from_j2000 += simulated_ms / 86_400_000.0;
        simulated_ms
    }

    /// Convert simulated milliseconds into animation steps (multiplier units).
    pub fn steps(&self, simulated_ms: f64) -> f64 {
        simulated_ms / self.ms_per_step
    }

    /// Set the speed multiplier. Negative and non-finite values are ignored.
    pub fn set_speed(&mut self, speed: f64) -> bool {
        if !speed.is_finite() || speed < 0.0 {
            log::debug!("ignoring speed multiplier {speed}");
            return false;
        }
        self.speed = speed;
        true
    }

    /// Nudge the multiplier, clamped to [0, 10].
    pub fn adjust_speed(&mut self, delta: f64) {
        if delta.is_finite() {
            self.speed = (self.speed + delta).clamp(0.0, 10.0);
        }
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_realtime(&self) -> bool {
        self.speed == 0.0
    }

    /// Multiplier applied on the most recent tick (0 while paused).
    pub fn last_multiplier(&self) -> f64 {
        self.last_multiplier
    }

    pub fn days_from_j2000(&self) -> f64 {
        self.days_from_j2000
    }

    /// Simulated calendar date as (year, month, day).
    pub fn date(&self) -> (i32, u32, u32) {
        days_to_date(self.days_from_j2000)
    }
}

/// Fixed timestep accumulator.
/// Ensures the simulation runs at a consistent rate regardless of frame time.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// The fixed delta time per tick (ms).
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        // Cap to prevent spiral of death (max 10 steps per frame)
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f64 = 1000.0 / 60.0;

    fn clock(speed: f64) -> SimulationClock {
        let config = SimConfig {
            initial_speed: speed,
            ..SimConfig::default()
        };
        SimulationClock::new(&config, 0.0)
    }

    #[test]
    fn tick_advances_one_day_per_second_at_speed_one() {
        let mut c = clock(1.0);
        let wall = FixedWallClock(0.0);
        let mut total = 0.0;
        for _ in 0..60 {
            total += c.tick(STEP, &wall);
        }
        assert!((total - 86_400_000.0).abs() < 1e-3, "total = {total}");
        assert!((c.days_from_j2000() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn steps_match_the_multiplier() {
        let mut c = clock(2.5);
        let simulated = c.tick(STEP, &FixedWallClock(0.0));
        assert!((c.steps(simulated) - 2.5).abs() < 1e-9);
        assert!((c.last_multiplier() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn paused_tick_returns_zero() {
        let mut c = clock(4.0);
        c.tick(STEP, &FixedWallClock(0.0));
        c.set_paused(true);
        for _ in 0..10 {
            assert_eq!(c.tick(STEP, &FixedWallClock(0.0)), 0.0);
        }
    }

    #[test]
    fn pause_round_trip_adds_no_drift() {
        let wall = FixedWallClock(0.0);
        let mut reference = clock(1.0);
        let mut toggled = clock(1.0);
        for _ in 0..5 {
            reference.tick(STEP, &wall);
            toggled.tick(STEP, &wall);
        }
        toggled.toggle_pause();
        for _ in 0..100 {
            toggled.tick(STEP, &wall);
        }
        toggled.toggle_pause();
        for _ in 0..5 {
            reference.tick(STEP, &wall);
            toggled.tick(STEP, &wall);
        }
        assert_eq!(reference.days_from_j2000(), toggled.days_from_j2000());
    }

    #[test]
    fn realtime_tracks_the_wall_clock() {
        let mut c = clock(0.0);
        // 2000-01-11T12:00:00Z
        let wall = FixedWallClock(946_728_000_000.0 + 10.0 * 86_400_000.0);
        let simulated = c.tick(STEP, &wall);
        assert!((c.days_from_j2000() - 10.0).abs() < 1e-9);
        assert!(simulated > 0.0);
        assert!((c.steps(simulated) - 0.0001).abs() < 1e-12);
    }

    #[test]
    fn negative_speed_is_rejected() {
        let mut c = clock(1.0);
        assert!(!c.set_speed(-2.0));
        assert!(!c.set_speed(f64::NAN));
        assert_eq!(c.speed(), 1.0);
        assert!(c.set_speed(0.0));
        assert!(c.is_realtime());
    }

    #[test]
    fn adjust_speed_clamps() {
        let mut c = clock(9.8);
        c.adjust_speed(0.5);
        assert_eq!(c.speed(), 10.0);
        c.set_speed(0.2);
        c.adjust_speed(-0.5);
        assert_eq!(c.speed(), 0.0);
    }

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(1000.0 / 60.0);
        assert_eq!(ts.accumulate(1000.0 / 60.0), 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::new(1000.0 / 60.0);
        assert_eq!(ts.accumulate(8.0), 0);
        assert_eq!(ts.accumulate(10.0), 1);
        let a = ts.alpha();
        assert!(a >= 0.0 && a <= 1.0, "alpha was {}", a);
    }

    #[test]
    fn caps_at_ten_steps() {
        let mut ts = FixedTimestep::new(1000.0 / 60.0);
        assert_eq!(ts.accumulate(1000.0), 10);
    }
}
