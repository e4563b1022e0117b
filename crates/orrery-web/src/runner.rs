use orrery::bridge::protocol::{write_frame, FrameCounts};
use orrery::{
    parse_records, FetchedKind, FixedTimestep, FrameLayout, Intent, Orrery, Result, SceneBuffer,
    SimConfig, WallClock,
};

/// Wires the simulation loop to the frame buffer the browser reads.
///
/// The crate's `lib.rs` keeps one runner in a `thread_local!` and exports
/// free functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// a struct holding trait objects directly.
pub struct OrreryRunner {
    orrery: Orrery,
    scene: SceneBuffer,
    timestep: FixedTimestep,
    layout: FrameLayout,
    /// Flat f32 buffer laid out by `FrameLayout`.
    frame: Vec<f32>,
    counts: FrameCounts,
}

impl OrreryRunner {
    pub fn new(config: SimConfig, wall: &dyn WallClock) -> Self {
        let timestep = FixedTimestep::new(config.fixed_dt_ms);
        let layout = FrameLayout::from_config(&config);
        let frame = vec![0.0; layout.buffer_total_floats];
        let scene = SceneBuffer::with_capacity(layout.max_nodes);

        Self {
            orrery: Orrery::new(config, wall),
            scene,
            timestep,
            layout,
            frame,
            counts: FrameCounts { nodes: 0, events: 0 },
        }
    }

    pub fn push_intent(&mut self, intent: Intent) {
        self.orrery.push_intent(intent);
    }

    /// Parse one feed's JSON as fetched by the page and queue the placed
    /// objects. They appear on the next tick.
    pub fn push_records(&mut self, kind: FetchedKind, json: &str) -> Result<usize> {
        let records = parse_records(kind, json)?;
        Ok(self.orrery.push_records(kind, records))
    }

    /// Follow a catalog body by name.
    pub fn follow_named(&mut self, name: &str) -> Result<()> {
        let id = self.orrery.body_by_name(name)?;
        self.orrery.push_intent(Intent::FollowPlanet(id));
        Ok(())
    }

    /// Run one frame: fixed-step ticks, then present and serialize.
    pub fn tick(&mut self, dt_ms: f32, wall: &dyn WallClock) {
        self.orrery.clear_frame_data();

        let steps = self.timestep.accumulate(dt_ms);
        for _ in 0..steps {
            self.orrery.tick(self.timestep.dt() as f64, wall);
        }

        self.orrery.present(&mut self.scene);
        self.counts = write_frame(&mut self.frame, &self.layout, &self.orrery, &self.scene);
    }

    /// The renderer reports that its composer failed or recovered.
    pub fn set_composite_available(&mut self, available: bool) {
        self.scene.set_composite_available(available);
    }

    pub fn orrery(&self) -> &Orrery {
        &self.orrery
    }

    /// Write a user orbit/zoom from the camera controls back into the rig.
    pub fn set_camera(&mut self, position: [f32; 3], target: [f32; 3]) {
        let rig = self.orrery.camera_mut();
        rig.look_from(position.into(), target.into());
        rig.clamp_zoom();
    }

    // ---- Pointer accessors for frame buffer reads ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame.as_ptr()
    }

    pub fn frame_len(&self) -> u32 {
        self.frame.len() as u32
    }

    pub fn node_count(&self) -> u32 {
        self.counts.nodes as u32
    }

    pub fn event_count(&self) -> u32 {
        self.counts.events as u32
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_nodes(&self) -> u32 {
        self.layout.max_nodes as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery::bridge::protocol::{HEADER_FRAME_COUNTER, HEADER_NODE_COUNT};
    use orrery::FixedWallClock;

    const NOW: FixedWallClock = FixedWallClock(1_700_000_000_000.0);

    fn runner() -> OrreryRunner {
        let config = SimConfig {
            start_days_from_j2000: Some(0.0),
            ..SimConfig::default()
        };
        OrreryRunner::new(config, &NOW)
    }

    #[test]
    fn frame_runs_fixed_steps() {
        let mut r = runner();
        r.tick(1000.0 / 60.0 * 3.0 + 0.5, &NOW);
        assert_eq!(r.orrery().frame(), 3);
        assert_eq!(r.frame[HEADER_FRAME_COUNTER], 3.0);
        assert_eq!(r.frame[HEADER_NODE_COUNT], r.node_count() as f32);
        assert!(r.node_count() > 0);
        // One date event per step
        assert_eq!(r.event_count(), 3);
    }

    #[test]
    fn records_appear_on_the_next_tick() {
        let mut r = runner();
        let json = r#"{"fields": ["des", "fullname"], "data": [["1P", "1P/Halley"]]}"#;
        assert_eq!(r.push_records(FetchedKind::Comet, json).unwrap(), 1);
        r.tick(20.0, &NOW);
        assert_eq!(r.orrery().registry().collection(FetchedKind::Comet).len(), 1);
    }

    #[test]
    fn follow_by_name() {
        let mut r = runner();
        assert!(r.follow_named("Pluto").is_ok());
        assert!(r.follow_named("Nibiru").is_err());
        r.tick(20.0, &NOW);
        assert!(r.orrery().follow_target() != orrery::FollowTarget::None);
    }

    #[test]
    fn bad_records_are_an_error() {
        let mut r = runner();
        assert!(r.push_records(FetchedKind::NearEarth, "not json").is_err());
    }

    #[test]
    fn camera_writes_respect_zoom_bounds() {
        let mut r = runner();
        r.set_camera([0.0, 0.0, 500.0], [0.0, 0.0, 0.0]);
        assert!(r.orrery().camera().distance() <= 200.0 + 1e-3);
    }
}
