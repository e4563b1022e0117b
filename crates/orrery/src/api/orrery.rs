//! The simulation context: owns every controller and runs them in a fixed
//! order once per tick.
//!
//! There is no ambient global state. Hosts create one [`Orrery`], push
//! [`Intent`]s into it, and per frame call [`Orrery::clear_frame_data`],
//! [`Orrery::tick`] once per fixed step, then [`Orrery::present`] onto
//! their render target.

use crate::api::config::SimConfig;
use crate::api::error::{OrreryError, Result};
use crate::api::types::{BodyId, EclipseKind, FetchedKind, MoonId, SimEvent};
use crate::catalog::belts::generate_belts;
use crate::catalog::bodies::{CelestialBody, CATALOG};
use crate::core::clock::{SimulationClock, WallClock};
use crate::core::orbit::unix_ms_to_days;
use crate::core::registry::CelestialRegistry;
use crate::core::rng::Rng;
use crate::input::queue::{Intent, IntentQueue};
use crate::provider::{fetch_channel, place_records, FetchBatch, FetchInbox, FetchSender};
use crate::catalog::records::RawRecord;
use crate::renderer::bloom::{present, BloomController, PresentPath};
use crate::renderer::camera::CameraRig;
use crate::renderer::traits::{Axis, MaterialProperty, NodeId, RenderTarget};
use crate::systems::animator::{BodyAnimator, Damping, SUN_POSITION};
use crate::systems::eclipse::{EclipseTourController, TourContext, TourStep};
use crate::systems::follow::{CameraFollowController, FollowTarget};
use crate::systems::layers::{LayerId, LayerVisibility};
use crate::systems::lighting::SceneLighting;
use crate::systems::picking::{pick, PickHit};

pub struct Orrery {
    config: SimConfig,
    registry: CelestialRegistry,
    clock: SimulationClock,
    animator: BodyAnimator,
    rig: CameraRig,
    follow: CameraFollowController,
    tour: EclipseTourController,
    lighting: SceneLighting,
    bloom: BloomController,
    layers: LayerVisibility,
    intents: IntentQueue,
    inbox: FetchInbox,
    sender: FetchSender,
    placement_rng: Rng,
    events: Vec<SimEvent>,
    /// Wall-clock time accumulated from tick deltas; drives ring pulses.
    wall_ms: f64,
    frame: u64,
    last_present: Option<PresentPath>,
}

impl Orrery {
    /// Build the catalog scene. Everything is in place when this returns;
    /// real-object feeds merge later through [`Orrery::fetch_sender`].
    pub fn new(config: SimConfig, wall: &dyn WallClock) -> Self {
        Self::with_bodies(config, CATALOG, wall)
    }

    pub fn with_bodies(config: SimConfig, bodies: &[CelestialBody], wall: &dyn WallClock) -> Self {
        let registry = CelestialRegistry::new(bodies);
        let start = config
            .start_days_from_j2000
            .unwrap_or_else(|| unix_ms_to_days(wall.now_unix_ms()));
        let clock = SimulationClock::new(&config, start);
        let belts = generate_belts(config.belt_seed);
        let belt_entries: usize = belts.iter().map(|b| b.entries.len()).sum();
        let animator = BodyAnimator::new(&registry, belts, config.belt_seed);
        let tour = EclipseTourController::new(&registry, config.eclipse_phase_ms);
        let (sender, inbox) = fetch_channel();

        log::info!(
            "orrery ready: {} bodies, {} moons, {} belt entries",
            registry.bodies().len(),
            registry.moon_count(),
            belt_entries,
        );

        Self {
            placement_rng: Rng::new(config.belt_seed ^ 0xC0_3E7),
            events: Vec::with_capacity(config.max_events),
            config,
            registry,
            clock,
            animator,
            rig: CameraRig::new(),
            follow: CameraFollowController::new(),
            tour,
            lighting: SceneLighting::new(),
            bloom: BloomController::new(),
            layers: LayerVisibility::new(),
            intents: IntentQueue::new(),
            inbox,
            sender,
            wall_ms: 0.0,
            frame: 0,
            last_present: None,
        }
    }

    // ── Inputs ──────────────────────────────────────────────────────

    pub fn push_intent(&mut self, intent: Intent) {
        self.intents.push(intent);
    }

    /// Sender for fetch tasks. Batches are merged at the start of the next tick.
    pub fn fetch_sender(&self) -> FetchSender {
        self.sender.clone()
    }

    /// Place raw records fetched by the host and queue them like any other batch.
    pub fn push_records(&mut self, kind: FetchedKind, records: Vec<RawRecord>) -> usize {
        let objects = place_records(kind, records, &self.config, &mut self.placement_rng);
        let count = objects.len();
        if count > 0 {
            self.sender.send(FetchBatch { kind, objects });
        }
        count
    }

    // ── Tick ────────────────────────────────────────────────────────

    /// One frame: merge fetched data, apply intents, advance the clock and
    /// every body, then drive the camera (tour first, follow otherwise) and bloom.
    ///
    /// Events accumulate until [`Orrery::clear_frame_data`], so a host that
    /// runs several ticks per rendered frame sees all of them.
    pub fn tick(&mut self, wall_delta_ms: f64, wall: &dyn WallClock) {
        self.frame += 1;

        self.merge_fetched();
        for intent in self.intents.drain() {
            self.apply(intent);
        }

        let simulated_ms = self.clock.tick(wall_delta_ms, wall);
        let steps = self.clock.steps(simulated_ms);
        let damping = if self.tour.is_active() { Damping::cinematic() } else { Damping::NONE };
        self.animator.advance_with(steps, damping);
        self.wall_ms += wall_delta_ms.max(0.0);
        self.animator.pulse_rings(self.wall_ms);

        if self.tour.is_active() {
            let mut ctx = TourContext {
                animator: &mut self.animator,
                rig: &mut self.rig,
                lighting: &mut self.lighting,
            };
            match self.tour.tick(wall_delta_ms as f32, &mut ctx) {
                TourStep::Running { phase, entered: true } => self.emit_tour_phase(phase),
                TourStep::Finished => self.end_tour_events(),
                TourStep::Running { .. } | TourStep::Idle => {}
            }
        } else {
            self.follow.update(&self.animator, &mut self.rig);
        }

        self.bloom.update(self.rig.position, SUN_POSITION);

        let (year, month, day) = self.clock.date();
        self.emit(SimEvent::new(SimEvent::DATE, year as f32, month as f32, day as f32));
    }

    fn merge_fetched(&mut self) {
        for batch in self.inbox.drain() {
            let count = batch.objects.len();
            let total = self.registry.add_fetched_objects(batch.kind, batch.objects);
            log::info!("merged {count} {:?} objects ({total} total)", batch.kind);
            self.emit(SimEvent::new(SimEvent::FETCH_MERGED, batch.kind.code() as f32, count as f32, 0.0));
        }
    }

    fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::SetSpeedMultiplier(speed) => {
                self.clock.set_speed(speed);
            }
            Intent::AdjustSpeed(delta) => self.clock.adjust_speed(delta),
            Intent::TogglePause => {
                self.clock.toggle_pause();
            }
            Intent::ToggleLayer(layer) => {
                self.layers.toggle(layer);
            }
            Intent::FollowPlanet(id) => {
                if self.follow.follow_planet(id, &self.registry, &mut self.rig) {
                    self.emit_follow();
                } else {
                    log::debug!("follow: no body {}", id.0);
                }
            }
            Intent::FollowMoon(id) => self.follow_moon(id),
            Intent::FollowSun => {
                self.follow.follow_sun(&mut self.rig);
                self.emit_follow();
            }
            Intent::StopFollowing | Intent::ResetView => {
                self.follow.stop(&mut self.rig);
                self.emit_follow();
            }
            Intent::StartEclipseTour(kind) => self.start_tour(kind),
            Intent::StopEclipseTour => {
                if self.tour.is_active() {
                    let mut ctx = TourContext {
                        animator: &mut self.animator,
                        rig: &mut self.rig,
                        lighting: &mut self.lighting,
                    };
                    self.tour.stop(&mut ctx);
                    self.end_tour_events();
                }
            }
            Intent::SetBloomMode(mode) => self.bloom.set_mode(mode),
            Intent::SetBloomStrength(strength) => self.bloom.set_strength(strength),
            Intent::Pick { origin, direction } => {
                match pick(origin, direction, &self.registry, &self.animator, &self.layers) {
                    Some(PickHit::Sun) => {
                        self.follow.follow_sun(&mut self.rig);
                        self.emit_follow();
                    }
                    Some(PickHit::Moon(id)) => self.follow_moon(id),
                    Some(PickHit::Body(id)) => {
                        self.emit(SimEvent::new(SimEvent::SELECTED, 1.0, id.0 as f32, 0.0));
                    }
                    None => {}
                }
            }
        }
    }

    fn follow_moon(&mut self, id: MoonId) {
        if self.follow.follow_moon(id, &self.registry, &mut self.rig) {
            self.emit_follow();
        } else {
            log::debug!("follow: no moon {} of body {}", id.moon, id.body.0);
        }
    }

    fn start_tour(&mut self, kind: EclipseKind) {
        let was_active = self.tour.is_active();
        let mut ctx = TourContext {
            animator: &mut self.animator,
            rig: &mut self.rig,
            lighting: &mut self.lighting,
        };
        let started = self.tour.start(kind, &mut ctx);
        if started {
            self.emit_tour_phase(0);
        } else if was_active {
            self.end_tour_events();
        }
    }

    fn end_tour_events(&mut self) {
        self.follow.resnap();
        self.emit(SimEvent::new(SimEvent::TOUR_ENDED, 0.0, 0.0, 0.0));
    }

    fn emit_tour_phase(&mut self, phase: usize) {
        let kind = match self.tour.kind() {
            Some(EclipseKind::Lunar) => 1.0,
            _ => 0.0,
        };
        self.emit(SimEvent::new(SimEvent::TOUR_PHASE, kind, phase as f32, 0.0));
    }

    fn emit_follow(&mut self) {
        let target = self.follow.target();
        let (body, moon) = match target {
            FollowTarget::Planet(id) => (id.0 as f32, 0.0),
            FollowTarget::Moon(id) => (id.body.0 as f32, id.moon as f32),
            FollowTarget::None | FollowTarget::Sun => (0.0, 0.0),
        };
        self.emit(SimEvent::new(SimEvent::FOLLOW_CHANGED, target.code() as f32, body, moon));
    }

    /// Clear per-frame transient data. Call at the start of each frame.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }

    /// Events beyond `max_events` in one frame are dropped.
    fn emit(&mut self, event: SimEvent) {
        if self.events.len() < self.config.max_events {
            self.events.push(event);
        }
    }

    // ── Output ──────────────────────────────────────────────────────

    /// Push the current state into `target` without drawing.
    pub fn sync(&self, target: &mut dyn RenderTarget) {
        self.animator.sync(target, &self.layers);

        for kind in FetchedKind::ALL {
            let layer = match kind {
                FetchedKind::Comet => LayerId::Comets,
                _ => LayerId::RealAsteroids,
            };
            let visible = self.layers.is_visible(layer);
            for (i, object) in self.registry.collection(kind).iter().enumerate() {
                let Some(position) = object.position else {
                    continue;
                };
                if let Some(node) = target.renderable(NodeId::Fetched { kind, index: i as u32 }) {
                    node.set_position(position);
                    node.set_visible(visible);
                }
            }
        }

        if let Some(node) = target.renderable(NodeId::Corona) {
            match self.lighting.corona() {
                Some(corona) => {
                    // Billboard: turn the ring plane toward the camera
                    let to_camera = self.rig.position - SUN_POSITION;
                    let horizontal = (to_camera.x * to_camera.x + to_camera.z * to_camera.z).sqrt();
                    node.set_position(SUN_POSITION);
                    node.set_rotation(Axis::Y, to_camera.x.atan2(to_camera.z));
                    node.set_rotation(Axis::X, -to_camera.y.atan2(horizontal));
                    node.set_visible(true);
                    node.set_material_property(MaterialProperty::Opacity, corona.opacity);
                }
                None => node.set_visible(false),
            }
        }
        if let Some(node) = target.renderable(NodeId::Starfield) {
            node.set_material_property(MaterialProperty::Opacity, self.lighting.starfield_opacity());
        }
    }

    /// Sync and draw one frame, falling back to direct rendering if the
    /// composer fails.
    pub fn present(&mut self, target: &mut dyn RenderTarget) -> PresentPath {
        self.sync(target);
        let path = present(target, &self.bloom.params());
        self.last_present = Some(path);
        path
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn registry(&self) -> &CelestialRegistry {
        &self.registry
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn animator(&self) -> &BodyAnimator {
        &self.animator
    }

    pub fn camera(&self) -> &CameraRig {
        &self.rig
    }

    /// The camera-control collaborator writes user orbit/zoom here.
    pub fn camera_mut(&mut self) -> &mut CameraRig {
        &mut self.rig
    }

    pub fn follow_target(&self) -> FollowTarget {
        self.follow.target()
    }

    pub fn tour(&self) -> &EclipseTourController {
        &self.tour
    }

    pub fn lighting(&self) -> &SceneLighting {
        &self.lighting
    }

    pub fn bloom(&self) -> &BloomController {
        &self.bloom
    }

    pub fn layers(&self) -> &LayerVisibility {
        &self.layers
    }

    /// Events emitted since the last [`Orrery::clear_frame_data`].
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn last_present(&self) -> Option<PresentPath> {
        self.last_present
    }

    /// Look a catalog body up by name, e.g. for a search box.
    pub fn body_by_name(&self, name: &str) -> Result<BodyId> {
        self.registry
            .find(name)
            .ok_or_else(|| OrreryError::UnknownBody(name.to_string()))
    }

    pub fn body_position(&self, id: BodyId) -> Option<glam::Vec3> {
        self.animator.body_position(id)
    }
}
