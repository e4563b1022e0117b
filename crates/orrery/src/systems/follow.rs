use glam::Vec3;

use crate::api::types::{BodyId, MoonId};
use crate::core::registry::CelestialRegistry;
use crate::renderer::camera::CameraRig;
use crate::systems::animator::{BodyAnimator, SUN_POSITION};

/// Eye offset from the Sun when following it.
const SUN_OFFSET: Vec3 = Vec3::new(25.0, 12.0, 25.0);
const SUN_ZOOM: (f32, f32) = (10.0, 100.0);

/// What the camera is locked onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FollowTarget {
    #[default]
    None,
    Planet(BodyId),
    Moon(MoonId),
    Sun,
}

impl FollowTarget {
    /// Numeric tag used in events: 0 none, 1 planet, 2 moon, 3 sun.
    pub fn code(&self) -> u32 {
        match self {
            FollowTarget::None => 0,
            FollowTarget::Planet(_) => 1,
            FollowTarget::Moon(_) => 2,
            FollowTarget::Sun => 3,
        }
    }
}

/// Keeps the camera rigidly attached to a moving target while leaving the
/// user free to orbit and zoom around it.
#[derive(Debug, Clone, Default)]
pub struct CameraFollowController {
    target: FollowTarget,
    /// Eye offset used for the snap after a switch.
    offset: Vec3,
    /// Target position seen on the previous update.
    last_position: Option<Vec3>,
    pending_snap: bool,
}

impl CameraFollowController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> FollowTarget {
        self.target
    }

    pub fn is_following(&self) -> bool {
        self.target != FollowTarget::None
    }

    /// Lock onto a catalog body. Returns false (state unchanged) for an unknown id.
    pub fn follow_planet(&mut self, id: BodyId, registry: &CelestialRegistry, rig: &mut CameraRig) -> bool {
        let Some(body) = registry.body(id) else {
            return false;
        };
        let d = (body.size * 8.0).max(15.0);
        self.lock(FollowTarget::Planet(id), d);
        rig.set_zoom_bounds(d * 0.5, d * 3.0);
        log::info!("following {}", body.name);
        true
    }

    pub fn follow_moon(&mut self, id: MoonId, registry: &CelestialRegistry, rig: &mut CameraRig) -> bool {
        let Some(moon) = registry.moon(id) else {
            return false;
        };
        let d = (moon.size * 12.0).max(8.0);
        self.lock(FollowTarget::Moon(id), d);
        rig.set_zoom_bounds(d * 0.3, d * 4.0);
        log::info!("following {}", moon.name);
        true
    }

    /// The Sun does not move, so the eye is placed once and only the aim is kept.
    pub fn follow_sun(&mut self, rig: &mut CameraRig) {
        self.target = FollowTarget::Sun;
        self.offset = SUN_OFFSET;
        self.last_position = None;
        self.pending_snap = false;
        rig.look_from(SUN_POSITION + SUN_OFFSET, SUN_POSITION);
        rig.set_zoom_bounds(SUN_ZOOM.0, SUN_ZOOM.1);
        log::info!("following the Sun");
    }

    /// Drop the target and return to the overview with wide zoom bounds.
    pub fn stop(&mut self, rig: &mut CameraRig) {
        *self = Self::default();
        rig.reset();
    }

    /// Snap to the current target again on the next update.
    pub fn resnap(&mut self) {
        if matches!(self.target, FollowTarget::Planet(_) | FollowTarget::Moon(_)) {
            self.pending_snap = true;
        }
    }

    fn lock(&mut self, target: FollowTarget, d: f32) {
        self.target = target;
        self.offset = Vec3::new(d, d * 0.5, d);
        self.last_position = None;
        self.pending_snap = true;
    }

    /// Current world position of the target, if any.
    pub fn target_position(&self, animator: &BodyAnimator) -> Option<Vec3> {
        match self.target {
            FollowTarget::None => None,
            FollowTarget::Planet(id) => animator.body_position(id),
            FollowTarget::Moon(id) => animator.moon_position(id),
            FollowTarget::Sun => Some(SUN_POSITION),
        }
    }

    /// Per-frame update. Moves the camera by the target's displacement since
    /// the last frame, or snaps it to `target + offset` right after a switch.
    pub fn update(&mut self, animator: &BodyAnimator, rig: &mut CameraRig) {
        let Some(position) = self.target_position(animator) else {
            return;
        };
        if self.target == FollowTarget::Sun {
            rig.target = position;
            return;
        }
        if self.pending_snap {
            rig.look_from(position + self.offset, position);
            self.pending_snap = false;
        } else if let Some(last) = self.last_position {
            rig.translate(position - last);
        }
        self.last_position = Some(position);
    }
}
