/// Ray picking against the Sun, catalog bodies and moons, each treated as
/// a sphere of its catalog size.

use glam::Vec3;

use crate::api::types::{BodyId, MoonId};
use crate::core::registry::CelestialRegistry;
use crate::systems::animator::{BodyAnimator, SUN_POSITION};
use crate::systems::layers::{LayerId, LayerVisibility};

/// Rendered radius of the Sun.
pub const SUN_RADIUS: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickHit {
    Sun,
    Body(BodyId),
    Moon(MoonId),
}

/// Distance along a normalized ray to the first intersection with a sphere.
pub fn ray_sphere(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let b = oc.dot(direction);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sqrt = disc.sqrt();
    let near = -b - sqrt;
    if near >= 0.0 {
        return Some(near);
    }
    // Origin inside the sphere
    let far = -b + sqrt;
    (far >= 0.0).then_some(far)
}

/// Closest object along the ray. Hidden moons are not pickable.
pub fn pick(
    origin: Vec3,
    direction: Vec3,
    registry: &CelestialRegistry,
    animator: &BodyAnimator,
    layers: &LayerVisibility,
) -> Option<PickHit> {
    let direction = direction.try_normalize()?;
    let mut best: Option<(f32, PickHit)> = None;
    let mut consider = |t: Option<f32>, hit: PickHit| {
        if let Some(t) = t {
            if best.map_or(true, |(d, _)| t < d) {
                best = Some((t, hit));
            }
        }
    };

    consider(ray_sphere(origin, direction, SUN_POSITION, SUN_RADIUS), PickHit::Sun);
    let show_moons = layers.is_visible(LayerId::Moons);
    for (id, body) in registry.ids().zip(registry.bodies()) {
        if let Some(center) = animator.body_position(id) {
            consider(ray_sphere(origin, direction, center, body.size), PickHit::Body(id));
        }
        if !show_moons {
            continue;
        }
        for (m, moon) in body.moons.iter().enumerate() {
            let moon_id = MoonId::new(id, m as u32);
            if let Some(center) = animator.moon_position(moon_id) {
                consider(ray_sphere(origin, direction, center, moon.size), PickHit::Moon(moon_id));
            }
        }
    }
    best.map(|(_, hit)| hit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::belts::generate_belts;
    use crate::catalog::bodies::CATALOG;

    #[test]
    fn sphere_hits_and_misses() {
        let t = ray_sphere(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z, Vec3::ZERO, 2.0).unwrap();
        assert!((t - 8.0).abs() < 1e-5);
        assert!(ray_sphere(Vec3::new(0.0, 5.0, 10.0), Vec3::NEG_Z, Vec3::ZERO, 2.0).is_none());
        // Pointing away
        assert!(ray_sphere(Vec3::new(0.0, 0.0, 10.0), Vec3::Z, Vec3::ZERO, 2.0).is_none());
        // From inside
        let t = ray_sphere(Vec3::ZERO, Vec3::X, Vec3::ZERO, 3.0).unwrap();
        assert!((t - 3.0).abs() < 1e-5);
    }

    #[test]
    fn picks_the_nearest_object() {
        let registry = CelestialRegistry::new(CATALOG);
        let mut animator = BodyAnimator::new(&registry, generate_belts(2), 2);
        let layers = LayerVisibility::new();
        let earth = registry.find("Earth").unwrap();
        let moon = MoonId::new(earth, 0);
        animator.set_body_angle(earth, 0.0);
        animator.set_moon_angle(moon, 0.0);

        // Straight down onto Earth at (15, 0, 0)
        let hit = pick(Vec3::new(15.0, 50.0, 0.0), Vec3::NEG_Y, &registry, &animator, &layers);
        assert_eq!(hit, Some(PickHit::Body(earth)));

        // Along -X between Earth and Ceres: the Moon at 17.5 comes before Earth
        let hit = pick(Vec3::new(20.0, 0.0, 0.0), Vec3::NEG_X, &registry, &animator, &layers);
        assert_eq!(hit, Some(PickHit::Moon(moon)));

        let hit = pick(Vec3::new(0.0, 50.0, 0.0), Vec3::NEG_Y, &registry, &animator, &layers);
        assert_eq!(hit, Some(PickHit::Sun));

        assert_eq!(pick(Vec3::new(0.0, 50.0, 0.0), Vec3::Y, &registry, &animator, &layers), None);
    }
}
