use std::collections::HashMap;

use glam::Vec3;

use crate::api::types::{BodyId, FetchedKind, MoonId};
use crate::catalog::bodies::{CelestialBody, MoonDescriptor};
use crate::core::orbit::OrbitalElements;

/// A real object merged from a data feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedObject {
    pub designation: String,
    pub kind: FetchedKind,
    pub elements: Option<OrbitalElements>,
    /// Scene position; `None` when the feed gave nothing to place it with.
    pub position: Option<Vec3>,
    /// Scene-space orbit polyline, empty when unknown.
    pub orbit_path: Vec<Vec3>,
}

/// Static bodies plus the collections filled at runtime.
///
/// Bodies are fixed at construction and addressed by [`BodyId`]. Fetched
/// collections only ever grow.
pub struct CelestialRegistry {
    bodies: Vec<CelestialBody>,
    by_name: HashMap<&'static str, BodyId>,
    collections: HashMap<FetchedKind, Vec<FetchedObject>>,
}

impl CelestialRegistry {
    pub fn new(bodies: &[CelestialBody]) -> Self {
        let bodies = bodies.to_vec();
        let by_name = bodies
            .iter()
            .enumerate()
            .map(|(i, b)| (b.name, BodyId(i as u32)))
            .collect();
        Self {
            bodies,
            by_name,
            collections: HashMap::new(),
        }
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn ids(&self) -> impl Iterator<Item = BodyId> {
        (0..self.bodies.len() as u32).map(BodyId)
    }

    pub fn body(&self, id: BodyId) -> Option<&CelestialBody> {
        self.bodies.get(id.index())
    }

    pub fn moon(&self, id: MoonId) -> Option<&MoonDescriptor> {
        self.body(id.body)?.moons.get(id.moon as usize)
    }

    pub fn find(&self, name: &str) -> Option<BodyId> {
        self.by_name.get(name).copied()
    }

    pub fn find_moon(&self, name: &str) -> Option<MoonId> {
        self.bodies.iter().enumerate().find_map(|(b, body)| {
            body.moons
                .iter()
                .position(|m| m.name == name)
                .map(|m| MoonId::new(BodyId(b as u32), m as u32))
        })
    }

    /// Total moons across every body.
    pub fn moon_count(&self) -> usize {
        self.bodies.iter().map(|b| b.moons.len()).sum()
    }

    /// Append to a dynamic collection. Returns the new collection length.
    pub fn add_fetched_objects(
        &mut self,
        kind: FetchedKind,
        objects: impl IntoIterator<Item = FetchedObject>,
    ) -> usize {
        let collection = self.collections.entry(kind).or_default();
        collection.extend(objects);
        collection.len()
    }

    pub fn collection(&self, kind: FetchedKind) -> &[FetchedObject] {
        self.collections.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total fetched objects across all collections.
    pub fn fetched_count(&self) -> usize {
        self.collections.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::bodies::CATALOG;

    fn object(name: &str, kind: FetchedKind) -> FetchedObject {
        FetchedObject {
            designation: name.to_string(),
            kind,
            elements: None,
            position: None,
            orbit_path: Vec::new(),
        }
    }

    #[test]
    fn lookup_by_name_and_id() {
        let registry = CelestialRegistry::new(CATALOG);
        let earth = registry.find("Earth").unwrap();
        assert_eq!(earth, BodyId(2));
        assert_eq!(registry.body(earth).unwrap().dist, 15.0);
        assert!(registry.find("Vulcan").is_none());
        assert!(registry.body(BodyId(999)).is_none());
    }

    #[test]
    fn moons_are_addressed_through_their_parent() {
        let registry = CelestialRegistry::new(CATALOG);
        let titan = registry.find_moon("Titan").unwrap();
        assert_eq!(titan.body, registry.find("Saturn").unwrap());
        assert_eq!(registry.moon(titan).unwrap().name, "Titan");
        assert!(registry.moon(MoonId::new(titan.body, 99)).is_none());
    }

    #[test]
    fn collections_only_grow() {
        let mut registry = CelestialRegistry::new(CATALOG);
        assert!(registry.collection(FetchedKind::Comet).is_empty());
        let len = registry.add_fetched_objects(FetchedKind::Comet, vec![object("1P/Halley", FetchedKind::Comet)]);
        assert_eq!(len, 1);
        let len = registry.add_fetched_objects(FetchedKind::Comet, vec![object("2P/Encke", FetchedKind::Comet)]);
        assert_eq!(len, 2);
        assert_eq!(registry.collection(FetchedKind::Comet)[0].designation, "1P/Halley");
        assert!(registry.collection(FetchedKind::Sentry).is_empty());
        assert_eq!(registry.fetched_count(), 2);
    }

    #[test]
    fn bodies_keep_catalog_order() {
        let registry = CelestialRegistry::new(CATALOG);
        let names: Vec<_> = registry.bodies().iter().take(4).map(|b| b.name).collect();
        assert_eq!(names, ["Mercury", "Venus", "Earth", "Mars"]);
        assert_eq!(registry.ids().count(), 23);
    }
}
