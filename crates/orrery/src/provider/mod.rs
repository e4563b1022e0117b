//! Real small-body data from external catalogs.
//!
//! Fetching happens off the frame path. Each completed batch is sent through
//! a [`FetchSender`]; the simulation drains its [`FetchInbox`] at the start
//! of the next tick and appends the objects to the registry. A failed fetch
//! only means fewer objects on screen.

use std::f64::consts::TAU;
use std::sync::mpsc::{self, Receiver, Sender};

use glam::Vec3;

use crate::api::config::SimConfig;
use crate::api::error::Result;
use crate::api::types::FetchedKind;
use crate::catalog::records::RawRecord;
use crate::core::orbit::{orbit_path, solve, to_scene, OrbitalElements, DEFAULT_EPOCH_JD, ORBIT_PATH_SAMPLES};
use crate::core::registry::FetchedObject;
use crate::core::rng::Rng;

/// Well-known asteroids looked up one at a time by name.
pub const FAMOUS_ASTEROIDS: [&str; 58] = [
    "Apophis", "Bennu", "Ryugu", "Didymos", "Dimorphos", "Itokawa", "Psyche", "Vesta",
    "Ceres", "Pallas", "Hygiea", "Eros", "Gaspra", "Ida", "Mathilde", "Steins",
    "Lutetia", "Dinkinesh", "Toutatis", "Florence", "Icarus", "Geographos", "Castalia", "Toro",
    "Amor", "Apollo", "Anteros", "Ganymed", "Ivar", "Daphne", "Europa", "Davida",
    "Interamnia", "Hebe", "Iris", "Flora", "Metis", "Parthenope", "Eunomia", "Juno",
    "Astraea", "Thisbe", "Cybele", "Herculina", "Sylvia", "Patroclus", "Hektor", "Euphrosyne",
    "Fortuna", "Massalia", "Kleopatra", "Dactyl", "Linus", "Eurybates", "Polymele", "Leucus",
    "Orus", "Donaldjohanson",
];

/// Network collaborator. Implementations report failures as errors;
/// [`load_real_objects`] logs them and carries on.
pub trait DataProvider {
    /// `Ok(None)` when the catalog has no orbit for the designation.
    fn fetch_orbital_elements(&self, designation: &str) -> Result<Option<OrbitalElements>>;
    fn fetch_near_earth_objects(&self) -> Result<Vec<RawRecord>>;
    fn fetch_sentry_objects(&self) -> Result<Vec<RawRecord>>;
    fn fetch_comets(&self) -> Result<Vec<RawRecord>>;
}

/// One completed fetch, ready to be merged.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchBatch {
    pub kind: FetchedKind,
    pub objects: Vec<FetchedObject>,
}

/// Producer side of the inbox. Cheap to clone into fetch tasks.
#[derive(Debug, Clone)]
pub struct FetchSender {
    tx: Sender<FetchBatch>,
}

impl FetchSender {
    /// Returns false once the inbox has been dropped.
    pub fn send(&self, batch: FetchBatch) -> bool {
        self.tx.send(batch).is_ok()
    }
}

/// Consumer side, owned by the simulation.
#[derive(Debug)]
pub struct FetchInbox {
    rx: Receiver<FetchBatch>,
}

impl FetchInbox {
    /// Every batch that has arrived so far, without blocking.
    pub fn drain(&self) -> Vec<FetchBatch> {
        self.rx.try_iter().collect()
    }
}

pub fn fetch_channel() -> (FetchSender, FetchInbox) {
    let (tx, rx) = mpsc::channel();
    (FetchSender { tx }, FetchInbox { rx })
}

/// Per-kind cap on how many records of one feed are kept.
pub fn limit_for(kind: FetchedKind, config: &SimConfig) -> usize {
    match kind {
        FetchedKind::NearEarth => config.neo_limit,
        FetchedKind::Sentry => config.sentry_limit,
        FetchedKind::Comet => config.comet_limit,
        FetchedKind::FamousAsteroid => FAMOUS_ASTEROIDS.len(),
    }
}

/// Turn raw records into placed objects.
///
/// Records with elements are solved at the default epoch and get a sampled
/// orbit path. Comets without elements are scattered deterministically at
/// distance 30-70 and height ±5. Anything else is kept unplaced.
pub fn place_records(
    kind: FetchedKind,
    records: Vec<RawRecord>,
    config: &SimConfig,
    rng: &mut Rng,
) -> Vec<FetchedObject> {
    records
        .into_iter()
        .take(limit_for(kind, config))
        .map(|record| {
            let (position, path) = match &record.elements {
                Some(elements) => {
                    let solved = solve(elements, DEFAULT_EPOCH_JD, config.kepler_method);
                    let path = orbit_path(elements, ORBIT_PATH_SAMPLES, config.kepler_method)
                        .into_iter()
                        .map(|p| to_scene(p, config.au_to_scene))
                        .collect();
                    (Some(to_scene(solved.position, config.au_to_scene)), path)
                }
                None if kind == FetchedKind::Comet => (Some(scatter_comet(rng)), Vec::new()),
                None => (None, Vec::new()),
            };
            FetchedObject {
                designation: record.designation,
                kind,
                elements: record.elements,
                position,
                orbit_path: path,
            }
        })
        .collect()
}

fn scatter_comet(rng: &mut Rng) -> Vec3 {
    let distance = rng.range(30.0, 70.0);
    let angle = rng.next_f64() * TAU;
    Vec3::new(
        (angle.cos() * distance) as f32,
        rng.spread(5.0) as f32,
        (angle.sin() * distance) as f32,
    )
}

/// Fetch every feed in order (famous asteroids, NEOs, sentry objects,
/// comets), sending one batch per feed. Returns the number of objects sent.
pub fn load_real_objects(provider: &dyn DataProvider, sender: &FetchSender, config: &SimConfig) -> usize {
    let mut rng = Rng::new(config.belt_seed ^ 0xC0_3E7);
    let mut sent = 0;

    let famous: Vec<RawRecord> = FAMOUS_ASTEROIDS
        .iter()
        .filter_map(|name| match provider.fetch_orbital_elements(name) {
            Ok(Some(elements)) => Some(RawRecord { designation: name.to_string(), elements: Some(elements) }),
            Ok(None) => {
                log::debug!("no orbit for {name}");
                None
            }
            Err(e) => {
                log::warn!("{name}: {e}");
                None
            }
        })
        .collect();
    sent += deliver(FetchedKind::FamousAsteroid, Ok(famous), sender, config, &mut rng);

    sent += deliver(FetchedKind::NearEarth, provider.fetch_near_earth_objects(), sender, config, &mut rng);
    sent += deliver(FetchedKind::Sentry, provider.fetch_sentry_objects(), sender, config, &mut rng);
    sent += deliver(FetchedKind::Comet, provider.fetch_comets(), sender, config, &mut rng);
    sent
}

fn deliver(
    kind: FetchedKind,
    fetched: Result<Vec<RawRecord>>,
    sender: &FetchSender,
    config: &SimConfig,
    rng: &mut Rng,
) -> usize {
    let records = match fetched {
        Ok(records) => records,
        Err(e) => {
            log::warn!("{kind:?} feed unavailable: {e}");
            return 0;
        }
    };
    let objects = place_records(kind, records, config, rng);
    let count = objects.len();
    if count > 0 && !sender.send(FetchBatch { kind, objects }) {
        log::warn!("{kind:?} batch dropped: inbox closed");
        return 0;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::OrreryError;
    use crate::catalog::records::{parse_comets, parse_neo_page};

    /// Serves canned JSON; the famous lookup fails for one name.
    struct CannedProvider;

    const NEO_PAGE: &str = r#"{"near_earth_objects": [
        {"name": "433 Eros", "orbital_data": {"semi_major_axis": "1.458", "eccentricity": "0.2229",
         "inclination": "10.83", "ascending_node_longitude": "304.3",
         "perihelion_argument": "178.9", "mean_anomaly": "310.6"}},
        {"name": "(2010 AB)"}
    ]}"#;

    const COMETS: &str = r#"{"fields": ["des", "orbit_id", "jd", "cd", "dist", "fullname"],
        "data": [["1P", "1", "2460000", "2024", "0.5", "1P/Halley"],
                 ["2P", "1", "2460000", "2024", "0.4", "2P/Encke"]]}"#;

    impl DataProvider for CannedProvider {
        fn fetch_orbital_elements(&self, designation: &str) -> Result<Option<OrbitalElements>> {
            match designation {
                "Bennu" => Err(OrreryError::fetch("sbdb", "timeout")),
                "Dactyl" => Ok(None),
                _ => Ok(Some(OrbitalElements::new(2.5, 0.1, 5.0, 80.0, 70.0, 10.0))),
            }
        }

        fn fetch_near_earth_objects(&self) -> Result<Vec<RawRecord>> {
            parse_neo_page(NEO_PAGE)
        }

        fn fetch_sentry_objects(&self) -> Result<Vec<RawRecord>> {
            Err(OrreryError::fetch("sentry", "HTTP 503"))
        }

        fn fetch_comets(&self) -> Result<Vec<RawRecord>> {
            parse_comets(COMETS)
        }
    }

    #[test]
    fn famous_list_has_no_duplicates() {
        let mut names = FAMOUS_ASTEROIDS.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), FAMOUS_ASTEROIDS.len());
    }

    #[test]
    fn one_failure_does_not_abort_the_batch() {
        let (tx, inbox) = fetch_channel();
        let config = SimConfig::default();
        let sent = load_real_objects(&CannedProvider, &tx, &config);

        let batches = inbox.drain();
        let kinds: Vec<_> = batches.iter().map(|b| b.kind).collect();
        // Sentry failed and sends nothing
        assert_eq!(kinds, [FetchedKind::FamousAsteroid, FetchedKind::NearEarth, FetchedKind::Comet]);

        let famous = &batches[0].objects;
        assert_eq!(famous.len(), 56);
        assert!(famous.iter().all(|o| o.designation != "Bennu" && o.designation != "Dactyl"));
        assert_eq!(sent, 56 + 2 + 2);
        assert!(inbox.drain().is_empty());
    }

    #[test]
    fn placement_rules() {
        let (tx, inbox) = fetch_channel();
        load_real_objects(&CannedProvider, &tx, &SimConfig::default());
        let batches = inbox.drain();

        let eros = &batches[1].objects[0];
        let p = eros.position.unwrap();
        assert!(p.is_finite());
        assert_eq!(eros.orbit_path.len(), ORBIT_PATH_SAMPLES);
        // Roughly 1.1-1.8 AU from the Sun, in scene units
        assert!(p.length() > 1.0 * 15.0 && p.length() < 1.8 * 15.0);

        let unplaced = &batches[1].objects[1];
        assert!(unplaced.position.is_none());

        for comet in &batches[2].objects {
            let p = comet.position.unwrap();
            let flat = Vec3::new(p.x, 0.0, p.z).length();
            assert!((30.0..=70.0).contains(&flat), "{flat}");
            assert!(p.y.abs() <= 5.0);
        }
    }

    #[test]
    fn limits_cap_each_feed() {
        let config = SimConfig { comet_limit: 1, ..SimConfig::default() };
        let mut rng = Rng::new(1);
        let records = vec![RawRecord::named("a"), RawRecord::named("b"), RawRecord::named("c")];
        let placed = place_records(FetchedKind::Comet, records, &config, &mut rng);
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].designation, "a");
    }

    #[test]
    fn placement_is_deterministic() {
        let config = SimConfig::default();
        let records = || vec![RawRecord::named("x"), RawRecord::named("y")];
        let a = place_records(FetchedKind::Comet, records(), &config, &mut Rng::new(9));
        let b = place_records(FetchedKind::Comet, records(), &config, &mut Rng::new(9));
        assert_eq!(a, b);
    }
}
