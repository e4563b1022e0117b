//! Raw catalog records as served by the small-body feeds, and their
//! conversion into validated orbital elements.

use serde::{Deserialize, Serialize};

use crate::api::error::{OrreryError, Result};
use crate::api::types::FetchedKind;
use crate::core::orbit::OrbitalElements;

// ── Shared ─────────────────────────────────────────────────────────

/// Feeds serve numbers both as JSON numbers and as decimal strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    pub fn value(&self) -> Option<f64> {
        match self {
            Numeric::Number(n) => Some(*n),
            Numeric::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

fn field(name: &'static str, raw: &Option<Numeric>) -> Result<f64> {
    raw.as_ref()
        .and_then(Numeric::value)
        .ok_or_else(|| OrreryError::invalid(name, format!("{raw:?}")))
}

/// A fetched object before placement.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub designation: String,
    pub elements: Option<OrbitalElements>,
}

impl RawRecord {
    pub fn named(designation: impl Into<String>) -> Self {
        Self {
            designation: designation.into(),
            elements: None,
        }
    }
}

// ── SBDB (single object lookup) ────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SbdbResponse {
    pub orb: Option<SbdbOrbit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SbdbOrbit {
    pub a: Option<Numeric>,
    pub e: Option<Numeric>,
    pub i: Option<Numeric>,
    pub om: Option<Numeric>,
    pub w: Option<Numeric>,
    pub ma: Option<Numeric>,
    pub epoch: Option<Numeric>,
}

impl SbdbOrbit {
    pub fn to_elements(&self) -> Result<OrbitalElements> {
        let mut elements = OrbitalElements::new(
            field("a", &self.a)?,
            field("e", &self.e)?,
            field("i", &self.i)?,
            field("om", &self.om)?,
            field("w", &self.w)?,
            field("ma", &self.ma)?,
        );
        elements.epoch_jd = self.epoch.as_ref().and_then(Numeric::value);
        elements.validate()?;
        Ok(elements)
    }
}

/// Parse an SBDB lookup. A response without an orbit block yields `None`.
pub fn parse_sbdb(json: &str) -> Result<Option<OrbitalElements>> {
    let response: SbdbResponse = serde_json::from_str(json)?;
    response.orb.map(|orb| orb.to_elements()).transpose()
}

// ── NeoWs browse ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeoBrowsePage {
    #[serde(default)]
    pub near_earth_objects: Vec<NeoRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeoRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub is_potentially_hazardous_asteroid: Option<bool>,
    pub orbital_data: Option<NeoOrbitalData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeoOrbitalData {
    pub epoch_osculation: Option<Numeric>,
    pub eccentricity: Option<Numeric>,
    pub semi_major_axis: Option<Numeric>,
    pub inclination: Option<Numeric>,
    pub ascending_node_longitude: Option<Numeric>,
    pub perihelion_argument: Option<Numeric>,
    pub mean_anomaly: Option<Numeric>,
}

impl NeoOrbitalData {
    pub fn to_elements(&self) -> Result<OrbitalElements> {
        let mut elements = OrbitalElements::new(
            field("a", &self.semi_major_axis)?,
            field("e", &self.eccentricity)?,
            field("i", &self.inclination)?,
            field("om", &self.ascending_node_longitude)?,
            field("w", &self.perihelion_argument)?,
            field("ma", &self.mean_anomaly)?,
        );
        elements.epoch_jd = self.epoch_osculation.as_ref().and_then(Numeric::value);
        elements.validate()?;
        Ok(elements)
    }
}

impl NeoRecord {
    fn into_raw(self) -> RawRecord {
        let designation = self
            .name
            .or(self.id)
            .unwrap_or_else(|| "unnamed NEO".to_string());
        let elements = self.orbital_data.and_then(|data| match data.to_elements() {
            Ok(elements) => Some(elements),
            Err(e) => {
                log::warn!("{designation}: {e}");
                None
            }
        });
        RawRecord { designation, elements }
    }
}

pub fn parse_neo_page(json: &str) -> Result<Vec<RawRecord>> {
    let page: NeoBrowsePage = serde_json::from_str(json)?;
    Ok(page.near_earth_objects.into_iter().map(NeoRecord::into_raw).collect())
}

// ── Sentry ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentryList {
    #[serde(default)]
    pub data: Vec<SentryRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentryRecord {
    pub des: Option<String>,
    pub fullname: Option<String>,
    /// Cumulative impact probability
    pub ip: Option<Numeric>,
    /// Cumulative Palermo scale
    pub ps_cum: Option<Numeric>,
}

pub fn parse_sentry(json: &str) -> Result<Vec<RawRecord>> {
    let list: SentryList = serde_json::from_str(json)?;
    Ok(list
        .data
        .into_iter()
        .filter_map(|r| r.fullname.or(r.des))
        .map(|name| RawRecord::named(name.trim()))
        .collect())
}

// ── Close-approach comets ──────────────────────────────────────────

/// Column-oriented table: `fields` names the columns of every `data` row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CadTable {
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub data: Vec<Vec<serde_json::Value>>,
}

impl CadTable {
    fn column(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == name)
    }
}

pub fn parse_comets(json: &str) -> Result<Vec<RawRecord>> {
    let table: CadTable = serde_json::from_str(json)?;
    let des = table.column("des");
    let fullname = table.column("fullname");
    Ok(table
        .data
        .iter()
        .enumerate()
        .map(|(row_index, row)| {
            let text = |col: Option<usize>| {
                col.and_then(|c| row.get(c))
                    .and_then(|v| v.as_str())
                    .map(|s| s.trim().to_string())
            };
            let name = text(fullname)
                .or_else(|| text(des))
                .unwrap_or_else(|| format!("comet #{}", row_index + 1));
            RawRecord::named(name)
        })
        .collect())
}

/// Dispatch raw JSON for a collection kind to its parser.
pub fn parse_records(kind: FetchedKind, json: &str) -> Result<Vec<RawRecord>> {
    match kind {
        FetchedKind::NearEarth => parse_neo_page(json),
        FetchedKind::Sentry => parse_sentry(json),
        FetchedKind::Comet => parse_comets(json),
        FetchedKind::FamousAsteroid => {
            // Famous asteroids arrive one SBDB lookup at a time, keyed by name.
            #[derive(Deserialize)]
            struct Named {
                name: String,
                #[serde(flatten)]
                lookup: SbdbResponse,
            }
            let named: Named = serde_json::from_str(json)?;
            let elements = named.lookup.orb.map(|orb| orb.to_elements()).transpose()?;
            Ok(vec![RawRecord { designation: named.name, elements }])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sbdb_accepts_string_fields() {
        let json = r#"{"orb": {"a": "1.126", "e": "0.2037", "i": "6.03",
                       "om": "2.06", "w": "66.2", "ma": "101.7"}}"#;
        let elements = parse_sbdb(json).unwrap().unwrap();
        assert_eq!(elements.a, 1.126);
        assert_eq!(elements.ma, 101.7);
        assert_eq!(elements.epoch_jd, None);
    }

    #[test]
    fn sbdb_without_orbit_is_none() {
        assert_eq!(parse_sbdb(r#"{"message": "not found"}"#).unwrap(), None);
    }

    #[test]
    fn sbdb_rejects_unparseable_numbers() {
        let json = r#"{"orb": {"a": "abc", "e": 0.1, "i": 1, "om": 1, "w": 1, "ma": 1}}"#;
        let err = parse_sbdb(json).unwrap_err();
        assert!(matches!(err, OrreryError::InvalidOrbitalElements { field: "a", .. }));
    }

    #[test]
    fn sbdb_rejects_hyperbolic_orbits() {
        let json = r#"{"orb": {"a": 5, "e": 1.2, "i": 1, "om": 1, "w": 1, "ma": 1}}"#;
        assert!(parse_sbdb(json).is_err());
    }

    #[test]
    fn neo_page_keeps_objects_with_bad_elements() {
        let json = r#"{"near_earth_objects": [
            {"id": "2000433", "name": "433 Eros (A898 PA)", "orbital_data": {
                "epoch_osculation": "2461000.5", "eccentricity": ".2226",
                "semi_major_axis": "1.458", "inclination": "10.83",
                "ascending_node_longitude": "304.3", "perihelion_argument": "178.9",
                "mean_anomaly": "310.5"}},
            {"id": "2001036", "name": "1036 Ganymed", "orbital_data": {"eccentricity": "x"}},
            {"id": "3000001"}
        ]}"#;
        let records = parse_neo_page(json).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].designation, "433 Eros (A898 PA)");
        let eros = records[0].elements.unwrap();
        assert_eq!(eros.epoch_jd, Some(2461000.5));
        assert!(records[1].elements.is_none());
        assert_eq!(records[2].designation, "3000001");
    }

    #[test]
    fn sentry_uses_full_names() {
        let json = r#"{"data": [{"des": "29075", "fullname": " 29075 (1950 DA)", "ip": "3.9e-4"},
                                 {"des": "101955"}]}"#;
        let records = parse_sentry(json).unwrap();
        assert_eq!(records[0].designation, "29075 (1950 DA)");
        assert_eq!(records[1].designation, "101955");
    }

    #[test]
    fn comet_rows_are_read_by_column_name() {
        let json = r#"{"fields": ["des", "orbit_id", "jd"],
                       "data": [["1P/Halley", "74", "2446470.5"], ["C/2020 F3", "12", "2459000.5"]]}"#;
        let records = parse_comets(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].designation, "1P/Halley");
    }

    #[test]
    fn missing_collections_parse_as_empty() {
        assert!(parse_neo_page("{}").unwrap().is_empty());
        assert!(parse_sentry("{}").unwrap().is_empty());
        assert!(parse_comets("{}").unwrap().is_empty());
    }

    #[test]
    fn famous_lookup_carries_its_name() {
        let json = r#"{"name": "Bennu", "orb": {"a": 1.126, "e": 0.2037, "i": 6.03,
                       "om": 2.06, "w": 66.2, "ma": 101.7}}"#;
        let records = parse_records(FetchedKind::FamousAsteroid, json).unwrap();
        assert_eq!(records[0].designation, "Bennu");
        assert!(records[0].elements.is_some());
    }
}
