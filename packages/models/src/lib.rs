#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Data model for the LA crime dashboard core.
//!
//! Defines the canonical incident record produced by the loader, the
//! dataset container every filter and aggregation operates on, the closed
//! crime-description vocabulary, and the value types handed to the
//! presentation layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString, IntoStaticStr};

/// One crime report from the LAPD incident feed, normalized by the loader.
///
/// Coordinates are always present: the loader drops any source row that is
/// missing `lat` or `lon` before a record is ever constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentRecord {
    /// Division of Records number (`dr_no`), the source's unique incident id.
    pub report_id: String,
    /// When the incident was reported (`date_rptd`), parsed at load time.
    pub date_reported: DateTime<Utc>,
    /// When the incident occurred (`date_occ`), kept as raw source text.
    pub date_occurred: Option<String>,
    /// LAPD patrol division number (`area`). `None` when the source field
    /// is missing or non-numeric.
    pub area_code: Option<i32>,
    /// Human-readable division name (`area_name`).
    pub area_name: String,
    /// Numeric crime code (`crm_cd`), kept as raw source text.
    pub crime_code: Option<String>,
    /// Upstream crime description (`crm_cd_desc`), verbatim.
    pub crime_code_description: String,
    /// Premise description (`premis_desc`, e.g. "STREET", "SINGLE FAMILY
    /// DWELLING").
    pub premise_description: Option<String>,
    /// Victim age (`vict_age`). `None` when missing or non-numeric.
    pub victim_age: Option<i32>,
    /// Single-character victim sex code (`vict_sex`).
    pub victim_sex: Option<char>,
    /// Single-character victim descent code (`vict_descent`).
    pub victim_descent: Option<char>,
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
}

/// An ordered collection of incidents, sorted by `date_reported` descending.
///
/// Produced once by the loader and then only ever copied-from: every filter
/// and aggregation is a pure function that leaves its input untouched, so a
/// cached dataset stays canonical for the process lifetime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentDataset {
    /// The member records, newest report first.
    pub records: Vec<IncidentRecord>,
}

impl IncidentDataset {
    /// Wraps a record sequence. The caller is responsible for the sort
    /// order; the loader is the only producer of canonical datasets.
    #[must_use]
    pub const fn new(records: Vec<IncidentRecord>) -> Self {
        Self { records }
    }

    /// Number of records in the dataset.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset contains no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over the records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, IncidentRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a IncidentDataset {
    type Item = &'a IncidentRecord;
    type IntoIter = std::slice::Iter<'a, IncidentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// The five crime types the dashboard's type selector supports.
///
/// The serialized form of each variant is the exact `crm_cd_desc` text
/// published by the LAPD feed, idiosyncrasies included. Matching is
/// case-sensitive and verbatim; these strings must never be "corrected".
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
)]
pub enum CrimeDescription {
    /// Motor vehicle theft
    #[serde(rename = "VEHICLE - STOLEN")]
    #[strum(serialize = "VEHICLE - STOLEN")]
    VehicleStolen,
    /// Simple battery
    #[serde(rename = "BATTERY - SIMPLE ASSAULT")]
    #[strum(serialize = "BATTERY - SIMPLE ASSAULT")]
    BatterySimpleAssault,
    /// Identity theft
    #[serde(rename = "THEFT OF IDENTITY")]
    #[strum(serialize = "THEFT OF IDENTITY")]
    TheftOfIdentity,
    /// Burglary from a vehicle
    #[serde(rename = "BURGLARY FROM VEHICLE")]
    #[strum(serialize = "BURGLARY FROM VEHICLE")]
    BurglaryFromVehicle,
    /// Felony vandalism
    #[serde(rename = "VANDALISM - FELONY ($400 & OVER, ALL CHURCH VANDALISMS)")]
    #[strum(serialize = "VANDALISM - FELONY ($400 & OVER, ALL CHURCH VANDALISMS)")]
    FelonyVandalism,
}

impl CrimeDescription {
    /// All supported crime types, in selector order.
    pub const ALL: &[Self] = &[
        Self::VehicleStolen,
        Self::BatterySimpleAssault,
        Self::TheftOfIdentity,
        Self::BurglaryFromVehicle,
        Self::FelonyVandalism,
    ];

    /// The upstream `crm_cd_desc` label this variant matches against.
    #[must_use]
    pub fn label(self) -> &'static str {
        self.into()
    }
}

/// Caller-supplied filter configuration for one dashboard interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Keep records with `area_code >= min_area_code`. Valid range `0..=19`.
    pub min_area_code: i32,
    /// Keep records with `lo <= victim_age <= hi`. Valid range `0..=100`,
    /// `lo <= hi`.
    pub age_range: (i32, i32),
    /// When set, keep only records whose description matches exactly.
    pub crime_description: Option<CrimeDescription>,
}

impl Default for FilterCriteria {
    /// The widest criteria: every record passes.
    fn default() -> Self {
        Self {
            min_area_code: 0,
            age_range: (0, 100),
            crime_description: None,
        }
    }
}

/// One bar-chart bucket: how many victims share a descent and sex code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateCount {
    /// Victim descent code.
    pub descent: char,
    /// Victim sex code.
    pub sex: char,
    /// Number of records in this group.
    pub count: u64,
}

/// A point for map rendering (also used as a view-centering centroid).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    /// Latitude (WGS84).
    pub lat: f64,
    /// Longitude (WGS84).
    pub lon: f64,
}

/// One input point for the hexagon-binned density layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DensityPoint {
    /// Victim age, when known.
    pub victim_age: Option<i32>,
    /// Latitude (WGS84).
    pub lat: f64,
    /// Longitude (WGS84).
    pub lon: f64,
}

/// One row of the per-crime-type display table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrimeTypeRow {
    /// Upstream crime description.
    pub crime_code_description: String,
    /// Patrol division name.
    pub area_name: String,
    /// Premise description.
    pub premise_description: String,
}
