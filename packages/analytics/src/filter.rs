//! Composable predicate filters over an [`IncidentDataset`].
//!
//! Each filter keys on a disjoint attribute and the three are conjunctive,
//! so chaining them in any order yields the same record set. Out-of-contract
//! parameters fail fast with [`ValidationError`]; parameters that are merely
//! outside the data's actual range just produce a smaller (possibly empty)
//! view.

use crime_dash_models::{CrimeDescription, FilterCriteria, IncidentDataset};
use thiserror::Error;

/// The area slider's contract range. LAPD publishes divisions 1-21, but the
/// dashboard slider is pinned to this window.
pub const MIN_AREA_RANGE: std::ops::RangeInclusive<i32> = 0..=19;

/// The age slider's contract range.
pub const AGE_RANGE: std::ops::RangeInclusive<i32> = 0..=100;

/// A caller-supplied filter parameter was outside its contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Minimum area outside `0..=19`.
    #[error("minimum area {value} is outside 0..=19")]
    AreaOutOfRange {
        /// The rejected value.
        value: i32,
    },

    /// Age bounds outside `0..=100`, or inverted. Bounds are never silently
    /// swapped.
    #[error("age range {lo}..={hi} is invalid (expected 0 <= lo <= hi <= 100)")]
    InvalidAgeRange {
        /// Lower bound as supplied.
        lo: i32,
        /// Upper bound as supplied.
        hi: i32,
    },
}

/// Keeps records whose `area_code` is at least `min_area`. Records with an
/// unknown area never match.
///
/// # Errors
///
/// Returns [`ValidationError::AreaOutOfRange`] when `min_area` is outside
/// `0..=19`.
pub fn filter_by_min_area(
    dataset: &IncidentDataset,
    min_area: i32,
) -> Result<IncidentDataset, ValidationError> {
    if !MIN_AREA_RANGE.contains(&min_area) {
        return Err(ValidationError::AreaOutOfRange { value: min_area });
    }

    Ok(retain(dataset, |record| {
        record.area_code.is_some_and(|area| area >= min_area)
    }))
}

/// Keeps records whose `victim_age` lies in `lo..=hi`. Records with a
/// missing or invalid age never match.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidAgeRange`] when the bounds are
/// inverted or outside `0..=100`.
pub fn filter_by_age_range(
    dataset: &IncidentDataset,
    lo: i32,
    hi: i32,
) -> Result<IncidentDataset, ValidationError> {
    if lo > hi || !AGE_RANGE.contains(&lo) || !AGE_RANGE.contains(&hi) {
        return Err(ValidationError::InvalidAgeRange { lo, hi });
    }

    Ok(retain(dataset, |record| {
        record.victim_age.is_some_and(|age| age >= lo && age <= hi)
    }))
}

/// Keeps records whose `crime_code_description` matches the variant's
/// upstream label exactly. Case-sensitive; `"vehicle - stolen"` does not
/// match [`CrimeDescription::VehicleStolen`].
#[must_use]
pub fn filter_by_crime_description(
    dataset: &IncidentDataset,
    description: CrimeDescription,
) -> IncidentDataset {
    retain(dataset, |record| {
        record.crime_code_description == description.label()
    })
}

/// Applies a full [`FilterCriteria`] as the conjunction of the three
/// filters.
///
/// # Errors
///
/// Returns [`ValidationError`] if any criterion is out of contract; no
/// partial filtering is performed.
pub fn apply(
    dataset: &IncidentDataset,
    criteria: &FilterCriteria,
) -> Result<IncidentDataset, ValidationError> {
    let (lo, hi) = criteria.age_range;
    let mut view = filter_by_min_area(dataset, criteria.min_area_code)?;
    view = filter_by_age_range(&view, lo, hi)?;
    if let Some(description) = criteria.crime_description {
        view = filter_by_crime_description(&view, description);
    }

    log::debug!(
        "Filter pass kept {} of {} records",
        view.len(),
        dataset.len()
    );
    Ok(view)
}

fn retain(
    dataset: &IncidentDataset,
    predicate: impl Fn(&crime_dash_models::IncidentRecord) -> bool,
) -> IncidentDataset {
    IncidentDataset::new(
        dataset
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone as _, Utc};
    use crime_dash_models::IncidentRecord;

    use super::*;

    fn record(
        id: &str,
        area: Option<i32>,
        age: Option<i32>,
        description: &str,
    ) -> IncidentRecord {
        IncidentRecord {
            report_id: id.to_owned(),
            date_reported: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            date_occurred: None,
            area_code: area,
            area_name: "Central".to_owned(),
            crime_code: None,
            crime_code_description: description.to_owned(),
            premise_description: Some("STREET".to_owned()),
            victim_age: age,
            victim_sex: Some('M'),
            victim_descent: Some('H'),
            latitude: 34.05,
            longitude: -118.25,
        }
    }

    fn dataset() -> IncidentDataset {
        IncidentDataset::new(vec![
            record("1", Some(3), Some(25), "VEHICLE - STOLEN"),
            record("2", Some(12), Some(60), "THEFT OF IDENTITY"),
            record("3", None, Some(40), "VEHICLE - STOLEN"),
            record("4", Some(15), None, "vehicle - stolen"),
        ])
    }

    fn ids(dataset: &IncidentDataset) -> Vec<&str> {
        dataset.iter().map(|r| r.report_id.as_str()).collect()
    }

    #[test]
    fn min_area_keeps_matching_records_only() {
        let view = filter_by_min_area(&dataset(), 10).unwrap();
        assert_eq!(ids(&view), ["2", "4"]);
    }

    #[test]
    fn min_area_missing_area_never_matches() {
        let view = filter_by_min_area(&dataset(), 0).unwrap();
        assert_eq!(ids(&view), ["1", "2", "4"]);
    }

    #[test]
    fn min_area_out_of_contract_fails_fast() {
        assert_eq!(
            filter_by_min_area(&dataset(), 20),
            Err(ValidationError::AreaOutOfRange { value: 20 })
        );
        assert_eq!(
            filter_by_min_area(&dataset(), -1),
            Err(ValidationError::AreaOutOfRange { value: -1 })
        );
    }

    #[test]
    fn age_range_is_inclusive_and_skips_missing_ages() {
        let view = filter_by_age_range(&dataset(), 25, 60).unwrap();
        assert_eq!(ids(&view), ["1", "2", "3"]);
    }

    #[test]
    fn inverted_age_bounds_are_rejected_not_swapped() {
        assert_eq!(
            filter_by_age_range(&dataset(), 60, 25),
            Err(ValidationError::InvalidAgeRange { lo: 60, hi: 25 })
        );
        assert!(filter_by_age_range(&dataset(), 0, 101).is_err());
    }

    #[test]
    fn description_match_is_case_sensitive() {
        let view = filter_by_crime_description(&dataset(), CrimeDescription::VehicleStolen);
        // "4" carries the lowercase text and must be excluded.
        assert_eq!(ids(&view), ["1", "3"]);
    }

    #[test]
    fn filters_commute() {
        let d = dataset();
        let area_then_age =
            filter_by_age_range(&filter_by_min_area(&d, 5).unwrap(), 0, 50).unwrap();
        let age_then_area =
            filter_by_min_area(&filter_by_age_range(&d, 0, 50).unwrap(), 5).unwrap();
        assert_eq!(area_then_age, age_then_area);
    }

    #[test]
    fn filters_do_not_mutate_their_input() {
        let d = dataset();
        let before = d.clone();
        let _ = filter_by_min_area(&d, 10).unwrap();
        let _ = filter_by_age_range(&d, 0, 30).unwrap();
        let _ = filter_by_crime_description(&d, CrimeDescription::TheftOfIdentity);
        assert_eq!(d, before);
    }

    #[test]
    fn apply_chains_all_three() {
        let criteria = FilterCriteria {
            min_area_code: 2,
            age_range: (20, 70),
            crime_description: Some(CrimeDescription::VehicleStolen),
        };
        let view = apply(&dataset(), &criteria).unwrap();
        assert_eq!(ids(&view), ["1"]);
    }

    #[test]
    fn apply_surfaces_validation_errors() {
        let criteria = FilterCriteria {
            min_area_code: 0,
            age_range: (50, 10),
            crime_description: None,
        };
        assert!(apply(&dataset(), &criteria).is_err());
    }

    #[test]
    fn out_of_data_range_parameter_yields_empty_view_not_error() {
        let view = filter_by_min_area(&dataset(), 19).unwrap();
        assert!(view.is_empty());
    }
}
