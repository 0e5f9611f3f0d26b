//! Field-level parsing helpers for the incident CSV.
//!
//! Everything here is lenient except [`parse_report_date`]: the report date
//! is the dataset's sort key, so an unparseable value is surfaced to the
//! caller instead of being defaulted.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parses a Socrata date string (ISO 8601, with or without fractional
/// seconds, or a bare date).
#[must_use]
pub fn parse_report_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    // Older portal CSV exports use this form.
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%m/%d/%Y %I:%M:%S %p") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

/// Parses the `lat`/`lon` pair. Returns `None` when either field is missing
/// or non-numeric; such rows are dropped by the normalizer. Zero
/// coordinates are kept as-is — the feed publishes them and the dashboard
/// never imputes.
#[must_use]
pub fn parse_coordinates(lat: &str, lon: &str) -> Option<(f64, f64)> {
    let latitude = lat.trim().parse::<f64>().ok()?;
    let longitude = lon.trim().parse::<f64>().ok()?;
    Some((latitude, longitude))
}

/// Parses a small integer field (`area`, `vict_age`). Returns `None` when
/// missing or non-numeric.
#[must_use]
pub fn parse_int_field(s: &str) -> Option<i32> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i32>().ok()
}

/// Parses a single-character categorical code (`vict_sex`, `vict_descent`).
#[must_use]
pub fn parse_code_char(s: &str) -> Option<char> {
    s.trim().chars().next()
}

/// Maps an empty field to `None`, anything else to owned text.
#[must_use]
pub fn optional_text(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
