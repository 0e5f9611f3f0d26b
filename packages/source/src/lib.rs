#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! LAPD incident feed client and the dataset loader/normalizer.
//!
//! The fetch side is behind the [`IncidentFetcher`] trait so that the cache
//! layer and tests can substitute a stub for the live Socrata endpoint.
//! [`load`] turns one fetched CSV body into a canonical
//! [`IncidentDataset`]: headers lowercased, rows without coordinates
//! dropped, `date_rptd` parsed, records sorted newest-report first.

pub mod normalize;
pub mod parsing;
pub mod socrata;

use async_trait::async_trait;
use crime_dash_models::IncidentDataset;

/// Errors that can occur while loading the incident dataset.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// HTTP request failed or returned a non-success status.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// CSV was structurally malformed.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// A `date_rptd` value could not be parsed as a date. The whole load
    /// fails; there is no row-level partial success for dates.
    #[error("unparseable date_rptd value: {value:?}")]
    DateParse {
        /// The offending field text.
        value: String,
    },

    /// The fetched CSV lacks one of the projected columns (schema drift).
    #[error("fetched CSV is missing expected column {name:?}")]
    MissingColumn {
        /// The expected column name, in canonical lowercase form.
        name: &'static str,
    },
}

/// Fetches one CSV body of incident rows from the Remote Dataset Source.
///
/// `row_limit` is a cap, not a promise: the source returns fewer rows when
/// the dataset is smaller than the limit.
#[async_trait]
pub trait IncidentFetcher: Send + Sync {
    /// Downloads up to `row_limit` rows of incident CSV.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Http`] if the source is unreachable or responds
    /// with a non-success status. Never retried.
    async fn fetch_csv(&self, row_limit: u64) -> Result<Vec<u8>, LoadError>;
}

/// Fetches and normalizes one incident dataset.
///
/// # Errors
///
/// Returns [`LoadError`] if the fetch fails, the CSV is malformed, a
/// projected column is missing, or any `date_rptd` value does not parse.
pub async fn load(
    fetcher: &dyn IncidentFetcher,
    row_limit: u64,
) -> Result<IncidentDataset, LoadError> {
    let csv_bytes = fetcher.fetch_csv(row_limit).await?;
    let dataset = normalize::parse_dataset(&csv_bytes)?;
    log::info!("Loaded {} incidents (row limit {row_limit})", dataset.len());
    Ok(dataset)
}
