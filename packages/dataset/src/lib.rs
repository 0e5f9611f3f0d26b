#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Memoizing cache over the incident loader.
//!
//! Re-fetching the source CSV on every slider move is the single largest
//! cost in the dashboard, so loads are memoized per row limit for the
//! process lifetime. There is no TTL; staleness is accepted by policy, and
//! [`DatasetCache::invalidate`] / [`DatasetCache::clear`] exist for callers
//! (and tests) that need a refetch.

use std::collections::HashMap;
use std::sync::Arc;

use crime_dash_models::IncidentDataset;
use crime_dash_source::{IncidentFetcher, LoadError};
use tokio::sync::Mutex;

/// Process-lifetime cache mapping a row limit to its loaded dataset.
///
/// The map lock is held across the fetch, so concurrent calls for any key
/// serialize behind the first loader and the same limit is never fetched
/// twice. Failed loads are not cached; the next call re-attempts.
pub struct DatasetCache<F> {
    fetcher: F,
    entries: Mutex<HashMap<u64, Arc<IncidentDataset>>>,
}

impl<F: IncidentFetcher> DatasetCache<F> {
    /// Creates an empty cache around the given fetcher.
    #[must_use]
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the dataset for `row_limit`, fetching and normalizing it on
    /// the first call and reusing the cached value afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the underlying load fails. The failure is
    /// not cached.
    pub async fn load(&self, row_limit: u64) -> Result<Arc<IncidentDataset>, LoadError> {
        let mut entries = self.entries.lock().await;

        if let Some(dataset) = entries.get(&row_limit) {
            log::debug!("Dataset cache hit for row limit {row_limit}");
            return Ok(Arc::clone(dataset));
        }

        log::debug!("Dataset cache miss for row limit {row_limit}");
        let dataset = Arc::new(crime_dash_source::load(&self.fetcher, row_limit).await?);
        entries.insert(row_limit, Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Evicts the entry for `row_limit`. Returns whether one was present.
    pub async fn invalidate(&self, row_limit: u64) -> bool {
        self.entries.lock().await.remove(&row_limit).is_some()
    }

    /// Evicts every cached dataset.
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    /// Number of cached datasets (one per distinct row limit seen).
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Whether no dataset has been cached yet.
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}
