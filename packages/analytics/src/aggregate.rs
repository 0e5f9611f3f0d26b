//! On-demand aggregations over a filtered view.

use std::collections::HashMap;

use crime_dash_models::{AggregateCount, IncidentDataset, MapPoint};
use thiserror::Error;

/// Centroid requested over a view with no records. The presentation layer
/// handles this by skipping the map-centering step; it is never collapsed
/// into NaN or `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot compute a centroid over an empty dataset")]
pub struct EmptyDatasetError;

/// Groups records by `(victim_descent, victim_sex)` and counts each group.
///
/// Records missing either code are skipped entirely. Groups are emitted in
/// first-occurrence order, so the output is deterministic for a given
/// input; absent pairs are omitted rather than zero-filled.
#[must_use]
pub fn count_by_descent_and_sex(dataset: &IncidentDataset) -> Vec<AggregateCount> {
    let mut counts: Vec<AggregateCount> = Vec::new();
    let mut index: HashMap<(char, char), usize> = HashMap::new();

    for record in dataset {
        let (Some(descent), Some(sex)) = (record.victim_descent, record.victim_sex) else {
            continue;
        };

        match index.get(&(descent, sex)) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                index.insert((descent, sex), counts.len());
                counts.push(AggregateCount {
                    descent,
                    sex,
                    count: 1,
                });
            }
        }
    }

    counts
}

/// Arithmetic mean position of a view, used to center the map.
///
/// # Errors
///
/// Returns [`EmptyDatasetError`] when the view has no records.
pub fn centroid(dataset: &IncidentDataset) -> Result<MapPoint, EmptyDatasetError> {
    if dataset.is_empty() {
        return Err(EmptyDatasetError);
    }

    #[allow(clippy::cast_precision_loss)]
    let n = dataset.len() as f64;
    let (lat_sum, lon_sum) = dataset.iter().fold((0.0, 0.0), |(lat, lon), record| {
        (lat + record.latitude, lon + record.longitude)
    });

    Ok(MapPoint {
        lat: lat_sum / n,
        lon: lon_sum / n,
    })
}
