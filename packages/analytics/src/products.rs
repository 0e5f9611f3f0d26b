//! Data products consumed by the presentation layer.
//!
//! Each function projects a (usually already-filtered) view into the shape
//! one widget renders: plain points for the scatter map, age-tagged points
//! for the hexagon density layer, and the three-column table shown per
//! crime type. The full filtered record sequence itself serves as the raw
//! table product.

use crime_dash_models::{CrimeDescription, CrimeTypeRow, DensityPoint, IncidentDataset, MapPoint};

use crate::filter::filter_by_crime_description;

/// Projects a view to `{lat, lon}` pairs for point/map rendering.
#[must_use]
pub fn map_points(dataset: &IncidentDataset) -> Vec<MapPoint> {
    dataset
        .iter()
        .map(|record| MapPoint {
            lat: record.latitude,
            lon: record.longitude,
        })
        .collect()
}

/// Projects a view to `{victim_age, lat, lon}` tuples for the hexagon
/// density layer.
#[must_use]
pub fn density_points(dataset: &IncidentDataset) -> Vec<DensityPoint> {
    dataset
        .iter()
        .map(|record| DensityPoint {
            victim_age: record.victim_age,
            lat: record.latitude,
            lon: record.longitude,
        })
        .collect()
}

/// Builds the per-crime-type display table: exact-match filter, projection
/// to description/area/premise, and rows missing any display column
/// dropped.
#[must_use]
pub fn crime_type_table(
    dataset: &IncidentDataset,
    description: CrimeDescription,
) -> Vec<CrimeTypeRow> {
    let view = filter_by_crime_description(dataset, description);
    view.iter()
        .filter_map(|record| {
            let premise = record.premise_description.clone()?;
            if record.area_name.is_empty() {
                return None;
            }
            Some(CrimeTypeRow {
                crime_code_description: record.crime_code_description.clone(),
                area_name: record.area_name.clone(),
                premise_description: premise,
            })
        })
        .collect()
}
