#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Pure filter and aggregation layer over the incident dataset.
//!
//! Every function here is a stateless transform: filters produce new
//! derived datasets without touching their input, aggregations recompute
//! from whatever view they are handed. The cached canonical dataset is
//! never mutated downstream of the loader.

pub mod aggregate;
pub mod filter;
pub mod products;

pub use aggregate::{EmptyDatasetError, centroid, count_by_descent_and_sex};
pub use filter::{
    ValidationError, apply, filter_by_age_range, filter_by_crime_description, filter_by_min_area,
};
pub use products::{crime_type_table, density_points, map_points};
