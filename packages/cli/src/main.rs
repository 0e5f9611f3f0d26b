#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the LA crime dashboard core.
//!
//! Loads the incident dataset through the memoizing cache, applies the
//! slider/selector filters, and prints one presentation data product as
//! JSON (or a human-readable digest). The rendering widgets themselves —
//! map, hexagon layer, bar chart — live elsewhere; this binary is the
//! interactive caller they sit behind.

use std::str::FromStr as _;

use clap::{Parser, Subcommand};
use crime_dash_analytics::{centroid, count_by_descent_and_sex};
use crime_dash_dataset::DatasetCache;
use crime_dash_models::{CrimeDescription, FilterCriteria, MapPoint};
use crime_dash_source::socrata::SocrataFetcher;

#[derive(Parser)]
#[command(name = "crime_dash_cli", about = "LA crime incident dashboard core")]
struct Cli {
    /// Maximum number of rows to fetch from the source
    #[arg(long, default_value = "100000")]
    rows: u64,

    /// Keep incidents whose area code is at least this value (0-19)
    #[arg(long, default_value = "0")]
    min_area: i32,

    /// Lower victim age bound, inclusive (0-100)
    #[arg(long, default_value = "0")]
    age_min: i32,

    /// Upper victim age bound, inclusive (0-100)
    #[arg(long, default_value = "100")]
    age_max: i32,

    /// Exact upstream crime description to keep (see `crimes`)
    #[arg(long)]
    crime: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print `{lat, lon}` pairs for map rendering
    Points,
    /// Print `{victimAge, lat, lon}` tuples plus the view centroid
    Density,
    /// Print victim counts grouped by descent and sex
    Counts,
    /// Print the per-crime-type display table (requires `--crime`)
    Table,
    /// Print a human-readable digest of the filtered view
    Summary,
    /// List the supported crime descriptions
    Crimes,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    if matches!(cli.command, Commands::Crimes) {
        for description in CrimeDescription::ALL {
            println!("{}", description.label());
        }
        return Ok(());
    }

    let crime = cli
        .crime
        .as_deref()
        .map(|label| {
            CrimeDescription::from_str(label)
                .map_err(|_| format!("unknown crime description: {label:?} (see `crimes`)"))
        })
        .transpose()?;

    let criteria = FilterCriteria {
        min_area_code: cli.min_area,
        age_range: (cli.age_min, cli.age_max),
        crime_description: crime,
    };

    let cache = DatasetCache::new(SocrataFetcher::new());
    let dataset = cache.load(cli.rows).await?;
    let view = crime_dash_analytics::apply(&dataset, &criteria)?;

    match cli.command {
        Commands::Points => {
            let points = crime_dash_analytics::map_points(&view);
            println!("{}", serde_json::to_string(&points)?);
        }
        Commands::Density => {
            let points = crime_dash_analytics::density_points(&view);
            let center = view_centroid(&view);
            println!(
                "{}",
                serde_json::to_string(&serde_json::json!({
                    "points": points,
                    "centroid": center,
                }))?
            );
        }
        Commands::Counts => {
            let counts = count_by_descent_and_sex(&view);
            println!("{}", serde_json::to_string(&counts)?);
        }
        Commands::Table => {
            let Some(description) = crime else {
                return Err("`table` requires --crime".into());
            };
            let rows = crime_dash_analytics::crime_type_table(&view, description);
            println!("{}", serde_json::to_string(&rows)?);
        }
        Commands::Summary => {
            println!("Incidents loaded:   {}", dataset.len());
            println!("Incidents in view:  {}", view.len());
            println!("Age window:         {}..={}", cli.age_min, cli.age_max);
            println!("Minimum area code:  {}", cli.min_area);
            if let Some(description) = crime {
                println!("Crime description:  {}", description.label());
            }
            match view_centroid(&view) {
                Some(center) => {
                    println!("View centroid:      ({:.4}, {:.4})", center.lat, center.lon);
                }
                None => println!("View centroid:      n/a (empty view)"),
            }
        }
        Commands::Crimes => unreachable!("handled before loading"),
    }

    Ok(())
}

/// Centering is skipped for an empty view rather than treated as fatal.
fn view_centroid(view: &crime_dash_models::IncidentDataset) -> Option<MapPoint> {
    match centroid(view) {
        Ok(center) => Some(center),
        Err(e) => {
            log::warn!("Skipping map centering: {e}");
            None
        }
    }
}
