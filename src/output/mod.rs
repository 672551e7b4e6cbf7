//! Console summaries and JSON export of stage results

pub mod stats;

pub use stats::{
    print_city_summary, print_detail_summary, print_station_summary, StageStatistics,
};

use crate::CrawlerError;
use serde::Serialize;
use std::path::Path;

/// Writes a stage's results as pretty-printed JSON
///
/// # Arguments
///
/// * `path` - Destination file, overwritten if present
/// * `value` - Records to write (a city list or a keyed result mapping)
pub fn write_json<T>(path: &Path, value: &T) -> Result<(), CrawlerError>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    tracing::info!("Results written to {}", path.display());
    Ok(())
}
