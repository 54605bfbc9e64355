//! CSV export functionality.
//!
//! One file per (origin, destination, date): a header row followed by one row
//! per unique record.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::WriterBuilder;
use std::path::{Path, PathBuf};

use crate::extract::FlightRecord;

/// Path of the CSV file for one route and date.
///
/// `data/flights_data_ORD_ATH_2024-06-10.csv` for the default output directory.
pub fn output_path(dir: &Path, origin: &str, destination: &str, date: NaiveDate) -> PathBuf {
    dir.join(format!(
        "flights_data_{}_{}_{}.csv",
        origin,
        destination,
        date.format("%Y-%m-%d")
    ))
}

/// Writes records to `path`, replacing any existing file.
///
/// The header row is always written, so an empty result still produces a
/// valid CSV with no data rows. Missing parent directories are created.
///
/// # Returns
///
/// Returns the number of data rows written.
pub fn write_records_csv(path: &Path, records: &[FlightRecord]) -> Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).context(format!(
            "Failed to create output directory: {}",
            parent.display()
        ))?;
    }

    let file = std::fs::File::create(path)
        .context(format!("Failed to create output file: {}", path.display()))?;
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

    writer.write_record(FlightRecord::FIELD_NAMES)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer
        .flush()
        .context(format!("Failed to flush output file: {}", path.display()))?;

    Ok(records.len())
}
