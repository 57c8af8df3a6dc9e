//! Flat CSV table I/O shared by the domain stores.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use cadence_core::errors::{CadenceError, CadenceResult};

/// Read every row of a CSV table. Header mismatches, malformed rows and
/// a missing file all surface as `csv::Error` so the caller can apply
/// its reset policy in one place.
pub fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, csv::Error> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Rewrite a CSV table atomically: write to a sibling temp file, flush,
/// then rename over the target. The header is always written so an
/// empty table still round-trips.
pub fn write_table<T: Serialize>(
    path: &Path,
    header: &[&str],
    rows: &[T],
) -> CadenceResult<()> {
    let tmp = path.with_extension("csv.tmp");
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&tmp)
            .map_err(|e| CadenceError::storage(e.to_string()))?;
        writer
            .write_record(header)
            .map_err(|e| CadenceError::storage(e.to_string()))?;
        for row in rows {
            writer
                .serialize(row)
                .map_err(|e| CadenceError::storage(e.to_string()))?;
        }
        writer
            .flush()
            .map_err(|e| CadenceError::storage(e.to_string()))?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}
