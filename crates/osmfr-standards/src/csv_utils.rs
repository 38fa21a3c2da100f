//! Shared CSV utilities for loading reference files.

use std::collections::BTreeMap;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{Result, StandardsError};

/// Read a semicolon-separated CSV file into a vector of row maps.
///
/// Each row is keyed by its column header. BOM characters are trimmed from
/// the first header and values are whitespace-trimmed.
pub fn read_semicolon_rows(path: &Path) -> Result<Vec<BTreeMap<String, String>>> {
    read_rows(path, b';')
}

/// Read a delimited CSV file into a vector of row maps.
pub fn read_rows(path: &Path, delimiter: u8) -> Result<Vec<BTreeMap<String, String>>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|error| StandardsError::csv(path, &error))?;

    let headers = reader
        .headers()
        .map_err(|error| StandardsError::csv(path, &error))?
        .clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|error| StandardsError::csv(path, &error))?;
        let mut row = BTreeMap::new();
        for (idx, value) in record.iter().enumerate() {
            let key = headers
                .get(idx)
                .unwrap_or("")
                .trim_matches('\u{feff}')
                .to_string();
            row.insert(key, value.trim().to_string());
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Get a field value from a row, or fail naming the missing column.
pub fn require_field(
    row: &BTreeMap<String, String>,
    path: &Path,
    column: &str,
) -> Result<String> {
    row.get(column)
        .cloned()
        .ok_or_else(|| StandardsError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        })
}
