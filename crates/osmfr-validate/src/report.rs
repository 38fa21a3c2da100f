//! Correction-candidate file emission.
//!
//! For every category holding anomalies, the auditor materializes a
//! human-reviewable `<stem>-update.csv` seeded with identity `OLD,NEW`
//! rows. Operators edit the `NEW` column by hand; the shape pass then
//! consumes the reviewed files as correction mappings.

use std::path::{Path, PathBuf};

use csv::{QuoteStyle, WriterBuilder};
use tracing::info;

use osmfr_model::AnomalySet;

use crate::error::{Result, ValidateError};

/// Suffix of every candidate and mapping file.
pub const UPDATE_FILE_SUFFIX: &str = "-update.csv";

/// Write one candidate file per non-empty category into `dir`, seeded with
/// identity mappings in deterministic order. Returns the written paths.
pub fn write_candidates(anomalies: &AnomalySet, dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for field in anomalies.fields() {
        let path = dir.join(format!("{}{}", field.stem(), UPDATE_FILE_SUFFIX));
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .from_path(&path)
            .map_err(|error| ValidateError::csv(&path, &error))?;
        writer
            .write_record(["OLD", "NEW"])
            .map_err(|error| ValidateError::csv(&path, &error))?;
        for value in anomalies.values(field) {
            writer
                .write_record([value, value])
                .map_err(|error| ValidateError::csv(&path, &error))?;
        }
        writer
            .flush()
            .map_err(|error| ValidateError::io(&path, error))?;
        info!(
            category = field.stem(),
            values = anomalies.count(field),
            path = %path.display(),
            "candidate file written"
        );
        written.push(path);
    }
    Ok(written)
}
