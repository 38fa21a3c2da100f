//! Operator-reviewed correction mappings.
//!
//! One `<stem>-update.csv` per category, seeded by the audit pass and
//! edited by hand. An absent file is an empty mapping; a lookup miss is
//! identity. Mappings are owned by the caller and only read during the
//! shape pass.

use std::collections::BTreeMap;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use osmfr_model::AddressField;

use crate::error::{Result, TransformError};

const OLD_COLUMN: &str = "OLD";
const NEW_COLUMN: &str = "NEW";

/// Per-category raw-value to canonical-value mappings.
#[derive(Debug, Clone, Default)]
pub struct CorrectionMappings {
    by_field: BTreeMap<AddressField, BTreeMap<String, String>>,
}

impl CorrectionMappings {
    /// An all-identity mapping set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load every category file present under `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut mappings = Self::default();
        let mut loaded = 0usize;
        for field in AddressField::ALL {
            let path = dir.join(format!("{}-update.csv", field.stem()));
            if !path.exists() {
                continue;
            }
            mappings.by_field.insert(field, load_file(&path)?);
            loaded += 1;
        }
        debug!(loaded, dir = %dir.display(), "correction mappings loaded");
        Ok(mappings)
    }

    /// Register one correction pair.
    pub fn insert(
        &mut self,
        field: AddressField,
        old: impl Into<String>,
        new: impl Into<String>,
    ) {
        self.by_field
            .entry(field)
            .or_default()
            .insert(old.into(), new.into());
    }

    /// Exact-lookup-or-identity application.
    pub fn apply(&self, field: AddressField, value: &str) -> String {
        self.lookup(field, value)
            .map_or_else(|| value.to_string(), String::from)
    }

    /// Exact lookup of a correction, if one was supplied.
    pub fn lookup(&self, field: AddressField, value: &str) -> Option<&str> {
        self.by_field
            .get(&field)
            .and_then(|mapping| mapping.get(value))
            .map(String::as_str)
    }

    /// Number of corrections across all categories.
    pub fn len(&self) -> usize {
        self.by_field.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_field.values().all(BTreeMap::is_empty)
    }
}

fn load_file(path: &Path) -> Result<BTreeMap<String, String>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|error| TransformError::csv(path, &error))?;

    let headers = reader
        .headers()
        .map_err(|error| TransformError::csv(path, &error))?;
    let old_idx = column_index(headers, path, OLD_COLUMN)?;
    let new_idx = column_index(headers, path, NEW_COLUMN)?;

    let mut mapping = BTreeMap::new();
    for record in reader.records() {
        let record = record.map_err(|error| TransformError::csv(path, &error))?;
        let old = record.get(old_idx).unwrap_or_default();
        let new = record.get(new_idx).unwrap_or_default();
        if old.is_empty() {
            continue;
        }
        mapping.insert(old.to_string(), new.to_string());
    }
    Ok(mapping)
}

fn column_index(headers: &csv::StringRecord, path: &Path, column: &str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header.trim_matches('\u{feff}') == column)
        .ok_or_else(|| TransformError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn absent_files_mean_identity() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mappings = CorrectionMappings::load(dir.path()).expect("load empty dir");
        assert!(mappings.is_empty());
        assert_eq!(mappings.apply(AddressField::Street, "Bd Lancastel"), "Bd Lancastel");
    }

    #[test]
    fn loads_reviewed_pairs() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join("street_names-update.csv"),
            "\"OLD\",\"NEW\"\n\"Bd Lancastel\",\"Boulevard Lancastel\"\n",
        )
        .expect("write mapping");

        let mappings = CorrectionMappings::load(dir.path()).expect("load mappings");
        assert_eq!(mappings.len(), 1);
        assert_eq!(
            mappings.apply(AddressField::Street, "Bd Lancastel"),
            "Boulevard Lancastel"
        );
        // untouched categories and unmapped values pass through
        assert_eq!(mappings.apply(AddressField::Street, "Rue Neuve"), "Rue Neuve");
        assert_eq!(mappings.apply(AddressField::Phone, "ABC"), "ABC");
    }

    #[test]
    fn missing_column_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join("phones-update.csv"),
            "OLD\n0262123456\n",
        )
        .expect("write mapping");

        let error = CorrectionMappings::load(dir.path()).expect_err("must fail");
        assert!(error.to_string().contains("NEW"));
    }
}
