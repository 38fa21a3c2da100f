//! FANTOIR reference catalogs.
//!
//! Two artifacts come out of the national way registry: the nature-of-way
//! nomenclature (code to canonical type name, from the registry
//! documentation) and the per-locality way labels extracted from the
//! fixed-width records of the registry file itself.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use osmfr_core::{fold_ascii_upper, FoldedSet};

use crate::csv_utils::{read_semicolon_rows, require_field};
use crate::error::{Result, StandardsError};

/// Length of the locality prefix of a rivoli key (department, direction,
/// and commune codes).
const LOCALITY_PREFIX: usize = 6;
/// Rivoli key width in a registry record.
const KEY_WIDTH: usize = 11;
/// End of the nature-of-way code column.
const TYPE_END: usize = 15;
/// End of the way label column; the record tail beyond it is not used.
const LABEL_END: usize = 41;

/// Nature-of-way nomenclature: code to canonical type name.
#[derive(Debug, Clone, Default)]
pub struct WayTypeCatalog {
    by_code: BTreeMap<String, String>,
}

impl WayTypeCatalog {
    /// Build a nomenclature from `(code, type name)` pairs.
    pub fn from_pairs<I, C, N>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (C, N)>,
        C: AsRef<str>,
        N: Into<String>,
    {
        let by_code = pairs
            .into_iter()
            .map(|(code, name)| (fold_ascii_upper(code.as_ref()), name.into()))
            .collect();
        Self { by_code }
    }

    /// Load the `TYPE;TYPE_NAME` nomenclature CSV.
    pub fn load(path: &Path) -> Result<Self> {
        let mut by_code = BTreeMap::new();
        for row in read_semicolon_rows(path)? {
            let code = require_field(&row, path, "TYPE")?;
            let name = require_field(&row, path, "TYPE_NAME")?;
            if code.is_empty() || name.is_empty() {
                continue;
            }
            by_code.insert(fold_ascii_upper(&code), name);
        }
        debug!(count = by_code.len(), "loaded way-type nomenclature");
        Ok(Self { by_code })
    }

    /// Canonical type name for a nature-of-way code, case-insensitively.
    pub fn name_for_code(&self, code: &str) -> Option<&str> {
        self.by_code.get(&fold_ascii_upper(code)).map(String::as_str)
    }

    /// Canonical type names, in code order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.by_code.values().map(String::as_str)
    }

    /// Token set for the street grammar: the union of codes and type names
    /// plus the literal `place`, which the registry abbreviates away.
    pub fn street_tokens(&self) -> FoldedSet {
        let mut tokens = FoldedSet::default();
        for (code, name) in &self.by_code {
            tokens.insert(code);
            tokens.insert(name);
        }
        tokens.insert("place");
        tokens
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

/// Canonical way labels for one covered area, grouped per locality code.
#[derive(Debug, Clone, Default)]
pub struct StreetCatalog {
    names: FoldedSet,
    by_locality: BTreeMap<String, BTreeSet<String>>,
}

impl StreetCatalog {
    /// Build a catalog from `(locality code, way label)` pairs.
    pub fn from_labels<I, L, N>(labels: I) -> Self
    where
        I: IntoIterator<Item = (L, N)>,
        L: Into<String>,
        N: AsRef<str>,
    {
        let mut catalog = Self::default();
        for (locality, label) in labels {
            catalog.names.insert(label.as_ref());
            catalog
                .by_locality
                .entry(locality.into())
                .or_default()
                .insert(fold_ascii_upper(label.as_ref()));
        }
        catalog
    }

    /// Load way records from the fixed-width registry file, keeping the
    /// lines of the given area whose rivoli key is well-formed and whose
    /// nature-of-way code exists in the nomenclature.
    pub fn load(path: &Path, area_code: &str, way_types: &WayTypeCatalog) -> Result<Self> {
        let file = File::open(path).map_err(|error| StandardsError::io(path, error))?;
        let reader = BufReader::new(file);

        let mut names = FoldedSet::default();
        let mut by_locality: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut kept = 0usize;

        for line in reader.lines() {
            let line = line.map_err(|error| StandardsError::io(path, error))?;
            if !line.starts_with(area_code) {
                continue;
            }
            let Some(record) = parse_record(&line) else {
                continue;
            };
            if record.label.is_empty() || way_types.name_for_code(&record.type_code).is_none() {
                continue;
            }
            names.insert(&record.label);
            by_locality
                .entry(record.locality.clone())
                .or_default()
                .insert(fold_ascii_upper(&record.label));
            kept += 1;
        }

        debug!(
            kept,
            localities = by_locality.len(),
            area = area_code,
            "loaded way labels"
        );
        Ok(Self { names, by_locality })
    }

    /// Case/diacritic-insensitive membership of a way label.
    pub fn contains_name(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Folded way labels of one locality, if the locality is known.
    pub fn names_for_locality(&self, locality: &str) -> Option<&BTreeSet<String>> {
        self.by_locality.get(locality)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

struct WayRecord {
    locality: String,
    type_code: String,
    label: String,
}

/// Slice one fixed-width registry line into its way columns.
///
/// Only the first 41 characters carry the key, the nature-of-way code, and
/// the label; header and commune lines are recognized by a first
/// whitespace-delimited token shorter than a full rivoli key and skipped.
fn parse_record(line: &str) -> Option<WayRecord> {
    // the registry is ASCII; collect chars to stay safe on stray encodings
    let chars: Vec<char> = line.chars().take(LABEL_END).collect();
    if chars.len() < TYPE_END {
        return None;
    }
    let first_token_len = chars.iter().take_while(|c| !c.is_whitespace()).count();
    if first_token_len < KEY_WIDTH {
        return None;
    }

    let locality: String = chars[..LOCALITY_PREFIX].iter().collect();
    let type_code: String = chars[KEY_WIDTH..TYPE_END].iter().collect();
    let label: String = chars[TYPE_END..].iter().collect();
    Some(WayRecord {
        locality,
        type_code: type_code.trim().to_string(),
        label: label.trim().to_string(),
    })
}
