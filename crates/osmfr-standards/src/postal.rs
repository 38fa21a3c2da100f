//! La Poste postal-code / locality registry.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use osmfr_core::FoldedSet;

use crate::csv_utils::{read_semicolon_rows, require_field};
use crate::error::Result;

const POSTCODE_COLUMN: &str = "Code_postal";
const COMMUNE_COLUMN: &str = "Nom_commune";
const LOCALITY_COLUMN: &str = "Libelle_acheminement";

/// Bidirectional postal-code / locality mapping from the official
/// semicolon-separated La Poste export.
#[derive(Debug, Clone, Default)]
pub struct PostalCatalog {
    city_by_postcode: BTreeMap<String, String>,
    postcode_by_locality: BTreeMap<String, String>,
    locality_by_postcode: BTreeMap<String, String>,
    localities: FoldedSet,
}

impl PostalCatalog {
    /// Build a registry from `(postcode, commune, locality label)` rows.
    pub fn from_rows<I, P, C, L>(rows: I) -> Self
    where
        I: IntoIterator<Item = (P, C, L)>,
        P: Into<String>,
        C: Into<String>,
        L: Into<String>,
    {
        let mut catalog = Self::default();
        for (postcode, commune, locality) in rows {
            let postcode = postcode.into();
            let locality = locality.into();
            catalog
                .city_by_postcode
                .insert(postcode.clone(), commune.into());
            catalog
                .postcode_by_locality
                .insert(locality.clone(), postcode.clone());
            catalog
                .locality_by_postcode
                .insert(postcode, locality.clone());
            catalog.localities.insert(&locality);
        }
        catalog
    }

    pub fn load(path: &Path) -> Result<Self> {
        let mut catalog = Self::default();
        for row in read_semicolon_rows(path)? {
            let postcode = require_field(&row, path, POSTCODE_COLUMN)?;
            let commune = require_field(&row, path, COMMUNE_COLUMN)?;
            let locality = require_field(&row, path, LOCALITY_COLUMN)?;
            if postcode.is_empty() {
                continue;
            }
            catalog
                .city_by_postcode
                .insert(postcode.clone(), commune);
            catalog
                .postcode_by_locality
                .insert(locality.clone(), postcode.clone());
            catalog.locality_by_postcode.insert(postcode, locality.clone());
            catalog.localities.insert(&locality);
        }
        debug!(
            postcodes = catalog.locality_by_postcode.len(),
            localities = catalog.postcode_by_locality.len(),
            "loaded postal registry"
        );
        Ok(catalog)
    }

    /// True when the postal code appears in the registry.
    pub fn known_postcode(&self, postcode: &str) -> bool {
        self.locality_by_postcode.contains_key(postcode)
    }

    /// Case/diacritic-insensitive membership of a locality label.
    pub fn known_locality(&self, locality: &str) -> bool {
        self.localities.contains(locality)
    }

    pub fn city_for_postcode(&self, postcode: &str) -> Option<&str> {
        self.city_by_postcode.get(postcode).map(String::as_str)
    }

    pub fn postcode_for_locality(&self, locality: &str) -> Option<&str> {
        self.postcode_by_locality.get(locality).map(String::as_str)
    }

    pub fn locality_for_postcode(&self, postcode: &str) -> Option<&str> {
        self.locality_by_postcode.get(postcode).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.locality_by_postcode.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locality_by_postcode.is_empty()
    }
}
