//! Reference catalog loaders for the osmfr toolkit.
//!
//! Two authoritative datasets drive the audit: the FANTOIR way registry
//! (nature-of-way nomenclature and per-locality way labels) and the
//! La Poste postal-code/locality export. Both load into plain in-memory
//! maps that stay read-only for the lifetime of a run.

pub mod csv_utils;
pub mod error;
pub mod fantoir;
pub mod postal;

use std::path::Path;

pub use error::{Result, StandardsError};
pub use fantoir::{StreetCatalog, WayTypeCatalog};
pub use postal::PostalCatalog;

use osmfr_core::FoldedSet;

/// The reference catalogs bundled for one run: shared, read-only,
/// process-lifetime.
#[derive(Debug, Clone)]
pub struct Catalogs {
    pub way_types: WayTypeCatalog,
    pub streets: StreetCatalog,
    pub postal: PostalCatalog,
    /// Token set for the street grammar, derived once from the nomenclature.
    street_tokens: FoldedSet,
}

impl Catalogs {
    /// Load all catalogs for the given area.
    pub fn load(
        way_types_path: &Path,
        fantoir_path: &Path,
        area_code: &str,
        postal_path: &Path,
    ) -> Result<Self> {
        let way_types = WayTypeCatalog::load(way_types_path)?;
        let streets = StreetCatalog::load(fantoir_path, area_code, &way_types)?;
        let postal = PostalCatalog::load(postal_path)?;
        Ok(Self::new(way_types, streets, postal))
    }

    pub fn new(way_types: WayTypeCatalog, streets: StreetCatalog, postal: PostalCatalog) -> Self {
        let street_tokens = way_types.street_tokens();
        Self {
            way_types,
            streets,
            postal,
            street_tokens,
        }
    }

    /// Grammar tokens for the street parser.
    pub fn street_tokens(&self) -> &FoldedSet {
        &self.street_tokens
    }
}
