//! Shared data model for the osmfr address audit toolkit.
//!
//! The types here are the contract between the extraction, audit, and shape
//! passes: extracted [`TaggedRecord`]s flow in, the auditor accumulates an
//! [`AnomalySet`] keyed by [`AddressField`], and the shaper emits immutable
//! [`CanonicalRecord`]s.

pub mod anomaly;
pub mod canonical;
pub mod field;
pub mod record;

pub use anomaly::AnomalySet;
pub use canonical::{Address, CanonicalRecord, Created};
pub use field::AddressField;
pub use record::{ElementKind, TaggedRecord};
