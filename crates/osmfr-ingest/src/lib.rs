//! Streaming OSM XML extraction.
//!
//! [`RecordReader`] walks an export in document order with constant memory,
//! yielding [`osmfr_model::TaggedRecord`]s; structural XML failures abort
//! the pass as [`IngestError`]s. [`write_sample`] cuts fixtures from large
//! exports.

pub mod error;
pub mod reader;
pub mod sample;

pub use error::{IngestError, Result};
pub use reader::RecordReader;
pub use sample::write_sample;
