//! Record shaping and canonical output.
//!
//! Pass two of the workflow: consume the operator-reviewed correction
//! mappings, rewrite each field to canonical form, and emit line-delimited
//! JSON records. The normalizer never runs concurrently with the audit
//! pass; its correctness depends on mappings reviewed after a prior audit.

pub mod error;
pub mod mappings;
pub mod shaper;
pub mod writer;

pub use error::{Result, TransformError};
pub use mappings::CorrectionMappings;
pub use shaper::{rename_street, Shaper};
pub use writer::write_json_lines;
