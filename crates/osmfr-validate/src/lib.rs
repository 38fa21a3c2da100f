//! Address conformance auditing.
//!
//! Pass one of the two-phase workflow: classify every address-bearing tag
//! against the reference catalogs, accumulate the distinct non-conforming
//! values per category, and emit the correction-candidate files that the
//! operator reviews before the shape pass runs.

pub mod auditor;
pub mod error;
pub mod report;

pub use auditor::Auditor;
pub use error::{Result, ValidateError};
pub use report::{write_candidates, UPDATE_FILE_SUFFIX};
