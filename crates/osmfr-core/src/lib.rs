//! Address field grammars and text routines for French OSM data.
//!
//! Every grammar is an explicit character scanner over immutable input, so
//! the edge cases that matter (greedy house-number prefix, optional mention
//! token, shortcut-code compaction) stay auditable and unit-testable in
//! isolation. All scanners are total: malformed input yields a
//! non-conforming verdict, never an error.

pub mod house_number;
pub mod keys;
pub mod lookup;
pub mod scalars;
pub mod shortcut;
pub mod street;
pub mod text;

pub use house_number::{house_number_conforms, parse_house_number, HouseNumberSegment};
pub use keys::{classify_key, has_problem_char, is_lower, is_lower_colon, KeyClass};
pub use lookup::FoldedSet;
pub use shortcut::{parse_shortcut, ShortcutParts};
pub use street::{parse_street, Mention, ParsedStreet};
pub use text::{collapse_whitespace, fold_ascii_upper, title_case};
