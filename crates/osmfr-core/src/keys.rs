//! Tag key classification.
//!
//! Output keys must be plain lowercase identifiers; keys carrying
//! problematic characters never reach the output document, and `addr:*`
//! sub-keys that themselves contain a colon are rejected by the shaper.

/// Characters that disqualify a key from the output document.
const PROBLEM_CHARS: &str = "=+/&<>;'\"?%#$@,. \t\r\n";

/// Grammar class of a tag key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyClass {
    /// Only lowercase letters and underscores.
    Lower,
    /// Two lowercase/underscore segments joined by a single colon.
    LowerColon,
    /// Contains at least one problematic character.
    Problem,
    /// Anything else (mixed case, digits, multiple colons, ...).
    Other,
}

/// Classify a tag key. `Lower` and `LowerColon` take precedence over
/// `Problem` so a plain key is never misfiled.
pub fn classify_key(key: &str) -> KeyClass {
    if is_lower(key) {
        KeyClass::Lower
    } else if is_lower_colon(key) {
        KeyClass::LowerColon
    } else if has_problem_char(key) {
        KeyClass::Problem
    } else {
        KeyClass::Other
    }
}

/// True when every character is a lowercase ASCII letter or underscore.
pub fn is_lower(key: &str) -> bool {
    key.bytes().all(|b| b.is_ascii_lowercase() || b == b'_')
}

/// True for `prefix:suffix` where both halves satisfy [`is_lower`].
pub fn is_lower_colon(key: &str) -> bool {
    match key.split_once(':') {
        Some((prefix, suffix)) => is_lower(prefix) && is_lower(suffix),
        None => false,
    }
}

/// True when the key contains any character from the problem set.
pub fn has_problem_char(key: &str) -> bool {
    key.chars().any(|c| PROBLEM_CHARS.contains(c))
}
