//! The house-number grammar.
//!
//! A value may carry several entrances separated by commas, except when it
//! is a single apartment list (`Appt 3,4`), which keeps its commas. Each
//! segment validates independently against a small closed grammar:
//!
//! ```text
//! SEGMENT = <digits>
//!         | <digits> <mention>
//!         | Appt <alnum>(,<alnum>)*
//!         | Bat <alnum>
//!         | B.P. <alnum and spaces>
//! ```
//!
//! Parsing is total: every input yields a segment list, never an error.

use crate::street::Mention;

/// One comma-separated house-number segment and its verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HouseNumberSegment {
    pub text: String,
    pub conforms: bool,
}

/// Split a raw house-number value into validated segments.
///
/// A value starting with `Appt` (case-insensitive) is one segment validated
/// whole, so apartment lists are not broken on their commas.
pub fn parse_house_number(raw: &str) -> Vec<HouseNumberSegment> {
    let trimmed = raw.trim();
    if starts_with_ignore_case(trimmed, "appt") {
        return vec![HouseNumberSegment {
            text: trimmed.to_string(),
            conforms: is_appt(trimmed),
        }];
    }

    raw.split(',')
        .map(|segment| {
            let text = segment.trim();
            HouseNumberSegment {
                text: text.to_string(),
                conforms: segment_conforms(text),
            }
        })
        .collect()
}

/// True when every segment of the value conforms.
pub fn house_number_conforms(raw: &str) -> bool {
    parse_house_number(raw)
        .iter()
        .all(|segment| segment.conforms)
}

fn segment_conforms(segment: &str) -> bool {
    is_digits(segment)
        || is_digits_with_mention(segment)
        || is_appt(segment)
        || is_bat(segment)
        || is_po_box(segment)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// `<digits> <mention>`, whitespace optional.
fn is_digits_with_mention(s: &str) -> bool {
    let digits_len = s.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return false;
    }
    Mention::from_token(s[digits_len..].trim_start()).is_some()
}

/// `Appt <alnum>(,<alnum>)*`, case-insensitive, no spaces around commas.
fn is_appt(s: &str) -> bool {
    let Some(rest) = strip_keyword(s, "appt") else {
        return false;
    };
    !rest.is_empty() && rest.split(',').all(is_alnum_chunk)
}

/// `Bat <alnum>`, case-insensitive.
fn is_bat(s: &str) -> bool {
    match strip_keyword(s, "bat") {
        Some(rest) => is_alnum_chunk(rest),
        None => false,
    }
}

/// Post-office box: `BP`/`B.P.` then letters, digits, and spaces.
fn is_po_box(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.is_empty() || !bytes[0].eq_ignore_ascii_case(&b'b') {
        return false;
    }
    let mut rest = &s[1..];
    rest = rest.strip_prefix('.').unwrap_or(rest);
    let Some(after_p) = rest
        .strip_prefix('p')
        .or_else(|| rest.strip_prefix('P'))
    else {
        return false;
    };
    rest = after_p.strip_prefix('.').unwrap_or(after_p);
    let value = rest.trim_start();
    if value.len() == rest.len() || value.is_empty() {
        return false;
    }
    value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == ' ')
}

/// Strip a leading keyword followed by at least one space.
fn strip_keyword<'a>(s: &'a str, keyword: &str) -> Option<&'a str> {
    if !starts_with_ignore_case(s, keyword) {
        return None;
    }
    let rest = &s[keyword.len()..];
    let trimmed = rest.trim_start();
    if trimmed.len() == rest.len() {
        return None;
    }
    Some(trimmed)
}

fn is_alnum_chunk(chunk: &str) -> bool {
    !chunk.is_empty() && chunk.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Byte-wise ASCII prefix comparison; a match guarantees the prefix region
/// is ASCII, keeping the follow-up slice on a char boundary.
fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= prefix.len()
        && bytes[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}
