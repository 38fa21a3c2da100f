//! The street-name grammar (French addressing convention).
//!
//! A street value decomposes into an optional leading house number, an
//! optional mention qualifier, an optional way-type token drawn from the
//! FANTOIR registry, and the remaining core name:
//!
//! ```text
//! [<digits> [<mention>][,] ] [<way type> ] <name>
//! ```
//!
//! The scanner is greedy-leftmost: the longest digit run is consumed before
//! the mention is tried, and the longest catalog token (up to three words)
//! wins the way-type match. Decomposition never fails; an input that fits
//! no prefix comes back whole as the core name, which the auditor then
//! flags.

use crate::lookup::FoldedSet;

/// House-number qualifier marking a secondary unit at the same number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mention {
    Bis,
    Ter,
    Quater,
    Ante,
}

impl Mention {
    /// Case-insensitive token match.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "bis" => Some(Self::Bis),
            "ter" => Some(Self::Ter),
            "quater" => Some(Self::Quater),
            "ante" => Some(Self::Ante),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bis => "bis",
            Self::Ter => "ter",
            Self::Quater => "quater",
            Self::Ante => "ante",
        }
    }
}

/// Decomposed street value. Reassembling the non-empty components in order
/// reproduces the input modulo whitespace collapsing and mention casing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedStreet {
    pub house_number: Option<String>,
    pub mention: Option<Mention>,
    /// Way-type token in its original spelling.
    pub way_type: Option<String>,
    /// Core name; the whole input when nothing else matched.
    pub name: String,
}

impl ParsedStreet {
    /// Join the non-empty components with single spaces.
    pub fn reassemble(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(4);
        if let Some(number) = &self.house_number {
            parts.push(number);
        }
        if let Some(mention) = self.mention {
            parts.push(mention.as_str());
        }
        if let Some(way_type) = &self.way_type {
            parts.push(way_type);
        }
        if !self.name.is_empty() {
            parts.push(&self.name);
        }
        parts.join(" ")
    }
}

/// Parse a raw street value against the way-type token set (FANTOIR codes
/// and names plus the literal `place`, matched case/diacritic-insensitively).
pub fn parse_street(raw: &str, way_types: &FoldedSet) -> ParsedStreet {
    let input = raw.trim();

    let (house_number, mention, tail) = match take_house_number(input) {
        Some((digits, mention, rest)) => (Some(digits.to_string()), mention, rest.trim_start()),
        None => (None, None, input),
    };

    let (way_type, name) = match take_way_type(tail, way_types) {
        Some((token, rest)) => (Some(token.to_string()), rest.trim_start().to_string()),
        None => (None, tail.to_string()),
    };

    ParsedStreet {
        house_number,
        mention,
        way_type,
        name,
    }
}

/// Consume a leading house number: the longest digit run, an optional
/// mention token, an optional comma. The prefix only counts when separating
/// whitespace follows; otherwise the whole input is treated as type+name.
fn take_house_number(input: &str) -> Option<(&str, Option<Mention>, &str)> {
    let digits_len = input.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let digits = &input[..digits_len];
    let after_digits = &input[digits_len..];

    let (mention, after_mention) = match take_mention(after_digits) {
        Some((mention, rest)) => (Some(mention), rest),
        None => (None, after_digits),
    };

    // a comma may close the number segment (whitespace on either side of it
    // is tolerated); separating whitespace is required either way
    let ws_trimmed = after_mention.trim_start();
    if let Some(after_comma) = ws_trimmed.strip_prefix(',') {
        let trimmed = after_comma.trim_start();
        if trimmed.len() < after_comma.len() {
            return Some((digits, mention, trimmed));
        }
    }
    let trimmed = after_mention.trim_start();
    if trimmed.len() == after_mention.len() {
        // no separating whitespace after the number segment
        return None;
    }
    Some((digits, mention, trimmed))
}

fn take_mention(input: &str) -> Option<(Mention, &str)> {
    let trimmed = input.trim_start();
    let token_len = trimmed
        .find(|c: char| c.is_whitespace() || c == ',')
        .unwrap_or(trimmed.len());
    let mention = Mention::from_token(&trimmed[..token_len])?;
    Some((mention, &trimmed[token_len..]))
}

/// Match the longest catalog token (one to three words) at the head of the
/// input. The token must be followed by whitespace; a lone token is a core
/// name, not a type.
fn take_way_type<'a>(input: &'a str, way_types: &FoldedSet) -> Option<(&'a str, &'a str)> {
    let mut boundaries: Vec<usize> = Vec::with_capacity(3);
    let mut offset = 0;
    for word in input.split_whitespace().take(3) {
        let start = input[offset..].find(word).map(|i| offset + i)?;
        let end = start + word.len();
        boundaries.push(end);
        offset = end;
    }

    for end in boundaries.into_iter().rev() {
        if end >= input.len() {
            // token at end of string: nothing left for the core name
            continue;
        }
        let candidate = &input[..end];
        if way_types.contains(&normalize_token(candidate)) {
            return Some((candidate, &input[end..]));
        }
    }
    None
}

fn normalize_token(candidate: &str) -> String {
    candidate.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn way_types() -> FoldedSet {
        FoldedSet::new(["RUE", "AVENUE", "CHEMIN", "ALLEE", "GRANDE RUE", "PLACE"])
    }

    fn parsed(
        house_number: Option<&str>,
        mention: Option<Mention>,
        way_type: Option<&str>,
        name: &str,
    ) -> ParsedStreet {
        ParsedStreet {
            house_number: house_number.map(String::from),
            mention,
            way_type: way_type.map(String::from),
            name: name.to_string(),
        }
    }

    #[test]
    fn plain_type_and_name() {
        assert_eq!(
            parse_street("Rue du Four", &way_types()),
            parsed(None, None, Some("Rue"), "du Four")
        );
    }

    #[test]
    fn house_number_with_mention_and_comma() {
        assert_eq!(
            parse_street("12 bis, Rue du Four", &way_types()),
            parsed(Some("12"), Some(Mention::Bis), Some("Rue"), "du Four")
        );
    }

    #[test]
    fn house_number_without_mention() {
        assert_eq!(
            parse_street("4 Avenue des Roses", &way_types()),
            parsed(Some("4"), None, Some("Avenue"), "des Roses")
        );
    }

    #[test]
    fn mention_needs_word_boundary() {
        // "bisou" must not be read as the mention "bis"
        assert_eq!(
            parse_street("12 bisou Rue du Four", &way_types()),
            parsed(Some("12"), None, None, "bisou Rue du Four")
        );
    }

    #[test]
    fn greedy_digit_prefix() {
        assert_eq!(
            parse_street("1234 Chemin Ligne Paradis", &way_types()),
            parsed(Some("1234"), None, Some("Chemin"), "Ligne Paradis")
        );
    }

    #[test]
    fn multi_word_type_wins_over_prefix() {
        assert_eq!(
            parse_street("Grande Rue Saint-Clair", &way_types()),
            parsed(None, None, Some("Grande Rue"), "Saint-Clair")
        );
    }

    #[test]
    fn type_is_matched_case_insensitively() {
        assert_eq!(
            parse_street("ALLÉE des Sables", &way_types()),
            parsed(None, None, Some("ALLÉE"), "des Sables")
        );
    }

    #[test]
    fn unknown_type_falls_into_name() {
        assert_eq!(
            parse_street("Sentier des Pêcheurs", &way_types()),
            parsed(None, None, None, "Sentier des Pêcheurs")
        );
    }

    #[test]
    fn lone_type_token_is_a_name() {
        assert_eq!(
            parse_street("Rue", &way_types()),
            parsed(None, None, None, "Rue")
        );
    }

    #[test]
    fn number_glued_to_text_is_not_a_house_number() {
        assert_eq!(
            parse_street("12bis", &way_types()),
            parsed(None, None, None, "12bis")
        );
    }

    #[test]
    fn empty_input_yields_empty_name() {
        assert_eq!(parse_street("", &way_types()), parsed(None, None, None, ""));
    }

    #[test]
    fn reassembly_round_trips() {
        let input = "12 bis Rue du Four";
        let result = parse_street(input, &way_types());
        assert_eq!(result.reassemble(), input);
    }
}
