//! Text normalization for catalog comparisons and output rendering.
//!
//! FANTOIR labels are plain-ASCII uppercase while OSM values mix case and
//! diacritics, so membership checks go through [`fold_ascii_upper`] on both
//! sides. Output rendering uses [`title_case`], which capitalizes the first
//! letter of every alphabetic run and lowercases the rest.

/// Fold diacritics to their ASCII base letter and uppercase the result.
///
/// Covers the accented forms that occur in French place names; characters
/// outside the table are uppercased as-is.
pub fn fold_ascii_upper(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match fold_char(ch) {
            Some(folded) => out.push_str(folded),
            None => out.extend(ch.to_uppercase()),
        }
    }
    out
}

fn fold_char(ch: char) -> Option<&'static str> {
    Some(match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'À' | 'Á' | 'Â' | 'Ã' | 'Ä' => "A",
        'è' | 'é' | 'ê' | 'ë' | 'È' | 'É' | 'Ê' | 'Ë' => "E",
        'ì' | 'í' | 'î' | 'ï' | 'Ì' | 'Í' | 'Î' | 'Ï' => "I",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' => "O",
        'ù' | 'ú' | 'û' | 'ü' | 'Ù' | 'Ú' | 'Û' | 'Ü' => "U",
        'ç' | 'Ç' => "C",
        'ý' | 'ÿ' | 'Ý' | 'Ÿ' => "Y",
        'ñ' | 'Ñ' => "N",
        'æ' | 'Æ' => "AE",
        'œ' | 'Œ' => "OE",
        '’' => "'",
        _ => return None,
    })
}

/// Title-case a value: the first letter of each alphabetic run is
/// uppercased, every following letter lowercased. Non-letters (including
/// hyphens and apostrophes) break runs, so `RUE DE L'ÉGLISE` becomes
/// `Rue De L'Église`.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_run = false;
    for ch in input.chars() {
        if ch.is_alphabetic() {
            if in_run {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
                in_run = true;
            }
        } else {
            out.push(ch);
            in_run = false;
        }
    }
    out
}

/// Collapse runs of whitespace to single spaces and trim the ends.
pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
