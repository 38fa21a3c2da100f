use std::collections::HashMap;

use crate::text::fold_ascii_upper;

/// Membership set keyed by the folded-uppercase form of each entry, so
/// lookups ignore case and diacritics. The first original spelling is kept
/// for display.
#[derive(Debug, Clone, Default)]
pub struct FoldedSet {
    map: HashMap<String, String>,
}

impl FoldedSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for name in names {
            set.insert(name.as_ref());
        }
        set
    }

    pub fn insert(&mut self, name: &str) {
        let key = fold_ascii_upper(name);
        self.map.entry(key).or_insert_with(|| name.to_string());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(&fold_ascii_upper(name))
    }

    /// Original spelling of a member, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map
            .get(&fold_ascii_upper(name))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_ignores_case_and_diacritics() {
        let set = FoldedSet::new(["GENERAL LECLERC", "PITON ROUGE"]);
        assert!(set.contains("Général Leclerc"));
        assert!(set.contains("piton rouge"));
        assert!(!set.contains("Piton Bleu"));
    }

    #[test]
    fn keeps_first_spelling() {
        let mut set = FoldedSet::default();
        set.insert("Rue");
        set.insert("RUE");
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("rue"), Some("Rue"));
    }
}
