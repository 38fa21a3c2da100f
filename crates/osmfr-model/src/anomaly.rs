use std::collections::{BTreeMap, BTreeSet};

use crate::field::AddressField;

/// Distinct non-conforming raw values accumulated per category during an
/// audit pass.
///
/// Append-only with set semantics: a value seen on many records is recorded
/// once. Iteration order is deterministic (category order, then value order)
/// so two runs over the same input produce identical reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnomalySet {
    by_field: BTreeMap<AddressField, BTreeSet<String>>,
}

impl AnomalySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one non-conforming raw value. Repeats are idempotent.
    pub fn record(&mut self, field: AddressField, value: impl Into<String>) {
        self.by_field.entry(field).or_default().insert(value.into());
    }

    /// Distinct anomalous values for one category.
    pub fn values(&self, field: AddressField) -> impl Iterator<Item = &str> {
        self.by_field
            .get(&field)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Number of distinct anomalous values in one category.
    pub fn count(&self, field: AddressField) -> usize {
        self.by_field.get(&field).map_or(0, BTreeSet::len)
    }

    /// Total distinct anomalous values across all categories.
    pub fn total(&self) -> usize {
        self.by_field.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_field.values().all(BTreeSet::is_empty)
    }

    /// Categories holding at least one anomaly, in category order.
    pub fn fields(&self) -> impl Iterator<Item = AddressField> + '_ {
        self.by_field
            .iter()
            .filter(|(_, set)| !set.is_empty())
            .map(|(field, _)| *field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_is_idempotent() {
        let mut set = AnomalySet::new();
        set.record(AddressField::Phone, "ABC");
        set.record(AddressField::Phone, "ABC");
        set.record(AddressField::Phone, "12");
        assert_eq!(set.count(AddressField::Phone), 2);
        assert_eq!(set.total(), 2);
    }

    #[test]
    fn values_iterate_in_sorted_order() {
        let mut set = AnomalySet::new();
        set.record(AddressField::City, "Z");
        set.record(AddressField::City, "A");
        let values: Vec<_> = set.values(AddressField::City).collect();
        assert_eq!(values, vec!["A", "Z"]);
    }

    #[test]
    fn empty_until_first_record() {
        let mut set = AnomalySet::new();
        assert!(set.is_empty());
        assert_eq!(set.count(AddressField::Street), 0);
        set.record(AddressField::Street, "x");
        assert!(!set.is_empty());
        assert_eq!(set.fields().collect::<Vec<_>>(), vec![AddressField::Street]);
    }
}
