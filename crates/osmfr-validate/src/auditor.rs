//! The audit pass.
//!
//! Every address-bearing tag of every node/way is routed through the
//! category dispatch table and checked against its grammar and, where one
//! applies, its reference catalog. Non-conforming raw values accumulate in
//! an [`AnomalySet`]; a field anomaly is recorded, never raised, and never
//! blocks the rest of the record.

use tracing::debug;

use osmfr_core::{house_number_conforms, parse_street, scalars};
use osmfr_model::{AddressField, AnomalySet, TaggedRecord};
use osmfr_standards::Catalogs;

/// One audit run over a record stream. Catalogs are shared and read-only.
pub struct Auditor<'a> {
    catalogs: &'a Catalogs,
}

impl<'a> Auditor<'a> {
    pub fn new(catalogs: &'a Catalogs) -> Self {
        Self { catalogs }
    }

    /// Audit a fallible record stream, propagating the stream's own error
    /// as fatal. Field anomalies are recorded in the returned set.
    pub fn audit<I, E>(&self, records: I) -> Result<AnomalySet, E>
    where
        I: IntoIterator<Item = Result<TaggedRecord, E>>,
    {
        let mut anomalies = AnomalySet::new();
        let mut seen = 0usize;
        for record in records {
            self.audit_record(&record?, &mut anomalies);
            seen += 1;
        }
        debug!(
            records = seen,
            anomalies = anomalies.total(),
            "audit pass finished"
        );
        Ok(anomalies)
    }

    /// Audit one record. Relations and unrecognized tag keys are skipped
    /// silently.
    pub fn audit_record(&self, record: &TaggedRecord, anomalies: &mut AnomalySet) {
        if !record.kind.is_addressable() {
            return;
        }
        for (key, value) in &record.tags {
            let Some(field) = AddressField::for_key(key) else {
                continue;
            };
            if !self.conforms(field, value) {
                anomalies.record(field, value.clone());
            }
        }
    }

    /// Category verdict for one raw value.
    fn conforms(&self, field: AddressField, value: &str) -> bool {
        match field {
            AddressField::Street => self.street_conforms(value),
            AddressField::City => self.catalogs.postal.known_locality(value),
            AddressField::HouseNumber => house_number_conforms(value),
            AddressField::HousePostcode | AddressField::PostalCode => {
                scalars::is_postcode(value) && self.catalogs.postal.known_postcode(value)
            }
            AddressField::Population => scalars::is_population(value),
            AddressField::Direction => scalars::is_direction(value),
            AddressField::Elevation => scalars::is_elevation(value),
            AddressField::Capacity => scalars::is_capacity(value),
            AddressField::Phone => scalars::is_phone(value),
        }
    }

    /// A street conforms when it carries a known way-type token and its
    /// core name is a registered way label.
    fn street_conforms(&self, value: &str) -> bool {
        let parsed = parse_street(value, self.catalogs.street_tokens());
        parsed.way_type.is_some() && self.catalogs.streets.contains_name(&parsed.name)
    }
}
