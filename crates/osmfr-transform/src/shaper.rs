//! The shape pass.
//!
//! Re-classifies every tag exactly as the auditor does, applies the
//! reviewed correction mappings, and emits one immutable
//! [`CanonicalRecord`] per node/way. Relations yield no output.

use tracing::trace;

use osmfr_core::{
    has_problem_char, is_lower, is_lower_colon, parse_shortcut, parse_street, title_case,
    FoldedSet,
};
use osmfr_model::{AddressField, CanonicalRecord, ElementKind, TaggedRecord};

use crate::error::{Result, TransformError};
use crate::mappings::CorrectionMappings;

/// One shape run. Mappings and grammar tokens are read-only.
pub struct Shaper {
    mappings: CorrectionMappings,
    street_tokens: FoldedSet,
}

impl Shaper {
    pub fn new(mappings: CorrectionMappings, street_tokens: FoldedSet) -> Self {
        Self {
            mappings,
            street_tokens,
        }
    }

    /// Shape one record. Relations are skipped (`None`), unparsable
    /// coordinates are fatal.
    pub fn shape(&self, record: &TaggedRecord) -> Result<Option<CanonicalRecord>> {
        if !record.kind.is_addressable() {
            return Ok(None);
        }
        let mut out = CanonicalRecord::new(record.kind);

        for (key, value) in &record.attributes {
            if out.created.set(key, value) {
                continue;
            }
            match key.as_str() {
                "id" => out.id = Some(value.clone()),
                "lat" => out.position_mut()[0] = parse_coordinate(value)?,
                "lon" => out.position_mut()[1] = parse_coordinate(value)?,
                _ => {
                    out.tags.insert(key.clone(), value.clone());
                }
            }
        }

        for (key, value) in &record.tags {
            self.shape_tag(key, value, &mut out);
        }

        if record.kind == ElementKind::Way {
            out.node_refs = record.node_refs.clone();
        }

        trace!(id = out.id.as_deref(), "record shaped");
        Ok(Some(out))
    }

    fn shape_tag(&self, key: &str, value: &str, out: &mut CanonicalRecord) {
        if has_problem_char(key) {
            return;
        }
        if let Some(addr_key) = key.strip_prefix("addr:") {
            if is_lower_colon(addr_key) {
                return;
            }
            let address = out.address_mut();
            match addr_key {
                "street" => address.street = Some(self.shape_street(value)),
                "city" => address.city = Some(self.mappings.apply(AddressField::City, value)),
                "housenumber" => {
                    address.housenumber =
                        Some(self.mappings.apply(AddressField::HouseNumber, value));
                }
                "postcode" => {
                    // stray spaces inside postcodes are a known data defect
                    let stripped: String = value.chars().filter(|c| *c != ' ').collect();
                    address.postcode =
                        Some(self.mappings.apply(AddressField::HousePostcode, &stripped));
                }
                other => {
                    address.extra.insert(other.to_string(), value.to_string());
                }
            }
            return;
        }

        if key == "name" {
            out.tags.insert(key.to_string(), self.shape_street(value));
            return;
        }
        if let Some(field) = AddressField::for_key(key) {
            out.tags
                .insert(key.to_string(), self.mappings.apply(field, value));
            return;
        }
        if is_lower(key) {
            out.tags.insert(key.to_string(), value.to_string());
        }
    }

    /// Street rendering: correction mapping first, then canonical casing.
    fn shape_street(&self, value: &str) -> String {
        let mapped = self.mappings.apply(AddressField::Street, value);
        rename_street(&mapped, &self.street_tokens)
    }
}

/// Render a street value in canonical form: shortcut designations are
/// compacted and keep their remainder untouched; everything else is
/// re-parsed and re-rendered in title case.
pub fn rename_street(value: &str, way_types: &FoldedSet) -> String {
    if let Some(parts) = parse_shortcut(value) {
        return format!("{}{}", parts.compacted(), parts.rest);
    }
    let parsed = parse_street(value, way_types);
    title_case(&parsed.reassemble())
}

fn parse_coordinate(value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| TransformError::InvalidCoordinate {
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn street_tokens() -> FoldedSet {
        FoldedSet::new(["RUE", "AVENUE", "BOULEVARD", "CHEMIN", "PLACE"])
    }

    fn shaper() -> Shaper {
        Shaper::new(CorrectionMappings::empty(), street_tokens())
    }

    fn node() -> TaggedRecord {
        let mut record = TaggedRecord::new(ElementKind::Node);
        record.attributes = vec![
            ("id".to_string(), "3480487005".to_string()),
            ("lat".to_string(), "-21.2918".to_string()),
            ("lon".to_string(), "55.6440".to_string()),
            ("version".to_string(), "2".to_string()),
            ("changeset".to_string(), "123".to_string()),
            ("timestamp".to_string(), "2017-01-01T00:00:00Z".to_string()),
            ("user".to_string(), "fred".to_string()),
            ("uid".to_string(), "331831".to_string()),
            ("visible".to_string(), "true".to_string()),
        ];
        record
    }

    #[test]
    fn groups_creation_metadata_and_position() {
        let shaped = shaper()
            .shape(&node())
            .expect("shape")
            .expect("node yields output");
        assert_eq!(shaped.id.as_deref(), Some("3480487005"));
        assert_eq!(shaped.pos, Some([-21.2918, 55.644]));
        assert_eq!(shaped.created.version.as_deref(), Some("2"));
        assert_eq!(shaped.created.user.as_deref(), Some("fred"));
        assert_eq!(shaped.created.uid.as_deref(), Some("331831"));
        assert_eq!(shaped.tags.get("visible").map(String::as_str), Some("true"));
    }

    #[test]
    fn street_is_title_cased() {
        let mut record = node();
        record.tags.push((
            "addr:street".to_string(),
            "RUE DU FOUR A CHAUX".to_string(),
        ));
        let shaped = shaper().shape(&record).expect("shape").expect("output");
        let address = shaped.address.expect("address block");
        assert_eq!(address.street.as_deref(), Some("Rue Du Four A Chaux"));
    }

    #[test]
    fn street_mapping_applies_before_rendering() {
        let mut mappings = CorrectionMappings::empty();
        mappings.insert(
            AddressField::Street,
            "Bd Lancastel",
            "Boulevard Lancastel",
        );
        let shaper = Shaper::new(mappings, street_tokens());

        let mut record = node();
        record
            .tags
            .push(("addr:street".to_string(), "Bd Lancastel".to_string()));
        let shaped = shaper.shape(&record).expect("shape").expect("output");
        assert_eq!(
            shaped.address.expect("address").street.as_deref(),
            Some("Boulevard Lancastel")
        );
    }

    #[test]
    fn shortcut_streets_are_compacted() {
        let mut record = node();
        record
            .tags
            .push(("addr:street".to_string(), "R N 2".to_string()));
        let shaped = shaper().shape(&record).expect("shape").expect("output");
        assert_eq!(
            shaped.address.expect("address").street.as_deref(),
            Some("RN2")
        );
    }

    #[test]
    fn shortcut_rendering_is_a_fixed_point() {
        let tokens = street_tokens();
        assert_eq!(rename_street("RN2", &tokens), "RN2");
        assert_eq!(rename_street("CD12 les Hauts", &tokens), "CD12 les Hauts");
    }

    #[test]
    fn title_rendering_is_stable() {
        let tokens = street_tokens();
        let once = rename_street("12 bis rue du four a chaux", &tokens);
        assert_eq!(once, "12 Bis Rue Du Four A Chaux");
        assert_eq!(rename_street(&once, &tokens), once);
    }

    #[test]
    fn postcode_spaces_are_stripped() {
        let mut record = node();
        record
            .tags
            .push(("addr:postcode".to_string(), "974 80".to_string()));
        let shaped = shaper().shape(&record).expect("shape").expect("output");
        assert_eq!(
            shaped.address.expect("address").postcode.as_deref(),
            Some("97480")
        );
    }

    #[test]
    fn name_goes_through_the_street_mapping() {
        let mut mappings = CorrectionMappings::empty();
        mappings.insert(AddressField::Street, "ravine des cabris", "Ravine des Cabris");
        let shaper = Shaper::new(mappings, street_tokens());

        let mut record = node();
        record
            .tags
            .push(("name".to_string(), "ravine des cabris".to_string()));
        let shaped = shaper.shape(&record).expect("shape").expect("output");
        assert_eq!(
            shaped.tags.get("name").map(String::as_str),
            Some("Ravine Des Cabris")
        );
    }

    #[test]
    fn scalar_tags_apply_their_mapping() {
        let mut mappings = CorrectionMappings::empty();
        mappings.insert(AddressField::Phone, "ABC", "0262123456");
        let shaper = Shaper::new(mappings, street_tokens());

        let mut record = node();
        record.tags.push(("phone".to_string(), "ABC".to_string()));
        record.tags.push(("population".to_string(), "37480".to_string()));
        let shaped = shaper.shape(&record).expect("shape").expect("output");
        assert_eq!(
            shaped.tags.get("phone").map(String::as_str),
            Some("0262123456")
        );
        assert_eq!(
            shaped.tags.get("population").map(String::as_str),
            Some("37480")
        );
    }

    #[test]
    fn problem_and_nested_keys_are_dropped() {
        let mut record = node();
        record
            .tags
            .push(("fixme please".to_string(), "x".to_string()));
        record
            .tags
            .push(("addr:street:note".to_string(), "x".to_string()));
        record.tags.push(("FIXME".to_string(), "x".to_string()));
        record
            .tags
            .push(("source:date".to_string(), "2017".to_string()));
        let shaped = shaper().shape(&record).expect("shape").expect("output");
        assert!(shaped.address.is_none());
        assert!(!shaped.tags.contains_key("fixme please"));
        assert!(!shaped.tags.contains_key("FIXME"));
        assert!(!shaped.tags.contains_key("source:date"));
    }

    #[test]
    fn other_addr_keys_pass_through() {
        let mut record = node();
        record
            .tags
            .push(("addr:country".to_string(), "FR".to_string()));
        let shaped = shaper().shape(&record).expect("shape").expect("output");
        assert_eq!(
            shaped
                .address
                .expect("address")
                .extra
                .get("country")
                .map(String::as_str),
            Some("FR")
        );
    }

    #[test]
    fn ways_keep_node_refs_and_relations_are_skipped() {
        let mut way = TaggedRecord::new(ElementKind::Way);
        way.attributes
            .push(("id".to_string(), "10".to_string()));
        way.node_refs = vec!["1".to_string(), "2".to_string()];
        let shaped = shaper().shape(&way).expect("shape").expect("output");
        assert_eq!(shaped.node_refs, vec!["1", "2"]);
        assert_eq!(shaped.pos, None);

        let relation = TaggedRecord::new(ElementKind::Relation);
        assert!(shaper().shape(&relation).expect("shape").is_none());
    }

    #[test]
    fn bad_coordinates_are_fatal() {
        let mut record = TaggedRecord::new(ElementKind::Node);
        record
            .attributes
            .push(("lat".to_string(), "South".to_string()));
        let error = shaper().shape(&record).expect_err("must fail");
        assert!(matches!(error, TransformError::InvalidCoordinate { .. }));
    }
}
