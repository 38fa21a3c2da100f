use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::record::ElementKind;

/// Creation metadata grouped under the `created` key of the output document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Created {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changeset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

impl Created {
    /// Store a creation attribute by key. Returns false when `key` is not a
    /// creation key.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        let slot = match key {
            "version" => &mut self.version,
            "changeset" => &mut self.changeset,
            "timestamp" => &mut self.timestamp,
            "user" => &mut self.user,
            "uid" => &mut self.uid,
            _ => return false,
        };
        *slot = Some(value.to_string());
        true
    }
}

/// Address block of the output document, keyed from `addr:*` tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub housenumber: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    /// Remaining `addr:*` keys carried through unchanged.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

/// One shaped output record, serialized as a single JSON document per line.
///
/// Constructed once per accepted [`crate::TaggedRecord`] and immutable
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub created: Created,
    /// `[latitude, longitude]`, present only for records carrying coordinates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    /// Flat scalar tags (`phone`, `capacity`, `name`, ...).
    #[serde(flatten)]
    pub tags: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub node_refs: Vec<String>,
}

impl CanonicalRecord {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            id: None,
            kind,
            created: Created::default(),
            pos: None,
            address: None,
            tags: BTreeMap::new(),
            node_refs: Vec::new(),
        }
    }

    /// Position slot, created as `[0.0, 0.0]` on first access.
    pub fn position_mut(&mut self) -> &mut [f64; 2] {
        self.pos.get_or_insert([0.0, 0.0])
    }

    /// Address block, created empty on first access.
    pub fn address_mut(&mut self) -> &mut Address {
        self.address.get_or_insert_with(Address::default)
    }
}
