use serde::{Deserialize, Serialize};

/// Top-level OSM element kind.
///
/// Relations are carried through extraction so callers can count them, but
/// both processing passes skip them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Node,
    Way,
    Relation,
}

impl ElementKind {
    /// Parse an element name as it appears in the source document.
    pub fn from_tag_name(name: &str) -> Option<Self> {
        match name {
            "node" => Some(Self::Node),
            "way" => Some(Self::Way),
            "relation" => Some(Self::Relation),
            _ => None,
        }
    }

    /// True for the two kinds the audit and shape passes process.
    pub fn is_addressable(self) -> bool {
        matches!(self, Self::Node | Self::Way)
    }
}

/// One extracted node/way/relation with its attributes and children,
/// in document order. Immutable once read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedRecord {
    pub kind: ElementKind,
    /// XML attributes of the element (`id`, `lat`, `lon`, creation metadata, ...).
    pub attributes: Vec<(String, String)>,
    /// `<tag k= v=>` children.
    pub tags: Vec<(String, String)>,
    /// `<nd ref=>` children (ways only).
    pub node_refs: Vec<String>,
}

impl TaggedRecord {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            attributes: Vec::new(),
            tags: Vec::new(),
            node_refs: Vec::new(),
        }
    }

    /// Value of the first attribute named `key`, if any.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The element id, when present.
    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    /// Value of the first tag with key `key`, if any.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
