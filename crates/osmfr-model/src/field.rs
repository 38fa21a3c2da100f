use serde::{Deserialize, Serialize};

/// The closed set of audited field categories.
///
/// Each category owns a validation grammar, one anomaly set, and one
/// correction-mapping file named after [`AddressField::stem`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AddressField {
    Street,
    City,
    HouseNumber,
    HousePostcode,
    PostalCode,
    Population,
    Direction,
    Elevation,
    Capacity,
    Phone,
}

/// Tag key to category dispatch table. Keys not listed here are not audited.
const KEY_TABLE: &[(&str, AddressField)] = &[
    ("addr:street", AddressField::Street),
    ("addr:city", AddressField::City),
    ("addr:housenumber", AddressField::HouseNumber),
    ("addr:postcode", AddressField::HousePostcode),
    ("postal_code", AddressField::PostalCode),
    ("population", AddressField::Population),
    ("direction", AddressField::Direction),
    ("ele", AddressField::Elevation),
    ("capacity", AddressField::Capacity),
    ("phone", AddressField::Phone),
];

impl AddressField {
    /// All categories, in report order.
    pub const ALL: [AddressField; 10] = [
        AddressField::Street,
        AddressField::City,
        AddressField::HouseNumber,
        AddressField::HousePostcode,
        AddressField::PostalCode,
        AddressField::Population,
        AddressField::Direction,
        AddressField::Elevation,
        AddressField::Capacity,
        AddressField::Phone,
    ];

    /// Route a tag key to its category. Unknown keys return `None` and are
    /// skipped by the auditor.
    pub fn for_key(key: &str) -> Option<Self> {
        KEY_TABLE
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, field)| *field)
    }

    /// File stem naming this category's correction-candidate and
    /// correction-mapping files (`<stem>-update.csv`).
    pub fn stem(self) -> &'static str {
        match self {
            Self::Street => "street_names",
            Self::City => "cities",
            Self::HouseNumber => "house_numbers",
            Self::HousePostcode => "house_postcodes",
            Self::PostalCode => "postal_codes",
            Self::Population => "populations",
            Self::Direction => "directions",
            Self::Elevation => "elevations",
            Self::Capacity => "capacities",
            Self::Phone => "phones",
        }
    }
}
