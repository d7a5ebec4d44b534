use serde::{Deserialize, Serialize};

/// A reservable amenity. The amenity service answers in PascalCase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Amenity {
    pub id: i64,
    pub name: String,
}

/// An amenity reservation held by the resident.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AmenityReservation {
    pub id: i64,
    pub amenity_name: String,
    pub start_date: String,
    pub end_date: String,
}
