//! Resource DTOs for the Shippo API.
//!
//! # Design
//! Inputs serialize only the fields that are set, so the server applies its
//! own defaults. Outputs tolerate missing fields because the API omits
//! empty values; only `object_id` is guaranteed on a stored object.

use serde::{Deserialize, Serialize};

/// Payload for `POST /addresses/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_residential: Option<bool>,
    /// Ask the server to validate the address on creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
}

/// An address stored by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub object_id: String,
    #[serde(default)]
    pub is_complete: Option<bool>,
    #[serde(default)]
    pub object_created: Option<String>,
    #[serde(default)]
    pub object_updated: Option<String>,
    #[serde(default)]
    pub object_owner: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub street_no: Option<String>,
    #[serde(default)]
    pub street1: Option<String>,
    #[serde(default)]
    pub street2: Option<String>,
    #[serde(default)]
    pub street3: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_residential: Option<bool>,
    #[serde(default)]
    pub metadata: Option<String>,
    /// `true` for objects created with a test token.
    #[serde(default)]
    pub test: Option<bool>,
    #[serde(default)]
    pub validation_results: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceUnit {
    #[serde(rename = "cm")]
    Centimeter,
    #[serde(rename = "in")]
    Inch,
    #[serde(rename = "ft")]
    Foot,
    #[serde(rename = "mm")]
    Millimeter,
    #[serde(rename = "m")]
    Meter,
    #[serde(rename = "yd")]
    Yard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MassUnit {
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "oz")]
    Ounce,
    #[serde(rename = "lb")]
    Pound,
    #[serde(rename = "kg")]
    Kilogram,
}

/// Payload for `POST /parcels/`.
///
/// Dimensions and weight are decimal strings, as the API expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParcelInput {
    pub length: String,
    pub width: String,
    pub height: String,
    pub distance_unit: DistanceUnit,
    pub weight: String,
    pub mass_unit: MassUnit,
    /// Carrier parcel template token; overrides the dimensions when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
}

/// A parcel stored by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
    pub object_id: String,
    #[serde(default)]
    pub object_state: Option<String>,
    #[serde(default)]
    pub object_created: Option<String>,
    #[serde(default)]
    pub object_updated: Option<String>,
    #[serde(default)]
    pub object_owner: Option<String>,
    #[serde(default)]
    pub length: Option<String>,
    #[serde(default)]
    pub width: Option<String>,
    #[serde(default)]
    pub height: Option<String>,
    #[serde(default)]
    pub distance_unit: Option<DistanceUnit>,
    #[serde(default)]
    pub weight: Option<String>,
    #[serde(default)]
    pub mass_unit: Option<MassUnit>,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub metadata: Option<String>,
    #[serde(default)]
    pub test: Option<bool>,
}
