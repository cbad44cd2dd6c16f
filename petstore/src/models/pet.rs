//! Pet resource types.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A pet available through the store.
///
/// `name` and `photo_urls` are the only fields the API requires; everything
/// else is optional on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    /// Unique identifier, assigned by the server when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Category the pet belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    /// Display name.
    pub name: String,

    /// Photo URLs for the pet.
    pub photo_urls: Vec<String>,

    /// Free-form tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,

    /// Availability status in the store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PetStatus>,
}

impl Pet {
    /// Creates a pet with the required fields set.
    pub fn new(name: impl Into<String>, photo_urls: Vec<String>) -> Self {
        Self {
            id: None,
            category: None,
            name: name.into(),
            photo_urls,
            tags: None,
            status: None,
        }
    }
}

/// Availability status of a pet in the store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PetStatus {
    /// Ready to be ordered.
    Available,
    /// An order is in flight.
    Pending,
    /// Already sold.
    Sold,
}

/// A pet category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Category name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A free-form tag attached to a pet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Unique identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Tag text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_wire_names() {
        let mut pet = Pet::new("doggie", vec!["http://img/1.png".to_string()]);
        pet.status = Some(PetStatus::Available);

        let json = serde_json::to_value(&pet).unwrap();
        assert_eq!(json["name"], "doggie");
        assert_eq!(json["photoUrls"][0], "http://img/1.png");
        assert_eq!(json["status"], "available");
        // Unset optionals stay off the wire entirely
        assert!(json.get("id").is_none());
        assert!(json.get("tags").is_none());
    }

    #[test]
    fn deserializes_full_resource() {
        let json = r#"{
            "id": 7,
            "category": {"id": 1, "name": "dogs"},
            "name": "Rex",
            "photoUrls": ["a", "b"],
            "tags": [{"id": 2, "name": "friendly"}],
            "status": "sold"
        }"#;

        let pet: Pet = serde_json::from_str(json).unwrap();
        assert_eq!(pet.id, Some(7));
        assert_eq!(pet.category.unwrap().name.as_deref(), Some("dogs"));
        assert_eq!(pet.photo_urls.len(), 2);
        assert_eq!(pet.status, Some(PetStatus::Sold));
    }

    #[test]
    fn status_displays_as_wire_value() {
        use std::str::FromStr;

        assert_eq!(PetStatus::Pending.to_string(), "pending");
        assert_eq!(PetStatus::from_str("sold").unwrap(), PetStatus::Sold);
    }
}
