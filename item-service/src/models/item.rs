use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// An item as stored in the `items` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub description: String,
}

impl Item {
    pub fn new(id: ObjectId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
        }
    }
}

/// Parse a path token into a store identifier.
///
/// Only 24-character hex strings are accepted; anything else yields `None`.
pub fn parse_item_id(raw: &str) -> Option<ObjectId> {
    ObjectId::parse_str(raw).ok()
}
