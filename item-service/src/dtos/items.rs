use crate::models::Item;
use serde::{Deserialize, Serialize};

/// Wire representation of an item: `{"Id": "<hex>", "Description": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemResponse {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Description")]
    pub description: String,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id.to_hex(),
            description: item.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn serializes_with_capitalized_field_names_in_order() {
        let id = ObjectId::parse_str("52f6aef226f149b7048b4567").unwrap();
        let body = serde_json::to_string(&ItemResponse::from(Item::new(id, "Nones"))).unwrap();

        assert_eq!(
            body,
            r#"{"Id":"52f6aef226f149b7048b4567","Description":"Nones"}"#
        );
    }
}
