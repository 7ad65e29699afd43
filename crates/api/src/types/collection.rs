use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::place::PlaceId;

pub type CollectionId = String;

#[derive(
	Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CollectionType {
	#[default]
	Basic,
	Favorites,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Collection {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id: Option<CollectionId>,
	pub name: String,
	pub description: String,
	pub avatar: String,
	pub order: i32,
	pub owner_id: String,
	/// Ordered place ids.
	pub places: Vec<PlaceId>,
	#[serde(rename = "type")]
	pub kind: CollectionType,
	pub visible: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub created_at: Option<DateTime<Utc>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionPatch {
	pub id: Option<CollectionId>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub avatar: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub order: Option<i32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub owner_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub places: Option<Vec<PlaceId>>,
	#[serde(rename = "type", skip_serializing_if = "Option::is_none")]
	pub kind: Option<CollectionType>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub visible: Option<bool>,
}

impl From<&Collection> for CollectionPatch {
	fn from(collection: &Collection) -> Self {
		Self {
			id: collection.id.clone(),
			name: Some(collection.name.clone()),
			description: Some(collection.description.clone()),
			avatar: Some(collection.avatar.clone()),
			order: Some(collection.order),
			owner_id: Some(collection.owner_id.clone()),
			places: Some(collection.places.clone()),
			kind: Some(collection.kind),
			visible: Some(collection.visible),
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionFilter {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub search: Option<String>,
	#[serde(skip_serializing_if = "Vec::is_empty", default)]
	pub types: Vec<CollectionType>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub visible: Option<bool>,
	#[serde(rename = "ownerID", skip_serializing_if = "Option::is_none")]
	pub owner_id: Option<String>,
}

#[cfg(test)]
mod tests {
	use std::str::FromStr;

	use serde_json::json;

	use super::*;

	#[test]
	fn collection_type_names() {
		assert_eq!(CollectionType::Favorites.to_string(), "favorites");
		assert_eq!(
			CollectionType::from_str("basic").unwrap(),
			CollectionType::Basic
		);
		assert_eq!(
			serde_json::to_value(CollectionType::Favorites).unwrap(),
			json!("favorites")
		);
	}

	#[test]
	fn filter_uses_backend_field_names() {
		let filter = CollectionFilter {
			types: vec![CollectionType::Basic],
			owner_id: Some("u1".into()),
			..Default::default()
		};

		assert_eq!(
			serde_json::to_value(&filter).unwrap(),
			json!({ "types": ["basic"], "ownerID": "u1" })
		);
	}
}
