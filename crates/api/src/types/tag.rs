use reqwest::multipart::Form;
use serde::{Deserialize, Serialize};

pub type TagId = i64;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
	pub id: TagId,
	pub name: String,
	/// Icon URL.
	pub icon: String,
	pub visible: bool,
	pub order: i32,
	/// Hidden from search results.
	pub excluded: bool,
}

/// Editable tag fields, used for both creation and updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTag {
	pub name: String,
	pub icon: String,
	pub visible: bool,
	pub order: i32,
	pub excluded: bool,
}

impl Default for NewTag {
	fn default() -> Self {
		Self {
			name: String::new(),
			icon: String::new(),
			visible: true,
			order: 0,
			excluded: false,
		}
	}
}

impl NewTag {
	/// Multipart body expected by the tag creation endpoint.
	pub fn to_form(&self) -> Form {
		Form::new()
			.text("name", self.name.clone())
			.text("icon", self.icon.clone())
			.text("visible", self.visible.to_string())
			.text("order", self.order.to_string())
			.text("excluded", self.excluded.to_string())
	}

	pub fn with_id(&self, id: TagId) -> Tag {
		Tag {
			id,
			name: self.name.clone(),
			icon: self.icon.clone(),
			visible: self.visible,
			order: self.order,
			excluded: self.excluded,
		}
	}
}

impl From<&Tag> for NewTag {
	fn from(tag: &Tag) -> Self {
		Self {
			name: tag.name.clone(),
			icon: tag.icon.clone(),
			visible: tag.visible,
			order: tag.order,
			excluded: tag.excluded,
		}
	}
}
