use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub type StoryId = String;

/// Seconds an item stays on screen when the author does not say otherwise.
pub const DEFAULT_ITEM_DURATION: u32 = 5;

#[derive(
	Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StoryItemKind {
	#[default]
	Image,
	Video,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryItem {
	pub title: String,
	pub description: String,
	#[serde(rename = "type")]
	pub kind: StoryItemKind,
	pub url: String,
	pub duration: u32,
}

impl Default for StoryItem {
	fn default() -> Self {
		Self {
			title: String::new(),
			description: String::new(),
			kind: StoryItemKind::Image,
			url: String::new(),
			duration: DEFAULT_ITEM_DURATION,
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Story {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id: Option<StoryId>,
	pub title: String,
	pub icon: String,
	pub src: String,
	/// Ordered items.
	pub stories: Vec<StoryItem>,
	pub visible: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryPatch {
	pub id: Option<StoryId>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub icon: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub src: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub stories: Option<Vec<StoryItem>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub visible: Option<bool>,
}

impl From<&Story> for StoryPatch {
	fn from(story: &Story) -> Self {
		Self {
			id: story.id.clone(),
			title: Some(story.title.clone()),
			icon: Some(story.icon.clone()),
			src: Some(story.src.clone()),
			stories: Some(story.stories.clone()),
			visible: Some(story.visible),
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryFilter {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub visible: Option<bool>,
}
