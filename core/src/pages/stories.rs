use std::sync::Arc;

use dd_api::{Story, StoryFilter, StoryItem, StoryItemKind, StoryPatch};
use tracing::info;

use super::{move_item, record_failure};
use crate::{cache::Scope, Dashboard};

/// New item for a story, shown for the default duration.
pub fn new_item(kind: StoryItemKind, url: impl Into<String>) -> StoryItem {
	StoryItem {
		kind,
		url: url.into(),
		..Default::default()
	}
}

pub fn move_story_item(story: &mut Story, from: usize, to: usize) {
	move_item(&mut story.stories, from, to);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoriesQuery {
	pub title: String,
	pub visible: Option<bool>,
}

pub struct StoriesPage {
	ctx: Arc<Dashboard>,
	pub query: StoriesQuery,
	stories: Vec<Story>,
	error: Option<String>,
}

impl StoriesPage {
	pub fn new(ctx: Arc<Dashboard>) -> Self {
		Self {
			ctx,
			query: StoriesQuery::default(),
			stories: Vec::new(),
			error: None,
		}
	}

	pub fn stories(&self) -> &[Story] {
		&self.stories
	}

	pub fn error(&self) -> Option<&str> {
		self.error.as_deref()
	}

	pub async fn load(&mut self) -> Result<&[Story], dd_api::Error> {
		self.error = None;

		let title = self.query.title.trim();
		let filter = StoryFilter {
			title: (!title.is_empty()).then(|| title.to_string()),
			visible: self.query.visible,
		};
		let key = format!("{:?}", filter);
		let backend = self.ctx.backend();
		let result = self
			.ctx
			.cache()
			.get_or_fetch(Scope::Stories, &key, || backend.list_stories(&filter))
			.await;

		match result {
			Ok(stories) => {
				self.stories = stories;
				Ok(&self.stories)
			}
			Err(e) => Err(record_failure(
				&mut self.error,
				"Failed to load stories. Please try again later.",
				e,
			)),
		}
	}

	pub async fn get(&mut self, id: &str) -> Result<Story, dd_api::Error> {
		self.ctx
			.backend()
			.get_story(id)
			.await
			.map_err(|e| record_failure(&mut self.error, "Failed to load story.", e))
	}

	/// Creates the story when it has no id yet, otherwise patches every field.
	pub async fn save(&mut self, story: &Story) -> Result<Story, dd_api::Error> {
		let backend = self.ctx.backend();
		let (result, message) = match story.id.as_deref() {
			Some(id) if !id.trim().is_empty() => (
				backend.patch_story(&StoryPatch::from(story)).await,
				"Failed to update story. Please try again.",
			),
			_ => (
				backend.create_story(story).await,
				"Failed to create story. Please try again.",
			),
		};

		match result {
			Ok(saved) => {
				info!(story_id = ?saved.id, "Saved story");
				self.ctx.cache().invalidate(Scope::Stories);
				Ok(saved)
			}
			Err(e) => Err(record_failure(&mut self.error, message, e)),
		}
	}

	pub async fn delete(&mut self, id: &str) -> Result<(), dd_api::Error> {
		match self.ctx.backend().delete_story(id).await {
			Ok(()) => {
				info!(story_id = id, "Deleted story");
				self.ctx.cache().invalidate(Scope::Stories);
				self.stories.retain(|story| story.id.as_deref() != Some(id));
				Ok(())
			}
			Err(e) => Err(record_failure(
				&mut self.error,
				"Failed to delete story. Please try again.",
				e,
			)),
		}
	}
}
