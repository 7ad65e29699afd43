use std::sync::Arc;

use dd_api::{NewTag, Tag, TagId};
use tracing::info;

use super::record_failure;
use crate::{cache::Scope, Dashboard};

const CACHE_KEY: &str = "all";

/// Display order of tags: by `order`, then by name.
pub fn sort_tags(tags: &mut [Tag]) {
	tags.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.name.cmp(&b.name)));
}

pub struct TagsPage {
	ctx: Arc<Dashboard>,
	tags: Vec<Tag>,
	error: Option<String>,
}

impl TagsPage {
	pub fn new(ctx: Arc<Dashboard>) -> Self {
		Self {
			ctx,
			tags: Vec::new(),
			error: None,
		}
	}

	pub fn tags(&self) -> &[Tag] {
		&self.tags
	}

	pub fn error(&self) -> Option<&str> {
		self.error.as_deref()
	}

	pub async fn load(&mut self) -> Result<&[Tag], dd_api::Error> {
		self.error = None;

		let backend = self.ctx.backend();
		let result = self
			.ctx
			.cache()
			.get_or_fetch(Scope::Tags, CACHE_KEY, || backend.list_tags())
			.await;

		match result {
			Ok(mut tags) => {
				sort_tags(&mut tags);
				self.tags = tags;
				Ok(&self.tags)
			}
			Err(e) => Err(record_failure(
				&mut self.error,
				"Failed to load tags. Please try again later.",
				e,
			)),
		}
	}

	pub async fn create(&mut self, tag: &NewTag) -> Result<Tag, dd_api::Error> {
		match self.ctx.backend().create_tag(tag).await {
			Ok(created) => {
				info!(tag_id = created.id, name = %created.name, "Created tag");
				self.ctx.cache().invalidate(Scope::Tags);
				Ok(created)
			}
			Err(e) => Err(record_failure(
				&mut self.error,
				"Failed to create tag. Please try again.",
				e,
			)),
		}
	}

	pub async fn update(&mut self, id: TagId, tag: &NewTag) -> Result<Tag, dd_api::Error> {
		match self.ctx.backend().patch_tag(id, tag).await {
			Ok(updated) => {
				info!(tag_id = id, "Updated tag");
				self.ctx.cache().invalidate(Scope::Tags);
				Ok(updated)
			}
			Err(e) => Err(record_failure(
				&mut self.error,
				"Failed to update tag. Please try again.",
				e,
			)),
		}
	}

	pub async fn delete(&mut self, id: TagId) -> Result<(), dd_api::Error> {
		match self.ctx.backend().delete_tag(id).await {
			Ok(()) => {
				info!(tag_id = id, "Deleted tag");
				self.ctx.cache().invalidate(Scope::Tags);
				self.tags.retain(|tag| tag.id != id);
				Ok(())
			}
			Err(e) => Err(record_failure(
				&mut self.error,
				"Failed to delete tag. Please try again.",
				e,
			)),
		}
	}
}
