use std::{cmp::Reverse, sync::Arc};

use dd_api::{Collection, CollectionFilter, CollectionPatch, CollectionType, PlaceId};
use tracing::info;

use super::{move_item, record_failure};
use crate::{cache::Scope, Dashboard};

/// Visible collections first, then ascending `order`.
pub fn sort_collections(collections: &mut [Collection]) {
	collections.sort_by_key(|c| (Reverse(c.visible), c.order));
}

/// Appends a place unless the collection already holds it.
pub fn add_place(collection: &mut Collection, id: PlaceId) -> bool {
	if collection.places.contains(&id) {
		return false;
	}

	collection.places.push(id);
	true
}

pub fn remove_place(collection: &mut Collection, id: PlaceId) -> bool {
	let before = collection.places.len();
	collection.places.retain(|place| *place != id);
	collection.places.len() != before
}

pub fn move_place(collection: &mut Collection, from: usize, to: usize) {
	move_item(&mut collection.places, from, to);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionsQuery {
	pub kind: Option<CollectionType>,
	pub visible: Option<bool>,
	pub owner_id: String,
}

impl CollectionsQuery {
	fn to_filter(&self) -> CollectionFilter {
		let owner_id = self.owner_id.trim();

		CollectionFilter {
			search: None,
			types: self.kind.into_iter().collect(),
			visible: self.visible,
			owner_id: (!owner_id.is_empty()).then(|| owner_id.to_string()),
		}
	}
}

pub struct CollectionsPage {
	ctx: Arc<Dashboard>,
	pub query: CollectionsQuery,
	collections: Vec<Collection>,
	error: Option<String>,
}

impl CollectionsPage {
	pub fn new(ctx: Arc<Dashboard>) -> Self {
		Self {
			ctx,
			query: CollectionsQuery::default(),
			collections: Vec::new(),
			error: None,
		}
	}

	pub fn collections(&self) -> &[Collection] {
		&self.collections
	}

	pub fn error(&self) -> Option<&str> {
		self.error.as_deref()
	}

	pub fn clear_filters(&mut self) {
		self.query = CollectionsQuery::default();
	}

	pub async fn load(&mut self) -> Result<&[Collection], dd_api::Error> {
		self.error = None;

		let filter = self.query.to_filter();
		let key = format!("{:?}", self.query);
		let backend = self.ctx.backend();
		let result = self
			.ctx
			.cache()
			.get_or_fetch(Scope::Collections, &key, || backend.list_collections(&filter))
			.await;

		match result {
			Ok(mut collections) => {
				sort_collections(&mut collections);
				self.collections = collections;
				Ok(&self.collections)
			}
			Err(e) => Err(record_failure(
				&mut self.error,
				"Failed to load collections. Please try again later.",
				e,
			)),
		}
	}

	pub async fn get(&mut self, id: &str) -> Result<Collection, dd_api::Error> {
		self.ctx
			.backend()
			.get_collection(id)
			.await
			.map_err(|e| record_failure(&mut self.error, "Failed to load collection.", e))
	}

	/// Creates the collection when it has no id yet, otherwise patches every field.
	pub async fn save(&mut self, collection: &Collection) -> Result<Collection, dd_api::Error> {
		let backend = self.ctx.backend();
		let (result, message) = match collection.id.as_deref() {
			Some(id) if !id.trim().is_empty() => (
				backend
					.patch_collection(&CollectionPatch::from(collection))
					.await,
				"Failed to update collection. Please try again.",
			),
			_ => (
				backend.create_collection(collection).await,
				"Failed to create collection. Please try again.",
			),
		};

		match result {
			Ok(saved) => {
				info!(collection_id = ?saved.id, "Saved collection");
				self.ctx.cache().invalidate(Scope::Collections);
				Ok(saved)
			}
			Err(e) => Err(record_failure(&mut self.error, message, e)),
		}
	}

	pub async fn delete(&mut self, id: &str) -> Result<(), dd_api::Error> {
		match self.ctx.backend().delete_collection(id).await {
			Ok(()) => {
				info!(collection_id = id, "Deleted collection");
				self.ctx.cache().invalidate(Scope::Collections);
				self.collections
					.retain(|collection| collection.id.as_deref() != Some(id));
				Ok(())
			}
			Err(e) => Err(record_failure(
				&mut self.error,
				"Failed to delete collection. Please try again.",
				e,
			)),
		}
	}
}
