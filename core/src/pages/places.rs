use std::sync::Arc;

use dd_api::{Place, PlaceFilter, PlaceId, TagId};
use tracing::info;

use super::record_failure;
use crate::{cache::Scope, Dashboard};

/// Filter inputs as typed in the list header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlacesQuery {
	pub search: String,
	pub tags: Vec<TagId>,
	/// Exact id lookup, bypasses the other filters when set.
	pub id: String,
}

pub struct PlacesPage {
	ctx: Arc<Dashboard>,
	pub query: PlacesQuery,
	places: Vec<Place>,
	error: Option<String>,
}

impl PlacesPage {
	pub fn new(ctx: Arc<Dashboard>) -> Self {
		Self {
			ctx,
			query: PlacesQuery::default(),
			places: Vec::new(),
			error: None,
		}
	}

	pub fn places(&self) -> &[Place] {
		&self.places
	}

	pub fn error(&self) -> Option<&str> {
		self.error.as_deref()
	}

	pub async fn load(&mut self) -> Result<&[Place], dd_api::Error> {
		self.error = None;

		let id = self.query.id.trim();
		let result = if id.is_empty() {
			self.fetch_filtered().await
		} else {
			match id.parse::<PlaceId>() {
				Ok(id) => self.fetch_one(id).await,
				// Nothing can match an id that is not a number.
				Err(_) => Ok(Vec::new()),
			}
		};

		match result {
			Ok(places) => {
				self.places = places;
				Ok(&self.places)
			}
			Err(e) => Err(record_failure(
				&mut self.error,
				"Failed to load places. Please try again later.",
				e,
			)),
		}
	}

	async fn fetch_filtered(&self) -> Result<Vec<Place>, dd_api::Error> {
		let search = self.query.search.trim();
		let filter = PlaceFilter {
			search: (!search.is_empty()).then(|| search.to_string()),
			tags: self.query.tags.clone(),
			id: None,
		};
		let key = format!("filter:{search}:{:?}", filter.tags);

		let backend = self.ctx.backend();
		self.ctx
			.cache()
			.get_or_fetch(Scope::Places, &key, || backend.list_places(&filter))
			.await
	}

	async fn fetch_one(&self, id: PlaceId) -> Result<Vec<Place>, dd_api::Error> {
		let backend = self.ctx.backend();
		self.ctx
			.cache()
			.get_or_fetch(Scope::Places, &format!("id:{id}"), || async move {
				backend.get_place(id).await.map(|place| vec![place])
			})
			.await
	}

	pub async fn delete(&mut self, id: PlaceId) -> Result<(), dd_api::Error> {
		match self.ctx.backend().delete_place(id).await {
			Ok(()) => {
				info!(place_id = id, "Deleted place");
				self.ctx.cache().invalidate(Scope::Places);
				self.places.retain(|place| place.id != Some(id));
				Ok(())
			}
			Err(e) => Err(record_failure(
				&mut self.error,
				"Failed to delete place. Please try again.",
				e,
			)),
		}
	}
}
