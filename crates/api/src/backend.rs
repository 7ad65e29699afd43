use std::sync::Arc;

use async_trait::async_trait;

use crate::{
	collections, images, places, stories, tags, Collection, CollectionFilter, CollectionPatch, Error,
	NewTag, Place, PlaceFilter, PlaceId, PlacePatch, RequestConfigProvider, Story, StoryFilter,
	StoryPatch, Tag, TagId,
};

/// Every remote operation the dashboard needs.
///
/// Each call maps to exactly one backend request and is never retried.
#[async_trait]
pub trait Backend: Send + Sync {
	async fn list_places(&self, filter: &PlaceFilter) -> Result<Vec<Place>, Error>;
	async fn get_place(&self, id: PlaceId) -> Result<Place, Error>;
	async fn create_place(&self, place: &Place) -> Result<Place, Error>;
	async fn patch_place(&self, patch: &PlacePatch) -> Result<Place, Error>;
	async fn delete_place(&self, id: PlaceId) -> Result<(), Error>;
	async fn parse_place(&self, url: &str) -> Result<Place, Error>;

	async fn list_tags(&self) -> Result<Vec<Tag>, Error>;
	async fn create_tag(&self, tag: &NewTag) -> Result<Tag, Error>;
	async fn patch_tag(&self, id: TagId, tag: &NewTag) -> Result<Tag, Error>;
	async fn delete_tag(&self, id: TagId) -> Result<(), Error>;

	async fn list_collections(&self, filter: &CollectionFilter) -> Result<Vec<Collection>, Error>;
	async fn get_collection(&self, id: &str) -> Result<Collection, Error>;
	async fn create_collection(&self, collection: &Collection) -> Result<Collection, Error>;
	async fn patch_collection(&self, patch: &CollectionPatch) -> Result<Collection, Error>;
	async fn delete_collection(&self, id: &str) -> Result<(), Error>;

	async fn list_stories(&self, filter: &StoryFilter) -> Result<Vec<Story>, Error>;
	async fn get_story(&self, id: &str) -> Result<Story, Error>;
	async fn create_story(&self, story: &Story) -> Result<Story, Error>;
	async fn patch_story(&self, patch: &StoryPatch) -> Result<Story, Error>;
	async fn delete_story(&self, id: &str) -> Result<(), Error>;

	async fn upload_image_by_url(&self, url: &str, directory: &str) -> Result<String, Error>;
	async fn upload_image_by_file(
		&self,
		file_name: &str,
		bytes: &[u8],
		directory: &str,
	) -> Result<String, Error>;
}

/// [`Backend`] talking HTTP, with a fresh [`crate::RequestConfig`] per call.
pub struct HttpBackend<P> {
	provider: Arc<P>,
}

impl<P: RequestConfigProvider> HttpBackend<P> {
	pub fn new(provider: Arc<P>) -> Self {
		Self { provider }
	}
}

#[async_trait]
impl<P: RequestConfigProvider> Backend for HttpBackend<P> {
	async fn list_places(&self, filter: &PlaceFilter) -> Result<Vec<Place>, Error> {
		places::filter(self.provider.get_request_config().await, filter).await
	}

	async fn get_place(&self, id: PlaceId) -> Result<Place, Error> {
		places::get(self.provider.get_request_config().await, id).await
	}

	async fn create_place(&self, place: &Place) -> Result<Place, Error> {
		places::create(self.provider.get_request_config().await, place).await
	}

	async fn patch_place(&self, patch: &PlacePatch) -> Result<Place, Error> {
		places::patch(self.provider.get_request_config().await, patch).await
	}

	async fn delete_place(&self, id: PlaceId) -> Result<(), Error> {
		places::delete(self.provider.get_request_config().await, id).await
	}

	async fn parse_place(&self, url: &str) -> Result<Place, Error> {
		places::parse(self.provider.get_request_config().await, url).await
	}

	async fn list_tags(&self) -> Result<Vec<Tag>, Error> {
		tags::list(self.provider.get_request_config().await).await
	}

	async fn create_tag(&self, tag: &NewTag) -> Result<Tag, Error> {
		tags::create(self.provider.get_request_config().await, tag).await
	}

	async fn patch_tag(&self, id: TagId, tag: &NewTag) -> Result<Tag, Error> {
		tags::update(self.provider.get_request_config().await, id, tag).await
	}

	async fn delete_tag(&self, id: TagId) -> Result<(), Error> {
		tags::delete(self.provider.get_request_config().await, id).await
	}

	async fn list_collections(&self, filter: &CollectionFilter) -> Result<Vec<Collection>, Error> {
		collections::filter(self.provider.get_request_config().await, filter).await
	}

	async fn get_collection(&self, id: &str) -> Result<Collection, Error> {
		collections::get(self.provider.get_request_config().await, id).await
	}

	async fn create_collection(&self, collection: &Collection) -> Result<Collection, Error> {
		collections::create(self.provider.get_request_config().await, collection).await
	}

	async fn patch_collection(&self, patch: &CollectionPatch) -> Result<Collection, Error> {
		collections::patch(self.provider.get_request_config().await, patch).await
	}

	async fn delete_collection(&self, id: &str) -> Result<(), Error> {
		collections::delete(self.provider.get_request_config().await, id).await
	}

	async fn list_stories(&self, filter: &StoryFilter) -> Result<Vec<Story>, Error> {
		stories::filter(self.provider.get_request_config().await, filter).await
	}

	async fn get_story(&self, id: &str) -> Result<Story, Error> {
		stories::get(self.provider.get_request_config().await, id).await
	}

	async fn create_story(&self, story: &Story) -> Result<Story, Error> {
		stories::create(self.provider.get_request_config().await, story).await
	}

	async fn patch_story(&self, patch: &StoryPatch) -> Result<Story, Error> {
		stories::patch(self.provider.get_request_config().await, patch).await
	}

	async fn delete_story(&self, id: &str) -> Result<(), Error> {
		stories::delete(self.provider.get_request_config().await, id).await
	}

	async fn upload_image_by_url(&self, url: &str, directory: &str) -> Result<String, Error> {
		images::by_url(self.provider.get_request_config().await, url, directory).await
	}

	async fn upload_image_by_file(
		&self,
		file_name: &str,
		bytes: &[u8],
		directory: &str,
	) -> Result<String, Error> {
		images::by_file(
			self.provider.get_request_config().await,
			file_name,
			bytes,
			directory,
		)
		.await
	}
}
