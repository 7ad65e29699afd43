//! In-memory backend recording every call in order.

#![allow(dead_code)]

use std::{
	collections::{HashMap, VecDeque},
	path::Path,
	sync::{Arc, Mutex},
};

use async_trait::async_trait;
use dd_core::{
	api::{
		Backend, Collection, CollectionFilter, CollectionPatch, Error, NewTag, Place, PlaceFilter,
		PlaceId, PlacePatch, StatusCode, Story, StoryFilter, StoryPatch, Tag, TagId,
	},
	config::AppConfig,
	settings::SettingsStore,
	Dashboard,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
	ListPlaces(PlaceFilter),
	GetPlace(PlaceId),
	CreatePlace(Place),
	PatchPlace(PlacePatch),
	DeletePlace(PlaceId),
	ParsePlace(String),
	ListTags,
	CreateTag(NewTag),
	PatchTag(TagId, NewTag),
	DeleteTag(TagId),
	ListCollections(CollectionFilter),
	GetCollection(String),
	CreateCollection(Collection),
	PatchCollection(CollectionPatch),
	DeleteCollection(String),
	ListStories(StoryFilter),
	GetStory(String),
	CreateStory(Story),
	PatchStory(StoryPatch),
	DeleteStory(String),
	UploadByUrl { url: String, directory: String },
	UploadByFile { file_name: String, len: usize, directory: String },
}

impl Call {
	pub fn kind(&self) -> &'static str {
		match self {
			Self::ListPlaces(_) => "list_places",
			Self::GetPlace(_) => "get_place",
			Self::CreatePlace(_) => "create_place",
			Self::PatchPlace(_) => "patch_place",
			Self::DeletePlace(_) => "delete_place",
			Self::ParsePlace(_) => "parse_place",
			Self::ListTags => "list_tags",
			Self::CreateTag(_) => "create_tag",
			Self::PatchTag(..) => "patch_tag",
			Self::DeleteTag(_) => "delete_tag",
			Self::ListCollections(_) => "list_collections",
			Self::GetCollection(_) => "get_collection",
			Self::CreateCollection(_) => "create_collection",
			Self::PatchCollection(_) => "patch_collection",
			Self::DeleteCollection(_) => "delete_collection",
			Self::ListStories(_) => "list_stories",
			Self::GetStory(_) => "get_story",
			Self::CreateStory(_) => "create_story",
			Self::PatchStory(_) => "patch_story",
			Self::DeleteStory(_) => "delete_story",
			Self::UploadByUrl { .. } | Self::UploadByFile { .. } => "upload",
		}
	}
}

#[derive(Default)]
struct State {
	calls: Vec<Call>,
	counts: HashMap<&'static str, usize>,
	failures: HashMap<(&'static str, usize), StatusCode>,
	next_id: PlaceId,
	places: HashMap<PlaceId, Place>,
	tags: Vec<Tag>,
	collections: Vec<Collection>,
	stories: Vec<Story>,
	uploads: VecDeque<String>,
	parsed: Option<Place>,
	omit_ids: bool,
}

/// Records calls and answers them from memory.
///
/// `fail(kind, n)` makes the n-th call (1-based) of that kind answer with a 500.
#[derive(Clone)]
pub struct RecordingBackend {
	state: Arc<Mutex<State>>,
}

impl Default for RecordingBackend {
	fn default() -> Self {
		Self::new()
	}
}

impl RecordingBackend {
	pub fn new() -> Self {
		Self {
			state: Arc::new(Mutex::new(State {
				next_id: 42,
				..Default::default()
			})),
		}
	}

	pub fn fail(&self, kind: &'static str, nth: usize) -> &Self {
		self.fail_with(kind, nth, StatusCode::INTERNAL_SERVER_ERROR)
	}

	pub fn fail_with(&self, kind: &'static str, nth: usize, status: StatusCode) -> &Self {
		self.state
			.lock()
			.unwrap()
			.failures
			.insert((kind, nth), status);
		self
	}

	/// Canonical URLs returned by the next uploads, in order.
	pub fn upload_results(&self, urls: &[&str]) -> &Self {
		self.state
			.lock()
			.unwrap()
			.uploads
			.extend(urls.iter().map(|url| url.to_string()));
		self
	}

	pub fn with_place(&self, place: Place) -> &Self {
		let id = place.id.expect("seeded places need an id");
		self.state.lock().unwrap().places.insert(id, place);
		self
	}

	pub fn with_tags(&self, tags: Vec<Tag>) -> &Self {
		self.state.lock().unwrap().tags = tags;
		self
	}

	pub fn with_collections(&self, collections: Vec<Collection>) -> &Self {
		self.state.lock().unwrap().collections = collections;
		self
	}

	pub fn with_parsed(&self, place: Place) -> &Self {
		self.state.lock().unwrap().parsed = Some(place);
		self
	}

	/// Answers place creates and patches without an id, as some backend versions do.
	pub fn omit_place_ids(&self) -> &Self {
		self.state.lock().unwrap().omit_ids = true;
		self
	}

	pub fn calls(&self) -> Vec<Call> {
		self.state.lock().unwrap().calls.clone()
	}

	pub fn kinds(&self) -> Vec<&'static str> {
		self.calls().iter().map(Call::kind).collect()
	}

	pub fn clear_calls(&self) {
		self.state.lock().unwrap().calls.clear();
	}

	/// Records the call, yields once so concurrent callers interleave, and applies failures.
	async fn record(&self, call: Call) -> Result<(), Error> {
		let kind = call.kind();
		let failure = {
			let mut state = self.state.lock().unwrap();
			state.calls.push(call);
			let count = state.counts.entry(kind).or_default();
			*count += 1;
			let nth = *count;
			state.failures.get(&(kind, nth)).copied()
		};

		tokio::task::yield_now().await;

		match failure {
			Some(status) => Err(Error::Status {
				route: format!("mock://{kind}"),
				status,
				body: "injected failure".to_string(),
			}),
			None => Ok(()),
		}
	}

	fn not_found(kind: &str) -> Error {
		Error::Status {
			route: format!("mock://{kind}"),
			status: StatusCode::NOT_FOUND,
			body: String::new(),
		}
	}
}

fn answer(state: &State, mut place: Place) -> Place {
	if state.omit_ids {
		place.id = None;
	}
	place
}

fn apply_patch(place: &mut Place, patch: &PlacePatch) {
	macro_rules! apply {
		($($field:ident),*) => {
			$(if let Some(value) = &patch.$field {
				place.$field = value.clone();
			})*
		};
	}

	apply!(
		title,
		description,
		short_description,
		address,
		url,
		source,
		images,
		location,
		price_avg,
		review_rating,
		review_count,
		boost,
		boost_radius,
		tags
	);
}

#[async_trait]
impl Backend for RecordingBackend {
	async fn list_places(&self, filter: &PlaceFilter) -> Result<Vec<Place>, Error> {
		self.record(Call::ListPlaces(filter.clone())).await?;
		let mut places = self
			.state
			.lock()
			.unwrap()
			.places
			.values()
			.cloned()
			.collect::<Vec<_>>();
		places.sort_by_key(|place| place.id);
		Ok(places)
	}

	async fn get_place(&self, id: PlaceId) -> Result<Place, Error> {
		self.record(Call::GetPlace(id)).await?;
		let state = self.state.lock().unwrap();
		state
			.places
			.get(&id)
			.cloned()
			.ok_or_else(|| Self::not_found("get_place"))
	}

	async fn create_place(&self, place: &Place) -> Result<Place, Error> {
		self.record(Call::CreatePlace(place.clone())).await?;
		let mut state = self.state.lock().unwrap();
		let id = state.next_id;
		state.next_id += 1;

		let created = Place {
			id: Some(id),
			..place.clone()
		};
		state.places.insert(id, created.clone());
		Ok(answer(&state, created))
	}

	async fn patch_place(&self, patch: &PlacePatch) -> Result<Place, Error> {
		self.record(Call::PatchPlace(patch.clone())).await?;
		let id = patch.id.unwrap_or_default();
		let mut state = self.state.lock().unwrap();
		let place = state
			.places
			.entry(id)
			.or_insert_with(|| Place {
				id: Some(id),
				..Default::default()
			});
		apply_patch(place, patch);
		let patched = place.clone();
		Ok(answer(&state, patched))
	}

	async fn delete_place(&self, id: PlaceId) -> Result<(), Error> {
		self.record(Call::DeletePlace(id)).await?;
		self.state.lock().unwrap().places.remove(&id);
		Ok(())
	}

	async fn parse_place(&self, url: &str) -> Result<Place, Error> {
		self.record(Call::ParsePlace(url.to_string())).await?;
		let parsed = self.state.lock().unwrap().parsed.clone();
		parsed.ok_or_else(|| Self::not_found("parse_place"))
	}

	async fn list_tags(&self) -> Result<Vec<Tag>, Error> {
		self.record(Call::ListTags).await?;
		Ok(self.state.lock().unwrap().tags.clone())
	}

	async fn create_tag(&self, tag: &NewTag) -> Result<Tag, Error> {
		self.record(Call::CreateTag(tag.clone())).await?;
		let mut state = self.state.lock().unwrap();
		let id = state.tags.iter().map(|t| t.id).max().unwrap_or_default() + 1;
		let created = tag.with_id(id);
		state.tags.push(created.clone());
		Ok(created)
	}

	async fn patch_tag(&self, id: TagId, tag: &NewTag) -> Result<Tag, Error> {
		self.record(Call::PatchTag(id, tag.clone())).await?;
		let mut state = self.state.lock().unwrap();
		let updated = tag.with_id(id);
		state.tags.retain(|t| t.id != id);
		state.tags.push(updated.clone());
		Ok(updated)
	}

	async fn delete_tag(&self, id: TagId) -> Result<(), Error> {
		self.record(Call::DeleteTag(id)).await?;
		self.state.lock().unwrap().tags.retain(|t| t.id != id);
		Ok(())
	}

	async fn list_collections(&self, filter: &CollectionFilter) -> Result<Vec<Collection>, Error> {
		self.record(Call::ListCollections(filter.clone())).await?;
		Ok(self.state.lock().unwrap().collections.clone())
	}

	async fn get_collection(&self, id: &str) -> Result<Collection, Error> {
		self.record(Call::GetCollection(id.to_string())).await?;
		let state = self.state.lock().unwrap();
		state
			.collections
			.iter()
			.find(|c| c.id.as_deref() == Some(id))
			.cloned()
			.ok_or_else(|| Self::not_found("get_collection"))
	}

	async fn create_collection(&self, collection: &Collection) -> Result<Collection, Error> {
		self.record(Call::CreateCollection(collection.clone())).await?;
		let mut state = self.state.lock().unwrap();
		let created = Collection {
			id: Some(format!("c{}", state.collections.len() + 1)),
			..collection.clone()
		};
		state.collections.push(created.clone());
		Ok(created)
	}

	async fn patch_collection(&self, patch: &CollectionPatch) -> Result<Collection, Error> {
		self.record(Call::PatchCollection(patch.clone())).await?;
		let state = self.state.lock().unwrap();
		let mut collection = state
			.collections
			.iter()
			.find(|c| c.id == patch.id)
			.cloned()
			.ok_or_else(|| Self::not_found("patch_collection"))?;
		if let Some(places) = &patch.places {
			collection.places = places.clone();
		}
		Ok(collection)
	}

	async fn delete_collection(&self, id: &str) -> Result<(), Error> {
		self.record(Call::DeleteCollection(id.to_string())).await?;
		self.state
			.lock()
			.unwrap()
			.collections
			.retain(|c| c.id.as_deref() != Some(id));
		Ok(())
	}

	async fn list_stories(&self, filter: &StoryFilter) -> Result<Vec<Story>, Error> {
		self.record(Call::ListStories(filter.clone())).await?;
		Ok(self.state.lock().unwrap().stories.clone())
	}

	async fn get_story(&self, id: &str) -> Result<Story, Error> {
		self.record(Call::GetStory(id.to_string())).await?;
		let state = self.state.lock().unwrap();
		state
			.stories
			.iter()
			.find(|s| s.id.as_deref() == Some(id))
			.cloned()
			.ok_or_else(|| Self::not_found("get_story"))
	}

	async fn create_story(&self, story: &Story) -> Result<Story, Error> {
		self.record(Call::CreateStory(story.clone())).await?;
		let mut state = self.state.lock().unwrap();
		let created = Story {
			id: Some(format!("s{}", state.stories.len() + 1)),
			..story.clone()
		};
		state.stories.push(created.clone());
		Ok(created)
	}

	async fn patch_story(&self, patch: &StoryPatch) -> Result<Story, Error> {
		self.record(Call::PatchStory(patch.clone())).await?;
		let state = self.state.lock().unwrap();
		state
			.stories
			.iter()
			.find(|s| s.id == patch.id)
			.cloned()
			.ok_or_else(|| Self::not_found("patch_story"))
	}

	async fn delete_story(&self, id: &str) -> Result<(), Error> {
		self.record(Call::DeleteStory(id.to_string())).await?;
		self.state
			.lock()
			.unwrap()
			.stories
			.retain(|s| s.id.as_deref() != Some(id));
		Ok(())
	}

	async fn upload_image_by_url(&self, url: &str, directory: &str) -> Result<String, Error> {
		self.record(Call::UploadByUrl {
			url: url.to_string(),
			directory: directory.to_string(),
		})
		.await?;
		Ok(self.next_upload(directory))
	}

	async fn upload_image_by_file(
		&self,
		file_name: &str,
		bytes: &[u8],
		directory: &str,
	) -> Result<String, Error> {
		self.record(Call::UploadByFile {
			file_name: file_name.to_string(),
			len: bytes.len(),
			directory: directory.to_string(),
		})
		.await?;
		Ok(self.next_upload(directory))
	}
}

impl RecordingBackend {
	fn next_upload(&self, directory: &str) -> String {
		let mut state = self.state.lock().unwrap();
		let n = state.counts.get("upload").copied().unwrap_or_default();
		state
			.uploads
			.pop_front()
			.unwrap_or_else(|| format!("s3://{directory}/{n}"))
	}
}

/// Dashboard over the recording backend, with config and settings in `dir`.
pub async fn dashboard(dir: &Path, backend: &RecordingBackend) -> Arc<Dashboard> {
	let config = AppConfig::default_with_dir(dir.to_path_buf());
	let settings = SettingsStore::load(&config).await.unwrap();

	Dashboard::with_backend(config, settings, Arc::new(backend.clone()))
}
