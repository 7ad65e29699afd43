//! Working copy of a place being created or edited.

use std::{io, path::Path};

use chrono::{DateTime, Utc};
use dd_api::{Place, PlaceId, TagId};
use tokio::fs;
use uuid::Uuid;

use crate::pages::move_item;

/// A local image waiting to be uploaded by file.
#[derive(Clone, PartialEq, Eq)]
pub struct PendingFile {
	pub file_name: String,
	pub bytes: Vec<u8>,
}

impl std::fmt::Debug for PendingFile {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PendingFile")
			.field("file_name", &self.file_name)
			.field("len", &self.bytes.len())
			.finish()
	}
}

impl PendingFile {
	/// Files without a usable name get a random one, keeping the extension hint if given.
	pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
		let file_name = file_name.into();
		let file_name = match file_name.trim() {
			"" => format!("{}.jpg", Uuid::new_v4()),
			name if name.starts_with('.') => format!("{}{name}", Uuid::new_v4()),
			name => name.to_string(),
		};

		Self { file_name, bytes }
	}

	pub async fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
		let path = path.as_ref();
		let bytes = fs::read(path).await?;
		let file_name = path
			.file_name()
			.and_then(|name| name.to_str())
			.unwrap_or_default();

		Ok(Self::new(file_name, bytes))
	}
}

/// Image attached in the form but not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingImage {
	Url(String),
	File(PendingFile),
}

impl PendingImage {
	/// Short human readable reference for logs and errors.
	pub fn describe(&self) -> &str {
		match self {
			Self::Url(url) => url,
			Self::File(file) => &file.file_name,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
	Create,
	Edit(PlaceId),
}

/// Every field of a place as the form holds it.
///
/// Numbers stay as typed text until submission so both `12,5` and `12.5` survive editing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceDraft {
	id: Option<PlaceId>,
	pub title: String,
	pub description: String,
	pub short_description: String,
	pub address: String,
	pub url: String,
	pub source: String,
	pub lat: String,
	pub lon: String,
	pub price_avg: String,
	pub review_rating: String,
	pub review_count: String,
	pub boost: String,
	pub boost_radius: String,
	/// Already stored images, in display order.
	pub images: Vec<String>,
	tags: Vec<TagId>,
	updated_at: Option<DateTime<Utc>>,
	pending_urls: Vec<String>,
	pending_files: Vec<PendingFile>,
}

fn number_text(value: f64) -> String {
	value.to_string()
}

impl PlaceDraft {
	/// Empty create-mode draft.
	pub fn new() -> Self {
		Self::default()
	}

	/// Edit-mode draft of a persisted place.
	pub fn from_existing(place: &Place) -> Self {
		let mut draft = Self::new();
		draft.load_from_existing(place);
		draft
	}

	/// Create-mode draft seeded from a scraped place.
	pub fn from_parsed(mut place: Place) -> Self {
		place.id = None;
		place.updated_at = None;
		Self::from_existing(&place)
	}

	pub fn mode(&self) -> Mode {
		match self.id.filter(|id| *id != 0) {
			Some(id) => Mode::Edit(id),
			None => Mode::Create,
		}
	}

	pub fn id(&self) -> Option<PlaceId> {
		self.id.filter(|id| *id != 0)
	}

	pub fn updated_at(&self) -> Option<DateTime<Utc>> {
		self.updated_at
	}

	/// Switches to edit mode once the place exists server side.
	pub(crate) fn mark_saved(&mut self, place: &Place) {
		self.id = place.persisted_id();
		self.updated_at = place.updated_at;
	}

	pub fn reset(&mut self) {
		*self = Self::default();
	}

	pub fn load_from_existing(&mut self, place: &Place) {
		let mut tags = Vec::with_capacity(place.tags.len());
		for tag in &place.tags {
			if !tags.contains(tag) {
				tags.push(*tag);
			}
		}

		*self = Self {
			id: place.persisted_id(),
			title: place.title.clone(),
			description: place.description.clone(),
			short_description: place.short_description.clone(),
			address: place.address.clone(),
			url: place.url.clone(),
			source: place.source.clone(),
			lat: number_text(place.location.lat),
			lon: number_text(place.location.lon),
			price_avg: place.price_avg.to_string(),
			review_rating: number_text(place.review_rating),
			review_count: place.review_count.to_string(),
			boost: number_text(place.boost),
			boost_radius: number_text(place.boost_radius),
			images: place.images.clone(),
			tags,
			updated_at: place.updated_at,
			pending_urls: Vec::new(),
			pending_files: Vec::new(),
		};
	}

	/// Overwrites the fields from a pasted JSON place. Id and pending images are kept, and
	/// nothing changes when the text does not parse.
	pub fn apply_json(&mut self, text: &str) -> Result<(), serde_json::Error> {
		let place: Place = serde_json::from_str(text)?;

		let id = self.id;
		let updated_at = self.updated_at;
		let pending_urls = std::mem::take(&mut self.pending_urls);
		let pending_files = std::mem::take(&mut self.pending_files);

		self.load_from_existing(&place);
		self.id = id;
		self.updated_at = updated_at;
		self.pending_urls = pending_urls;
		self.pending_files = pending_files;

		Ok(())
	}

	pub fn set_location(&mut self, lat: f64, lon: f64) {
		self.lat = number_text(lat);
		self.lon = number_text(lon);
	}

	pub fn tags(&self) -> &[TagId] {
		&self.tags
	}

	pub fn is_tag_selected(&self, id: TagId) -> bool {
		self.tags.contains(&id)
	}

	/// Deselects a selected tag, otherwise appends it.
	pub fn toggle_tag(&mut self, id: TagId) {
		match self.tags.iter().position(|tag| *tag == id) {
			Some(index) => {
				self.tags.remove(index);
			}
			None => self.tags.push(id),
		}
	}

	pub fn add_pending_url(&mut self, url: impl Into<String>) {
		let url = url.into();
		let url = url.trim();
		if !url.is_empty() {
			self.pending_urls.push(url.to_string());
		}
	}

	pub fn add_pending_file(&mut self, file: PendingFile) {
		self.pending_files.push(file);
	}

	pub fn add_pending(&mut self, image: PendingImage) {
		match image {
			PendingImage::Url(url) => self.add_pending_url(url),
			PendingImage::File(file) => self.add_pending_file(file),
		}
	}

	pub fn remove_pending_url(&mut self, index: usize) {
		if index < self.pending_urls.len() {
			self.pending_urls.remove(index);
		}
	}

	pub fn remove_pending_file(&mut self, index: usize) {
		if index < self.pending_files.len() {
			self.pending_files.remove(index);
		}
	}

	pub fn pending_urls(&self) -> &[String] {
		&self.pending_urls
	}

	pub fn pending_files(&self) -> &[PendingFile] {
		&self.pending_files
	}

	/// Pending images in upload order: URLs first, then files.
	pub fn pending(&self) -> Vec<PendingImage> {
		self.pending_urls
			.iter()
			.cloned()
			.map(PendingImage::Url)
			.chain(self.pending_files.iter().cloned().map(PendingImage::File))
			.collect()
	}

	pub fn pending_count(&self) -> usize {
		self.pending_urls.len() + self.pending_files.len()
	}

	/// Drops the pending images a finished submission stored, keeping any queued since.
	pub(crate) fn remove_submitted(&mut self, submitted: &PlaceDraft) {
		for url in &submitted.pending_urls {
			if let Some(index) = self.pending_urls.iter().position(|u| u == url) {
				self.pending_urls.remove(index);
			}
		}
		for file in &submitted.pending_files {
			if let Some(index) = self.pending_files.iter().position(|f| f == file) {
				self.pending_files.remove(index);
			}
		}
	}

	/// Adopts the `stored` image list while the local one still equals `expected`. A list
	/// edited in the meantime is kept as is, with `added` appended to it.
	pub(crate) fn sync_images(&mut self, expected: &[String], stored: &[String], added: &[String]) {
		if self.images == expected {
			self.images = stored.to_vec();
			return;
		}

		for url in added {
			if !self.images.contains(url) {
				self.images.push(url.clone());
			}
		}
	}

	/// Takes effect with the next save.
	pub fn remove_existing_image(&mut self, index: usize) {
		if index < self.images.len() {
			self.images.remove(index);
		}
	}

	/// Moves an image, `to` past the end means last.
	pub fn reorder_existing_image(&mut self, from: usize, to: usize) {
		move_item(&mut self.images, from, to);
	}
}
