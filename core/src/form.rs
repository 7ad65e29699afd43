//! Validation, normalisation and submission of a place draft.

use std::sync::{
	atomic::{AtomicBool, Ordering},
	Arc, Mutex, MutexGuard, PoisonError,
};

use dd_api::{Backend, Coordinate, Place, PlaceId, PlacePatch};
use strum::Display;
use tokio::sync::watch;
use tracing::{error, info};

use crate::{
	attach::{attach_pending, AttachError},
	cache::{QueryCache, Scope},
	config::AppConfig,
	draft::{Mode, PlaceDraft},
};

pub const SAVE_FAILED_MESSAGE: &str = "Failed to save place. Please try again.";

const CREATE_ROUTE: &str = "/api/v1/places";

/// Decimal text with either `.` or `,` as separator. Anything unparsable is 0.
pub fn parse_decimal(text: &str) -> f64 {
	text.trim()
		.replace(',', ".")
		.parse::<f64>()
		.ok()
		.filter(|value| value.is_finite())
		.unwrap_or(0.0)
}

/// Non-negative whole number, fractions are truncated.
pub fn parse_count(text: &str) -> i64 {
	(parse_decimal(text).trunc() as i64).max(0)
}

/// Rating between 0 and 5 with one decimal.
pub fn parse_rating(text: &str) -> f64 {
	(parse_decimal(text).clamp(0.0, 5.0) * 10.0).round() / 10.0
}

fn parse_non_negative(text: &str) -> f64 {
	parse_decimal(text).max(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Field {
	Title,
	Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
	pub field: Field,
	pub message: &'static str,
}

pub fn validate(draft: &PlaceDraft) -> Result<(), Vec<FieldError>> {
	let mut errors = Vec::new();

	if draft.title.trim().is_empty() {
		errors.push(FieldError {
			field: Field::Title,
			message: "Title is required",
		});
	}

	if draft.url.trim().is_empty() {
		errors.push(FieldError {
			field: Field::Url,
			message: "URL is required",
		});
	}

	if errors.is_empty() {
		Ok(())
	} else {
		Err(errors)
	}
}

fn messages(errors: &[FieldError]) -> String {
	errors
		.iter()
		.map(|e| e.message)
		.collect::<Vec<_>>()
		.join(", ")
}

#[derive(thiserror::Error, Debug)]
pub enum SubmitError {
	#[error("{}", messages(.0))]
	Validation(Vec<FieldError>),
	#[error("the place is already being saved")]
	Busy,
	#[error("failed to save place: {0}")]
	Save(#[source] dd_api::Error),
	#[error(transparent)]
	Attach(#[from] AttachError),
}

impl SubmitError {
	pub fn field_errors(&self) -> &[FieldError] {
		match self {
			Self::Validation(errors) => errors,
			_ => &[],
		}
	}

	/// Text shown to the user, field messages for validation and a generic one otherwise.
	pub fn user_message(&self) -> String {
		match self {
			Self::Validation(errors) => messages(errors),
			_ => SAVE_FAILED_MESSAGE.to_string(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorOptions {
	pub default_source: String,
	pub image_folder_prefix: String,
}

impl From<&AppConfig> for EditorOptions {
	fn from(config: &AppConfig) -> Self {
		Self {
			default_source: config.default_source.clone(),
			image_folder_prefix: config.image_folder_prefix.clone(),
		}
	}
}

impl EditorOptions {
	fn source(&self, source: &str) -> String {
		match source.trim() {
			"" => self.default_source.clone(),
			source => source.to_string(),
		}
	}
}

/// Full payload for creating the draft as a new place.
pub fn build_place(draft: &PlaceDraft, options: &EditorOptions) -> Place {
	Place {
		id: None,
		title: draft.title.trim().to_string(),
		description: draft.description.clone(),
		short_description: draft.short_description.clone(),
		address: draft.address.clone(),
		url: draft.url.trim().to_string(),
		source: options.source(&draft.source),
		images: draft.images.clone(),
		location: Coordinate {
			lat: parse_decimal(&draft.lat),
			lon: parse_decimal(&draft.lon),
		},
		price_avg: parse_count(&draft.price_avg),
		review_rating: parse_rating(&draft.review_rating),
		review_count: parse_count(&draft.review_count),
		boost: parse_non_negative(&draft.boost),
		boost_radius: parse_non_negative(&draft.boost_radius),
		tags: draft.tags().to_vec(),
		updated_at: None,
	}
}

/// Patch carrying every editable field of an existing place.
pub fn build_patch(draft: &PlaceDraft, id: PlaceId, options: &EditorOptions) -> PlacePatch {
	let place = build_place(draft, options);

	PlacePatch {
		id: Some(id),
		title: Some(place.title),
		description: Some(place.description),
		short_description: Some(place.short_description),
		address: Some(place.address),
		url: Some(place.url),
		source: Some(place.source),
		images: Some(place.images),
		location: Some(place.location),
		price_avg: Some(place.price_avg),
		review_rating: Some(place.review_rating),
		review_count: Some(place.review_count),
		boost: Some(place.boost),
		boost_radius: Some(place.boost_radius),
		tags: Some(place.tags),
	}
}

struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
	fn acquire(flag: &'a AtomicBool) -> Option<Self> {
		flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
			.ok()
			.map(|_| Self(flag))
	}
}

impl Drop for BusyGuard<'_> {
	fn drop(&mut self) {
		self.0.store(false, Ordering::Release);
	}
}

/// One create or edit session of a place.
///
/// Shared between handlers behind an `Arc`; a second `submit` while one runs is refused.
pub struct PlaceEditor {
	backend: Arc<dyn Backend>,
	cache: Arc<QueryCache>,
	options: EditorOptions,
	draft: Mutex<PlaceDraft>,
	busy: AtomicBool,
	progress: watch::Sender<u8>,
	error: Mutex<Option<String>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
	mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl PlaceEditor {
	pub fn new(
		backend: Arc<dyn Backend>,
		cache: Arc<QueryCache>,
		options: EditorOptions,
		draft: PlaceDraft,
	) -> Arc<Self> {
		Arc::new(Self {
			backend,
			cache,
			options,
			draft: Mutex::new(draft),
			busy: AtomicBool::new(false),
			progress: watch::Sender::new(0),
			error: Mutex::new(None),
		})
	}

	/// Snapshot of the current draft.
	pub fn draft(&self) -> PlaceDraft {
		lock(&self.draft).clone()
	}

	pub fn mode(&self) -> Mode {
		lock(&self.draft).mode()
	}

	pub fn edit<R>(&self, f: impl FnOnce(&mut PlaceDraft) -> R) -> R {
		f(&mut lock(&self.draft))
	}

	/// Drops unsaved changes, keeping nothing from the session.
	pub fn cancel(&self) {
		lock(&self.draft).reset();
		*lock(&self.error) = None;
	}

	pub fn progress(&self) -> watch::Receiver<u8> {
		self.progress.subscribe()
	}

	pub fn is_busy(&self) -> bool {
		self.busy.load(Ordering::Acquire)
	}

	/// Message of the last failed submission.
	pub fn error(&self) -> Option<String> {
		lock(&self.error).clone()
	}

	/// Validates, saves the place, then uploads and attaches pending images.
	///
	/// The draft survives any failure so the user can retry. Once a create succeeded the
	/// editor is in edit mode, a retry patches the same place.
	pub async fn submit(&self) -> Result<Place, SubmitError> {
		let _guard = BusyGuard::acquire(&self.busy).ok_or(SubmitError::Busy)?;

		let result = self.run_submit().await;

		*lock(&self.error) = match &result {
			Ok(_) => None,
			Err(e) => {
				if !matches!(e, SubmitError::Validation(_)) {
					error!("Failed to submit place: {e}");
				}
				Some(e.user_message())
			}
		};

		result
	}

	async fn run_submit(&self) -> Result<Place, SubmitError> {
		let draft = self.draft();
		validate(&draft).map_err(SubmitError::Validation)?;

		let saved = match draft.mode() {
			Mode::Create => {
				let place = self
					.backend
					.create_place(&build_place(&draft, &self.options))
					.await
					.map_err(SubmitError::Save)?;
				self.cache.invalidate(Scope::Places);

				// Without an id the place can neither be patched nor given images.
				if place.persisted_id().is_none() {
					return Err(SubmitError::Save(dd_api::Error::Decode {
						route: CREATE_ROUTE.to_string(),
						reason: "created place has no id".to_string(),
					}));
				}
				info!(place_id = ?place.id, "Created place");
				place
			}
			Mode::Edit(id) => {
				let mut place = self
					.backend
					.patch_place(&build_patch(&draft, id, &self.options))
					.await
					.map_err(SubmitError::Save)?;
				self.cache.invalidate(Scope::Places);

				if place.persisted_id().is_none() {
					place.id = Some(id);
				}
				info!(place_id = id, "Updated place");
				place
			}
		};

		{
			let mut current = lock(&self.draft);
			current.mark_saved(&saved);
			current.sync_images(&draft.images, &saved.images, &[]);
		}

		let place = attach_pending(
			self.backend.as_ref(),
			&saved,
			&draft.pending(),
			&self.options.image_folder_prefix,
			&self.progress,
		)
		.await?;

		if draft.pending_count() > 0 {
			self.cache.invalidate(Scope::Places);
		}

		let uploaded = place.images.get(saved.images.len()..).unwrap_or_default();
		let mut current = lock(&self.draft);
		current.remove_submitted(&draft);
		current.sync_images(&saved.images, &place.images, uploaded);

		Ok(place)
	}
}
