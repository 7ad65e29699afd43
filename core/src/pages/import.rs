//! Creating places from a scraped page or a pasted JSON document.

use std::sync::Arc;

use tracing::info;

use crate::{draft::PlaceDraft, form::PlaceEditor, Dashboard};

#[derive(thiserror::Error, Debug)]
pub enum ImportError {
	#[error("URL cannot be empty.")]
	EmptyUrl,
	#[error("failed to parse place: {0}")]
	Parse(#[source] dd_api::Error),
	#[error("pasted text is not a place: {0}")]
	Json(#[source] serde_json::Error),
}

impl ImportError {
	pub fn user_message(&self) -> String {
		match self {
			Self::EmptyUrl => self.to_string(),
			Self::Parse(_) => "Failed to parse the place. Please check the URL or API key.".to_string(),
			Self::Json(_) => "Invalid place JSON.".to_string(),
		}
	}
}

pub struct ImportPage {
	ctx: Arc<Dashboard>,
	error: Option<String>,
}

impl ImportPage {
	pub fn new(ctx: Arc<Dashboard>) -> Self {
		Self { ctx, error: None }
	}

	pub fn error(&self) -> Option<&str> {
		self.error.as_deref()
	}

	fn fail(&mut self, err: ImportError) -> ImportError {
		tracing::error!("Import failed: {err}");
		self.error = Some(err.user_message());
		err
	}

	/// Scrapes `url` and opens a create session seeded with the result.
	pub async fn parse(&mut self, url: &str) -> Result<Arc<PlaceEditor>, ImportError> {
		self.error = None;

		let url = url.trim();
		if url.is_empty() {
			return Err(self.fail(ImportError::EmptyUrl));
		}

		match self.ctx.backend().parse_place(url).await {
			Ok(place) => {
				info!(%url, title = %place.title, "Parsed place");
				Ok(self.ctx.edit_draft(PlaceDraft::from_parsed(place)))
			}
			Err(e) => Err(self.fail(ImportError::Parse(e))),
		}
	}

	/// Opens a create session from a pasted place.
	pub fn from_json(&mut self, text: &str) -> Result<Arc<PlaceEditor>, ImportError> {
		self.error = None;

		let mut draft = PlaceDraft::new();
		match draft.apply_json(text) {
			Ok(()) => Ok(self.ctx.edit_draft(draft)),
			Err(e) => Err(self.fail(ImportError::Json(e))),
		}
	}
}
