//! Places dashboard core: draft editing, submission with image attachment, persisted auth
//! settings, query caching and the page controllers driving them.

pub mod attach;
pub mod cache;
pub mod config;
pub mod draft;
pub mod form;
pub mod logging;
pub mod pages;
pub mod settings;

use std::sync::Arc;

use dd_api::{Backend, HttpBackend, PlaceId};
use tracing::{info, warn};

pub use dd_api as api;

use crate::{
	cache::QueryCache,
	config::AppConfig,
	draft::PlaceDraft,
	form::{EditorOptions, PlaceEditor},
	pages::{
		collections::CollectionsPage, import::ImportPage, places::PlacesPage,
		stories::StoriesPage, tags::TagsPage,
	},
	settings::{SettingsError, SettingsStore},
};

/// Application state shared by every page: configuration, auth settings, cache and backend.
pub struct Dashboard {
	config: AppConfig,
	settings: Arc<SettingsStore>,
	cache: Arc<QueryCache>,
	backend: Arc<dyn Backend>,
}

impl Dashboard {
	/// Hydrates the settings from disk and talks HTTP to the configured backend.
	pub async fn open(config: AppConfig) -> Result<Arc<Self>, SettingsError> {
		let settings = SettingsStore::load(&config).await?;
		let backend = Arc::new(HttpBackend::new(Arc::clone(&settings)));

		info!(api_url = %config.api_url, logged_in = settings.is_logged_in(), "Dashboard opened");

		Ok(Self::with_backend(config, settings, backend))
	}

	pub fn with_backend(
		config: AppConfig,
		settings: Arc<SettingsStore>,
		backend: Arc<dyn Backend>,
	) -> Arc<Self> {
		Arc::new(Self {
			config,
			settings,
			cache: Arc::new(QueryCache::new()),
			backend,
		})
	}

	pub fn config(&self) -> &AppConfig {
		&self.config
	}

	pub fn settings(&self) -> &Arc<SettingsStore> {
		&self.settings
	}

	pub fn cache(&self) -> &Arc<QueryCache> {
		&self.cache
	}

	pub fn backend(&self) -> &Arc<dyn Backend> {
		&self.backend
	}

	pub async fn login(&self, token: &str) -> Result<(), SettingsError> {
		self.settings.set_api_token(token).await?;
		self.cache.clear();
		info!("Stored dashboard token");
		Ok(())
	}

	/// Forgets the token and everything fetched with it.
	pub async fn logout(&self) -> Result<(), SettingsError> {
		self.cache.clear();
		self.settings.clear_token().await
	}

	/// Checks the stored token against the backend. A rejected token is cleared.
	pub async fn verify_token(&self) -> Result<bool, dd_api::Error> {
		if !self.settings.is_logged_in() {
			return Ok(false);
		}

		match self.backend.list_tags().await {
			Ok(_) => Ok(true),
			Err(e) if e.is_unauthorized() => {
				warn!("Backend rejected the stored token: {e}");
				if let Err(e) = self.logout().await {
					warn!("Failed to clear rejected token: {e}");
				}
				Ok(false)
			}
			Err(e) => Err(e),
		}
	}

	fn editor(&self, draft: PlaceDraft) -> Arc<PlaceEditor> {
		PlaceEditor::new(
			Arc::clone(&self.backend),
			Arc::clone(&self.cache),
			EditorOptions::from(&self.config),
			draft,
		)
	}

	/// Editor for a new place.
	pub fn new_place(&self) -> Arc<PlaceEditor> {
		self.editor(PlaceDraft::new())
	}

	/// Editor seeded from an existing or scraped draft.
	pub fn edit_draft(&self, draft: PlaceDraft) -> Arc<PlaceEditor> {
		self.editor(draft)
	}

	/// Fetches the place and opens an edit session for it.
	pub async fn edit_place(&self, id: PlaceId) -> Result<Arc<PlaceEditor>, dd_api::Error> {
		let place = self.backend.get_place(id).await?;
		Ok(self.editor(PlaceDraft::from_existing(&place)))
	}

	pub fn places_page(self: &Arc<Self>) -> PlacesPage {
		PlacesPage::new(Arc::clone(self))
	}

	pub fn tags_page(self: &Arc<Self>) -> TagsPage {
		TagsPage::new(Arc::clone(self))
	}

	pub fn collections_page(self: &Arc<Self>) -> CollectionsPage {
		CollectionsPage::new(Arc::clone(self))
	}

	pub fn stories_page(self: &Arc<Self>) -> StoriesPage {
		StoriesPage::new(Arc::clone(self))
	}

	pub fn import_page(self: &Arc<Self>) -> ImportPage {
		ImportPage::new(Arc::clone(self))
	}
}
