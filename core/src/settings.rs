//! Persisted settings and auth store.
//!
//! Holds the dashboard token and API key in `settings.json`. Every request reads the current
//! token through [`RequestConfigProvider`], so a login or logout applies to the next call.

use std::{
	future::Future,
	io,
	path::{Path, PathBuf},
	sync::Arc,
};

use dd_api::{ApiToken, RequestConfig, RequestConfigProvider};
use serde::{Deserialize, Serialize};
use tokio::{fs, sync::watch};
use tracing::{debug, info};

use crate::config::AppConfig;

pub const SETTINGS_FILE_NAME: &str = "settings.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	pub api_token: String,
	pub api_key: String,
}

impl Settings {
	pub fn token(&self) -> Option<ApiToken> {
		ApiToken::new(self.api_token.as_str())
	}
}

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
	#[error("failed to access settings at {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
	#[error("settings at {path} are not valid JSON: {source}")]
	Json {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},
}

pub struct SettingsStore {
	path: PathBuf,
	client: reqwest::Client,
	api_url: String,
	images_api_url: String,
	state: watch::Sender<Settings>,
}

impl SettingsStore {
	/// Hydrates the store from `settings.json` in the config's data directory.
	pub async fn load(config: &AppConfig) -> Result<Arc<Self>, SettingsError> {
		let path = config.settings_path();
		let settings = read_settings(&path).await?;

		Ok(Arc::new(Self {
			path,
			client: reqwest::Client::new(),
			api_url: config.api_url.clone(),
			images_api_url: config.images_api_url().to_string(),
			state: watch::Sender::new(settings),
		}))
	}

	pub fn get(&self) -> Settings {
		self.state.borrow().clone()
	}

	pub fn is_logged_in(&self) -> bool {
		self.state.borrow().token().is_some()
	}

	/// Receiver notified on every change.
	pub fn subscribe(&self) -> watch::Receiver<Settings> {
		self.state.subscribe()
	}

	pub async fn set_api_token(&self, token: &str) -> Result<(), SettingsError> {
		let token = token.trim().to_string();
		self.update(|settings| settings.api_token = token).await
	}

	pub async fn set_api_key(&self, key: &str) -> Result<(), SettingsError> {
		let key = key.trim().to_string();
		self.update(|settings| settings.api_key = key).await
	}

	/// Forgets the token, keeping the API key.
	pub async fn clear_token(&self) -> Result<(), SettingsError> {
		self.update(|settings| settings.api_token.clear()).await?;
		info!("Cleared dashboard token");
		Ok(())
	}

	async fn update(&self, f: impl FnOnce(&mut Settings)) -> Result<(), SettingsError> {
		let mut next = self.get();
		f(&mut next);

		write_settings(&self.path, &next).await?;
		self.state.send_replace(next);

		Ok(())
	}
}

impl RequestConfigProvider for SettingsStore {
	fn get_request_config(self: &Arc<Self>) -> impl Future<Output = RequestConfig> + Send {
		let config = RequestConfig {
			client: self.client.clone(),
			api_url: self.api_url.clone(),
			images_api_url: self.images_api_url.clone(),
			auth_token: self.state.borrow().token(),
		};

		async move { config }
	}
}

async fn read_settings(path: &Path) -> Result<Settings, SettingsError> {
	match fs::read(path).await {
		Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| SettingsError::Json {
			path: path.to_path_buf(),
			source,
		}),
		Err(e) if e.kind() == io::ErrorKind::NotFound => {
			debug!("No settings at {}, starting logged out", path.display());
			Ok(Settings::default())
		}
		Err(source) => Err(SettingsError::Io {
			path: path.to_path_buf(),
			source,
		}),
	}
}

async fn write_settings(path: &Path, settings: &Settings) -> Result<(), SettingsError> {
	let io_err = |source| SettingsError::Io {
		path: path.to_path_buf(),
		source,
	};

	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent).await.map_err(io_err)?;
	}

	let json = serde_json::to_vec_pretty(settings).map_err(|source| SettingsError::Json {
		path: path.to_path_buf(),
		source,
	})?;

	fs::write(path, json).await.map_err(io_err)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn config_in(dir: &Path) -> AppConfig {
		AppConfig::default_with_dir(dir.to_path_buf())
	}

	#[tokio::test]
	async fn token_survives_a_reload() {
		let dir = tempfile::tempdir().unwrap();
		let config = config_in(dir.path());

		let store = SettingsStore::load(&config).await.unwrap();
		assert!(!store.is_logged_in());
		store.set_api_token("  secret ").await.unwrap();
		store.set_api_key("key-1").await.unwrap();

		let reloaded = SettingsStore::load(&config).await.unwrap();
		assert_eq!(
			reloaded.get(),
			Settings {
				api_token: "secret".into(),
				api_key: "key-1".into(),
			}
		);
	}

	#[tokio::test]
	async fn request_config_follows_the_current_token() {
		let dir = tempfile::tempdir().unwrap();
		let store = SettingsStore::load(&config_in(dir.path())).await.unwrap();

		store.set_api_token("t-1").await.unwrap();
		let config = store.get_request_config().await;
		assert_eq!(config.auth_token.as_ref().map(ApiToken::as_str), Some("t-1"));
		assert_eq!(config.images_api_url, config.api_url);

		store.clear_token().await.unwrap();
		assert!(store.get_request_config().await.auth_token.is_none());
		assert_eq!(store.get().api_key, "");
	}

	#[tokio::test]
	async fn subscribers_see_changes() {
		let dir = tempfile::tempdir().unwrap();
		let store = SettingsStore::load(&config_in(dir.path())).await.unwrap();
		let mut rx = store.subscribe();

		store.set_api_token("t-2").await.unwrap();

		assert!(rx.has_changed().unwrap());
		assert_eq!(rx.borrow_and_update().api_token, "t-2");
	}

	#[tokio::test]
	async fn malformed_settings_are_reported() {
		let dir = tempfile::tempdir().unwrap();
		let config = config_in(dir.path());
		std::fs::write(config.settings_path(), "{ nope").unwrap();

		let err = SettingsStore::load(&config).await.err().unwrap();
		assert!(matches!(err, SettingsError::Json { .. }));
	}
}
