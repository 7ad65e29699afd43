//! Application configuration

use std::{
	fs,
	path::{Path, PathBuf},
};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{default_data_dir, Migrate};

pub const CONFIG_FILE_NAME: &str = "dashboard.json";
pub const DEFAULT_API_URL: &str = "https://dishdash.ru";
pub const DEFAULT_LOG_LEVEL: &str = "dd_core=info,dd_api=info,dd=info";
pub const DEFAULT_SOURCE: &str = "dashboard";
pub const DEFAULT_IMAGE_FOLDER_PREFIX: &str = "places";

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
	/// Config schema version
	pub version: u32,

	pub data_dir: PathBuf,

	/// Base URL of the places backend
	pub api_url: String,

	/// Base URL of the image storage service, empty means `api_url`
	#[serde(default)]
	pub images_api_url: String,

	/// Filter directives used when `RUST_LOG` is unset
	pub log_level: String,

	/// Source tag given to places that leave it empty
	#[serde(default = "default_source")]
	pub default_source: String,

	/// Storage folder prefix for place images
	#[serde(default = "default_image_folder_prefix")]
	pub image_folder_prefix: String,
}

fn default_source() -> String {
	DEFAULT_SOURCE.to_string()
}

fn default_image_folder_prefix() -> String {
	DEFAULT_IMAGE_FOLDER_PREFIX.to_string()
}

impl AppConfig {
	/// Load configuration from the default location
	pub fn load() -> Result<Self> {
		let data_dir = default_data_dir()?;
		Self::load_from(&data_dir)
	}

	/// Load configuration from a specific data directory, writing defaults when missing
	pub fn load_from(data_dir: &Path) -> Result<Self> {
		let config_path = data_dir.join(CONFIG_FILE_NAME);

		if !config_path.exists() {
			warn!("No config found, creating default at {:?}", config_path);
			let config = Self::default_with_dir(data_dir.to_path_buf());
			config.save()?;
			return Ok(config);
		}

		info!("Loading config from {:?}", config_path);
		let json = fs::read_to_string(&config_path)?;
		let mut config: AppConfig = serde_json::from_str(&json)?;
		// The directory the file was found in wins over a stale recorded path.
		config.data_dir = data_dir.to_path_buf();

		if config.current_version() < Self::target_version() {
			info!(
				"Migrating config from v{} to v{}",
				config.version,
				Self::target_version()
			);
			config.migrate()?;
			config.save()?;
		}

		Ok(config)
	}

	/// Create default configuration with specific data directory
	pub fn default_with_dir(data_dir: PathBuf) -> Self {
		Self {
			version: Self::target_version(),
			data_dir,
			api_url: DEFAULT_API_URL.to_string(),
			images_api_url: DEFAULT_API_URL.to_string(),
			log_level: DEFAULT_LOG_LEVEL.to_string(),
			default_source: default_source(),
			image_folder_prefix: default_image_folder_prefix(),
		}
	}

	/// Save configuration to disk
	pub fn save(&self) -> Result<()> {
		fs::create_dir_all(&self.data_dir)?;

		let config_path = self.data_dir.join(CONFIG_FILE_NAME);
		let json = serde_json::to_string_pretty(self)?;
		fs::write(&config_path, json)?;
		info!("Saved config to {:?}", config_path);

		Ok(())
	}

	/// Base URL used for uploads, falling back to the main backend.
	pub fn images_api_url(&self) -> &str {
		if self.images_api_url.trim().is_empty() {
			&self.api_url
		} else {
			&self.images_api_url
		}
	}

	pub fn set_api_url(&mut self, url: &str) -> Result<()> {
		self.api_url = normalize_base_url(url)?;
		Ok(())
	}

	pub fn set_images_api_url(&mut self, url: &str) -> Result<()> {
		self.images_api_url = normalize_base_url(url)?;
		Ok(())
	}

	pub fn logs_dir(&self) -> PathBuf {
		self.data_dir.join("logs")
	}

	pub fn settings_path(&self) -> PathBuf {
		self.data_dir.join(crate::settings::SETTINGS_FILE_NAME)
	}
}

fn normalize_base_url(url: &str) -> Result<String> {
	let url = url.trim().trim_end_matches('/');

	if !(url.starts_with("http://") || url.starts_with("https://")) {
		return Err(anyhow!("'{url}' is not an http(s) URL"));
	}

	Ok(url.to_string())
}

impl Migrate for AppConfig {
	fn current_version(&self) -> u32 {
		self.version
	}

	fn target_version() -> u32 {
		3
	}

	fn migrate(&mut self) -> Result<()> {
		match self.version {
			0 => {
				self.version = 1;
				self.migrate()
			}
			1 => {
				// v2 split image uploads onto their own base URL
				if self.images_api_url.trim().is_empty() {
					self.images_api_url = self.api_url.clone();
				}
				self.version = 2;
				self.migrate()
			}
			2 => {
				// v3 made the source tag and image folder configurable
				if self.default_source.trim().is_empty() {
					self.default_source = default_source();
				}
				if self.image_folder_prefix.trim().is_empty() {
					self.image_folder_prefix = default_image_folder_prefix();
				}
				self.version = 3;
				Ok(())
			}
			3 => Ok(()),
			v => Err(anyhow!("Unknown config version: {}", v)),
		}
	}
}
