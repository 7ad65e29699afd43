//! Application configuration management

use std::{fs, path::PathBuf};

use anyhow::{anyhow, Result};
use directories::BaseDirs;

pub mod app_config;

pub use app_config::AppConfig;

/// Name of the dashboard directory under the platform's local data directory.
pub const DATA_DIR_NAME: &str = "dishdash-dashboard";

/// Platform-specific data directory resolution
pub fn default_data_dir() -> Result<PathBuf> {
	// `~/.local/share` on Linux, `~/Library/Application Support` on macOS, `~/AppData/Local` on Windows
	let dir = BaseDirs::new()
		.ok_or_else(|| anyhow!("Could not determine data directory"))?
		.data_local_dir()
		.join(DATA_DIR_NAME);

	fs::create_dir_all(&dir)?;

	Ok(dir)
}

/// Stepwise upgrade of a persisted config schema.
pub trait Migrate {
	fn current_version(&self) -> u32;

	fn target_version() -> u32;

	fn migrate(&mut self) -> Result<()>;
}
