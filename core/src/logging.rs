use std::{fs, path::Path};

use anyhow::{Context, Result};
use tracing_appender::{
	non_blocking::WorkerGuard,
	rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::AppConfig;

pub const LOG_FILE_NAME: &str = "dashboard.log";

/// Installs the global subscriber: stderr plus a daily rolling file under `<data_dir>/logs`.
///
/// Stdout is reserved for command output.
///
/// `RUST_LOG` takes precedence over the configured level. Keep the returned guard alive for
/// as long as logs should be flushed to disk.
pub fn init(config: &AppConfig) -> Result<WorkerGuard> {
	let logs_dir = config.logs_dir();
	init_in(&logs_dir, &config.log_level)
}

pub fn init_in(logs_dir: &Path, log_level: &str) -> Result<WorkerGuard> {
	fs::create_dir_all(logs_dir)
		.with_context(|| format!("Failed to create logs directory {}", logs_dir.display()))?;

	let file_appender = RollingFileAppender::new(Rotation::DAILY, logs_dir, LOG_FILE_NAME);
	let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

	tracing_subscriber::registry()
		.with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
		.with(fmt::layer().with_target(true).with_writer(std::io::stderr))
		.with(
			fmt::layer()
				.with_target(true)
				.with_ansi(false)
				.with_writer(non_blocking),
		)
		.try_init()
		.context("Failed to initialize tracing")?;

	Ok(guard)
}
