use std::sync::Arc;

use dd_core::Dashboard;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
	Human,
	Json,
}

#[derive(Clone)]
pub struct Context {
	pub dashboard: Arc<Dashboard>,
	pub format: OutputFormat,
}

impl Context {
	pub fn new(dashboard: Arc<Dashboard>, format: OutputFormat) -> Self {
		Self { dashboard, format }
	}

	/// Fails early when no token is stored, every backend route needs one.
	pub fn require_login(&self) -> anyhow::Result<()> {
		if !self.dashboard.settings().is_logged_in() {
			anyhow::bail!("Not logged in. Use 'dd auth login <token>' first.");
		}

		Ok(())
	}
}
