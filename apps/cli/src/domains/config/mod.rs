use anyhow::Result;
use clap::Subcommand;
use dd_core::config::AppConfig;

use crate::{context::OutputFormat, util::output::print_json};

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
	/// Print the current configuration
	Show,
	/// Point the dashboard at another backend
	SetApiUrl { url: String },
	/// Use a separate image storage service
	SetImagesUrl { url: String },
}

pub fn run(mut config: AppConfig, format: OutputFormat, cmd: ConfigCmd) -> Result<()> {
	match cmd {
		ConfigCmd::Show => match format {
			OutputFormat::Json => print_json(&config),
			OutputFormat::Human => {
				println!("Data directory: {}", config.data_dir.display());
				println!("API URL:        {}", config.api_url);
				println!("Images URL:     {}", config.images_api_url());
				println!("Default source: {}", config.default_source);
				println!("Image folder:   {}/<place id>", config.image_folder_prefix);
				println!("Log level:      {}", config.log_level);
			}
		},
		ConfigCmd::SetApiUrl { url } => {
			config.set_api_url(&url)?;
			config.save()?;
			println!("API URL set to {}", config.api_url);
		}
		ConfigCmd::SetImagesUrl { url } => {
			config.set_images_api_url(&url)?;
			config.save()?;
			println!("Images URL set to {}", config.images_api_url());
		}
	}

	Ok(())
}
