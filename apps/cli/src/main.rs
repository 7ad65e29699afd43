mod context;
mod domains;
mod ui;
mod util;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use dd_core::{config::AppConfig, logging, Dashboard};

use crate::{
	context::{Context, OutputFormat},
	domains::{
		auth::AuthCmd, collections::CollectionsCmd, config::ConfigCmd, places::PlacesCmd,
		stories::StoriesCmd, tags::TagsCmd,
	},
};

#[derive(Parser, Debug)]
#[command(name = "dd", about = "Places dashboard admin CLI")]
struct Cli {
	/// Path to the dashboard data directory
	#[arg(long, env = "DD_DATA_DIR")]
	data_dir: Option<PathBuf>,

	/// Output format
	#[arg(long, value_enum, default_value = "human")]
	format: OutputFormat,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Dashboard token management
	#[command(subcommand)]
	Auth(AuthCmd),
	/// Backend URLs and other settings
	#[command(subcommand)]
	Config(ConfigCmd),
	/// Place listing, editing and import
	#[command(subcommand)]
	Places(PlacesCmd),
	/// Tag management
	#[command(subcommand)]
	Tags(TagsCmd),
	/// Collection management
	#[command(subcommand)]
	Collections(CollectionsCmd),
	/// Story management
	#[command(subcommand)]
	Stories(StoriesCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	let config = match &cli.data_dir {
		Some(dir) => AppConfig::load_from(dir),
		None => AppConfig::load(),
	}
	.context("Failed to load configuration")?;

	let _guard = logging::init(&config)?;

	let command = match cli.command {
		// Config edits must not need a reachable backend or a valid token.
		Commands::Config(cmd) => return domains::config::run(config, cli.format, cmd),
		command => command,
	};

	let dashboard = Dashboard::open(config).await?;
	let ctx = Context::new(dashboard, cli.format);

	match command {
		Commands::Auth(cmd) => domains::auth::run(&ctx, cmd).await,
		Commands::Places(cmd) => domains::places::run(&ctx, cmd).await,
		Commands::Tags(cmd) => domains::tags::run(&ctx, cmd).await,
		Commands::Collections(cmd) => domains::collections::run(&ctx, cmd).await,
		Commands::Stories(cmd) => domains::stories::run(&ctx, cmd).await,
		Commands::Config(_) => Ok(()),
	}
}
