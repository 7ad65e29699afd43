use clap::Args;
use dd_core::pages::stories::StoriesQuery;

#[derive(Args, Debug)]
pub struct StoriesListArgs {
	/// Title filter
	#[arg(long)]
	pub title: Option<String>,
	#[arg(long)]
	pub visible: Option<bool>,
}

impl From<StoriesListArgs> for StoriesQuery {
	fn from(args: StoriesListArgs) -> Self {
		Self {
			title: args.title.unwrap_or_default(),
			visible: args.visible,
		}
	}
}

#[derive(Args, Debug)]
pub struct StoryGetArgs {
	pub id: String,
}

#[derive(Args, Debug)]
pub struct StoryDeleteArgs {
	pub id: String,

	/// Skip the confirmation prompt
	#[arg(long, short)]
	pub yes: bool,
}
