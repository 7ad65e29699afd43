use clap::Args;
use dd_core::{api::CollectionType, pages::collections::CollectionsQuery};

#[derive(Args, Debug)]
pub struct CollectionsListArgs {
	/// Collection type: basic or favorites
	#[arg(long = "type")]
	pub kind: Option<CollectionType>,
	#[arg(long)]
	pub visible: Option<bool>,
	/// Only collections of this owner
	#[arg(long)]
	pub owner: Option<String>,
}

impl From<CollectionsListArgs> for CollectionsQuery {
	fn from(args: CollectionsListArgs) -> Self {
		Self {
			kind: args.kind,
			visible: args.visible,
			owner_id: args.owner.unwrap_or_default(),
		}
	}
}

#[derive(Args, Debug)]
pub struct CollectionGetArgs {
	pub id: String,
}

#[derive(Args, Debug)]
pub struct CollectionDeleteArgs {
	pub id: String,

	/// Skip the confirmation prompt
	#[arg(long, short)]
	pub yes: bool,
}
