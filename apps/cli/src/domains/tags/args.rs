use clap::Args;
use dd_core::api::{NewTag, Tag, TagId};

#[derive(Args, Debug)]
pub struct TagCreateArgs {
	pub name: String,
	/// Icon URL
	#[arg(long, default_value = "")]
	pub icon: String,
	/// Hide the tag from users
	#[arg(long)]
	pub hidden: bool,
	#[arg(long, default_value_t = 0)]
	pub order: i32,
	/// Hide places with this tag from search
	#[arg(long)]
	pub excluded: bool,
}

impl From<TagCreateArgs> for NewTag {
	fn from(args: TagCreateArgs) -> Self {
		Self {
			name: args.name,
			icon: args.icon,
			visible: !args.hidden,
			order: args.order,
			excluded: args.excluded,
		}
	}
}

/// Only the given fields change, the rest keep their stored values.
#[derive(Args, Debug)]
pub struct TagUpdateArgs {
	pub id: TagId,
	#[arg(long)]
	pub name: Option<String>,
	#[arg(long)]
	pub icon: Option<String>,
	#[arg(long)]
	pub visible: Option<bool>,
	#[arg(long)]
	pub order: Option<i32>,
	#[arg(long)]
	pub excluded: Option<bool>,
}

impl TagUpdateArgs {
	pub fn apply(self, current: &Tag) -> NewTag {
		NewTag {
			name: self.name.unwrap_or_else(|| current.name.clone()),
			icon: self.icon.unwrap_or_else(|| current.icon.clone()),
			visible: self.visible.unwrap_or(current.visible),
			order: self.order.unwrap_or(current.order),
			excluded: self.excluded.unwrap_or(current.excluded),
		}
	}
}

#[derive(Args, Debug)]
pub struct TagDeleteArgs {
	pub id: TagId,

	/// Skip the confirmation prompt
	#[arg(long, short)]
	pub yes: bool,
}
