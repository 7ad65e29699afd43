mod args;

use anyhow::{anyhow, Result};
use clap::Subcommand;
use dd_core::api::Tag;

use crate::{context::Context, util::prelude::*};

use self::args::*;

#[derive(Subcommand, Debug)]
pub enum TagsCmd {
	/// List tags in display order
	List,
	/// Create a tag
	Create(TagCreateArgs),
	/// Change a tag
	Update(TagUpdateArgs),
	/// Delete a tag
	Delete(TagDeleteArgs),
}

pub async fn run(ctx: &Context, cmd: TagsCmd) -> Result<()> {
	ctx.require_login()?;
	let mut page = ctx.dashboard.tags_page();

	match cmd {
		TagsCmd::List => {
			let tags = page.load().await?.to_vec();
			print_output!(ctx, &tags, |tags: &Vec<Tag>| {
				if tags.is_empty() {
					println!("No tags found");
					return;
				}
				for tag in tags {
					let mut flags = Vec::new();
					if !tag.visible {
						flags.push("hidden");
					}
					if tag.excluded {
						flags.push("excluded");
					}
					println!("- {} [{}] {} {}", tag.id, tag.order, tag.name, flags.join(" "));
				}
			});
		}
		TagsCmd::Create(args) => {
			let tag = page.create(&args.into()).await?;
			print_output!(ctx, &tag, |t: &Tag| println!("Created tag {} ({})", t.id, t.name));
		}
		TagsCmd::Update(args) => {
			let current = page
				.load()
				.await?
				.iter()
				.find(|tag| tag.id == args.id)
				.cloned()
				.ok_or_else(|| anyhow!("Tag {} not found", args.id))?;

			let id = args.id;
			let tag = page.update(id, &args.apply(&current)).await?;
			print_output!(ctx, &tag, |t: &Tag| println!("Updated tag {} ({})", t.id, t.name));
		}
		TagsCmd::Delete(args) => {
			confirm_or_abort(&format!("Delete tag {}?", args.id), args.yes)?;
			page.delete(args.id).await?;
			println!("Deleted tag {}", args.id);
		}
	}

	Ok(())
}
