mod args;

use anyhow::Result;
use clap::Subcommand;
use dd_core::api::Collection;

use crate::{context::Context, util::prelude::*};

use self::args::*;

#[derive(Subcommand, Debug)]
pub enum CollectionsCmd {
	/// List collections, visible ones first
	List(CollectionsListArgs),
	/// Show a collection and its places
	Get(CollectionGetArgs),
	/// Delete a collection
	Delete(CollectionDeleteArgs),
}

pub async fn run(ctx: &Context, cmd: CollectionsCmd) -> Result<()> {
	ctx.require_login()?;
	let mut page = ctx.dashboard.collections_page();

	match cmd {
		CollectionsCmd::List(args) => {
			page.query = args.into();
			let collections = page.load().await?.to_vec();

			print_output!(ctx, &collections, |collections: &Vec<Collection>| {
				if collections.is_empty() {
					println!("No collections found");
					return;
				}
				for c in collections {
					println!(
						"- {} {} [{}{}] {} place(s)",
						c.id.as_deref().unwrap_or("-"),
						truncate(&c.name, 40),
						c.kind,
						if c.visible { "" } else { ", hidden" },
						c.places.len()
					);
				}
			});
		}
		CollectionsCmd::Get(args) => {
			let collection = page.get(&args.id).await?;
			print_output!(ctx, &collection, |c: &Collection| {
				println!("Collection {}", c.id.as_deref().unwrap_or("-"));
				println!("  Name:    {}", c.name);
				println!("  Type:    {}", c.kind);
				println!("  Visible: {}", c.visible);
				println!("  Owner:   {}", c.owner_id);
				let places = c
					.places
					.iter()
					.map(ToString::to_string)
					.collect::<Vec<_>>()
					.join(", ");
				println!("  Places:  {places}");
			});
		}
		CollectionsCmd::Delete(args) => {
			confirm_or_abort(&format!("Delete collection {}?", args.id), args.yes)?;
			page.delete(&args.id).await?;
			println!("Deleted collection {}", args.id);
		}
	}

	Ok(())
}
