mod args;

use anyhow::Result;
use clap::Subcommand;
use dd_core::api::Story;

use crate::{context::Context, util::prelude::*};

use self::args::*;

#[derive(Subcommand, Debug)]
pub enum StoriesCmd {
	/// List stories
	List(StoriesListArgs),
	/// Show a story with its items
	Get(StoryGetArgs),
	/// Delete a story
	Delete(StoryDeleteArgs),
}

pub async fn run(ctx: &Context, cmd: StoriesCmd) -> Result<()> {
	ctx.require_login()?;
	let mut page = ctx.dashboard.stories_page();

	match cmd {
		StoriesCmd::List(args) => {
			page.query = args.into();
			let stories = page.load().await?.to_vec();

			print_output!(ctx, &stories, |stories: &Vec<Story>| {
				if stories.is_empty() {
					println!("No stories found");
					return;
				}
				for s in stories {
					println!(
						"- {} {} ({} item(s){})",
						s.id.as_deref().unwrap_or("-"),
						truncate(&s.title, 40),
						s.stories.len(),
						if s.visible { "" } else { ", hidden" }
					);
				}
			});
		}
		StoriesCmd::Get(args) => {
			let story = page.get(&args.id).await?;
			print_output!(ctx, &story, |s: &Story| {
				println!("Story {}", s.id.as_deref().unwrap_or("-"));
				println!("  Title:   {}", s.title);
				println!("  Visible: {}", s.visible);
				for (i, item) in s.stories.iter().enumerate() {
					println!("  {i}. [{}] {} ({}s)", item.kind, item.url, item.duration);
				}
			});
		}
		StoriesCmd::Delete(args) => {
			confirm_or_abort(&format!("Delete story {}?", args.id), args.yes)?;
			page.delete(&args.id).await?;
			println!("Deleted story {}", args.id);
		}
	}

	Ok(())
}
