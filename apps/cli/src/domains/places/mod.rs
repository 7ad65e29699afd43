mod args;

use std::sync::Arc;

use anyhow::Result;
use clap::Subcommand;
use dd_core::{
	api::Place,
	form::{PlaceEditor, SubmitError},
};
use tracing::warn;

use crate::{context::Context, ui::progress::with_upload_progress, util::prelude::*};

use self::args::*;

#[derive(Subcommand, Debug)]
pub enum PlacesCmd {
	/// List places, optionally filtered
	List(PlacesListArgs),
	/// Show a single place
	Get(PlaceGetArgs),
	/// Create a place
	Create(PlaceCreateArgs),
	/// Change fields, tags or images of a place
	Edit(PlaceEditArgs),
	/// Scrape a place from a page and save it
	Import(PlaceImportArgs),
	/// Delete a place
	Delete(PlaceDeleteArgs),
}

fn print_place(place: &Place) {
	println!("Place #{}", place.id.unwrap_or_default());
	println!("  Title:    {}", place.title);
	if !place.short_description.is_empty() {
		println!("  Summary:  {}", truncate(&place.short_description, 80));
	}
	println!("  Address:  {}", place.address);
	println!("  URL:      {}", place.url);
	println!("  Source:   {}", place.source);
	println!(
		"  Location: {}, {}",
		place.location.lat, place.location.lon
	);
	println!(
		"  Reviews:  {} ({} reviews), avg price {}",
		place.review_rating, place.review_count, place.price_avg
	);
	if !place.tags.is_empty() {
		let tags = place
			.tags
			.iter()
			.map(ToString::to_string)
			.collect::<Vec<_>>()
			.join(", ");
		println!("  Tags:     {tags}");
	}
	for (i, image) in place.images.iter().enumerate() {
		println!("  Image {i}:  {image}");
	}
}

/// Saves the editor's draft, drawing a bar while images upload.
async fn submit(editor: Arc<PlaceEditor>) -> Result<Place> {
	let uploads = editor.draft().pending_count();

	match with_upload_progress(uploads, editor.progress(), editor.submit()).await {
		Ok(place) => Ok(place),
		Err(err) => {
			if let SubmitError::Attach(attach) = &err {
				for url in attach.orphaned() {
					warn!(%url, "Uploaded image is not attached to any place");
				}
			}

			let message = err.user_message();
			Err(anyhow::Error::new(err).context(message))
		}
	}
}

async fn apply_fields(editor: &PlaceEditor, fields: PlaceFieldArgs) -> Result<()> {
	let files = fields.load_files().await?;
	editor.edit(|draft| fields.apply(draft, files));
	Ok(())
}

pub async fn run(ctx: &Context, cmd: PlacesCmd) -> Result<()> {
	ctx.require_login()?;
	let dashboard = &ctx.dashboard;

	match cmd {
		PlacesCmd::List(args) => {
			let mut page = dashboard.places_page();
			page.query = args.into();
			let places = page.load().await?.to_vec();

			print_output!(ctx, &places, |places: &Vec<Place>| {
				if places.is_empty() {
					println!("No places found");
					return;
				}
				for place in places {
					println!(
						"- {} {} ({})",
						place.id.unwrap_or_default(),
						truncate(&place.title, 40),
						place.address
					);
				}
			});
		}
		PlacesCmd::Get(args) => {
			let place = dashboard.backend().get_place(args.id).await?;
			print_output!(ctx, &place, print_place);
		}
		PlacesCmd::Create(args) => {
			let editor = dashboard.new_place();
			apply_fields(&editor, args.fields).await?;

			let place = submit(editor).await?;
			print_output!(ctx, &place, |p: &Place| {
				println!("Created place {}", p.id.unwrap_or_default());
			});
		}
		PlacesCmd::Edit(args) => {
			let editor = dashboard.edit_place(args.id).await?;
			apply_fields(&editor, args.fields).await?;

			let place = submit(editor).await?;
			print_output!(ctx, &place, |p: &Place| {
				println!("Updated place {}", p.id.unwrap_or_default());
			});
		}
		PlacesCmd::Import(args) => {
			let mut page = dashboard.import_page();
			let editor = page
				.parse(&args.source_url)
				.await
				.map_err(|e| anyhow::anyhow!(e.user_message()))?;
			apply_fields(&editor, args.fields).await?;

			let place = submit(editor).await?;
			print_output!(ctx, &place, |p: &Place| {
				println!("Imported place {}: {}", p.id.unwrap_or_default(), p.title);
			});
		}
		PlacesCmd::Delete(args) => {
			confirm_or_abort(&format!("Delete place {}?", args.id), args.yes)?;
			dashboard.places_page().delete(args.id).await?;
			println!("Deleted place {}", args.id);
		}
	}

	Ok(())
}
