use std::{path::PathBuf, str::FromStr};

use anyhow::{Context as _, Result};
use clap::Args;
use dd_core::{
	api::{PlaceId, TagId},
	draft::{PendingFile, PlaceDraft},
	pages::places::PlacesQuery,
};

#[derive(Args, Debug)]
pub struct PlacesListArgs {
	/// Free text search
	#[arg(long)]
	pub search: Option<String>,

	/// Only this place id
	#[arg(long)]
	pub id: Option<String>,

	/// Only places with this tag id (repeatable)
	#[arg(long = "tag")]
	pub tags: Vec<TagId>,
}

impl From<PlacesListArgs> for PlacesQuery {
	fn from(args: PlacesListArgs) -> Self {
		Self {
			search: args.search.unwrap_or_default(),
			tags: args.tags,
			id: args.id.unwrap_or_default(),
		}
	}
}

/// `FROM:TO` image move, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageMove {
	pub from: usize,
	pub to: usize,
}

impl FromStr for ImageMove {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let (from, to) = s
			.split_once(':')
			.ok_or_else(|| format!("expected FROM:TO, got '{s}'"))?;

		let index = |part: &str| {
			part.trim()
				.parse::<usize>()
				.map_err(|e| format!("invalid index '{part}': {e}"))
		};

		Ok(Self {
			from: index(from)?,
			to: index(to)?,
		})
	}
}

/// Place fields and image edits shared by create, edit and import.
///
/// Numbers are passed through as text, `12,5` and `12.5` are both accepted.
#[derive(Args, Debug, Default)]
pub struct PlaceFieldArgs {
	#[arg(long)]
	pub title: Option<String>,
	#[arg(long)]
	pub description: Option<String>,
	#[arg(long)]
	pub short_description: Option<String>,
	#[arg(long)]
	pub address: Option<String>,
	/// Source page of the place
	#[arg(long)]
	pub url: Option<String>,
	#[arg(long)]
	pub source: Option<String>,
	#[arg(long)]
	pub lat: Option<String>,
	#[arg(long)]
	pub lon: Option<String>,
	#[arg(long)]
	pub price_avg: Option<String>,
	#[arg(long)]
	pub review_rating: Option<String>,
	#[arg(long)]
	pub review_count: Option<String>,
	#[arg(long)]
	pub boost: Option<String>,
	#[arg(long)]
	pub boost_radius: Option<String>,

	/// Toggle a tag id (repeatable)
	#[arg(long = "tag")]
	pub tags: Vec<TagId>,

	/// Upload an image from this URL (repeatable)
	#[arg(long = "image-url")]
	pub image_urls: Vec<String>,

	/// Upload a local image file (repeatable)
	#[arg(long = "image-file")]
	pub image_files: Vec<PathBuf>,

	/// Remove the stored image at this index (repeatable)
	#[arg(long = "remove-image")]
	pub remove_images: Vec<usize>,

	/// Move a stored image, as FROM:TO (repeatable)
	#[arg(long = "move-image")]
	pub move_images: Vec<ImageMove>,
}

impl PlaceFieldArgs {
	/// Reads the image files up front so a missing file fails before any request.
	pub async fn load_files(&self) -> Result<Vec<PendingFile>> {
		let mut files = Vec::with_capacity(self.image_files.len());
		for path in &self.image_files {
			let file = PendingFile::from_path(path)
				.await
				.with_context(|| format!("Failed to read image {}", path.display()))?;
			files.push(file);
		}

		Ok(files)
	}

	pub fn apply(self, draft: &mut PlaceDraft, files: Vec<PendingFile>) {
		let fields = [
			(self.title, &mut draft.title),
			(self.description, &mut draft.description),
			(self.short_description, &mut draft.short_description),
			(self.address, &mut draft.address),
			(self.url, &mut draft.url),
			(self.source, &mut draft.source),
			(self.lat, &mut draft.lat),
			(self.lon, &mut draft.lon),
			(self.price_avg, &mut draft.price_avg),
			(self.review_rating, &mut draft.review_rating),
			(self.review_count, &mut draft.review_count),
			(self.boost, &mut draft.boost),
			(self.boost_radius, &mut draft.boost_radius),
		];
		for (value, field) in fields {
			if let Some(value) = value {
				*field = value;
			}
		}

		for tag in self.tags {
			draft.toggle_tag(tag);
		}

		// Highest first so earlier removals do not shift later indexes.
		let mut removals = self.remove_images;
		removals.sort_unstable_by(|a, b| b.cmp(a));
		removals.dedup();
		for index in removals {
			draft.remove_existing_image(index);
		}

		for ImageMove { from, to } in self.move_images {
			draft.reorder_existing_image(from, to);
		}

		for url in self.image_urls {
			draft.add_pending_url(url);
		}
		for file in files {
			draft.add_pending_file(file);
		}
	}
}

#[derive(Args, Debug)]
pub struct PlaceGetArgs {
	pub id: PlaceId,
}

#[derive(Args, Debug)]
pub struct PlaceDeleteArgs {
	pub id: PlaceId,

	/// Skip the confirmation prompt
	#[arg(long, short)]
	pub yes: bool,
}

#[derive(Args, Debug)]
pub struct PlaceCreateArgs {
	#[command(flatten)]
	pub fields: PlaceFieldArgs,
}

#[derive(Args, Debug)]
pub struct PlaceEditArgs {
	pub id: PlaceId,

	#[command(flatten)]
	pub fields: PlaceFieldArgs,
}

#[derive(Args, Debug)]
pub struct PlaceImportArgs {
	/// Page to scrape the place from
	pub source_url: String,

	#[command(flatten)]
	pub fields: PlaceFieldArgs,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn image_moves_parse() {
		assert_eq!(
			"2:0".parse::<ImageMove>().unwrap(),
			ImageMove { from: 2, to: 0 }
		);
		assert!("2".parse::<ImageMove>().is_err());
		assert!("a:1".parse::<ImageMove>().is_err());
	}

	#[test]
	fn fields_override_only_what_was_given() {
		let mut draft = PlaceDraft::new();
		draft.title = "Old".into();
		draft.images = vec!["a".into(), "b".into(), "c".into()];

		PlaceFieldArgs {
			url: Some("http://x".into()),
			lat: Some("55,7".into()),
			tags: vec![3, 4, 3],
			remove_images: vec![0, 2],
			image_urls: vec!["http://img1".into()],
			..Default::default()
		}
		.apply(&mut draft, vec![PendingFile::new("f.png", vec![1])]);

		assert_eq!(draft.title, "Old");
		assert_eq!(draft.url, "http://x");
		assert_eq!(draft.lat, "55,7");
		assert_eq!(draft.tags(), &[4]);
		assert_eq!(draft.images, vec!["b"]);
		assert_eq!(draft.pending_count(), 2);
	}
}
