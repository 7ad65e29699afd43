//! Uploads pending images of a saved place and attaches the stored URLs to it.
//!
//! Uploads run one at a time, URLs before files, each into the place's own folder. The first
//! failing upload stops the run and the image list is left as it was. Images uploaded before
//! a failure stay in storage unattached; they are reported as `orphaned` and logged.

use dd_api::{Backend, Place, PlaceId, PlacePatch};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::draft::PendingImage;

/// Storage folder for the images of one place.
pub fn place_folder(prefix: &str, id: PlaceId) -> String {
	format!("{}/{id}", prefix.trim_end_matches('/'))
}

#[derive(thiserror::Error, Debug)]
pub enum AttachError {
	#[error("images can only be attached to a saved place")]
	NotPersisted,
	#[error("failed to upload image {index} ('{image}'): {source}")]
	Upload {
		index: usize,
		image: String,
		orphaned: Vec<String>,
		#[source]
		source: dd_api::Error,
	},
	#[error("failed to attach {} uploaded images: {source}", orphaned.len())]
	Attach {
		orphaned: Vec<String>,
		#[source]
		source: dd_api::Error,
	},
}

impl AttachError {
	/// Stored URLs that ended up attached to nothing.
	pub fn orphaned(&self) -> &[String] {
		match self {
			Self::NotPersisted => &[],
			Self::Upload { orphaned, .. } | Self::Attach { orphaned, .. } => orphaned,
		}
	}
}

/// Percentage of finished uploads, only ever moves forward within one run.
fn report(progress: &watch::Sender<u8>, done: usize, total: usize) {
	let percent = if total == 0 {
		100
	} else {
		(done * 100 / total).min(100) as u8
	};

	progress.send_if_modified(|current| {
		if percent > *current {
			*current = percent;
			true
		} else {
			false
		}
	});
}

/// Stores every pending image and issues one patch with `existing ++ uploaded`.
///
/// Returns the patched place, or `saved` untouched when nothing was pending.
pub async fn attach_pending(
	backend: &dyn Backend,
	saved: &Place,
	pending: &[PendingImage],
	folder_prefix: &str,
	progress: &watch::Sender<u8>,
) -> Result<Place, AttachError> {
	progress.send_replace(0);
	if pending.is_empty() {
		report(progress, 0, 0);
		return Ok(saved.clone());
	}

	let id = saved.persisted_id().ok_or(AttachError::NotPersisted)?;

	let folder = place_folder(folder_prefix, id);
	let total = pending.len();
	let mut uploaded = Vec::with_capacity(total);

	for (index, image) in pending.iter().enumerate() {
		debug!(place_id = id, index, image = image.describe(), "Uploading image");

		let result = match image {
			PendingImage::Url(url) => backend.upload_image_by_url(url, &folder).await,
			PendingImage::File(file) => {
				backend
					.upload_image_by_file(&file.file_name, &file.bytes, &folder)
					.await
			}
		};

		match result {
			Ok(url) => uploaded.push(url),
			Err(source) => {
				warn!(
					place_id = id,
					index,
					orphaned = ?uploaded,
					"Image upload failed, leaving uploaded images unattached: {source}"
				);
				return Err(AttachError::Upload {
					index,
					image: image.describe().to_string(),
					orphaned: uploaded,
					source,
				});
			}
		}

		report(progress, index + 1, total);
	}

	let images = saved
		.images
		.iter()
		.cloned()
		.chain(uploaded.iter().cloned())
		.collect::<Vec<_>>();

	match backend.patch_place(&PlacePatch::images(id, images.clone())).await {
		Ok(mut place) => {
			info!(place_id = id, count = uploaded.len(), "Attached uploaded images");
			place.images = images;
			Ok(place)
		}
		Err(source) => {
			warn!(
				place_id = id,
				orphaned = ?uploaded,
				"Failed to attach uploaded images: {source}"
			);
			Err(AttachError::Attach {
				orphaned: uploaded,
				source,
			})
		}
	}
}
