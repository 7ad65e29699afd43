//! Upload progress bar fed by a place editor.

use std::future::Future;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::watch;

fn upload_bar(uploads: usize) -> ProgressBar {
	let bar = ProgressBar::new(100);
	if let Ok(style) =
		ProgressStyle::with_template("{spinner:.yellow} {msg} [{bar:40.blue/grey}] {percent}%")
	{
		bar.set_style(style.progress_chars("█▉▊▋▌▍▎▏ "));
	}
	bar.set_message(format!("Uploading {uploads} image(s)"));
	bar
}

/// Drives `work` to completion while mirroring `progress` on a bar.
///
/// No bar is drawn when there is nothing to upload.
pub async fn with_upload_progress<T>(
	uploads: usize,
	mut progress: watch::Receiver<u8>,
	work: impl Future<Output = T>,
) -> T {
	if uploads == 0 {
		return work.await;
	}

	let bar = upload_bar(uploads);
	tokio::pin!(work);

	let result = loop {
		tokio::select! {
			result = &mut work => break result,
			changed = progress.changed() => match changed {
				Ok(()) => bar.set_position(u64::from(*progress.borrow_and_update())),
				Err(_) => break work.await,
			},
		}
	};
	bar.set_position(u64::from(*progress.borrow()));

	if bar.position() >= 100 {
		bar.finish_with_message("Uploaded");
	} else {
		bar.abandon_with_message("Upload stopped");
	}

	result
}
