//! Page controllers. Each keeps its list, its filter and the error message to display, and
//! fetches only when `load` is called.

pub mod collections;
pub mod import;
pub mod places;
pub mod stories;
pub mod tags;

use std::fmt::Display;

use tracing::error;

/// Logs `err` and stores `message` as the page's displayed error.
fn record_failure<E: Display>(slot: &mut Option<String>, message: &str, err: E) -> E {
	error!("{message} {err}");
	*slot = Some(message.to_string());
	err
}

/// Moves an item within a list, `to` past the end means last. Out of range `from` is ignored.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
	if from >= items.len() {
		return;
	}

	let to = to.min(items.len() - 1);
	let item = items.remove(from);
	items.insert(to, item);
}
