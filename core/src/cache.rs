use std::{
	collections::HashMap,
	future::Future,
	sync::{Mutex, MutexGuard, PoisonError},
};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use strum::Display;
use tracing::{debug, trace};

/// Group of cached queries invalidated together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Scope {
	Places,
	Tags,
	Collections,
	Stories,
}

struct Entry {
	value: Value,
	stale: bool,
}

/// Query results kept as JSON, keyed by scope and a caller chosen key.
///
/// Stale entries are still stored but never served; the next read refetches them.
#[derive(Default)]
pub struct QueryCache {
	entries: Mutex<HashMap<(Scope, String), Entry>>,
}

impl QueryCache {
	pub fn new() -> Self {
		Self::default()
	}

	fn entries(&self) -> MutexGuard<'_, HashMap<(Scope, String), Entry>> {
		self.entries.lock().unwrap_or_else(PoisonError::into_inner)
	}

	/// Fresh cached value for the key, if any.
	pub fn get<T: DeserializeOwned>(&self, scope: Scope, key: &str) -> Option<T> {
		let entries = self.entries();
		let entry = entries.get(&(scope, key.to_string()))?;
		if entry.stale {
			return None;
		}

		serde_json::from_value(entry.value.clone()).ok()
	}

	pub fn insert<T: Serialize>(&self, scope: Scope, key: &str, value: &T) {
		match serde_json::to_value(value) {
			Ok(value) => {
				self.entries().insert(
					(scope, key.to_string()),
					Entry {
						value,
						stale: false,
					},
				);
			}
			Err(e) => debug!(%scope, key, "Not caching unserializable value: {e}"),
		}
	}

	/// Serves a fresh entry or runs `fetch` and stores its result. Errors are not cached.
	pub async fn get_or_fetch<T, E, F, Fut>(&self, scope: Scope, key: &str, fetch: F) -> Result<T, E>
	where
		T: Serialize + DeserializeOwned,
		F: FnOnce() -> Fut,
		Fut: Future<Output = Result<T, E>>,
	{
		if let Some(value) = self.get(scope, key) {
			trace!(%scope, key, "cache hit");
			return Ok(value);
		}

		let value = fetch().await?;
		self.insert(scope, key, &value);

		Ok(value)
	}

	/// Marks every entry of the scope stale.
	pub fn invalidate(&self, scope: Scope) {
		let mut entries = self.entries();
		let mut count = 0;
		for ((entry_scope, _), entry) in entries.iter_mut() {
			if *entry_scope == scope {
				entry.stale = true;
				count += 1;
			}
		}

		debug!(%scope, count, "Invalidated cached queries");
	}

	pub fn clear(&self) {
		self.entries().clear();
	}

	pub fn is_empty(&self) -> bool {
		self.entries().is_empty()
	}
}
