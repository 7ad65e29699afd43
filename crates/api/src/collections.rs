use super::*;

const ROUTE: &str = "/api/v1/collections";

fn require_id(id: Option<&str>) -> Result<&str, Error> {
	id.filter(|id| !id.trim().is_empty())
		.ok_or(Error::MissingId {
			entity: "collection",
		})
}

pub use filter::exec as filter;
pub mod filter {
	use super::*;

	pub async fn exec(config: RequestConfig, filter: &CollectionFilter) -> Result<Response, Error> {
		let route = format!("{ROUTE}/filter");

		fetch_list(
			config
				.client
				.post(format!("{}{route}", config.api_url))
				.json(filter)
				.with_auth(config.auth_token),
			&route,
		)
		.await
	}

	pub type Response = Vec<Collection>;
}

pub use get::exec as get;
pub mod get {
	use super::*;

	pub async fn exec(config: RequestConfig, id: &str) -> Result<Collection, Error> {
		let route = format!("{ROUTE}/id/{id}");

		fetch(
			config
				.client
				.get(format!("{}{route}", config.api_url))
				.with_auth(config.auth_token),
			&route,
		)
		.await
	}
}

pub use create::exec as create;
pub mod create {
	use super::*;

	pub async fn exec(config: RequestConfig, collection: &Collection) -> Result<Collection, Error> {
		fetch(
			config
				.client
				.post(format!("{}{ROUTE}", config.api_url))
				.json(collection)
				.with_auth(config.auth_token),
			ROUTE,
		)
		.await
	}
}

pub use patch::exec as patch;
pub mod patch {
	use super::*;

	pub async fn exec(config: RequestConfig, patch: &CollectionPatch) -> Result<Collection, Error> {
		require_id(patch.id.as_deref())?;

		fetch(
			config
				.client
				.patch(format!("{}{ROUTE}", config.api_url))
				.json(patch)
				.with_auth(config.auth_token),
			ROUTE,
		)
		.await
	}
}

pub use delete::exec as delete;
pub mod delete {
	use super::*;

	pub async fn exec(config: RequestConfig, id: &str) -> Result<(), Error> {
		let id = require_id(Some(id))?;
		let route = format!("{ROUTE}/id/{id}");

		fetch_empty(
			config
				.client
				.delete(format!("{}{route}", config.api_url))
				.with_auth(config.auth_token),
			&route,
		)
		.await
	}
}
