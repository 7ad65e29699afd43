use super::*;

const ROUTE: &str = "/api/v1/stories";

pub use filter::exec as filter;
pub mod filter {
	use super::*;

	pub async fn exec(config: RequestConfig, filter: &StoryFilter) -> Result<Response, Error> {
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

	pub type Response = Vec<Story>;
}

pub use get::exec as get;
pub mod get {
	use super::*;

	pub async fn exec(config: RequestConfig, id: &str) -> Result<Story, Error> {
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

	pub async fn exec(config: RequestConfig, story: &Story) -> Result<Story, Error> {
		fetch(
			config
				.client
				.post(format!("{}{ROUTE}", config.api_url))
				.json(story)
				.with_auth(config.auth_token),
			ROUTE,
		)
		.await
	}
}

pub use patch::exec as patch;
pub mod patch {
	use super::*;

	pub async fn exec(config: RequestConfig, patch: &StoryPatch) -> Result<Story, Error> {
		if patch.id.as_deref().map_or(true, |id| id.trim().is_empty()) {
			return Err(Error::MissingId { entity: "story" });
		}

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
