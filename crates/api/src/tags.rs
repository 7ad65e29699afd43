use super::*;

const ROUTE: &str = "/api/v1/places/tag";

pub use list::exec as list;
pub mod list {
	use super::*;

	pub async fn exec(config: RequestConfig) -> Result<Response, Error> {
		fetch_list(
			config
				.client
				.get(format!("{}{ROUTE}", config.api_url))
				.with_auth(config.auth_token),
			ROUTE,
		)
		.await
	}

	pub type Response = Vec<Tag>;
}

pub use create::exec as create;
pub mod create {
	use super::*;

	pub async fn exec(config: RequestConfig, tag: &NewTag) -> Result<Tag, Error> {
		fetch(
			config
				.client
				.post(format!("{}{ROUTE}", config.api_url))
				.multipart(tag.to_form())
				.with_auth(config.auth_token),
			ROUTE,
		)
		.await
	}
}

pub use update::exec as update;
pub mod update {
	use super::*;

	pub async fn exec(config: RequestConfig, id: TagId, tag: &NewTag) -> Result<Tag, Error> {
		if id == 0 {
			return Err(Error::MissingId { entity: "tag" });
		}

		fetch(
			config
				.client
				.put(format!("{}{ROUTE}", config.api_url))
				.json(&tag.with_id(id))
				.with_auth(config.auth_token),
			ROUTE,
		)
		.await
	}
}

pub use delete::exec as delete;
pub mod delete {
	use super::*;

	pub async fn exec(config: RequestConfig, id: TagId) -> Result<(), Error> {
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
