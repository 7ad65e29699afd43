use serde::Serialize;
use serde_json::json;

use super::*;

pub use filter::exec as filter;
pub mod filter {
	use super::*;

	pub async fn exec(config: RequestConfig, filter: &PlaceFilter) -> Result<Response, Error> {
		let route = "/api/v1/places/filter";

		fetch_list(
			config
				.client
				.post(format!("{}{route}", config.api_url))
				.json(filter)
				.with_auth(config.auth_token),
			route,
		)
		.await
	}

	pub type Response = Vec<Place>;
}

pub use get::exec as get;
pub mod get {
	use super::*;

	pub async fn exec(config: RequestConfig, id: PlaceId) -> Result<Place, Error> {
		let route = format!("/api/v1/places/id/{id}");

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

	/// Create payload, the backend still reads the legacy `priceMin` field.
	#[derive(Serialize)]
	#[serde(rename_all = "camelCase")]
	struct Body<'a> {
		#[serde(flatten)]
		place: &'a Place,
		price_min: i64,
	}

	pub async fn exec(config: RequestConfig, place: &Place) -> Result<Place, Error> {
		let route = "/api/v1/places";

		fetch(
			config
				.client
				.post(format!("{}{route}", config.api_url))
				.json(&Body {
					place,
					price_min: place.price_avg,
				})
				.with_auth(config.auth_token),
			route,
		)
		.await
	}
}

pub use patch::exec as patch;
pub mod patch {
	use super::*;

	pub async fn exec(config: RequestConfig, patch: &PlacePatch) -> Result<Place, Error> {
		if patch.id.filter(|id| *id != 0).is_none() {
			return Err(Error::MissingId { entity: "place" });
		}

		let route = "/api/v1/places";

		let mut body = serde_json::to_value(patch).map_err(|e| Error::Decode {
			route: route.to_string(),
			reason: e.to_string(),
		})?;
		if let Some(price) = patch.price_avg {
			body["priceMin"] = json!(price);
		}

		fetch(
			config
				.client
				.patch(format!("{}{route}", config.api_url))
				.json(&body)
				.with_auth(config.auth_token),
			route,
		)
		.await
	}
}

pub use delete::exec as delete;
pub mod delete {
	use super::*;

	pub async fn exec(config: RequestConfig, id: PlaceId) -> Result<(), Error> {
		let route = format!("/api/v1/places/id/{id}");

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

pub use parse::exec as parse;
pub mod parse {
	use super::*;

	/// Scrapes a place from an external page. The result never carries an id.
	pub async fn exec(config: RequestConfig, url: &str) -> Result<Place, Error> {
		let route = "/api/v1/places/parse";

		let mut place: Place = fetch(
			config
				.client
				.post(format!("{}{route}", config.api_url))
				.json(&json!({ "url": url }))
				.with_auth(config.auth_token),
			route,
		)
		.await?;

		place.id = None;
		place.updated_at = None;

		Ok(place)
	}
}
