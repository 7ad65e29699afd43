use reqwest::multipart::{Form, Part};

use super::*;

fn canonical_url(uploaded: UploadedImage, route: &str) -> Result<String, Error> {
	if uploaded.url.trim().is_empty() {
		return Err(Error::Decode {
			route: route.to_string(),
			reason: "upload answered without an url".to_string(),
		});
	}

	Ok(uploaded.url)
}

pub use by_url::exec as by_url;
pub mod by_url {
	use super::*;

	/// Asks the storage service to fetch `url` into `directory`, returning the canonical URL.
	pub async fn exec(config: RequestConfig, url: &str, directory: &str) -> Result<String, Error> {
		let route = "/api/v1/images/upload/by_url";

		let uploaded = fetch(
			config
				.client
				.post(format!("{}{route}", config.images_api_url))
				.json(&UploadByUrl {
					url: url.to_string(),
					directory: directory.to_string(),
				})
				.with_auth(config.auth_token),
			route,
		)
		.await?;

		canonical_url(uploaded, route)
	}
}

pub use by_file::exec as by_file;
pub mod by_file {
	use super::*;

	pub async fn exec(
		config: RequestConfig,
		file_name: &str,
		bytes: &[u8],
		directory: &str,
	) -> Result<String, Error> {
		let route = "/api/v1/images/upload/by_file";

		let form = Form::new().part(
			"file",
			Part::bytes(bytes.to_vec()).file_name(file_name.to_string()),
		);

		let uploaded = fetch(
			config
				.client
				.post(format!("{}{route}", config.images_api_url))
				.query(&[("dir", directory)])
				.multipart(form)
				.with_auth(config.auth_token),
			route,
		)
		.await?;

		canonical_url(uploaded, route)
	}
}
