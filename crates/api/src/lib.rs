//! HTTP client for the places backend.
//!
//! Every operation lives in its own module with an `exec` function taking a [`RequestConfig`],
//! and the [`Backend`] trait bundles them for callers that want to swap the transport.

pub mod backend;
pub mod collections;
pub mod images;
pub mod places;
pub mod stories;
pub mod tags;
pub mod types;

use std::{fmt, future::Future, sync::Arc};

use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;

pub use backend::{Backend, HttpBackend};
pub use reqwest::StatusCode;
pub use types::*;

/// Header carrying the dashboard token on every request.
pub const TOKEN_HEADER: &str = "X-API-Token";

pub struct RequestConfig {
	pub client: reqwest::Client,
	pub api_url: String,
	/// Base URL of the image storage service, may differ from `api_url`.
	pub images_api_url: String,
	pub auth_token: Option<ApiToken>,
}

/// Source of the [`RequestConfig`] used for each call, so token changes apply to the next request.
pub trait RequestConfigProvider: Send + Sync + 'static {
	fn get_request_config(self: &Arc<Self>) -> impl Future<Output = RequestConfig> + Send;
}

#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
	pub fn new(token: impl Into<String>) -> Option<Self> {
		let token = token.into();
		let trimmed = token.trim();

		(!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for ApiToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("ApiToken(***)")
	}
}

/// Coarse category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// The call was rejected locally, nothing was sent.
	Precondition,
	Transport,
	Http,
	Decode,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
	#[error("{entity} patch requires an id")]
	MissingId { entity: &'static str },
	#[error("request to '{route}' failed: {source}")]
	Transport {
		route: String,
		#[source]
		source: reqwest::Error,
	},
	#[error("'{route}' responded with {status}: {body}")]
	Status {
		route: String,
		status: StatusCode,
		body: String,
	},
	#[error("unexpected response from '{route}': {reason}")]
	Decode { route: String, reason: String },
}

impl Error {
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::MissingId { .. } => ErrorKind::Precondition,
			Self::Transport { .. } => ErrorKind::Transport,
			Self::Status { .. } => ErrorKind::Http,
			Self::Decode { .. } => ErrorKind::Decode,
		}
	}

	pub fn status(&self) -> Option<StatusCode> {
		match self {
			Self::Status { status, .. } => Some(*status),
			_ => None,
		}
	}

	/// True when the backend refused the token.
	pub fn is_unauthorized(&self) -> bool {
		matches!(
			self.status(),
			Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
		)
	}
}

trait WithAuth {
	fn with_auth(self, token: Option<ApiToken>) -> Self;
}

impl WithAuth for reqwest::RequestBuilder {
	fn with_auth(self, token: Option<ApiToken>) -> Self {
		match token {
			Some(token) => self.header(TOKEN_HEADER, token.0),
			None => self,
		}
	}
}

/// Listing endpoints answer either `[item, ..]` or `[[item, ..], ..]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
	Nested(Vec<Vec<T>>),
	Flat(Vec<T>),
}

impl<T> Listing<T> {
	fn flatten(self) -> Vec<T> {
		match self {
			Self::Flat(items) => items,
			Self::Nested(pages) => pages.into_iter().flatten().collect(),
		}
	}
}

async fn send(req: reqwest::RequestBuilder, route: &str) -> Result<reqwest::Response, Error> {
	debug!(%route, "sending request");

	let res = req.send().await.map_err(|source| Error::Transport {
		route: route.to_string(),
		source,
	})?;

	let status = res.status();
	if status.is_success() {
		return Ok(res);
	}

	let body = res.text().await.unwrap_or_default();
	Err(Error::Status {
		route: route.to_string(),
		status,
		body,
	})
}

async fn fetch<T: DeserializeOwned>(req: reqwest::RequestBuilder, route: &str) -> Result<T, Error> {
	let bytes = send(req, route)
		.await?
		.bytes()
		.await
		.map_err(|source| Error::Transport {
			route: route.to_string(),
			source,
		})?;

	serde_json::from_slice(&bytes).map_err(|e| Error::Decode {
		route: route.to_string(),
		reason: e.to_string(),
	})
}

async fn fetch_list<T: DeserializeOwned>(
	req: reqwest::RequestBuilder,
	route: &str,
) -> Result<Vec<T>, Error> {
	fetch::<Listing<T>>(req, route).await.map(Listing::flatten)
}

async fn fetch_empty(req: reqwest::RequestBuilder, route: &str) -> Result<(), Error> {
	send(req, route).await.map(|_| ())
}
