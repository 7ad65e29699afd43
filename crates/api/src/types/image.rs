use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadByUrl {
	pub url: String,
	/// Destination folder inside the image storage.
	pub directory: String,
}

/// Answer of both upload endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
	/// Canonical URL of the stored image.
	#[serde(default)]
	pub url: String,
}
