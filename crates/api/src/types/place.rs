use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::tag::TagId;

pub type PlaceId = i64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
	pub lat: f64,
	pub lon: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Place {
	/// Absent until the place is first persisted, `0` is treated the same way.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id: Option<PlaceId>,
	pub title: String,
	pub description: String,
	pub short_description: String,
	pub address: String,
	pub url: String,
	pub source: String,
	/// Ordered, the first image is the primary one.
	pub images: Vec<String>,
	pub location: Coordinate,
	pub price_avg: i64,
	pub review_rating: f64,
	pub review_count: i64,
	pub boost: f64,
	pub boost_radius: f64,
	pub tags: Vec<TagId>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub updated_at: Option<DateTime<Utc>>,
}

impl Place {
	/// The id, if the place has been persisted.
	pub fn persisted_id(&self) -> Option<PlaceId> {
		self.id.filter(|id| *id != 0)
	}

	pub fn primary_image(&self) -> Option<&str> {
		self.images.first().map(String::as_str)
	}
}

/// Partial update, only the populated fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacePatch {
	pub id: Option<PlaceId>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub short_description: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub address: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub source: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub images: Option<Vec<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub location: Option<Coordinate>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub price_avg: Option<i64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub review_rating: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub review_count: Option<i64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub boost: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub boost_radius: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tags: Option<Vec<TagId>>,
}

impl PlacePatch {
	/// Patch replacing only the image list of a place.
	pub fn images(id: PlaceId, images: Vec<String>) -> Self {
		Self {
			id: Some(id),
			images: Some(images),
			..Default::default()
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceFilter {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub search: Option<String>,
	#[serde(skip_serializing_if = "Vec::is_empty", default)]
	pub tags: Vec<TagId>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id: Option<PlaceId>,
}
