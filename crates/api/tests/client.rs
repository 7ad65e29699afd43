use dd_api::{
	ApiToken, Backend, ErrorKind, HttpBackend, NewTag, PlaceFilter, PlacePatch, RequestConfig,
	RequestConfigProvider, StatusCode,
};

use std::{
	collections::HashMap,
	future::Future,
	net::TcpListener,
	sync::{Arc, Mutex},
};

use axum::{
	extract::{Multipart, Path, Query, State},
	http::HeaderMap,
	routing::{get, patch, post},
	Json, Router,
};
use serde_json::{json, Value};
use tracing_test::traced_test;

#[derive(Debug, Clone, PartialEq)]
struct Seen {
	route: &'static str,
	token: Option<String>,
	body: Value,
}

#[derive(Default)]
struct Recorder {
	seen: Mutex<Vec<Seen>>,
}

impl Recorder {
	fn record(&self, route: &'static str, headers: &HeaderMap, body: Value) {
		let token = headers
			.get("x-api-token")
			.and_then(|v| v.to_str().ok())
			.map(str::to_string);

		self.seen.lock().unwrap().push(Seen { route, token, body });
	}

	fn seen(&self) -> Vec<Seen> {
		self.seen.lock().unwrap().clone()
	}
}

struct TestProvider {
	client: reqwest::Client,
	base_url: String,
	token: Mutex<Option<ApiToken>>,
}

impl TestProvider {
	fn new(base_url: String, token: &str) -> Arc<Self> {
		Arc::new(Self {
			client: reqwest::Client::new(),
			base_url,
			token: Mutex::new(ApiToken::new(token)),
		})
	}

	fn set_token(&self, token: &str) {
		*self.token.lock().unwrap() = ApiToken::new(token);
	}
}

impl RequestConfigProvider for TestProvider {
	fn get_request_config(self: &Arc<Self>) -> impl Future<Output = RequestConfig> + Send {
		let config = RequestConfig {
			client: self.client.clone(),
			api_url: self.base_url.clone(),
			images_api_url: self.base_url.clone(),
			auth_token: self.token.lock().unwrap().clone(),
		};

		async move { config }
	}
}

async fn filter_places(
	State(rec): State<Arc<Recorder>>,
	headers: HeaderMap,
	Json(body): Json<Value>,
) -> Json<Value> {
	rec.record("places/filter", &headers, body);

	Json(json!([[{ "id": 1, "title": "A" }], [{ "id": 2, "title": "B" }]]))
}

async fn patch_place(
	State(rec): State<Arc<Recorder>>,
	headers: HeaderMap,
	Json(body): Json<Value>,
) -> Json<Value> {
	rec.record("places/patch", &headers, body.clone());

	Json(json!({ "id": body["id"], "title": "patched", "images": body["images"] }))
}

async fn get_place(Path(id): Path<i64>) -> Result<Json<Value>, (StatusCode, &'static str)> {
	if id == 404 {
		return Err((StatusCode::NOT_FOUND, "no such place"));
	}

	Ok(Json(json!({ "id": id, "title": "Found" })))
}

async fn parse_place(
	State(rec): State<Arc<Recorder>>,
	headers: HeaderMap,
	Json(body): Json<Value>,
) -> Json<Value> {
	rec.record("places/parse", &headers, body);

	Json(json!({
		"id": 99,
		"title": "Scraped",
		"url": "https://maps.example/1",
		"images": ["https://maps.example/1.jpg"],
		"updatedAt": "2024-05-01T10:00:00Z"
	}))
}

async fn upload_by_url(
	State(rec): State<Arc<Recorder>>,
	headers: HeaderMap,
	Json(body): Json<Value>,
) -> Json<Value> {
	rec.record("images/by_url", &headers, body.clone());

	Json(json!({
		"url": format!("s3://{}/from-url.jpg", body["directory"].as_str().unwrap_or_default())
	}))
}

async fn upload_by_file(
	State(rec): State<Arc<Recorder>>,
	headers: HeaderMap,
	Query(query): Query<HashMap<String, String>>,
	mut multipart: Multipart,
) -> Json<Value> {
	let mut name = String::new();
	let mut size = 0;
	while let Some(field) = multipart.next_field().await.unwrap() {
		name = field.file_name().unwrap_or_default().to_string();
		size = field.bytes().await.unwrap().len();
	}

	let dir = query.get("dir").cloned().unwrap_or_default();
	rec.record(
		"images/by_file",
		&headers,
		json!({ "dir": dir, "name": name, "size": size }),
	);

	Json(json!({ "url": format!("s3://{dir}/{name}") }))
}

async fn empty_upload() -> Json<Value> {
	Json(json!({ "url": "" }))
}

async fn create_tag(
	State(rec): State<Arc<Recorder>>,
	headers: HeaderMap,
	mut multipart: Multipart,
) -> Json<Value> {
	let mut fields = serde_json::Map::new();
	while let Some(field) = multipart.next_field().await.unwrap() {
		let name = field.name().unwrap_or_default().to_string();
		let text = field.text().await.unwrap();
		fields.insert(name, Value::String(text));
	}
	rec.record("tags/create", &headers, Value::Object(fields.clone()));

	Json(json!({
		"id": 9,
		"name": fields["name"],
		"icon": fields["icon"],
		"visible": fields["visible"] == "true",
		"order": 3,
		"excluded": fields["excluded"] == "true"
	}))
}

fn serve(recorder: Arc<Recorder>) -> String {
	let listener = TcpListener::bind("127.0.0.1:0").unwrap();
	listener.set_nonblocking(true).unwrap();
	let addr = listener.local_addr().unwrap();

	let app = Router::new()
		.route("/api/v1/places/filter", post(filter_places))
		.route("/api/v1/places", patch(patch_place))
		.route("/api/v1/places/id/:id", get(get_place))
		.route("/api/v1/places/parse", post(parse_place))
		.route("/api/v1/places/tag", post(create_tag))
		.route("/api/v1/images/upload/by_url", post(upload_by_url))
		.route("/api/v1/images/upload/by_file", post(upload_by_file))
		.route("/broken/api/v1/images/upload/by_url", post(empty_upload))
		.with_state(recorder);

	tokio::spawn(async move {
		axum::Server::from_tcp(listener)
			.unwrap()
			.serve(app.into_make_service())
			.await
			.unwrap();
	});

	format!("http://{addr}")
}

#[tokio::test]
#[traced_test]
async fn token_header_is_attached_and_listings_are_flattened() {
	let recorder = Arc::new(Recorder::default());
	let provider = TestProvider::new(serve(Arc::clone(&recorder)), "t-1");
	let backend = HttpBackend::new(Arc::clone(&provider));

	let places = backend
		.list_places(&PlaceFilter {
			search: Some("cafe".into()),
			..Default::default()
		})
		.await
		.unwrap();

	assert_eq!(
		places.iter().map(|p| p.title.as_str()).collect::<Vec<_>>(),
		vec!["A", "B"]
	);
	assert_eq!(
		recorder.seen(),
		vec![Seen {
			route: "places/filter",
			token: Some("t-1".into()),
			body: json!({ "search": "cafe" }),
		}]
	);
}

#[tokio::test]
async fn token_changes_apply_to_the_next_request() {
	let recorder = Arc::new(Recorder::default());
	let provider = TestProvider::new(serve(Arc::clone(&recorder)), "t-1");
	let backend = HttpBackend::new(Arc::clone(&provider));

	backend.list_places(&PlaceFilter::default()).await.unwrap();
	provider.set_token("t-2");
	backend.list_places(&PlaceFilter::default()).await.unwrap();
	provider.set_token("");
	backend.list_places(&PlaceFilter::default()).await.unwrap();

	let tokens = recorder
		.seen()
		.into_iter()
		.map(|seen| seen.token)
		.collect::<Vec<_>>();
	assert_eq!(tokens, vec![Some("t-1".into()), Some("t-2".into()), None]);
}

#[tokio::test]
async fn patch_without_id_fails_before_any_request() {
	let recorder = Arc::new(Recorder::default());
	let provider = TestProvider::new(serve(Arc::clone(&recorder)), "t-1");
	let backend = HttpBackend::new(provider);

	let err = backend
		.patch_place(&PlacePatch {
			title: Some("x".into()),
			..Default::default()
		})
		.await
		.unwrap_err();
	assert_eq!(err.kind(), ErrorKind::Precondition);

	let err = backend.patch_place(&PlacePatch::images(0, vec![])).await.unwrap_err();
	assert_eq!(err.kind(), ErrorKind::Precondition);

	assert!(recorder.seen().is_empty());
}

#[tokio::test]
async fn patch_sends_only_populated_fields_and_legacy_price() {
	let recorder = Arc::new(Recorder::default());
	let provider = TestProvider::new(serve(Arc::clone(&recorder)), "t-1");
	let backend = HttpBackend::new(provider);

	let place = backend
		.patch_place(&PlacePatch {
			id: Some(5),
			price_avg: Some(120),
			images: Some(vec!["s3://a".into()]),
			..Default::default()
		})
		.await
		.unwrap();

	assert_eq!(place.id, Some(5));
	assert_eq!(place.images, vec!["s3://a".to_string()]);
	assert_eq!(
		recorder.seen()[0].body,
		json!({ "id": 5, "images": ["s3://a"], "priceAvg": 120, "priceMin": 120 })
	);
}

#[tokio::test]
async fn non_success_status_is_an_http_error() {
	let recorder = Arc::new(Recorder::default());
	let provider = TestProvider::new(serve(recorder), "t-1");
	let backend = HttpBackend::new(provider);

	assert_eq!(backend.get_place(7).await.unwrap().title, "Found");

	let err = backend.get_place(404).await.unwrap_err();
	assert_eq!(err.kind(), ErrorKind::Http);
	assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
	let addr = {
		let listener = TcpListener::bind("127.0.0.1:0").unwrap();
		listener.local_addr().unwrap()
	};
	let backend = HttpBackend::new(TestProvider::new(format!("http://{addr}"), "t-1"));

	let err = backend.list_tags().await.unwrap_err();
	assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn uploads_return_canonical_urls() {
	let recorder = Arc::new(Recorder::default());
	let provider = TestProvider::new(serve(Arc::clone(&recorder)), "t-1");
	let backend = HttpBackend::new(provider);

	let by_url = backend
		.upload_image_by_url("https://img.example/1.jpg", "places/42")
		.await
		.unwrap();
	assert_eq!(by_url, "s3://places/42/from-url.jpg");

	let by_file = backend
		.upload_image_by_file("photo.png", &[1, 2, 3, 4], "places/42")
		.await
		.unwrap();
	assert_eq!(by_file, "s3://places/42/photo.png");

	let seen = recorder.seen();
	assert_eq!(
		seen[0].body,
		json!({ "url": "https://img.example/1.jpg", "directory": "places/42" })
	);
	assert_eq!(
		seen[1].body,
		json!({ "dir": "places/42", "name": "photo.png", "size": 4 })
	);
	assert!(seen.iter().all(|s| s.token.as_deref() == Some("t-1")));
}

#[tokio::test]
async fn upload_without_url_is_a_decode_error() {
	let recorder = Arc::new(Recorder::default());
	let base_url = serve(recorder);
	let provider = Arc::new(TestProvider {
		client: reqwest::Client::new(),
		base_url: format!("{base_url}/broken"),
		token: Mutex::new(None),
	});
	let backend = HttpBackend::new(provider);

	let err = backend
		.upload_image_by_url("https://img.example/1.jpg", "places/1")
		.await
		.unwrap_err();
	assert_eq!(err.kind(), ErrorKind::Decode);
}

#[tokio::test]
async fn tag_creation_is_sent_as_multipart_form() {
	let recorder = Arc::new(Recorder::default());
	let provider = TestProvider::new(serve(Arc::clone(&recorder)), "t-1");
	let backend = HttpBackend::new(provider);

	let tag = backend
		.create_tag(&NewTag {
			name: "Coffee".into(),
			icon: "https://icons.example/coffee.svg".into(),
			visible: true,
			order: 3,
			excluded: false,
		})
		.await
		.unwrap();

	assert_eq!(tag.id, 9);
	assert_eq!(tag.name, "Coffee");
	assert_eq!(
		recorder.seen()[0].body,
		json!({
			"name": "Coffee",
			"icon": "https://icons.example/coffee.svg",
			"visible": "true",
			"order": "3",
			"excluded": "false"
		})
	);
}

#[tokio::test]
async fn parsed_places_never_carry_an_id() {
	let recorder = Arc::new(Recorder::default());
	let provider = TestProvider::new(serve(Arc::clone(&recorder)), "t-1");
	let backend = HttpBackend::new(provider);

	let place = backend.parse_place("https://maps.example/1").await.unwrap();

	assert_eq!(place.id, None);
	assert_eq!(place.updated_at, None);
	assert_eq!(place.title, "Scraped");
	assert_eq!(
		recorder.seen()[0].body,
		json!({ "url": "https://maps.example/1" })
	);
}
