//! HTTP handlers of the feature API.
//!
//! Store and filesystem work is blocking, so every handler hands it to
//! [`tokio::task::spawn_blocking`] and only does request parsing on the async side.

use super::{
	ApiError,
	response::{ok_data, ok_message, ok_message_data},
};
use crate::ingest::{ArchiveKind, Ingestor};
use axum::{
	Json,
	extract::{
		Multipart, Path, Query, State, multipart::MultipartRejection, rejection::JsonRejection,
	},
	http::StatusCode,
	response::Response,
};
use geostash_geometry::{GeoProperties, Geometry};
use geostash_store::{BBox, FeatureRepository, FeatureStore, StoreError, UpdateFields};
use serde::Deserialize;
use serde_json::{Value, json};
use std::path::Path as FsPath;

/// Shared by all handlers; cheap to clone.
#[derive(Clone, Debug)]
pub struct AppState {
	repository: FeatureRepository,
	ingestor: Ingestor,
}

impl AppState {
	pub fn new(store: FeatureStore, upload_dir: &FsPath) -> Self {
		Self {
			repository: FeatureRepository::new(store.clone()),
			ingestor: Ingestor::new(store, upload_dir),
		}
	}
}

#[derive(Debug, Default, Deserialize)]
pub struct FeaturesQuery {
	pub bbox: Option<String>,
}

/// Body of `PUT /api/features/{id}`. A field set to `null` counts as absent.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateRequest {
	#[serde(default)]
	pub properties: Option<Value>,
	#[serde(default)]
	pub geometry: Option<Value>,
}

async fn run_blocking<T, F>(task: F) -> Result<T, ApiError>
where
	F: FnOnce() -> Result<T, ApiError> + Send + 'static,
	T: Send + 'static,
{
	tokio::task::spawn_blocking(task).await.map_err(|err| ApiError::Failed {
		message: "Internal server error",
		cause: err.into(),
	})?
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
	raw
		.trim()
		.parse()
		.map_err(|_| ApiError::InvalidRequest("Invalid feature ID".to_string()))
}

pub async fn upload(
	State(state): State<AppState>,
	multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
	let mut multipart = multipart.map_err(|_| ApiError::InvalidRequest("No file uploaded".to_string()))?;

	let mut upload = None;
	while let Some(field) = multipart.next_field().await? {
		if field.name() != Some("file") {
			log::debug!("ignoring multipart field {:?}", field.name());
			continue;
		}
		let file_name = field.file_name().unwrap_or_default().to_string();
		let kind = ArchiveKind::from_file_name(&file_name)?;
		let bytes = field.bytes().await?;
		log::debug!("received '{file_name}' ({} bytes)", bytes.len());
		upload = Some((kind, bytes));
		break;
	}
	let (kind, bytes) = upload.ok_or_else(|| ApiError::InvalidRequest("No file uploaded".to_string()))?;

	let ingestor = state.ingestor.clone();
	let summary = run_blocking(move || Ok(ingestor.ingest_upload(kind, &bytes)?)).await?;

	Ok(ok_message_data(
		StatusCode::CREATED,
		"Shapefile uploaded and processed successfully",
		json!(summary),
	))
}

pub async fn list_features(
	State(state): State<AppState>,
	Query(query): Query<FeaturesQuery>,
) -> Result<Response, ApiError> {
	let bbox = query
		.bbox
		.as_deref()
		.map(str::parse::<BBox>)
		.transpose()
		.map_err(|err| ApiError::InvalidRequest(format!("Invalid bbox: {err:#}")))?;

	let repository = state.repository.clone();
	let collection = run_blocking(move || {
		match bbox {
			Some(bbox) => repository.find_in_bbox(&bbox),
			None => repository.list_all(),
		}
		.map_err(ApiError::store("Failed to retrieve features"))
	})
	.await?;

	Ok(ok_data(collection.to_json()))
}

pub async fn get_feature(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, ApiError> {
	let id = parse_id(&id)?;
	let repository = state.repository.clone();
	let feature = run_blocking(move || {
		repository
			.get_by_id(id)
			.map_err(ApiError::store("Failed to retrieve feature"))
	})
	.await?
	.ok_or(ApiError::NotFound)?;

	Ok(ok_data(feature.to_json()))
}

pub async fn update_feature(
	State(state): State<AppState>,
	Path(id): Path<String>,
	body: Result<Json<UpdateRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
	const FAILED: &str = "Failed to update feature";

	let id = parse_id(&id)?;
	let Json(request) = body.map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))?;

	let properties = request
		.properties
		.map(GeoProperties::from_json)
		.transpose()
		.map_err(|err| ApiError::InvalidRequest(format!("{err:#}")))?;
	let geometry = request
		.geometry
		.as_ref()
		.map(Geometry::from_geojson)
		.transpose()
		.map_err(|err| ApiError::store(FAILED)(StoreError::GeometryConstruction(err)))?;
	let fields = UpdateFields::new(properties, geometry).map_err(ApiError::store(FAILED))?;

	let repository = state.repository.clone();
	let feature = run_blocking(move || repository.apply_update(id, &fields).map_err(ApiError::store(FAILED)))
		.await?
		.ok_or(ApiError::NotFound)?;

	Ok(ok_message_data(
		StatusCode::OK,
		"Feature updated successfully (partial update)",
		feature.to_json(),
	))
}

pub async fn delete_feature(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, ApiError> {
	let id = parse_id(&id)?;
	let repository = state.repository.clone();
	let deleted = run_blocking(move || {
		repository
			.delete_by_id(id)
			.map_err(ApiError::store("Failed to delete feature"))
	})
	.await?;

	if deleted {
		Ok(ok_message("Feature deleted successfully"))
	} else {
		Err(ApiError::NotFound)
	}
}

pub async fn delete_all_features(State(state): State<AppState>) -> Result<Response, ApiError> {
	let repository = state.repository.clone();
	let deleted_count = run_blocking(move || {
		repository
			.delete_all()
			.map_err(ApiError::store("Failed to delete all features"))
	})
	.await?;

	Ok(ok_message_data(
		StatusCode::OK,
		"All features deleted successfully",
		json!({ "deletedCount": deleted_count }),
	))
}

pub async fn stats(State(state): State<AppState>) -> Result<Response, ApiError> {
	let repository = state.repository.clone();
	let total = run_blocking(move || repository.count().map_err(ApiError::store("Failed to retrieve statistics"))).await?;

	Ok(ok_data(json!({ "totalFeatures": total })))
}
