use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use geojson::{Feature, FeatureCollection, JsonObject};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use wisata_core::models::place::PointMethod;
use wisata_retrieval::{nearest_or_widen, NearestQuery, PlaceItem, WidenedResult};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NearestParams {
    /// User latitude
    pub lat: f64,
    /// User longitude
    pub lon: f64,
    /// Maximum number of results (1..=100)
    pub k: Option<usize>,
    /// Exact name filter (optional)
    pub name: Option<String>,
    /// Restrict results to this radius in km (optional, positive)
    pub radius_km: Option<f64>,
    /// Point-selection method for shape-derived coordinates
    pub method: Option<PointMethod>,
    /// Empty-radius policy; "widen" retries unconstrained with a top-30
    pub fallback: Option<FallbackPolicy>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Surface the emptiness as a 404 (default)
    Surface,
    /// Retry without the radius, capped at the widened top-30
    Widen,
}

#[derive(Debug, Deserialize)]
pub struct ObjectsParams {
    pub name: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub method: Option<PointMethod>,
}

#[derive(Debug, Serialize)]
pub struct NearestResponse {
    pub user_lat: f64,
    pub user_lon: f64,
    pub method: PointMethod,
    pub k: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius_km: Option<f64>,
    /// Number of in-radius results; zero when the widened fallback fired
    pub count: usize,
    pub items: Vec<PlaceItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ObjectsResponse {
    pub count: usize,
    pub items: Vec<PlaceItem>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub count: usize,
    pub name_column: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MetaResponse {
    pub status: &'static str,
    pub ready: bool,
    pub boot_time: DateTime<Utc>,
    pub app_version: String,
    pub git_sha: Option<String>,
    pub data: MetaData,
}

#[derive(Debug, Serialize)]
pub struct MetaData {
    pub source: wisata_retrieval::directory::SourceInfo,
    pub rows: usize,
    pub crs: u32,
    pub name_column: Option<String>,
    pub bbox_wgs84: [f64; 4],
    pub has_geometry: bool,
    pub columns: Vec<String>,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/meta", get(meta))
        .route("/wisata", get(wisata_status))
        .route("/wisata/names", get(list_names))
        .route("/wisata/objects", get(list_objects))
        .route("/wisata/nearest", get(nearest))
        .route("/wisata/geojson", get(nearest_geojson))
        .with_state(state)
}

async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Wisata API up. Query /wisata/nearest for recommendations."
    }))
}

/// Liveness probe. The directory loads before the listener binds, so a
/// responding server is a live server.
async fn healthz() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Readiness probe: loaded and non-empty.
async fn readyz(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    if state.directory.is_empty() {
        return Err(ApiError::service_unavailable("Not ready"));
    }
    Ok(Json(serde_json::json!({
        "status": "ok",
        "rows": state.directory.len(),
    })))
}

async fn meta(State(state): State<Arc<AppState>>) -> Json<MetaResponse> {
    let directory = &state.directory;
    Json(MetaResponse {
        status: "ok",
        ready: !directory.is_empty(),
        boot_time: state.boot_time,
        app_version: state.app_version.clone(),
        git_sha: state.git_sha.clone(),
        data: MetaData {
            source: directory.source().clone(),
            rows: directory.len(),
            crs: directory.crs(),
            name_column: directory.name_column().map(str::to_string),
            bbox_wgs84: directory.bbox(),
            has_geometry: directory.has_geometry(),
            columns: directory.columns().to_vec(),
        },
    })
}

async fn wisata_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        count: state.directory.len(),
        name_column: state.directory.name_column().map(str::to_string),
    })
}

async fn list_names(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.directory.unique_names())
}

async fn list_objects(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ObjectsParams>,
) -> Result<Json<ObjectsResponse>, ApiError> {
    let limit = params.limit.unwrap_or(100);
    if !(1..=10_000).contains(&limit) {
        return Err(ApiError::bad_request("limit must be between 1 and 10000"));
    }
    let offset = params.offset.unwrap_or(0);
    let method = params.method.unwrap_or(state.default_method);

    let listing = state.directory.list_objects(params.name.as_deref(), offset, limit, method);
    Ok(Json(ObjectsResponse { count: listing.total, items: listing.items }))
}

async fn nearest(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NearestParams>,
) -> Result<Json<NearestResponse>, ApiError> {
    let (query, result) = run_nearest(&state, &params)?;

    let count = if result.widened { 0 } else { result.places.len() };
    let note = result.widened.then(|| {
        format!(
            "Nothing within {} km; returning the unbounded nearest instead.",
            query.radius_km.unwrap_or_default()
        )
    });

    Ok(Json(NearestResponse {
        user_lat: query.latitude,
        user_lon: query.longitude,
        method: query.method,
        k: query.k,
        radius_km: query.radius_km,
        count,
        items: result.places,
        note,
    }))
}

/// Same query as `/wisata/nearest`, shaped as a GeoJSON FeatureCollection.
async fn nearest_geojson(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NearestParams>,
) -> Result<Json<FeatureCollection>, ApiError> {
    let (query, result) = run_nearest(&state, &params)?;

    let features = result.places.iter().map(place_to_feature).collect();

    let mut metadata = JsonObject::new();
    metadata.insert(
        "user".to_string(),
        serde_json::json!({ "lat": query.latitude, "lon": query.longitude }),
    );
    metadata.insert("method".to_string(), serde_json::json!(query.method));
    metadata.insert("k".to_string(), serde_json::json!(query.k));
    metadata.insert("radius_km".to_string(), serde_json::json!(query.radius_km));
    metadata.insert("widened".to_string(), serde_json::json!(result.widened));

    let mut foreign_members = JsonObject::new();
    foreign_members.insert("metadata".to_string(), JsonValue::Object(metadata));

    Ok(Json(FeatureCollection {
        features,
        bbox: None,
        foreign_members: Some(foreign_members),
    }))
}

/// Validate parameters, build the query, run it under the chosen policy.
fn run_nearest(
    state: &AppState,
    params: &NearestParams,
) -> Result<(NearestQuery, WidenedResult), ApiError> {
    if !params.lat.is_finite() || !params.lon.is_finite() {
        return Err(ApiError::bad_request("lat and lon must be finite numbers"));
    }

    let k = params.k.unwrap_or(state.default_k);
    if !(1..=100).contains(&k) {
        return Err(ApiError::bad_request("k must be between 1 and 100"));
    }

    if let Some(radius_km) = params.radius_km {
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return Err(ApiError::bad_request("radius_km must be a positive number"));
        }
    }

    tracing::info!(
        lat = params.lat,
        lon = params.lon,
        k = k,
        name = params.name.as_deref().unwrap_or("<none>"),
        radius_km = ?params.radius_km,
        "Processing nearest query"
    );

    let mut query = NearestQuery::new(params.lat, params.lon)
        .with_k(k)
        .with_method(params.method.unwrap_or(state.default_method));
    if let Some(name) = &params.name {
        query = query.with_name(name.clone());
    }
    if let Some(radius_km) = params.radius_km {
        query = query.with_radius_km(radius_km);
    }

    let result = match params.fallback {
        Some(FallbackPolicy::Widen) => nearest_or_widen(&state.pipeline, &query)?,
        _ => WidenedResult {
            places: state.pipeline.execute(&query)?,
            widened: false,
        },
    };

    Ok((query, result))
}

fn place_to_feature(item: &PlaceItem) -> Feature {
    let geometry = match (item.longitude, item.latitude) {
        (Some(lon), Some(lat)) => {
            Some(geojson::Geometry::new(geojson::Value::Point(vec![lon, lat])))
        }
        _ => None,
    };

    let mut properties = JsonObject::new();
    properties.insert("index".to_string(), serde_json::json!(item.index));
    properties.insert("nama_objek".to_string(), serde_json::json!(item.name));
    properties.insert("jenis_obje".to_string(), serde_json::json!(item.category));
    properties.insert("alamat".to_string(), serde_json::json!(item.address));
    properties.insert("distance_km".to_string(), serde_json::json!(item.distance_km));
    for (key, value) in &item.properties {
        properties.insert(key.clone(), value.clone());
    }

    Feature {
        bbox: None,
        geometry,
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}
