//! HTTP handlers and router

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::{IntoParams, OpenApi, ToSchema};
use utoipa_scalar::{Scalar, Servable};

use crate::error::AppError;
use crate::image_processing::{self, ChannelOrder};
use crate::palette::{PaletteIndex, ReferenceColor, Rgb, Sample};

/// Frames larger than this are rejected before decoding
const MAX_FRAME_BYTES: usize = 16 * 1024 * 1024;

/// Edge length of rendered swatches in pixels
const SWATCH_SIZE: u32 = 64;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub palette: Arc<PaletteIndex>,
}

impl AppState {
    pub fn new(palette: PaletteIndex) -> Self {
        Self {
            palette: Arc::new(palette),
        }
    }
}

/// Classification result
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Classification {
    /// Name of the closest reference color
    pub name: String,
    /// Euclidean RGB distance to that color
    pub distance: f64,
    /// The classified sample
    pub sample: Sample,
    /// Coordinates of the matched reference color
    pub reference: Rgb,
    /// Display label
    pub label: String,
}

impl Classification {
    fn new(palette: &PaletteIndex, sample: Sample) -> Self {
        let hit = palette.nearest(sample);

        Self {
            name: hit.name.to_string(),
            distance: hit.distance,
            sample,
            reference: hit.rgb,
            label: format!("Detected Color: {}", hit.name),
        }
    }
}

/// Frame sampling options
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FrameParams {
    /// Mirror the frame top to bottom before sampling
    #[serde(default)]
    pub flip: bool,
    /// Channel order of the frame pixels
    #[serde(default)]
    #[param(inline)]
    pub order: ChannelOrder,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Color Namer API",
        description = "Names the closest reference color for a pixel or a video frame's center",
        version = "0.1.0"
    ),
    tags(
        (name = "Palette", description = "Reference colors"),
        (name = "Classify", description = "Nearest color naming")
    ),
    paths(health, get_palette, get_swatch, classify_sample, classify_frame),
    components(schemas(Classification, ReferenceColor, Rgb, Sample, ChannelOrder))
)]
struct ApiDoc;

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/palette", get(get_palette))
        .route("/palette/{name}/swatch", get(get_swatch))
        .route("/classify", get(classify_sample))
        .route(
            "/frame",
            post(classify_frame).layer(DefaultBodyLimit::max(MAX_FRAME_BYTES)),
        )
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .route("/openapi.json", get(openapi_json))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = String)
    )
)]
async fn health() -> &'static str {
    "ok"
}

/// Get OpenAPI JSON specification
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// List reference colors
///
/// Returns the palette in lookup priority order.
#[utoipa::path(
    get,
    path = "/palette",
    tag = "Palette",
    responses(
        (status = 200, description = "Reference colors", body = Vec<ReferenceColor>)
    )
)]
async fn get_palette(State(state): State<AppState>) -> Json<Vec<ReferenceColor>> {
    Json(state.palette.colors().to_vec())
}

/// Render a reference color swatch
#[utoipa::path(
    get,
    path = "/palette/{name}/swatch",
    tag = "Palette",
    params(
        ("name" = String, Path, description = "Reference color name (case sensitive)")
    ),
    responses(
        (status = 200, description = "Solid color swatch", content_type = "image/png"),
        (status = 404, description = "No reference color with that name")
    )
)]
async fn get_swatch(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    let color = state
        .palette
        .get(&name)
        .ok_or_else(|| AppError::UnknownColor(name.clone()))?;

    let png_data = image_processing::render_swatch(color.rgb, SWATCH_SIZE)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        png_data,
    )
        .into_response())
}

/// Classify an RGB sample
///
/// Components outside 0..=255 are accepted.
#[utoipa::path(
    get,
    path = "/classify",
    tag = "Classify",
    params(Sample),
    responses(
        (status = 200, description = "Closest reference color", body = Classification),
        (status = 400, description = "Missing or non-integer components")
    )
)]
async fn classify_sample(
    State(state): State<AppState>,
    Query(sample): Query<Sample>,
) -> Json<Classification> {
    let result = Classification::new(&state.palette, sample);
    tracing::debug!(
        "Sample ({}, {}, {}) -> {} ({:.2})",
        sample.r,
        sample.g,
        sample.b,
        result.name,
        result.distance
    );
    Json(result)
}

/// Classify a frame's center pixel
///
/// Accepts a PNG or JPEG encoded frame as the request body.
#[utoipa::path(
    post,
    path = "/frame",
    tag = "Classify",
    params(FrameParams),
    request_body(content = Vec<u8>, description = "Encoded frame", content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Closest reference color to the center pixel", body = Classification),
        (status = 422, description = "Frame could not be decoded or is empty")
    )
)]
async fn classify_frame(
    State(state): State<AppState>,
    Query(params): Query<FrameParams>,
    body: Bytes,
) -> Result<Json<Classification>, AppError> {
    let sample = image_processing::sample_frame(&body, params.flip, params.order)?;
    let result = Classification::new(&state.palette, sample);

    tracing::debug!(
        "Frame ({} bytes, flip={}, order={:?}) -> {}",
        body.len(),
        params.flip,
        params.order,
        result.label
    );

    Ok(Json(result))
}
