//! Ad-hoc room analysis handlers.
//!
//! Both endpoints accept base64 image payloads, run the configured vision
//! model, and hard-fail on any non-conforming result: the client must show a
//! retryable failure state, never an invented arrangement.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use utoipa::ToSchema;

use aqari_core::{DesignAnalysis, StructuralAnalysis};
use aqari_inference::RoomAnalyzer;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for ad-hoc image analysis.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeImageRequest {
    /// Base64-encoded image data (required).
    pub image_data: String,
    /// MIME type of the image. Defaults to "image/jpeg".
    pub mime_type: Option<String>,
    /// Optional style preference (design mode only).
    pub style: Option<String>,
}

/// Decode and sanity-check a base64 image payload.
pub(crate) fn decode_image(image_data: &str) -> Result<Vec<u8>, ApiError> {
    use base64::Engine;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(image_data)
        .map_err(|e| ApiError::BadRequest(format!("Invalid base64 image data: {}", e)))?;

    if bytes.is_empty() {
        return Err(ApiError::BadRequest("Image data is empty".into()));
    }
    Ok(bytes)
}

fn analyzer(state: &AppState) -> Result<&RoomAnalyzer, ApiError> {
    state.analyzer.as_deref().ok_or_else(|| {
        ApiError::ServiceUnavailable(
            "Vision model not configured. Set AQARI_VISION_MODEL environment variable.".into(),
        )
    })
}

/// Suggest an interior style, furniture placement, and room dimensions for
/// a room photo.
#[utoipa::path(post, path = "/ai/design", tag = "AI",
    request_body = AnalyzeImageRequest,
    responses(
        (status = 200, description = "Design analysis"),
        (status = 400, description = "Invalid image payload"),
        (status = 502, description = "Analysis failed; retryable"),
        (status = 503, description = "Vision model not configured"),
    ))]
pub async fn analyze_design(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeImageRequest>,
) -> Result<Json<DesignAnalysis>, ApiError> {
    let analyzer = analyzer(&state)?;
    let image = decode_image(&req.image_data)?;
    let mime_type = req.mime_type.as_deref().unwrap_or("image/jpeg");

    let analysis = analyzer
        .analyze_design(&image, mime_type, req.style.as_deref())
        .await?;
    Ok(Json(analysis))
}

/// Read a panoramic or wide-angle apartment shot for layout, lighting,
/// structural features, and visible safety issues.
#[utoipa::path(post, path = "/ai/structure", tag = "AI",
    request_body = AnalyzeImageRequest,
    responses(
        (status = 200, description = "Structural analysis"),
        (status = 400, description = "Invalid image payload"),
        (status = 502, description = "Analysis failed; retryable"),
        (status = 503, description = "Vision model not configured"),
    ))]
pub async fn analyze_structure(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeImageRequest>,
) -> Result<Json<StructuralAnalysis>, ApiError> {
    let analyzer = analyzer(&state)?;
    let image = decode_image(&req.image_data)?;
    let mime_type = req.mime_type.as_deref().unwrap_or("image/jpeg");

    let analysis = analyzer.analyze_structure(&image, mime_type).await?;
    Ok(Json(analysis))
}
