//! Property CRUD and per-listing analysis handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use aqari_core::{
    CreatePropertyRequest, DesignAnalysis, GeoPoint, ListingStatus, Property, PropertyType,
};

use crate::error::ApiError;
use crate::handlers::analysis::decode_image;
use crate::state::AppState;

/// Request body for creating a listing.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyBody {
    pub address: String,
    pub description: String,
    pub price: f64,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    #[serde(default = "default_status")]
    pub status: ListingStatus,
    #[serde(default)]
    pub bedrooms: i32,
    #[serde(default)]
    pub bathrooms: f64,
    #[serde(default)]
    pub virtual_tour_url: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub location: Option<GeoPoint>,
}

fn default_status() -> ListingStatus {
    ListingStatus::ForSale
}

/// List all listings, newest first.
#[utoipa::path(get, path = "/properties", tag = "Properties",
    responses(
        (status = 200, description = "All listings, newest first"),
    ))]
pub async fn list_properties(
    State(state): State<AppState>,
) -> Result<Json<Vec<Property>>, ApiError> {
    let properties = state.store.list().await?;
    Ok(Json(properties))
}

/// Create a listing.
#[utoipa::path(post, path = "/properties", tag = "Properties",
    request_body = CreatePropertyBody,
    responses(
        (status = 201, description = "Listing created"),
        (status = 400, description = "Invalid listing data"),
    ))]
pub async fn create_property(
    State(state): State<AppState>,
    Json(body): Json<CreatePropertyBody>,
) -> Result<(StatusCode, Json<Property>), ApiError> {
    if body.address.trim().is_empty() {
        return Err(ApiError::BadRequest("address must not be empty".into()));
    }

    let property = state
        .store
        .insert(CreatePropertyRequest {
            address: body.address,
            description: body.description,
            price: body.price,
            property_type: body.property_type,
            status: body.status,
            bedrooms: body.bedrooms,
            bathrooms: body.bathrooms,
            virtual_tour_url: body.virtual_tour_url,
            images: body.images,
            location: body.location,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(property)))
}

/// Fetch a single listing.
#[utoipa::path(get, path = "/properties/{id}", tag = "Properties",
    params(("id" = Uuid, Path, description = "Listing ID")),
    responses(
        (status = 200, description = "The listing"),
        (status = 404, description = "Unknown listing"),
    ))]
pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Property>, ApiError> {
    let property = state.store.fetch(id).await?;
    Ok(Json(property))
}

/// Request body for analyzing a listing's room photo.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzePropertyRequest {
    /// Base64-encoded image data (required).
    pub image_data: String,
    /// MIME type of the image. Defaults to "image/jpeg".
    pub mime_type: Option<String>,
    /// Optional style preference to bias furniture suggestions.
    pub style: Option<String>,
}

/// Run a design analysis on a room photo and persist it on the listing.
#[utoipa::path(post, path = "/properties/{id}/analyze", tag = "Properties",
    params(("id" = Uuid, Path, description = "Listing ID")),
    request_body = AnalyzePropertyRequest,
    responses(
        (status = 200, description = "Analysis attached to the listing"),
        (status = 404, description = "Unknown listing"),
        (status = 502, description = "Analysis failed; retryable"),
        (status = 503, description = "Vision model not configured"),
    ))]
pub async fn analyze_property(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AnalyzePropertyRequest>,
) -> Result<Json<DesignAnalysis>, ApiError> {
    let analyzer = state.analyzer.as_ref().ok_or_else(|| {
        ApiError::ServiceUnavailable(
            "Vision model not configured. Set AQARI_VISION_MODEL environment variable.".into(),
        )
    })?;

    // 404 before spending a vision round trip on an unknown listing.
    state.store.fetch(id).await?;

    let image = decode_image(&req.image_data)?;
    let mime_type = req.mime_type.as_deref().unwrap_or("image/jpeg");

    let analysis = analyzer
        .analyze_design(&image, mime_type, req.style.as_deref())
        .await?;

    state.store.attach_analysis(id, &analysis).await?;

    Ok(Json(analysis))
}
