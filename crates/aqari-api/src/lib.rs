//! # aqari-api
//!
//! HTTP API server for the aqari marketplace.
//!
//! The binary entry point lives in `main.rs`; this library exposes the
//! router, state, and error mapping so integration tests can drive the full
//! HTTP surface with in-memory stores and stub inference backends.

pub mod error;
pub mod handlers;
pub mod state;

use axum::routing::{get, post};
use axum::{Json, Router};
use utoipa::OpenApi;

pub use error::ApiError;
pub use state::{AppState, GlobalRateLimiter};

use handlers::analysis::{analyze_design, analyze_structure};
use handlers::auth::{login, signup};
use handlers::properties::{analyze_property, create_property, get_property, list_properties};
use handlers::search::recommend;

/// OpenAPI document for the marketplace API.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::properties::list_properties,
        handlers::properties::create_property,
        handlers::properties::get_property,
        handlers::properties::analyze_property,
        handlers::search::recommend,
        handlers::analysis::analyze_design,
        handlers::analysis::analyze_structure,
        handlers::auth::signup,
        handlers::auth::login,
    ),
    components(schemas(
        aqari_core::Property,
        aqari_core::PropertyType,
        aqari_core::ListingStatus,
        aqari_core::GeoPoint,
        aqari_core::SearchFilter,
        aqari_core::DesignAnalysis,
        aqari_core::FurnitureSuggestion,
        aqari_core::Position,
        aqari_core::RoomDimensions,
        aqari_core::StructuralAnalysis,
        aqari_match::SearchOutcome,
        handlers::properties::CreatePropertyBody,
        handlers::properties::AnalyzePropertyRequest,
        handlers::search::RecommendRequest,
        handlers::analysis::AnalyzeImageRequest,
        handlers::auth::SignupRequest,
        handlers::auth::LoginRequest,
        handlers::auth::AuthResponse,
    )),
    tags(
        (name = "Properties", description = "Listing CRUD and per-listing analysis"),
        (name = "AI", description = "Requirement parsing and room analysis"),
        (name = "Auth", description = "Accounts and tokens"),
    )
)]
pub struct ApiDoc;

/// Liveness probe.
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn root() -> &'static str {
    "aqari marketplace API is running"
}

/// Build the application router for the given state.
///
/// Middleware (tracing, CORS, request IDs, rate limiting, body limits) is
/// layered on by the binary; tests drive this router directly.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        // Properties
        .route("/properties", get(list_properties).post(create_property))
        .route("/properties/:id", get(get_property))
        .route("/properties/:id/analyze", post(analyze_property))
        // AI
        .route("/ai/recommend", post(recommend))
        .route("/ai/design", post(analyze_design))
        .route("/ai/structure", post(analyze_structure))
        // Auth
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .with_state(state)
}
