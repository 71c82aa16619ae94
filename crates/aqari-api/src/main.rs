//! aqari-api - HTTP API server for the aqari marketplace.

use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use governor::{Quota, RateLimiter};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use aqari_api::{ApiDoc, AppState, GlobalRateLimiter};
use aqari_core::defaults;
use aqari_db::Database;
use aqari_inference::{
    OllamaBackend, OllamaVisionBackend, RequirementParser, RoomAnalyzer, VisionBackend,
};

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically, which is
/// useful for log correlation and debugging production incidents.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// CORS
// =============================================================================

fn parse_allowed_origins() -> Vec<HeaderValue> {
    let origins_str = std::env::var("ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:5173,http://localhost:3000".to_string());

    origins_str
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}

// =============================================================================
// RATE LIMITING
// =============================================================================

async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    if let Some(limiter) = &state.rate_limiter {
        if limiter.check().is_err() {
            tracing::warn!("Rate limit exceeded");
            return Err((
                StatusCode::TOO_MANY_REQUESTS,
                Json(serde_json::json!({
                    "error": "rate_limit_exceeded",
                    "error_description": "Too many requests. Please wait before retrying."
                })),
            ));
        }
    }
    Ok(next.run(request).await)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with configurable output
    //
    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   LOG_FILE    - path to log file (optional, enables file logging)
    //   RUST_LOG    - standard env filter (default: "aqari_api=debug,tower_http=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "aqari_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    let _file_guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("aqari-api.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(non_blocking)
                        .with_ansi(false),
                )
                .init();
        }
        Some(guard)
    } else if log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
        None
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
        None
    };

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );

    // Get configuration from environment
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "postgres://localhost/aqari".to_string());
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults::SERVER_PORT);

    // Rate limiting configuration
    let rate_limit_requests: u64 = std::env::var("RATE_LIMIT_REQUESTS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults::RATE_LIMIT_REQUESTS);
    let rate_limit_period_secs: u64 = std::env::var("RATE_LIMIT_PERIOD_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults::RATE_LIMIT_PERIOD_SECS);
    let rate_limit_enabled: bool = std::env::var("RATE_LIMIT_ENABLED")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(true);

    // Connect to database
    info!("Connecting to database...");
    let db = Database::connect(&database_url).await?;
    db.migrate().await?;
    info!("Database connected");

    // Inference backends
    let gen_backend = OllamaBackend::from_env();
    let parser = Arc::new(RequirementParser::new(Arc::new(gen_backend)));

    let analyzer = match OllamaVisionBackend::from_env() {
        Some(vision) => {
            info!(model = vision.model_name(), "Vision model configured");
            Some(Arc::new(RoomAnalyzer::new(Arc::new(vision))))
        }
        None => {
            info!("No vision model configured; analysis endpoints disabled");
            None
        }
    };

    let rate_limiter: Option<Arc<GlobalRateLimiter>> = if rate_limit_enabled {
        let quota = Quota::with_period(std::time::Duration::from_secs(rate_limit_period_secs))
            .expect("Rate limit period must be non-zero")
            .allow_burst(
                NonZeroU32::new(rate_limit_requests as u32).expect("Rate limit must be non-zero"),
            );
        Some(Arc::new(RateLimiter::direct(quota)))
    } else {
        None
    };
    info!(
        "Rate limiting: {} ({} requests per {} seconds)",
        if rate_limit_enabled { "enabled" } else { "disabled" },
        rate_limit_requests,
        rate_limit_period_secs
    );

    let state = AppState {
        store: Arc::new(db.properties.clone()),
        users: Some(db.users.clone()),
        parser,
        analyzer,
        rate_limiter,
    };

    let app = aqari_api::router(state.clone())
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(axum::middleware::from_fn_with_state(
            state,
            rate_limit_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer({
            let allowed_origins = parse_allowed_origins();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(allowed_origins))
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
                .max_age(std::time::Duration::from_secs(3600))
        })
        .layer(RequestBodyLimitLayer::new(defaults::MAX_BODY_BYTES));

    // Start server
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
