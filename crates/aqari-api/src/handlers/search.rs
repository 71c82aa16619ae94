//! AI-assisted search flow.
//!
//! One round trip for the client: free text in, `{matches, alternatives,
//! explanation}` out. Parser failures and empty strict match lists are both
//! non-errors by design and arrive as documented fallback shapes.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use aqari_match::SearchOutcome;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for the recommendation flow.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RecommendRequest {
    /// Free-text housing request, e.g. "family of 4 villa in Abdoun".
    pub requirements: String,
}

/// Turn a free-text housing request into a matched result set.
#[utoipa::path(post, path = "/ai/recommend", tag = "AI",
    request_body = RecommendRequest,
    responses(
        (status = 200, description = "Matched listings with explanation"),
        (status = 400, description = "Empty requirements"),
    ))]
pub async fn recommend(
    State(state): State<AppState>,
    Json(req): Json<RecommendRequest>,
) -> Result<Json<SearchOutcome>, ApiError> {
    let requirements = req.requirements.trim();
    if requirements.is_empty() {
        return Err(ApiError::BadRequest("requirements must not be empty".into()));
    }

    let filter = state.parser.parse(requirements).await;
    let snapshot = state.store.list().await?;
    let outcome = aqari_match::search(&snapshot, &filter);

    info!(
        subsystem = "api",
        component = "search",
        op = "recommend",
        snapshot_size = snapshot.len(),
        result_count = outcome.matches.len(),
        degraded = filter.is_unconstrained(),
        "Recommendation flow complete"
    );

    Ok(Json(outcome))
}
