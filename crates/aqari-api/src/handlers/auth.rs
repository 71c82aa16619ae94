//! Account signup and login handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use aqari_db::{CreateUserRequest, PgUserRepository};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating an account.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub country: Option<String>,
}

/// Request body for logging in.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Issued credentials for a signed-in account.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Opaque bearer token; shown once, stored hashed.
    pub token: String,
    pub user_id: Uuid,
    pub name: String,
    pub expires_at: DateTime<Utc>,
}

fn users(state: &AppState) -> Result<&PgUserRepository, ApiError> {
    state.users.as_ref().ok_or_else(|| {
        ApiError::ServiceUnavailable("Account storage not configured".into())
    })
}

/// Create an account and sign in.
#[utoipa::path(post, path = "/auth/signup", tag = "Auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created, token issued"),
        (status = 400, description = "Missing email or password"),
        (status = 409, description = "Email already registered"),
    ))]
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let users = users(&state)?;

    let user = users
        .create(CreateUserRequest {
            name: req.name,
            email: req.email,
            phone: req.phone,
            country: req.country,
            password: req.password,
        })
        .await?;

    let (token, expires_at) = users.issue_token(user.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user_id: user.id,
            name: user.name,
            expires_at,
        }),
    ))
}

/// Sign in with email and password.
#[utoipa::path(post, path = "/auth/login", tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued"),
        (status = 401, description = "Invalid credentials"),
    ))]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let users = users(&state)?;

    let user = users.verify_credentials(&req.email, &req.password).await?;
    let (token, expires_at) = users.issue_token(user.id).await?;

    Ok(Json(AuthResponse {
        token,
        user_id: user.id,
        name: user.name,
        expires_at,
    }))
}
