//! HTTP error mapping for the API layer.
//!
//! Soft states never arrive here: a degraded requirement parse and an empty
//! strict match list are absorbed below the API as documented fallback data.
//! What does arrive is the hard taxonomy (store failures, analysis
//! failures, auth failures), mapped to explicit status codes.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

/// API-level error with an HTTP status mapping.
#[derive(Debug)]
pub enum ApiError {
    Internal(aqari_core::Error),
    Unauthorized(String),
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    ServiceUnavailable(String),
    /// Room analysis failed; retryable by the user.
    Analysis(String),
}

impl From<aqari_core::Error> for ApiError {
    fn from(err: aqari_core::Error) -> Self {
        match &err {
            aqari_core::Error::NotFound(msg) => ApiError::NotFound(msg.clone()),
            aqari_core::Error::PropertyNotFound(id) => {
                ApiError::NotFound(format!("Property not found: {}", id))
            }
            aqari_core::Error::UserNotFound(msg) => {
                ApiError::NotFound(format!("User not found: {}", msg))
            }
            aqari_core::Error::InvalidInput(msg) => ApiError::BadRequest(msg.clone()),
            aqari_core::Error::Unauthorized(msg) => ApiError::Unauthorized(msg.clone()),
            aqari_core::Error::Analysis(msg) => ApiError::Analysis(msg.clone()),
            aqari_core::Error::Database(sqlx_err) => {
                let msg = sqlx_err.to_string();
                if msg.contains("duplicate key") || msg.contains("unique constraint") {
                    let friendly_msg = if msg.contains("app_user_email_key") || msg.contains("email")
                    {
                        "An account with this email already exists".to_string()
                    } else {
                        msg
                    };
                    return ApiError::Conflict(friendly_msg);
                }
                ApiError::Internal(err)
            }
            _ => ApiError::Internal(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        // Analysis failures carry a retryable marker: the client shows an
        // "analysis failed, retry" state instead of a generic error page.
        let (status, message, retryable) = match self {
            ApiError::Internal(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string(), false),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, false),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, false),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, false),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg, false),
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg, false),
            ApiError::Analysis(msg) => (StatusCode::BAD_GATEWAY, msg, true),
        };

        let body = if retryable {
            Json(serde_json::json!({
                "error": message,
                "retryable": true,
            }))
        } else {
            Json(serde_json::json!({
                "error": message,
            }))
        };

        (status, body).into_response()
    }
}
