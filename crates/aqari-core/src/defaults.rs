//! Centralized default constants for the aqari system.
//!
//! **This module is the single source of truth** for all shared default
//! values. All crates reference these constants instead of defining their own
//! magic numbers.
//!
//! Organized by domain area. When adding new constants, place them in the
//! appropriate section and document the rationale for the chosen value.

// =============================================================================
// MATCHING
// =============================================================================

/// Maximum number of unfiltered alternative listings shown when a search has
/// no strict matches.
pub const ALTERNATIVES_LIMIT: usize = 3;

/// Explanation attached to a degraded (all-null) search filter, shown to the
/// user when requirement extraction found nothing actionable or failed.
pub const DEGRADED_EXPLANATION: &str =
    "Results are based on all available listings for your request.";

// =============================================================================
// INFERENCE
// =============================================================================

/// Default Ollama-compatible endpoint.
pub const OLLAMA_URL: &str = "http://localhost:11434";

/// Default generation model for requirement parsing.
pub const GEN_MODEL: &str = "llama3.1:8b";

/// Timeout for generation requests (seconds).
pub const GEN_TIMEOUT_SECS: u64 = 60;

/// Timeout for vision requests (seconds). Image analysis is slower than
/// plain text generation.
pub const VISION_TIMEOUT_SECS: u64 = 120;

/// Environment variable naming the vision model. Unset means room analysis
/// is unavailable and the analysis endpoints return 503.
pub const ENV_VISION_MODEL: &str = "AQARI_VISION_MODEL";

/// Environment variable overriding the generation model.
pub const ENV_GEN_MODEL: &str = "AQARI_GEN_MODEL";

/// Environment variable overriding the inference endpoint base URL.
pub const ENV_OLLAMA_URL: &str = "OLLAMA_BASE";

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;

/// Default rate limit: max requests per period.
pub const RATE_LIMIT_REQUESTS: u64 = 100;

/// Default rate limit: period in seconds.
pub const RATE_LIMIT_PERIOD_SECS: u64 = 60;

/// Maximum request body size in bytes. Covers base64 image payloads for the
/// analysis endpoints.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

// =============================================================================
// AUTH
// =============================================================================

/// Lifetime of an issued access token in hours (7 days).
pub const TOKEN_TTL_HOURS: i64 = 168;

/// Prefix for issued access tokens.
pub const TOKEN_PREFIX: &str = "aq_at_";
