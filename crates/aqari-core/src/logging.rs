//! Structured logging schema and field name constants for aqari.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by standardized field names across
//! every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (startup, shutdown), operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-item iteration, high-volume data (match candidates) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID propagated across a request and its sub-calls.
/// Format: UUIDv7 (time-ordered).
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "api", "match", "db", "inference"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "matcher", "requirements", "ollama", "pool"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "search", "parse", "generate", "analyze_design"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Property UUID being operated on.
pub const PROPERTY_ID: &str = "property_id";

/// Free-text housing request being parsed.
pub const QUERY: &str = "query";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of results returned by a match or query.
pub const RESULT_COUNT: &str = "result_count";

/// Number of listings in the matched snapshot.
pub const SNAPSHOT_SIZE: &str = "snapshot_size";

/// Byte length of a prompt or response.
pub const PROMPT_LEN: &str = "prompt_len";

/// Byte length of a model response.
pub const RESPONSE_LEN: &str = "response_len";

// ─── Inference fields ──────────────────────────────────────────────────────

/// Model name used for inference.
pub const MODEL: &str = "model";

/// Whether the filter came from the degraded fallback path.
pub const DEGRADED: &str = "degraded";

// ─── Database fields ───────────────────────────────────────────────────────

/// Number of active connections in the pool.
pub const POOL_SIZE: &str = "pool_size";

/// Database table or entity affected.
pub const DB_TABLE: &str = "db_table";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

/// Slow operation threshold exceeded.
pub const SLOW: &str = "slow";
