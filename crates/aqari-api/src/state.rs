//! Application state shared across handlers.

use std::sync::Arc;

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::RateLimiter;

use aqari_core::PropertyRepository;
use aqari_db::PgUserRepository;
use aqari_inference::{RequirementParser, RoomAnalyzer};

/// Global rate limiter type (direct quota, no keyed bucketing).
pub type GlobalRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Application state shared across handlers.
///
/// Collaborators are explicit trait objects handed in at construction; there
/// are no module-level singletons, which keeps handlers testable with
/// in-memory stores and stub backends.
#[derive(Clone)]
pub struct AppState {
    /// Property store.
    pub store: Arc<dyn PropertyRepository>,
    /// Account repository (None when running without a relational backend,
    /// e.g. in handler tests; auth routes then return 503).
    pub users: Option<PgUserRepository>,
    /// Free-text requirement parser. Never fails; degrades to the all-null
    /// filter.
    pub parser: Arc<RequirementParser>,
    /// Room analyzer (None when no vision model is configured; analysis
    /// routes then return 503).
    pub analyzer: Option<Arc<RoomAnalyzer>>,
    /// Global rate limiter (None if rate limiting is disabled).
    pub rate_limiter: Option<Arc<GlobalRateLimiter>>,
}
