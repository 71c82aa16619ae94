//! Database connection pool management.

use std::time::{Duration, Instant};

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info, warn};

use aqari_core::{Error, Result};

/// Default maximum number of connections in the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default connection timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default idle timeout in seconds.
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;

/// Pool configuration options.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum number of connections in the pool.
    pub max_connections: u32,
    /// Minimum number of connections to maintain.
    pub min_connections: u32,
    /// Connection timeout duration.
    pub connect_timeout: Duration,
    /// Idle connection timeout duration.
    pub idle_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_connections: 1,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            idle_timeout: Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS),
        }
    }
}

impl PoolConfig {
    /// Create a new pool configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of connections.
    pub fn max_connections(mut self, n: u32) -> Self {
        self.max_connections = n;
        self
    }

    /// Set the minimum number of connections.
    pub fn min_connections(mut self, n: u32) -> Self {
        self.min_connections = n;
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the idle connection timeout.
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }
}

/// Create a new PostgreSQL connection pool with default configuration.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    create_pool_with_config(database_url, PoolConfig::default()).await
}

/// Create a new PostgreSQL connection pool with custom configuration.
pub async fn create_pool_with_config(database_url: &str, config: PoolConfig) -> Result<PgPool> {
    let start = Instant::now();

    info!(
        subsystem = "db",
        component = "pool",
        op = "create",
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        connect_timeout_secs = config.connect_timeout.as_secs(),
        "Creating database connection pool"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.connect_timeout)
        .idle_timeout(config.idle_timeout)
        .connect(database_url)
        .await
        .map_err(Error::Database)?;

    info!(
        subsystem = "db",
        component = "pool",
        op = "established",
        pool_size = pool.size(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Database connection pool established"
    );
    Ok(pool)
}

/// Log current pool health metrics.
pub fn log_pool_metrics(pool: &PgPool) {
    let size = pool.size();
    let idle = pool.num_idle();

    debug!(
        subsystem = "db",
        component = "pool",
        pool_size = size,
        pool_idle = idle,
        "Pool metrics"
    );

    if size > 0 && idle == 0 {
        warn!(
            subsystem = "db",
            component = "pool",
            pool_size = size,
            "Connection pool has no idle connections"
        );
    }
}
