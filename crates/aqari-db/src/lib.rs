//! # aqari-db
//!
//! PostgreSQL database layer for aqari.
//!
//! This crate provides:
//! - Connection pool management
//! - `PgPropertyRepository`: the property store backing the marketplace
//! - `PgUserRepository`: accounts, password hashing, and bearer tokens
//! - Embedded schema migrations
//!
//! ## Example
//!
//! ```rust,ignore
//! use aqari_core::{CreatePropertyRequest, ListingStatus, PropertyRepository, PropertyType};
//! use aqari_db::Database;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/aqari").await?;
//!     db.migrate().await?;
//!
//!     let listings = db.properties.list().await?;
//!     println!("{} listings", listings.len());
//!     Ok(())
//! }
//! ```

pub mod pool;
pub mod properties;
pub mod users;

// Re-export core types
pub use aqari_core::*;

pub use pool::{create_pool, create_pool_with_config, PoolConfig};
pub use properties::PgPropertyRepository;
pub use users::{CreateUserRequest, PgUserRepository, User};

/// Top-level database handle bundling the repositories.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Property repository.
    pub properties: PgPropertyRepository,
    /// User and token repository.
    pub users: PgUserRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            properties: PgPropertyRepository::new(pool.clone()),
            users: PgUserRepository::new(pool.clone()),
            pool,
        }
    }

    /// Connect with default pool configuration.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = create_pool(database_url).await?;
        Ok(Self::new(pool))
    }

    /// Connect with custom pool configuration.
    pub async fn connect_with(database_url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(database_url, config).await?;
        Ok(Self::new(pool))
    }

    /// Apply embedded schema migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Internal(format!("Migration failed: {}", e)))?;
        Ok(())
    }

    /// Cheap connectivity probe for health endpoints.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
