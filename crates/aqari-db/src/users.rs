//! User account and bearer token repository.
//!
//! Passwords are hashed with Argon2id. Issued tokens are opaque random
//! secrets stored SHA-256-hashed with an expiry; presenting a token only
//! ever compares hashes.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Serialize;
use sha2::{Digest, Sha256};
use sqlx::{Pool, Postgres, Row};
use tracing::debug;
use uuid::Uuid;

use aqari_core::defaults::{TOKEN_PREFIX, TOKEN_TTL_HOURS};
use aqari_core::{Error, Result};

/// A marketplace account. The password hash never leaves this crate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub country: String,
    pub created_at: DateTime<Utc>,
}

/// Request for creating a new account.
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub password: String,
}

/// PostgreSQL implementation of the user and token repository.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: Pool<Postgres>,
}

impl PgUserRepository {
    /// Create a new PgUserRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Generate a cryptographically secure random string.
    fn generate_secret(length: usize) -> String {
        const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
        let mut rng = rand::thread_rng();
        (0..length)
            .map(|_| {
                let idx = rng.gen_range(0..CHARSET.len());
                CHARSET[idx] as char
            })
            .collect()
    }

    /// Hash a token using SHA256 for at-rest storage.
    fn hash_secret(secret: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(secret.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Hash a password with Argon2id.
    fn hash_password(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| Error::Internal(format!("Password hashing failed: {}", e)))
    }

    /// Verify a password against its Argon2id hash.
    fn verify_password(password: &str, hash: &str) -> bool {
        PasswordHash::new(hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }

    fn row_to_user(row: &sqlx::postgres::PgRow) -> Result<User> {
        Ok(User {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            country: row.try_get("country")?,
            created_at: row.try_get("created_at")?,
        })
    }

    /// Create a new account. A duplicate email surfaces as a database
    /// unique-constraint error for the API layer to map to a conflict.
    pub async fn create(&self, req: CreateUserRequest) -> Result<User> {
        if req.email.trim().is_empty() || req.password.is_empty() {
            return Err(Error::InvalidInput(
                "email and password are required".into(),
            ));
        }

        let id = Uuid::now_v7();
        let created_at = Utc::now();
        let country = req.country.unwrap_or_else(|| "Jordan".to_string());
        let password_hash = Self::hash_password(&req.password)?;

        sqlx::query(
            r#"INSERT INTO app_user (id, name, email, phone, country, password_hash, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
        )
        .bind(id)
        .bind(&req.name)
        .bind(&req.email)
        .bind(&req.phone)
        .bind(&country)
        .bind(&password_hash)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        debug!(
            subsystem = "db",
            component = "users",
            op = "create",
            "User created"
        );

        Ok(User {
            id,
            name: req.name,
            email: req.email,
            phone: req.phone,
            country,
            created_at,
        })
    }

    /// Verify an email/password pair. Unknown email and wrong password are
    /// indistinguishable to the caller.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> Result<User> {
        let row = sqlx::query("SELECT * FROM app_user WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        let row = row.ok_or_else(|| Error::Unauthorized("Invalid credentials".into()))?;
        let password_hash: String = row.try_get("password_hash")?;

        if !Self::verify_password(password, &password_hash) {
            return Err(Error::Unauthorized("Invalid credentials".into()));
        }

        Self::row_to_user(&row)
    }

    /// Issue a fresh bearer token for a user. Returns the plaintext token
    /// (shown once) and its expiry.
    pub async fn issue_token(&self, user_id: Uuid) -> Result<(String, DateTime<Utc>)> {
        let token = format!("{}{}", TOKEN_PREFIX, Self::generate_secret(48));
        let token_hash = Self::hash_secret(&token);
        let expires_at = Utc::now() + Duration::hours(TOKEN_TTL_HOURS);

        sqlx::query(
            r#"INSERT INTO auth_token (id, user_id, token_hash, expires_at, created_at)
               VALUES ($1, $2, $3, $4, $5)"#,
        )
        .bind(Uuid::now_v7())
        .bind(user_id)
        .bind(&token_hash)
        .bind(expires_at)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok((token, expires_at))
    }

    /// Resolve a presented bearer token to its account. Expired or unknown
    /// tokens are unauthorized.
    pub async fn validate_token(&self, token: &str) -> Result<User> {
        let token_hash = Self::hash_secret(token);

        let row = sqlx::query(
            r#"SELECT u.* FROM auth_token t
               JOIN app_user u ON u.id = t.user_id
               WHERE t.token_hash = $1 AND t.expires_at > $2"#,
        )
        .bind(&token_hash)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        let row = row.ok_or_else(|| Error::Unauthorized("Invalid or expired token".into()))?;
        Self::row_to_user(&row)
    }
}
