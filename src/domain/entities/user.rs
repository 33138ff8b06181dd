//! User entity and repository trait.
//!
//! Maps to the `users` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;

use crate::shared::error::AppError;

/// Represents a user account.
///
/// Maps to the `users` table:
/// - id: BIGINT PRIMARY KEY (Snowflake ID)
/// - name: VARCHAR(32) NOT NULL UNIQUE
/// - email: VARCHAR(255) NULL
/// - password_hash: VARCHAR(255) NOT NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Snowflake ID (primary key)
    pub id: i64,

    /// Display name (unique)
    pub name: String,

    /// Email address (optional)
    pub email: Option<String>,

    /// Argon2 password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Data access contract for users.
///
/// All methods run against the caller's transaction.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(
        &self,
        conn: &mut PgConnection,
        id: i64,
    ) -> Result<Option<User>, AppError>;

    async fn find_by_name(
        &self,
        conn: &mut PgConnection,
        name: &str,
    ) -> Result<Option<User>, AppError>;

    async fn list(&self, conn: &mut PgConnection) -> Result<Vec<User>, AppError>;

    /// Insert a new user. A duplicate name surfaces as Conflict.
    async fn create(&self, conn: &mut PgConnection, user: &User) -> Result<User, AppError>;

    /// Update name and email of an existing user.
    async fn update(&self, conn: &mut PgConnection, user: &User) -> Result<User, AppError>;

    async fn delete(&self, conn: &mut PgConnection, id: i64) -> Result<(), AppError>;
}
