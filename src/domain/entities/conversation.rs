//! Conversation entity and repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;

use crate::shared::error::AppError;

/// A named conversation owned by its creator.
///
/// Conversation fields are never updated in place after creation; its
/// lifetime consists of membership changes and appended messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    /// Snowflake ID (primary key)
    pub id: i64,

    /// Creator. The owner may always manage membership, even without
    /// holding a membership themselves.
    pub owner_id: i64,

    /// Display name
    pub name: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.owner_id == user_id
    }
}

/// Data access contract for conversations.
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Unscoped lookup, used for ownership checks.
    async fn find_by_id(
        &self,
        conn: &mut PgConnection,
        id: i64,
    ) -> Result<Option<Conversation>, AppError>;

    /// Lookup scoped to conversations the user participates in. Absence
    /// outside the scope is indistinguishable from nonexistence.
    async fn find_for_user(
        &self,
        conn: &mut PgConnection,
        id: i64,
        user_id: i64,
    ) -> Result<Option<Conversation>, AppError>;

    /// All conversations the user participates in.
    async fn list_for_user(
        &self,
        conn: &mut PgConnection,
        user_id: i64,
    ) -> Result<Vec<Conversation>, AppError>;

    async fn create(
        &self,
        conn: &mut PgConnection,
        conversation: &Conversation,
    ) -> Result<Conversation, AppError>;
}
