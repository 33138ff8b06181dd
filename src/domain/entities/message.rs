//! Message entity and repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;

use crate::shared::error::AppError;

/// An immutable text message in a conversation.
///
/// Messages have no update or delete operations. The author's membership
/// is checked at send time and not re-verified later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Snowflake ID (primary key)
    pub id: i64,

    /// Parent conversation
    pub conversation_id: i64,

    /// Author
    pub author_id: i64,

    /// Text body (non-empty)
    pub text: String,

    /// Server-assigned creation timestamp, second granularity
    pub created_at: DateTime<Utc>,
}

/// Data access contract for messages.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Append a message. `created_at` is assigned by the database.
    async fn create(
        &self,
        conn: &mut PgConnection,
        message: &Message,
    ) -> Result<Message, AppError>;

    /// Messages of a conversation in creation order, optionally limited
    /// to those strictly newer than `since`.
    async fn list_by_conversation(
        &self,
        conn: &mut PgConnection,
        conversation_id: i64,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<Message>, AppError>;
}
