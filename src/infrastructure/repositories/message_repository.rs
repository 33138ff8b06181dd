//! Message Repository Implementation
//!
//! PostgreSQL implementation of message persistence. Messages are
//! append-only; listing is unbounded and ordered by creation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgConnection;

use crate::domain::{Message, MessageRepository};
use crate::shared::error::AppError;

/// Internal row type for message queries.
#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: i64,
    conversation_id: i64,
    author_id: i64,
    text: String,
    created_at: DateTime<Utc>,
}

impl MessageRow {
    fn into_message(self) -> Message {
        Message {
            id: self.id,
            conversation_id: self.conversation_id,
            author_id: self.author_id,
            text: self.text,
            created_at: self.created_at,
        }
    }
}

/// PostgreSQL message repository implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgMessageRepository;

#[async_trait]
impl MessageRepository for PgMessageRepository {
    /// Append a message. The database assigns `created_at` truncated to
    /// second granularity.
    async fn create(
        &self,
        conn: &mut PgConnection,
        message: &Message,
    ) -> Result<Message, AppError> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            INSERT INTO messages (id, conversation_id, author_id, text)
            VALUES ($1, $2, $3, $4)
            RETURNING id, conversation_id, author_id, text, created_at
            "#,
        )
        .bind(message.id)
        .bind(message.conversation_id)
        .bind(message.author_id)
        .bind(&message.text)
        .fetch_one(&mut *conn)
        .await?;

        Ok(row.into_message())
    }

    /// List messages in creation order. `since` filters to messages with
    /// a strictly newer timestamp, supporting incremental polling.
    async fn list_by_conversation(
        &self,
        conn: &mut PgConnection,
        conversation_id: i64,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<Message>, AppError> {
        // TODO revisit once listing gets a limit/offset contract
        let rows = match since {
            Some(since) => {
                sqlx::query_as::<_, MessageRow>(
                    r#"
                    SELECT id, conversation_id, author_id, text, created_at
                    FROM messages
                    WHERE conversation_id = $1 AND created_at > $2
                    ORDER BY created_at, id
                    "#,
                )
                .bind(conversation_id)
                .bind(since)
                .fetch_all(&mut *conn)
                .await?
            }
            None => {
                sqlx::query_as::<_, MessageRow>(
                    r#"
                    SELECT id, conversation_id, author_id, text, created_at
                    FROM messages
                    WHERE conversation_id = $1
                    ORDER BY created_at, id
                    "#,
                )
                .bind(conversation_id)
                .fetch_all(&mut *conn)
                .await?
            }
        };

        Ok(rows.into_iter().map(|r| r.into_message()).collect())
    }
}
