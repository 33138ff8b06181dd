//! Conversation Repository Implementation
//!
//! PostgreSQL implementation of the ConversationRepository trait.
//! Scoped lookups join against the participants table so a caller can
//! only see conversations they belong to.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgConnection;

use crate::domain::{Conversation, ConversationRepository};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct ConversationRow {
    id: i64,
    owner_id: i64,
    name: String,
    created_at: DateTime<Utc>,
}

impl ConversationRow {
    fn into_conversation(self) -> Conversation {
        Conversation {
            id: self.id,
            owner_id: self.owner_id,
            name: self.name,
            created_at: self.created_at,
        }
    }
}

/// PostgreSQL conversation repository implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgConversationRepository;

#[async_trait]
impl ConversationRepository for PgConversationRepository {
    async fn find_by_id(
        &self,
        conn: &mut PgConnection,
        id: i64,
    ) -> Result<Option<Conversation>, AppError> {
        let row = sqlx::query_as::<_, ConversationRow>(
            r#"
            SELECT id, owner_id, name, created_at
            FROM conversations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row.map(|r| r.into_conversation()))
    }

    async fn find_for_user(
        &self,
        conn: &mut PgConnection,
        id: i64,
        user_id: i64,
    ) -> Result<Option<Conversation>, AppError> {
        let row = sqlx::query_as::<_, ConversationRow>(
            r#"
            SELECT c.id, c.owner_id, c.name, c.created_at
            FROM conversations c
            JOIN participants p ON p.conversation_id = c.id
            WHERE c.id = $1 AND p.user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row.map(|r| r.into_conversation()))
    }

    async fn list_for_user(
        &self,
        conn: &mut PgConnection,
        user_id: i64,
    ) -> Result<Vec<Conversation>, AppError> {
        let rows = sqlx::query_as::<_, ConversationRow>(
            r#"
            SELECT c.id, c.owner_id, c.name, c.created_at
            FROM conversations c
            JOIN participants p ON p.conversation_id = c.id
            WHERE p.user_id = $1
            ORDER BY c.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_conversation()).collect())
    }

    async fn create(
        &self,
        conn: &mut PgConnection,
        conversation: &Conversation,
    ) -> Result<Conversation, AppError> {
        let row = sqlx::query_as::<_, ConversationRow>(
            r#"
            INSERT INTO conversations (id, owner_id, name)
            VALUES ($1, $2, $3)
            RETURNING id, owner_id, name, created_at
            "#,
        )
        .bind(conversation.id)
        .bind(conversation.owner_id)
        .bind(&conversation.name)
        .fetch_one(&mut *conn)
        .await?;

        Ok(row.into_conversation())
    }
}
