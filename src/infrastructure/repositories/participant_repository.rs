//! Participant Repository Implementation
//!
//! PostgreSQL implementation of the ParticipantRepository trait. The
//! composite primary key on (user_id, conversation_id) enforces the
//! one-membership-per-pair invariant; violations propagate as Conflict.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgConnection;

use crate::domain::{Participant, ParticipantRepository};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct ParticipantRow {
    user_id: i64,
    conversation_id: i64,
    joined_at: DateTime<Utc>,
}

impl ParticipantRow {
    fn into_participant(self) -> Participant {
        Participant {
            user_id: self.user_id,
            conversation_id: self.conversation_id,
            joined_at: self.joined_at,
        }
    }
}

/// PostgreSQL participant repository implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgParticipantRepository;

#[async_trait]
impl ParticipantRepository for PgParticipantRepository {
    async fn add(
        &self,
        conn: &mut PgConnection,
        user_id: i64,
        conversation_id: i64,
    ) -> Result<Participant, AppError> {
        let row = sqlx::query_as::<_, ParticipantRow>(
            r#"
            INSERT INTO participants (user_id, conversation_id)
            VALUES ($1, $2)
            RETURNING user_id, conversation_id, joined_at
            "#,
        )
        .bind(user_id)
        .bind(conversation_id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(row.into_participant())
    }

    async fn remove(
        &self,
        conn: &mut PgConnection,
        user_id: i64,
        conversation_id: i64,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM participants
            WHERE user_id = $1 AND conversation_id = $2
            "#,
        )
        .bind(user_id)
        .bind(conversation_id)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "User {} is not a participant of conversation {}",
                user_id, conversation_id
            )));
        }

        Ok(())
    }

    async fn exists(
        &self,
        conn: &mut PgConnection,
        user_id: i64,
        conversation_id: i64,
    ) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM participants
                WHERE user_id = $1 AND conversation_id = $2
            )
            "#,
        )
        .bind(user_id)
        .bind(conversation_id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(exists)
    }
}
