//! Participant (membership) entity and repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;

use crate::shared::error::AppError;

/// A user's membership in one conversation.
///
/// Composite identity `(user_id, conversation_id)`; at most one per pair.
/// Holding a membership is what grants read and send eligibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub user_id: i64,
    pub conversation_id: i64,
    pub joined_at: DateTime<Utc>,
}

/// Data access contract for memberships.
#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// Insert a membership. A duplicate pair violates the composite key
    /// and surfaces as Conflict.
    async fn add(
        &self,
        conn: &mut PgConnection,
        user_id: i64,
        conversation_id: i64,
    ) -> Result<Participant, AppError>;

    /// Remove a membership. Removing an absent pair is NotFound.
    async fn remove(
        &self,
        conn: &mut PgConnection,
        user_id: i64,
        conversation_id: i64,
    ) -> Result<(), AppError>;

    async fn exists(
        &self,
        conn: &mut PgConnection,
        user_id: i64,
        conversation_id: i64,
    ) -> Result<bool, AppError>;
}
