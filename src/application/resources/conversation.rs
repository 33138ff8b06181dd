//! Conversation resource controller.
//!
//! All reads are scoped to conversations the caller participates in, so
//! an out-of-scope conversation is indistinguishable from a nonexistent
//! one. Creation inserts the conversation and the creator's membership
//! in the same transaction boundary; conversations are never updated or
//! destroyed through this surface.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgConnection;

use crate::application::context::AuthContext;
use crate::application::dto::request::CreateConversationRequest;
use crate::application::resource::ResourceController;
use crate::domain::{Conversation, ConversationRepository, ParticipantRepository};
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

pub struct ConversationResource<C, P> {
    conversations: C,
    participants: P,
    snowflake: Arc<SnowflakeGenerator>,
}

impl<C, P> ConversationResource<C, P>
where
    C: ConversationRepository,
    P: ParticipantRepository,
{
    pub fn new(conversations: C, participants: P, snowflake: Arc<SnowflakeGenerator>) -> Self {
        Self {
            conversations,
            participants,
            snowflake,
        }
    }
}

#[async_trait]
impl<C, P> ResourceController for ConversationResource<C, P>
where
    C: ConversationRepository,
    P: ParticipantRepository,
{
    type Entity = Conversation;
    type CreatePayload = CreateConversationRequest;
    type UpdatePayload = ();

    async fn list(
        &self,
        conn: &mut PgConnection,
        ctx: &AuthContext,
    ) -> Result<Vec<Conversation>, AppError> {
        let caller = ctx.require_authenticated()?;
        self.conversations.list_for_user(conn, caller).await
    }

    async fn retrieve(
        &self,
        conn: &mut PgConnection,
        ctx: &AuthContext,
        id: i64,
    ) -> Result<Conversation, AppError> {
        let caller = ctx.require_authenticated()?;
        self.conversations
            .find_for_user(conn, id, caller)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Conversation {} not found", id)))
    }

    /// Create a conversation and auto-add the creator as its first
    /// participant. Both inserts commit together or neither does.
    async fn create(
        &self,
        conn: &mut PgConnection,
        ctx: &AuthContext,
        payload: CreateConversationRequest,
    ) -> Result<Conversation, AppError> {
        let caller = ctx.require_authenticated()?;

        let conversation = Conversation {
            id: self.snowflake.generate(),
            owner_id: caller,
            name: payload.name,
            created_at: Utc::now(),
        };

        let conversation = self.conversations.create(conn, &conversation).await?;
        self.participants.add(conn, caller, conversation.id).await?;

        Ok(conversation)
    }
}
