//! Conversation Service
//!
//! Membership management and the message flow. Every operation opens a
//! single transaction boundary; the broadcast publish for a new message
//! happens only after that boundary commits, so subscribers never see a
//! message that was rolled back.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::application::context::AuthContext;
use crate::application::dto::response::MessageResponse;
use crate::domain::{
    Conversation, ConversationRepository, Message, MessageRepository, Participant,
    ParticipantRepository, UserRepository,
};
use crate::infrastructure::broadcast::MessageExchange;
use crate::infrastructure::database::CommitOnSuccess;
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

pub struct ConversationService<C, P, M, U> {
    pool: PgPool,
    conversations: C,
    participants: P,
    messages: M,
    users: U,
    snowflake: Arc<SnowflakeGenerator>,
    exchange: MessageExchange,
}

impl<C, P, M, U> ConversationService<C, P, M, U>
where
    C: ConversationRepository,
    P: ParticipantRepository,
    M: MessageRepository,
    U: UserRepository,
{
    pub fn new(
        pool: PgPool,
        conversations: C,
        participants: P,
        messages: M,
        users: U,
        snowflake: Arc<SnowflakeGenerator>,
        exchange: MessageExchange,
    ) -> Self {
        Self {
            pool,
            conversations,
            participants,
            messages,
            users,
            snowflake,
            exchange,
        }
    }

    /// Add a user to a conversation. Only the owner may manage the
    /// participant list; adding a user twice is a Conflict.
    pub async fn add_participant(
        &self,
        ctx: &AuthContext,
        conversation_id: i64,
        user_id: i64,
    ) -> Result<Participant, AppError> {
        let caller = ctx.require_authenticated()?;

        let mut boundary = CommitOnSuccess::begin(&self.pool).await?;

        let conversation = self
            .owned_conversation(boundary.conn(), caller, conversation_id)
            .await?;

        self.users
            .find_by_id(boundary.conn(), user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        let participant = self
            .participants
            .add(boundary.conn(), user_id, conversation.id)
            .await?;

        boundary.commit().await?;
        Ok(participant)
    }

    /// Remove a user from a conversation. Owner-only; removing someone
    /// who is not a participant is NotFound.
    pub async fn remove_participant(
        &self,
        ctx: &AuthContext,
        conversation_id: i64,
        user_id: i64,
    ) -> Result<(), AppError> {
        let caller = ctx.require_authenticated()?;

        let mut boundary = CommitOnSuccess::begin(&self.pool).await?;

        let conversation = self
            .owned_conversation(boundary.conn(), caller, conversation_id)
            .await?;

        self.participants
            .remove(boundary.conn(), user_id, conversation.id)
            .await?;

        boundary.commit().await?;
        Ok(())
    }

    /// Post a message to a conversation the caller participates in.
    ///
    /// The message timestamp is assigned by the database at second
    /// granularity. After the commit the serialized message is published
    /// to the conversation's broadcast channel.
    pub async fn send_message(
        &self,
        ctx: &AuthContext,
        conversation_id: i64,
        text: &str,
    ) -> Result<Message, AppError> {
        let caller = ctx.require_authenticated()?;

        let mut boundary = CommitOnSuccess::begin(&self.pool).await?;

        self.member_conversation(boundary.conn(), caller, conversation_id)
            .await?;

        let message = Message {
            id: self.snowflake.generate(),
            conversation_id,
            author_id: caller,
            text: text.to_string(),
            created_at: Utc::now(),
        };
        let message = self.messages.create(boundary.conn(), &message).await?;

        boundary.commit().await?;

        // Broadcast is best-effort; failures are logged inside publish
        // and never fail the request.
        let payload = serde_json::to_vec(&MessageResponse::from(message.clone()))
            .map_err(|e| AppError::Internal(format!("Message serialization failed: {}", e)))?;
        self.exchange.publish(conversation_id, &payload).await;

        Ok(message)
    }

    /// List messages in a conversation the caller participates in,
    /// optionally restricted to those created after `since`.
    pub async fn list_messages(
        &self,
        ctx: &AuthContext,
        conversation_id: i64,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<Message>, AppError> {
        let caller = ctx.require_authenticated()?;

        let mut boundary = CommitOnSuccess::begin(&self.pool).await?;

        self.member_conversation(boundary.conn(), caller, conversation_id)
            .await?;

        let messages = self
            .messages
            .list_by_conversation(boundary.conn(), conversation_id, since)
            .await?;

        boundary.commit().await?;
        Ok(messages)
    }

    /// Check that the caller may open a live stream on a conversation.
    pub async fn authorize_stream(
        &self,
        ctx: &AuthContext,
        conversation_id: i64,
    ) -> Result<(), AppError> {
        let caller = ctx.require_authenticated()?;

        let mut boundary = CommitOnSuccess::begin(&self.pool).await?;
        self.member_conversation(boundary.conn(), caller, conversation_id)
            .await?;
        boundary.commit().await?;
        Ok(())
    }

    /// Resolve a conversation the caller owns. Ownership is independent
    /// of membership, so the owner keeps managing participants even
    /// after leaving. Any other caller is Forbidden.
    async fn owned_conversation(
        &self,
        conn: &mut sqlx::PgConnection,
        caller: i64,
        conversation_id: i64,
    ) -> Result<Conversation, AppError> {
        let conversation = self
            .conversations
            .find_by_id(conn, conversation_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Conversation {} not found", conversation_id))
            })?;

        if !conversation.is_owned_by(caller) {
            return Err(AppError::Forbidden(
                "Only the conversation owner may manage participants".into(),
            ));
        }

        Ok(conversation)
    }

    /// Require that the caller is a current participant. Ownership
    /// alone is insufficient here; an owner who left cannot send or
    /// read until re-added.
    async fn member_conversation(
        &self,
        conn: &mut sqlx::PgConnection,
        caller: i64,
        conversation_id: i64,
    ) -> Result<(), AppError> {
        self.conversations
            .find_by_id(conn, conversation_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Conversation {} not found", conversation_id))
            })?;

        if !self
            .participants
            .exists(conn, caller, conversation_id)
            .await?
        {
            return Err(AppError::Forbidden(
                "Caller is not a participant of this conversation".into(),
            ));
        }

        Ok(())
    }
}
