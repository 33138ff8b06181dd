//! Response DTOs
//!
//! Data structures for API response bodies. Snowflake ids are serialized
//! as strings to stay safe for JavaScript clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Conversation, Message, Participant, User};

/// Session token response
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub expires_at: String,
}

impl TokenResponse {
    pub fn new(token: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            token,
            expires_at: expires_at.to_rfc3339(),
        }
    }
}

/// User response
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: String,
}

impl UserResponse {
    pub fn from_user(user: User, include_email: bool) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: if include_email { user.email } else { None },
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Conversation response
#[derive(Debug, Serialize)]
pub struct ConversationResponse {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub created_at: String,
}

impl From<Conversation> for ConversationResponse {
    fn from(conversation: Conversation) -> Self {
        Self {
            id: conversation.id.to_string(),
            owner_id: conversation.owner_id.to_string(),
            name: conversation.name,
            created_at: conversation.created_at.to_rfc3339(),
        }
    }
}

/// Participant response
#[derive(Debug, Serialize)]
pub struct ParticipantResponse {
    pub user_id: String,
    pub conversation_id: String,
    pub joined_at: String,
}

impl From<Participant> for ParticipantResponse {
    fn from(participant: Participant) -> Self {
        Self {
            user_id: participant.user_id.to_string(),
            conversation_id: participant.conversation_id.to_string(),
            joined_at: participant.joined_at.to_rfc3339(),
        }
    }
}

/// Message response. This is also the payload published to the
/// broadcast exchange, so subscribers receive exactly what the sender
/// was shown.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub id: String,
    pub conversation_id: String,
    pub author_id: String,
    pub text: String,
    pub created_at: String,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id.to_string(),
            conversation_id: message.conversation_id.to_string(),
            author_id: message.author_id.to_string(),
            text: message.text,
            created_at: message.created_at.to_rfc3339(),
        }
    }
}
