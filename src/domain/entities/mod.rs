//! # Domain Entities
//!
//! Core entities of the conversation backend. All entities map directly
//! to their corresponding database tables.
//!
//! - **User**: account with authentication data
//! - **Conversation**: a named space owned by its creator
//! - **Participant**: a user's membership in one conversation; grants
//!   read/send eligibility
//! - **Message**: an immutable text message appended to a conversation
//!
//! Each entity has an associated repository trait defining data access
//! operations, implemented in the infrastructure layer.

mod conversation;
mod message;
mod participant;
mod user;

pub use conversation::{Conversation, ConversationRepository};
pub use message::{Message, MessageRepository};
pub use participant::{Participant, ParticipantRepository};
pub use user::{User, UserRepository};
