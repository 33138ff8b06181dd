//! Repository Implementations
//!
//! PostgreSQL implementations of the domain repository traits. The
//! implementations are stateless; every method executes against the
//! connection handed in by the caller's transaction boundary.

mod conversation_repository;
mod message_repository;
mod participant_repository;
mod user_repository;

pub use conversation_repository::PgConversationRepository;
pub use message_repository::PgMessageRepository;
pub use participant_repository::PgParticipantRepository;
pub use user_repository::PgUserRepository;
