//! Resource Controllers
//!
//! Per-entity implementations of the generic CRUD contract.

mod conversation;
mod user;

pub use conversation::ConversationResource;
pub use user::UserResource;
