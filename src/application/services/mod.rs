//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! - **AuthService**: registration, login, password hashing
//! - **TokenService**: stateless session token issue/verify
//! - **ConversationService**: membership management and message flow

pub mod auth_service;
pub mod conversation_service;

pub use auth_service::{hash_password, verify_password, AuthService, Claims, TokenService};
pub use conversation_service::ConversationService;
