//! REST API endpoint tests

pub mod auth_tests;
pub mod conversation_tests;
pub mod health_tests;
pub mod message_tests;
