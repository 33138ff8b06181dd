//! Request DTOs
//!
//! Data structures for API request bodies. Validation rules are declared
//! statically per operation and checked as a pure function before any
//! mutation begins.

use serde::Deserialize;
use validator::Validate;

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 32, message = "Name must be 2-32 characters"))]
    pub name: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Update user request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 32, message = "Name must be 2-32 characters"))]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

/// Create conversation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateConversationRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
}

/// Add/remove participant request
#[derive(Debug, Deserialize)]
pub struct ParticipantRequest {
    /// Target user id (snowflake, transported as a string)
    pub user_id: String,
}

/// Send message request
#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(min = 1, message = "Text must not be empty"))]
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message_text_is_rejected() {
        let body = SendMessageRequest {
            text: String::new(),
        };
        assert!(body.validate().is_err());
    }

    #[test]
    fn register_requires_minimum_password_length() {
        let body = RegisterRequest {
            name: "alice".into(),
            password: "short".into(),
            email: None,
        };
        assert!(body.validate().is_err());
    }

    #[test]
    fn register_accepts_missing_email() {
        let body = RegisterRequest {
            name: "alice".into(),
            password: "a-long-password".into(),
            email: None,
        };
        assert!(body.validate().is_ok());
    }
}
