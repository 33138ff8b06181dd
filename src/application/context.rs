//! Authorization Context
//!
//! The caller's identity, resolved once per inbound operation and passed
//! explicitly to every downstream operation. There is no ambient or
//! thread-local identity anywhere in the system.
//!
//! Resolution (header, then cookie, then anonymous) happens in the
//! presentation layer; this is the value every operation consumes.

use crate::shared::error::AppError;

/// Identity of the current caller. Anonymous when no valid credential
/// was presented; resolution failures never produce an error here.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    user_id: Option<i64>,
}

impl AuthContext {
    /// Context for a verified user.
    pub fn authenticated(user_id: i64) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    /// Context for an unauthenticated caller.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Read-only accessor usable on unauthenticated paths.
    pub fn current_user(&self) -> Option<i64> {
        self.user_id
    }

    /// Capability check used by every protected operation.
    pub fn require_authenticated(&self) -> Result<i64, AppError> {
        self.user_id.ok_or(AppError::Unauthenticated)
    }
}
