//! Custom Extractors
//!
//! Resolves the caller's identity once per request, before any handler
//! logic runs. Resolution order: Authorization header, then session
//! cookie, then anonymous. Resolution itself never fails; a credential
//! that does not verify collapses to anonymous, and the protected
//! operation's own capability check produces the uniform 401.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use axum_extra::extract::CookieJar;

use crate::application::context::AuthContext;
use crate::startup::AppState;

/// Token schemes accepted in the Authorization header.
const TOKEN_PREFIXES: [&str; 2] = ["Bearer ", "JWT "];

impl FromRequestParts<AppState> for AuthContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(strip_token_prefix);

        // Header takes precedence over the cookie.
        let token = match header_token {
            Some(token) => Some(token.to_string()),
            None => CookieJar::from_headers(&parts.headers)
                .get(&state.settings.jwt.cookie_name)
                .map(|cookie| cookie.value().to_string()),
        };

        let ctx = token
            .and_then(|token| state.tokens.verify(&token).ok())
            .map(AuthContext::authenticated)
            .unwrap_or_else(AuthContext::anonymous);

        Ok(ctx)
    }
}

fn strip_token_prefix(header: &str) -> Option<&str> {
    TOKEN_PREFIXES
        .iter()
        .find_map(|prefix| header.strip_prefix(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bearer_and_jwt_schemes() {
        assert_eq!(strip_token_prefix("Bearer abc.def"), Some("abc.def"));
        assert_eq!(strip_token_prefix("JWT abc.def"), Some("abc.def"));
    }

    #[test]
    fn rejects_unknown_schemes() {
        assert_eq!(strip_token_prefix("Basic abc"), None);
        assert_eq!(strip_token_prefix("abc.def"), None);
    }
}
