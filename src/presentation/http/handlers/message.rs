//! Message Handlers
//!
//! Sending appends to a conversation the caller participates in and
//! fans the committed message out to live subscribers. Listing supports
//! incremental polling: a client sends back the Last-Modified value it
//! saw as If-Modified-Since and receives only newer messages, or 304
//! when nothing changed.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use validator::Validate;

use crate::application::context::AuthContext;
use crate::application::dto::request::SendMessageRequest;
use crate::application::dto::response::MessageResponse;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

use super::conversation::conversation_service;

/// Send a message to a conversation
pub async fn send_message(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(conversation_id): Path<i64>,
    Json(body): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    body.validate().map_err(validation_error)?;

    let message = conversation_service(&state)
        .send_message(&ctx, conversation_id, &body.text)
        .await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::from(message))))
}

/// List messages, optionally only those newer than If-Modified-Since
pub async fn list_messages(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(conversation_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let since = headers
        .get(header::IF_MODIFIED_SINCE)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_http_date);

    let messages = conversation_service(&state)
        .list_messages(&ctx, conversation_id, since)
        .await?;

    if messages.is_empty() && since.is_some() {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let last_modified = messages.last().map(|message| message.created_at);
    let body: Vec<MessageResponse> = messages.into_iter().map(MessageResponse::from).collect();

    let mut response = Json(body).into_response();
    if let Some(timestamp) = last_modified {
        let value = HeaderValue::from_str(&format_http_date(timestamp))
            .map_err(|e| AppError::Internal(format!("Invalid Last-Modified value: {}", e)))?;
        response.headers_mut().insert(header::LAST_MODIFIED, value);
    }

    Ok(response)
}

/// Parse an HTTP date (RFC 2822/1123) into a UTC timestamp.
fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Format a timestamp as an HTTP date (RFC 1123, always GMT).
fn format_http_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn http_date_round_trips() {
        let timestamp = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 15).unwrap();
        let formatted = format_http_date(timestamp);
        assert_eq!(formatted, "Wed, 01 May 2024 12:30:15 GMT");
        assert_eq!(parse_http_date(&formatted), Some(timestamp));
    }

    #[test]
    fn malformed_http_date_is_ignored() {
        assert_eq!(parse_http_date("yesterday"), None);
        assert_eq!(parse_http_date(""), None);
    }

    #[test]
    fn http_date_accepts_offset_inputs() {
        // Clients may send a non-GMT offset; it normalizes to UTC.
        let parsed = parse_http_date("Wed, 01 May 2024 14:30:15 +0200").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 15).unwrap());
    }
}
