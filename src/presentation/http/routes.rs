//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::websocket::stream_handler;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes())
        // Health check endpoint
        .route("/health", get(handlers::health::health_check))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// API routes
fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication (public)
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        // Users
        .route("/user", get(handlers::user::list_users))
        .route(
            "/user/{user_id}",
            get(handlers::user::get_user)
                .put(handlers::user::update_user)
                .delete(handlers::user::delete_user),
        )
        // Conversations
        .route(
            "/conversation",
            get(handlers::conversation::list_conversations)
                .post(handlers::conversation::create_conversation),
        )
        .route(
            "/conversation/{conversation_id}",
            get(handlers::conversation::get_conversation),
        )
        .route(
            "/conversation/{conversation_id}/participant",
            post(handlers::conversation::add_participant)
                .delete(handlers::conversation::remove_participant),
        )
        .route(
            "/conversation/{conversation_id}/message",
            get(handlers::message::list_messages).post(handlers::message::send_message),
        )
        // Live stream of newly published messages
        .route(
            "/conversation/{conversation_id}/stream",
            get(stream_handler),
        )
}
