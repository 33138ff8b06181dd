//! User Handlers
//!
//! Email addresses are private: a user's email appears only in
//! responses to that user, never in listings or lookups by others.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::application::context::AuthContext;
use crate::application::dto::request::UpdateUserRequest;
use crate::application::dto::response::UserResponse;
use crate::application::resource::ResourceDispatcher;
use crate::application::resources::UserResource;
use crate::infrastructure::repositories::PgUserRepository;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

fn dispatcher(state: &AppState) -> ResourceDispatcher<UserResource<PgUserRepository>> {
    ResourceDispatcher::new(state.db.clone(), UserResource::new(PgUserRepository))
}

/// List all users
pub async fn list_users(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = dispatcher(&state).list(&ctx).await?;
    let caller = ctx.current_user();

    Ok(Json(
        users
            .into_iter()
            .map(|user| {
                let include_email = caller == Some(user.id);
                UserResponse::from_user(user, include_email)
            })
            .collect(),
    ))
}

/// Get a single user
pub async fn get_user(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(user_id): Path<i64>,
) -> Result<Json<UserResponse>, AppError> {
    let user = dispatcher(&state).retrieve(&ctx, user_id).await?;
    let include_email = ctx.current_user() == Some(user.id);

    Ok(Json(UserResponse::from_user(user, include_email)))
}

/// Update a user (self only)
pub async fn update_user(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(user_id): Path<i64>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    body.validate().map_err(validation_error)?;

    let user = dispatcher(&state).update(&ctx, user_id, body).await?;

    Ok(Json(UserResponse::from_user(user, true)))
}

/// Delete a user (self only)
pub async fn delete_user(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(user_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    dispatcher(&state).destroy(&ctx, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
