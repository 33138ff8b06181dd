//! Conversation Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::application::context::AuthContext;
use crate::application::dto::request::{CreateConversationRequest, ParticipantRequest};
use crate::application::dto::response::{ConversationResponse, ParticipantResponse};
use crate::application::resource::ResourceDispatcher;
use crate::application::resources::ConversationResource;
use crate::application::services::ConversationService;
use crate::infrastructure::repositories::{
    PgConversationRepository, PgMessageRepository, PgParticipantRepository, PgUserRepository,
};
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

fn dispatcher(
    state: &AppState,
) -> ResourceDispatcher<ConversationResource<PgConversationRepository, PgParticipantRepository>> {
    ResourceDispatcher::new(
        state.db.clone(),
        ConversationResource::new(
            PgConversationRepository,
            PgParticipantRepository,
            state.snowflake.clone(),
        ),
    )
}

pub(crate) fn conversation_service(
    state: &AppState,
) -> ConversationService<
    PgConversationRepository,
    PgParticipantRepository,
    PgMessageRepository,
    PgUserRepository,
> {
    ConversationService::new(
        state.db.clone(),
        PgConversationRepository,
        PgParticipantRepository,
        PgMessageRepository,
        PgUserRepository,
        state.snowflake.clone(),
        state.exchange.clone(),
    )
}

fn parse_user_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::BadRequest(format!("Invalid user id: {}", raw)))
}

/// List the caller's conversations
pub async fn list_conversations(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<Vec<ConversationResponse>>, AppError> {
    let conversations = dispatcher(&state).list(&ctx).await?;

    Ok(Json(
        conversations
            .into_iter()
            .map(ConversationResponse::from)
            .collect(),
    ))
}

/// Get one of the caller's conversations
pub async fn get_conversation(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(conversation_id): Path<i64>,
) -> Result<Json<ConversationResponse>, AppError> {
    let conversation = dispatcher(&state).retrieve(&ctx, conversation_id).await?;
    Ok(Json(ConversationResponse::from(conversation)))
}

/// Create a conversation owned by the caller
pub async fn create_conversation(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(body): Json<CreateConversationRequest>,
) -> Result<(StatusCode, Json<ConversationResponse>), AppError> {
    body.validate().map_err(validation_error)?;

    let conversation = dispatcher(&state).create(&ctx, body).await?;

    Ok((StatusCode::CREATED, Json(ConversationResponse::from(conversation))))
}

/// Add a participant (owner only)
pub async fn add_participant(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(conversation_id): Path<i64>,
    Json(body): Json<ParticipantRequest>,
) -> Result<(StatusCode, Json<ParticipantResponse>), AppError> {
    let user_id = parse_user_id(&body.user_id)?;

    let participant = conversation_service(&state)
        .add_participant(&ctx, conversation_id, user_id)
        .await?;

    Ok((StatusCode::CREATED, Json(ParticipantResponse::from(participant))))
}

/// Remove a participant (owner only)
pub async fn remove_participant(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(conversation_id): Path<i64>,
    Json(body): Json<ParticipantRequest>,
) -> Result<StatusCode, AppError> {
    let user_id = parse_user_id(&body.user_id)?;

    conversation_service(&state)
        .remove_participant(&ctx, conversation_id, user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
