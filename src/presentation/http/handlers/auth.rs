//! Authentication Handlers

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use validator::Validate;

use crate::application::dto::request::{LoginRequest, RegisterRequest};
use crate::application::dto::response::{TokenResponse, UserResponse};
use crate::application::services::AuthService;
use crate::infrastructure::repositories::PgUserRepository;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

fn auth_service(state: &AppState) -> AuthService<PgUserRepository> {
    AuthService::new(
        state.db.clone(),
        PgUserRepository,
        state.snowflake.clone(),
        state.tokens.clone(),
    )
}

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    body.validate().map_err(validation_error)?;

    let user = auth_service(&state)
        .register(&body.name, &body.password, body.email.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from_user(user, true))))
}

/// Login with credentials
///
/// The issued token is returned in the body and also set as a cookie so
/// browser clients get a session without handling the token themselves.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<TokenResponse>), AppError> {
    body.validate().map_err(validation_error)?;

    let (token, expires_at) = auth_service(&state).login(&body.name, &body.password).await?;

    let cookie = Cookie::build((state.settings.jwt.cookie_name.clone(), token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok((jar.add(cookie), Json(TokenResponse::new(token, expires_at))))
}

/// Logout
///
/// Tokens are stateless, so logout only clears the session cookie. A
/// token held elsewhere stays valid until it expires.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode), AppError> {
    let removal = Cookie::build((state.settings.jwt.cookie_name.clone(), ""))
        .path("/")
        .build();

    Ok((jar.remove(removal), StatusCode::NO_CONTENT))
}
