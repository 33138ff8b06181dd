//! Authentication Service
//!
//! Password hashing and the credential/token service. Session tokens are
//! stateless JWTs carrying the user id and expiry; verification needs no
//! server-side storage and all verification failures collapse to the
//! same Unauthenticated error.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::config::JwtSettings;
use crate::domain::{User, UserRepository};
use crate::infrastructure::database::CommitOnSuccess;
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

/// Hash verified when the login name does not exist, so an unknown name
/// costs the same as a wrong password.
static DECOY_HASH: Lazy<String> =
    Lazy::new(|| hash_password("decoy-password-for-unknown-names").unwrap_or_default());

/// Hash a password using Argon2id with a random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

/// Verify a password against its hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(format!("Invalid password hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

/// Stateless session token issue/verify.
#[derive(Clone)]
pub struct TokenService {
    settings: JwtSettings,
}

impl TokenService {
    pub fn new(settings: JwtSettings) -> Self {
        Self { settings }
    }

    /// Issue a signed token embedding the user id and expiry.
    pub fn issue(&self, user_id: i64) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.settings.token_expiry_hours);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.settings.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

        Ok((token, expires_at))
    }

    /// Verify a token and extract the user id.
    ///
    /// Bad signature, unparseable payload, and expired token all fail
    /// identically so the caller learns nothing about why.
    pub fn verify(&self, token: &str) -> Result<i64, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.settings.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::Unauthenticated)?;

        token_data
            .claims
            .sub
            .parse::<i64>()
            .map_err(|_| AppError::Unauthenticated)
    }
}

/// Registration and login.
pub struct AuthService<U> {
    pool: PgPool,
    users: U,
    snowflake: Arc<SnowflakeGenerator>,
    tokens: TokenService,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(
        pool: PgPool,
        users: U,
        snowflake: Arc<SnowflakeGenerator>,
        tokens: TokenService,
    ) -> Self {
        Self {
            pool,
            users,
            snowflake,
            tokens,
        }
    }

    /// Register a new user. A duplicate name surfaces as Conflict from
    /// the unique constraint.
    pub async fn register(
        &self,
        name: &str,
        password: &str,
        email: Option<&str>,
    ) -> Result<User, AppError> {
        let password_hash = hash_password(password)?;

        let user = User {
            id: self.snowflake.generate(),
            name: name.to_string(),
            email: email.map(str::to_string),
            password_hash,
            created_at: Utc::now(),
        };

        let mut boundary = CommitOnSuccess::begin(&self.pool).await?;
        let created = self.users.create(boundary.conn(), &user).await?;
        boundary.commit().await?;

        Ok(created)
    }

    /// Authenticate with name and password, issuing a session token.
    ///
    /// Unknown name and wrong password fail identically.
    pub async fn login(
        &self,
        name: &str,
        password: &str,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let mut boundary = CommitOnSuccess::begin(&self.pool).await?;
        let user = self.users.find_by_name(boundary.conn(), name).await?;
        boundary.commit().await?;

        let user = match user {
            Some(user) => user,
            None => {
                // Burn the same verification cost as the known-name path.
                let _ = verify_password(password, &DECOY_HASH);
                return Err(AppError::Unauthenticated);
            }
        };

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::Unauthenticated);
        }

        self.tokens.issue(user.id)
    }
}
