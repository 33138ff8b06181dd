//! User resource controller.
//!
//! Listing and retrieval are open to any authenticated caller; update
//! and destroy are restricted to the user themselves. Creation goes
//! through registration, never through the resource surface.

use async_trait::async_trait;
use sqlx::PgConnection;

use crate::application::context::AuthContext;
use crate::application::dto::request::UpdateUserRequest;
use crate::application::resource::ResourceController;
use crate::domain::{User, UserRepository};
use crate::shared::error::AppError;

pub struct UserResource<U> {
    users: U,
}

impl<U: UserRepository> UserResource<U> {
    pub fn new(users: U) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<U: UserRepository> ResourceController for UserResource<U> {
    type Entity = User;
    type CreatePayload = ();
    type UpdatePayload = UpdateUserRequest;

    async fn list(
        &self,
        conn: &mut PgConnection,
        ctx: &AuthContext,
    ) -> Result<Vec<User>, AppError> {
        ctx.require_authenticated()?;
        self.users.list(conn).await
    }

    async fn retrieve(
        &self,
        conn: &mut PgConnection,
        ctx: &AuthContext,
        id: i64,
    ) -> Result<User, AppError> {
        ctx.require_authenticated()?;
        self.users
            .find_by_id(conn, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    async fn update(
        &self,
        conn: &mut PgConnection,
        ctx: &AuthContext,
        id: i64,
        payload: UpdateUserRequest,
    ) -> Result<User, AppError> {
        let caller = ctx.require_authenticated()?;
        if caller != id {
            return Err(AppError::Forbidden("Users may only update themselves".into()));
        }

        let mut user = self
            .users
            .find_by_id(conn, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;

        if let Some(name) = payload.name {
            user.name = name;
        }
        if let Some(email) = payload.email {
            user.email = Some(email);
        }

        self.users.update(conn, &user).await
    }

    async fn destroy(
        &self,
        conn: &mut PgConnection,
        ctx: &AuthContext,
        id: i64,
    ) -> Result<(), AppError> {
        let caller = ctx.require_authenticated()?;
        if caller != id {
            return Err(AppError::Forbidden("Users may only delete themselves".into()));
        }

        self.users.delete(conn, id).await
    }
}
