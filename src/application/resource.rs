//! Generic Resource Controller
//!
//! A uniform CRUD contract mediating every read/write to shared state.
//! One method per operation, implemented per resource type; operations a
//! resource does not support fall through to MethodNotAllowed defaults.
//!
//! The dispatcher wraps each invocation in exactly one commit-on-success
//! transaction boundary: the operation receives a connection borrowed
//! from that boundary, nested calls reuse it, and any error rolls back
//! every write made within the invocation.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};

use crate::application::context::AuthContext;
use crate::infrastructure::database::CommitOnSuccess;
use crate::shared::error::AppError;

/// Per-resource CRUD contract.
///
/// Authorization hooks run inside each operation, before any mutation.
/// `retrieve` is scope-aware: an entity outside the caller's scope is
/// NotFound, indistinguishable from one that does not exist.
#[async_trait]
pub trait ResourceController: Send + Sync {
    type Entity: Send;
    type CreatePayload: Send;
    type UpdatePayload: Send;

    /// All entries within the caller's scope. No pagination guarantee;
    /// callers must assume the full set may be returned.
    async fn list(
        &self,
        conn: &mut PgConnection,
        ctx: &AuthContext,
    ) -> Result<Vec<Self::Entity>, AppError>;

    async fn retrieve(
        &self,
        conn: &mut PgConnection,
        ctx: &AuthContext,
        id: i64,
    ) -> Result<Self::Entity, AppError>;

    async fn create(
        &self,
        conn: &mut PgConnection,
        ctx: &AuthContext,
        payload: Self::CreatePayload,
    ) -> Result<Self::Entity, AppError> {
        let _ = (conn, ctx, payload);
        Err(AppError::MethodNotAllowed)
    }

    async fn update(
        &self,
        conn: &mut PgConnection,
        ctx: &AuthContext,
        id: i64,
        payload: Self::UpdatePayload,
    ) -> Result<Self::Entity, AppError> {
        let _ = (conn, ctx, id, payload);
        Err(AppError::MethodNotAllowed)
    }

    async fn destroy(
        &self,
        conn: &mut PgConnection,
        ctx: &AuthContext,
        id: i64,
    ) -> Result<(), AppError> {
        let _ = (conn, ctx, id);
        Err(AppError::MethodNotAllowed)
    }
}

/// Runs controller operations inside their transaction boundary.
pub struct ResourceDispatcher<C> {
    pool: PgPool,
    controller: C,
}

impl<C: ResourceController> ResourceDispatcher<C> {
    pub fn new(pool: PgPool, controller: C) -> Self {
        Self { pool, controller }
    }

    pub async fn list(&self, ctx: &AuthContext) -> Result<Vec<C::Entity>, AppError> {
        let mut boundary = CommitOnSuccess::begin(&self.pool).await?;
        let entries = self.controller.list(boundary.conn(), ctx).await?;
        boundary.commit().await?;
        Ok(entries)
    }

    pub async fn retrieve(&self, ctx: &AuthContext, id: i64) -> Result<C::Entity, AppError> {
        let mut boundary = CommitOnSuccess::begin(&self.pool).await?;
        let entry = self.controller.retrieve(boundary.conn(), ctx, id).await?;
        boundary.commit().await?;
        Ok(entry)
    }

    pub async fn create(
        &self,
        ctx: &AuthContext,
        payload: C::CreatePayload,
    ) -> Result<C::Entity, AppError> {
        let mut boundary = CommitOnSuccess::begin(&self.pool).await?;
        let entry = self.controller.create(boundary.conn(), ctx, payload).await?;
        boundary.commit().await?;
        Ok(entry)
    }

    pub async fn update(
        &self,
        ctx: &AuthContext,
        id: i64,
        payload: C::UpdatePayload,
    ) -> Result<C::Entity, AppError> {
        let mut boundary = CommitOnSuccess::begin(&self.pool).await?;
        let entry = self
            .controller
            .update(boundary.conn(), ctx, id, payload)
            .await?;
        boundary.commit().await?;
        Ok(entry)
    }

    pub async fn destroy(&self, ctx: &AuthContext, id: i64) -> Result<(), AppError> {
        let mut boundary = CommitOnSuccess::begin(&self.pool).await?;
        self.controller.destroy(boundary.conn(), ctx, id).await?;
        boundary.commit().await?;
        Ok(())
    }
}
