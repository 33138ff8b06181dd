//! Commit-on-Success Transaction Boundary
//!
//! Every resource-controller or service invocation opens exactly one
//! boundary. All queries inside the operation borrow the same connection
//! from it; nested calls never open a second transaction. The boundary
//! commits only when the operation reaches its success path. On any
//! early exit the boundary is dropped and the underlying transaction
//! rolls back, so partial writes are never observable.

use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use crate::shared::error::AppError;

/// Scoped transaction wrapper committing only on explicit success.
pub struct CommitOnSuccess {
    tx: Transaction<'static, Postgres>,
}

impl CommitOnSuccess {
    /// Open a transaction on a pooled connection.
    pub async fn begin(pool: &PgPool) -> Result<Self, AppError> {
        let tx = pool.begin().await.map_err(AppError::Database)?;
        Ok(Self { tx })
    }

    /// Connection for queries within this boundary.
    pub fn conn(&mut self) -> &mut PgConnection {
        &mut self.tx
    }

    /// Commit all writes made within the boundary.
    pub async fn commit(self) -> Result<(), AppError> {
        self.tx.commit().await.map_err(AppError::Database)
    }
}
