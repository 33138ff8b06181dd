//! Infrastructure Layer
//!
//! Implementations for external services:
//! - Database repositories (PostgreSQL)
//! - Broadcast exchange (Redis pub/sub)
//! - Metrics (Prometheus)

pub mod broadcast;
pub mod database;
pub mod metrics;
pub mod repositories;
