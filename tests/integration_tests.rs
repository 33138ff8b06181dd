//! Integration Tests Entry Point
//!
//! This file serves as the entry point for integration tests.
//! Tests are organized by module:
//! - `api/` - REST API endpoint tests
//! - `common/` - Shared test utilities
//!
//! Tests marked `#[ignore]` need a running PostgreSQL and Redis; point
//! `TEST_DATABASE_URL` and `TEST_REDIS_URL` at them and run with
//! `--ignored`.

mod api;
mod common;

// Re-export common utilities for tests
pub use common::*;
