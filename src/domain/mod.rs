//! # Domain Layer
//!
//! Core business entities and repository contracts.
//!
//! ## Design Principles
//!
//! - No dependencies on the presentation layer
//! - Repository traits define data access contracts; implementations
//!   live in the infrastructure layer
//! - Repository methods take a `&mut PgConnection` so that every call in
//!   one operation shares a single transaction boundary

pub mod entities;

pub use entities::*;
