//! # Conversation Server Library
//!
//! This crate provides a multi-tenant conversation backend with:
//! - RESTful HTTP API endpoints
//! - WebSocket message streaming per conversation
//! - PostgreSQL for persistent storage
//! - Redis pub/sub for message fan-out
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Core business entities and repository traits
//! - **Application Layer**: Business logic services, resource controllers, and DTOs
//! - **Infrastructure Layer**: Database, broadcast, and metrics implementations
//! - **Presentation Layer**: HTTP handlers and the WebSocket stream endpoint
//!
//! ## Module Structure
//!
//! ```text
//! conversation_server/
//! +-- config/        Configuration management
//! +-- domain/        Domain entities and repository traits
//! +-- application/   Application services, resources, and DTOs
//! +-- infrastructure/ Database, broadcast, and metrics implementations
//! +-- presentation/  HTTP routes and WebSocket stream handler
//! +-- shared/        Common utilities (errors, snowflake IDs)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP and WebSocket handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
