//! Application Layer
//!
//! Business logic services, the generic resource controller, and data
//! transfer objects (DTOs). This layer orchestrates the flow of data
//! between the presentation and domain layers.

pub mod context;
pub mod dto;
pub mod resource;
pub mod resources;
pub mod services;
