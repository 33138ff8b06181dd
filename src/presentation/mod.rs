//! Presentation Layer
//!
//! HTTP routes, middleware, and the WebSocket stream endpoint.

pub mod http;
pub mod middleware;
pub mod websocket;
