//! WebSocket Streaming
//!
//! Live per-conversation message streams.

pub mod stream;

pub use stream::stream_handler;
