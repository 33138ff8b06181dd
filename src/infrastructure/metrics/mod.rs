//! Prometheus Metrics Module
//!
//! Application-wide metrics collection.
//!
//! # Metrics Collected
//! - Messages published to the broadcast exchange
//! - Broadcast publish failures (absorbed post-commit errors)
//! - Active message stream (WebSocket) connections

use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounter, IntGauge, Registry, TextEncoder};

/// Global metrics registry
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// Messages successfully published to the broadcast exchange
pub static MESSAGES_PUBLISHED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "conversation_server_messages_published_total",
        "Total messages published to the broadcast exchange",
    )
    .expect("Failed to create MESSAGES_PUBLISHED_TOTAL metric")
});

/// Publish attempts that failed after the message was committed
pub static PUBLISH_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "conversation_server_publish_failures_total",
        "Broadcast publishes that failed after durable commit",
    )
    .expect("Failed to create PUBLISH_FAILURES_TOTAL metric")
});

/// Currently connected message stream subscribers
pub static STREAM_CONNECTIONS_ACTIVE: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "conversation_server_stream_connections_active",
        "Number of active message stream connections",
    )
    .expect("Failed to create STREAM_CONNECTIONS_ACTIVE metric")
});

fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(MESSAGES_PUBLISHED_TOTAL.clone()))
        .expect("Failed to register MESSAGES_PUBLISHED_TOTAL");
    registry
        .register(Box::new(PUBLISH_FAILURES_TOTAL.clone()))
        .expect("Failed to register PUBLISH_FAILURES_TOTAL");
    registry
        .register(Box::new(STREAM_CONNECTIONS_ACTIVE.clone()))
        .expect("Failed to register STREAM_CONNECTIONS_ACTIVE");
}

/// Encode all registered metrics in the Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if encoder.encode(&metric_families, &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
