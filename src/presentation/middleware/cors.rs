//! CORS Middleware Configuration
//!
//! With explicit origins the layer allows credentials so browser
//! clients can carry the session cookie. Wildcard origin and
//! credentials are mutually exclusive in CORS, so the permissive
//! fallback stays cookie-less.

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

use crate::config::CorsSettings;

/// Create CORS layer from settings
pub fn create_cors_layer(settings: &CorsSettings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([
                header::AUTHORIZATION,
                header::CONTENT_TYPE,
                header::IF_MODIFIED_SINCE,
            ])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    }
}
