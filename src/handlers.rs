use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::lead_handler;
use crate::sollit_client::SollitClient;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Client for the Sollit API (absent when no credential is configured;
    /// the lead route then answers with a config error).
    pub sollit: Option<SollitClient>,
}

/// Health check endpoint.
///
/// Returns the service status and version; reports healthy regardless of
/// Sollit configuration.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "rust-sollit-api",
            "version": "0.1.0"
        })),
    )
}

/// CORS policy for the form origin: any origin, POST/OPTIONS, Content-Type.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Builds the application router.
///
/// Rate limiting and request tracing are layered on in `main`; tests drive
/// this router directly.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/lead",
            post(lead_handler::create_lead)
                .options(lead_handler::lead_preflight)
                .fallback(lead_handler::method_not_allowed),
        )
        .with_state(state)
        .layer(cors_layer())
}
