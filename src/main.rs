mod config;
mod errors;
mod handlers;
mod lead_handler;
mod lead_models;
mod sollit_client;
mod transform;

use std::net::SocketAddr;
use std::sync::Arc;

use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::sollit_client::SollitClient;

/// Form submissions are small; anything bigger than this is not a lead.
const LEAD_BODY_LIMIT: usize = 64 * 1024;

/// Main entry point for the application.
///
/// Initializes logging, configuration, and the Sollit client, then starts
/// the Axum server. A missing Sollit credential does not prevent startup;
/// the lead route reports a config error per request until it is set.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rust_sollit_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded successfully");

    // Initialize Sollit client when a credential is available
    let sollit = match &config.sollit_api_key {
        Some(api_key) => {
            match SollitClient::new(config.sollit_api_url.clone(), api_key.clone()) {
                Ok(client) => {
                    tracing::info!("✓ Sollit client initialized: {}", config.sollit_api_url);
                    Some(client)
                }
                Err(e) => {
                    tracing::error!("Failed to initialize Sollit client: {}", e);
                    None
                }
            }
        }
        None => None,
    };

    // Build application state
    let app_state = Arc::new(handlers::AppState {
        config: config.clone(),
        sollit,
    });

    // Configure rate limiter: 10 requests/second per IP, burst of 20
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .unwrap(),
    );

    // Routes plus CORS, then the protective layers
    let app = handlers::router(app_state)
        .layer(
            ServiceBuilder::new()
                .layer(RequestBodyLimitLayer::new(LEAD_BODY_LIMIT))
                .layer(GovernorLayer {
                    config: governor_conf,
                }),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
