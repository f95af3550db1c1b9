//! Registrar application entry point.
//!
//! Bootstraps the server:
//! 1. Load configuration from environment
//! 2. Open the SQLite pool and create missing tables
//! 3. Build router with API routes
//! 4. Apply CORS and request tracing layers
//! 5. Start Axum server

use axum::http::{HeaderValue, Method};
use registrar::{auth::middleware::AppState, config::Config, routes, storage};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() {
    // Initialize tracing with env filter support (RUST_LOG)
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load config from environment
    let config = Config::from_env().expect("Failed to load config");
    tracing::info!("Starting registrar on {}", config.bind_addr);

    // Open the store and ensure the schema exists
    let pool = storage::connect(&config.database_url)
        .await
        .expect("Failed to open database");
    storage::init_schema(&pool)
        .await
        .expect("Failed to initialize schema");

    // Explicit CORS allow-list from config; an empty list rejects all
    // cross-origin requests.
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .map(|origin| origin.parse().expect("Invalid CORS origin"))
        .collect();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(tower_http::cors::Any)
        .allow_origin(AllowOrigin::list(origins));

    let state = AppState {
        db: pool,
        config: Arc::new(config.clone()),
    };

    let app = routes::api_router()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Bind to configured address
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind");
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await.expect("Server error");
}
