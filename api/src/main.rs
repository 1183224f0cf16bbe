//! OrderLens API Server
//!
//! Ingests e-commerce order exports (JSON) and serves four descriptive
//! aggregations: order sizes, total-price ranges, product categories, and
//! product types. A second endpoint merges multiple export files into one.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod config;
mod domain;
mod error;
mod handlers;


use app::MergeService;
use config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub merge_service: Arc<MergeService>,
    pub config: Config,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the router with all routes and middleware.
pub fn router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();

    Router::new()
        // Health check
        .route("/health", get(health))
        // Aggregation upload
        .route("/upload", post(handlers::upload_orders))
        // Multi-file merge
        .route("/upload-json", post(handlers::merge_files))
        // Static pages
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .route_service("/merge", ServeFile::new(static_dir.join("merge.html")))
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,orderlens_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting OrderLens API...");

    // Load configuration
    let config = Config::from_env();

    let state = AppState {
        merge_service: Arc::new(MergeService::new(config.merged_file_path.clone())),
        config,
    };

    let port = state.config.port;
    let app = router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
