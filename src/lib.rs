use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod service;
pub mod store;

use config::{Config, StoreBackend};
use error::StoreError;
use service::Leaderboard;
use store::{LeaderboardStore, MemoryStore, SqliteStore};

/// Open the configured backend and seed the colleague list.
pub async fn build_leaderboard(config: &Config) -> Result<Leaderboard, StoreError> {
    let store: Arc<dyn LeaderboardStore> = match &config.backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Sqlite { database_url } => Arc::new(SqliteStore::connect(database_url).await?),
    };

    store.seed(&config.colleagues).await?;

    Ok(Leaderboard::new(store, config.win_threshold))
}

pub fn app(board: Leaderboard) -> Router {
    // The leaderboard page is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(|| async { "Bounce Leaderboard API - v1.0" }))
        .route("/api/health", get(routes::health::health_check))

        // Leaderboard endpoints
        .route("/api/leaderboard", get(routes::leaderboard::get_leaderboard))
        .route("/api/leaderboard/{name}", get(routes::leaderboard::get_colleague))
        .route("/api/bounce", post(routes::leaderboard::bounce))
        .route("/api/reset", post(routes::leaderboard::reset))

        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(board)
}
