use bounce_leaderboard::config::{Config, StoreBackend};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting leaderboard server...");

    dotenvy::dotenv().ok();

    let config = Config::from_env().expect("Invalid configuration");

    let board = bounce_leaderboard::build_leaderboard(&config)
        .await
        .expect("Failed to open leaderboard store");

    match &config.backend {
        StoreBackend::Memory => tracing::info!("Using in-memory store."),
        StoreBackend::Sqlite { database_url } => {
            tracing::info!(%database_url, "Database connection established.")
        }
    }
    tracing::info!(
        colleagues = config.colleagues.len(),
        threshold = config.win_threshold,
        "Leaderboard seeded."
    );

    let app = bounce_leaderboard::app(board);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", config.addr);

    axum::serve(listener, app)
        .await
        .expect("Failed to start server.");
}
