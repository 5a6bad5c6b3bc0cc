//! Minimal liveness endpoints for the hosting platform.

use axum::Router;
use axum::routing::get;

async fn index() -> &'static str {
    "Welcome to the Discount Bot!"
}

async fn health() -> &'static str {
    log::info!("Called for healthcheck");
    "Bot is healthy"
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
}

/// Serves the liveness endpoints until the process exits.
pub async fn serve(bind_addr: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    log::info!("Web app started at {bind_addr}");
    axum::serve(listener, router()).await
}
