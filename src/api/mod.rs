//! API layer - HTTP interface to the parking ledger
//!
//! Builds the axum [`Router`] for the `/api` resources and runs the server.
//! Handlers are thin: they extract input, call into [`crate::core`], and rely on
//! the [`IntoResponse`](axum::response::IntoResponse) impl for [`crate::errors::Error`]
//! to render failures.

/// HTTP rendering of service errors
pub mod error;
/// Request handlers grouped by resource
pub mod routes;

use crate::{config::server::ServerConfig, errors::Result};
use axum::{
    Router,
    routing::{get, put},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

/// Shared state available to every handler.
/// Holds the injected database handle; cloning shares the same connection.
#[derive(Clone)]
pub struct AppState {
    /// Database connection for all ledger operations
    pub database: Arc<DatabaseConnection>,
}

impl AppState {
    /// Creates a new `AppState` around the given database connection.
    #[must_use]
    pub fn new(database: DatabaseConnection) -> Self {
        Self {
            database: Arc::new(database),
        }
    }
}

/// Builds the application router with CORS and request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/transactions",
            get(routes::transaction::list_transactions).post(routes::transaction::create_transaction),
        )
        .route(
            "/api/transactions/:id",
            put(routes::transaction::update_transaction)
                .delete(routes::transaction::delete_transaction),
        )
        .route("/api/parking/occupied", get(routes::parking::occupied_slots))
        .route("/api/history", get(routes::history::list_history))
        .route("/api/health", get(routes::general::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds the configured address and serves requests until Ctrl-C.
pub async fn serve(config: &ServerConfig, database: DatabaseConnection) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(AppState::new(database)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
