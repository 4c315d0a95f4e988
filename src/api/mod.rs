//! HTTP API server.

pub mod employees;
pub mod error;
pub mod extract;


use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::Result;
use crate::service::EmployeeService;

pub use error::ErrorBody;

/// Build the application router with tracing and state applied.
pub fn router(service: EmployeeService) -> Router {
    Router::new()
        .route("/", get(employees::home))
        .merge(employees::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Bind `addr` and serve until Ctrl+C.
pub async fn serve(addr: &str, service: EmployeeService) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP API listening on {}", listener.local_addr()?);

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
