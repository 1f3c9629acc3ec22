use anyhow::Result;

use axum::{
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
    Router,
};

use super::charge_routes::charge_routes;
use super::customer_routes::customer_routes;
use super::metrics::metrics_handler;
use super::notification_routes::notification_routes;
use super::state::*;
use super::{log_requests, RequestsLoggingLevel, ServerConfig};

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub fn make_app(
    config: ServerConfig,
    customer_store: GuardedCustomerStore,
    work_engine: GuardedWorkEngine,
) -> Router {
    let state = ServerState {
        config,
        customer_store,
        work_engine,
    };

    Router::new()
        .route("/health", get(health))
        .nest("/api/notification", notification_routes())
        .nest("/api/customer", customer_routes())
        .nest("/api/charge", charge_routes())
        .layer(middleware::from_fn_with_state(state.clone(), log_requests))
        .with_state(state)
}

pub async fn run_server(
    customer_store: GuardedCustomerStore,
    work_engine: GuardedWorkEngine,
    requests_logging_level: RequestsLoggingLevel,
    port: u16,
) -> Result<()> {
    let config = ServerConfig {
        requests_logging_level,
        port,
    };
    let app = make_app(config, customer_store, work_engine);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;

    Ok(axum::serve(listener, app).await?)
}

/// Serve the Prometheus scrape endpoint on its own port.
pub async fn run_metrics_server(port: u16) -> Result<()> {
    let app = Router::new().route("/metrics", get(metrics_handler));

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;

    Ok(axum::serve(listener, app).await?)
}
