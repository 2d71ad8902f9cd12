//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::track_metrics;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(credit_routes())
        .merge(customer_routes())
        .route_layer(middleware::from_fn(track_metrics))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// Credit routes
fn credit_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/credits",
            post(handlers::credit::save_credit).get(handlers::credit::find_all_by_customer_id),
        )
        .route(
            "/credits/{credit_code}",
            get(handlers::credit::find_by_credit_code),
        )
}

/// Customer routes
fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/customers", post(handlers::customer::save_customer))
        .route("/customers/{customer_id}", get(handlers::customer::find_customer))
}
