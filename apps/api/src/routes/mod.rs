pub mod health;

use std::any::Any;

use axum::{
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::errors::AppError;
use crate::recommendations::handlers;
use crate::simulator::handlers::handle_simulate;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Recommendations API
        .route(
            "/api/recommendations/economic-equity",
            post(handlers::handle_economic_equity),
        )
        .route(
            "/api/recommendations/public-health",
            post(handlers::handle_public_health),
        )
        .route(
            "/api/recommendations/disaster-preparedness",
            post(handlers::handle_disaster_preparedness),
        )
        .route("/api/recommendations/all", post(handlers::handle_all))
        // Simulator API
        .route("/api/simulator", post(handle_simulate))
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Turns a handler panic into the usual 500 `{"error": ...}` body.
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };

    AppError::Internal(anyhow::anyhow!(detail)).into_response()
}
