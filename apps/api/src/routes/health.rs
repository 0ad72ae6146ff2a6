use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Liveness string.
pub async fn root_handler() -> &'static str {
    "SocioMap API is running"
}

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "sociomap-api"
    }))
}
