use axum::{response::Json, routing::get, Router};
use serde_json::json;

use crate::state::AppState;

pub fn create_health_router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// Liveness: no toca la base de datos
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "flight-history-explorer",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
