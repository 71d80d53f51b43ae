pub mod health_routes;
pub mod ui_routes;

use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Crear la aplicación completa: páginas, health check y capas HTTP
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(ui_routes::create_ui_router())
        .merge(health_routes::create_health_router())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
