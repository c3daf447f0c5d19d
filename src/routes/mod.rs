pub mod auth_routes;
pub mod reservation_routes;
pub mod user_routes;
pub mod vehicle_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;

use crate::middleware::cors::cors_middleware_with_origins;
use crate::state::AppState;

/// Construir el router completo de la aplicación
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/auth", auth_routes::create_auth_router(state.clone()))
        .nest("/users", user_routes::create_user_router(state.clone()))
        .nest("/vehicles", vehicle_routes::create_vehicle_router(state.clone()))
        .nest(
            "/reservations",
            reservation_routes::create_reservation_router(state.clone()),
        )
        .layer(cors_middleware_with_origins(state.config.cors_origins.clone()))
        .with_state(state)
}

/// Health check simple
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "service": "vehicle-reservations",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
