//! API handlers for the inventory REST endpoints

pub mod equipment;
pub mod export;
pub mod health;
pub mod openapi;
pub mod stats;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Equipment
        .route(
            "/equipment",
            get(equipment::list_equipment).post(equipment::create_equipment),
        )
        .route("/equipment/export", get(export::export_equipment))
        .route("/equipment/scan", post(equipment::scan_equipment))
        .route(
            "/equipment/:id",
            get(equipment::get_equipment)
                .put(equipment::update_equipment)
                .delete(equipment::delete_equipment),
        )
        .route("/equipment/:id/location", put(equipment::move_equipment))
        .route("/equipment/:id/qrcode", get(equipment::equipment_qrcode))
        // Dashboard
        .route("/stats", get(stats::get_stats))
        .route("/stats/activity", get(stats::get_activity))
        .route("/options", get(stats::get_options))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
