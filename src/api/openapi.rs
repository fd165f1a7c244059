//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{equipment, export, health, stats};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Equipment Inventory API",
        version = "1.0.0",
        description = "Audiovisual and IT equipment inventory REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::move_equipment,
        equipment::delete_equipment,
        equipment::equipment_qrcode,
        equipment::scan_equipment,
        export::export_equipment,
        // Stats
        stats::get_stats,
        stats::get_activity,
        stats::get_options,
    ),
    components(
        schemas(
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            crate::models::equipment::MoveEquipment,
            crate::models::enums::Location,
            crate::models::enums::Category,
            crate::models::enums::EquipmentState,
            crate::models::enums::EnumOption,
            equipment::ScanRequest,
            crate::services::export::ExportFormat,
            // Stats
            crate::services::stats::DashboardStats,
            crate::services::stats::StatEntry,
            crate::services::stats::ActivityDay,
            crate::services::stats::ActivityItem,
            stats::OptionsResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "equipment", description = "Equipment management and export"),
        (name = "stats", description = "Dashboard statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_equipment_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/equipment"));
        assert!(doc.paths.paths.contains_key("/equipment/{id}/location"));
        assert!(doc.paths.paths.contains_key("/equipment/export"));
    }
}
