//! Inventory export endpoint

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{error::AppResult, models::equipment::EquipmentFilter, services::export::ExportFormat};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExportQuery {
    /// xlsx, csv or pdf (server default when absent)
    #[param(value_type = Option<String>)]
    pub format: Option<ExportFormat>,
}

/// Download the filtered inventory
#[utoipa::path(
    get,
    path = "/equipment/export",
    tag = "equipment",
    params(ExportQuery, EquipmentFilter),
    responses(
        (status = 200, description = "Exported file", content_type = "application/octet-stream", body = Vec<u8>),
        (status = 500, description = "Export failed")
    )
)]
pub async fn export_equipment(
    State(state): State<crate::AppState>,
    Query(options): Query<ExportQuery>,
    Query(filter): Query<EquipmentFilter>,
) -> AppResult<impl IntoResponse> {
    let items = state.services.equipment.list(&filter).await;
    let file = state
        .services
        .export
        .export(&items, filter.location, options.format)?;

    Ok((
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.file_name),
            ),
        ],
        file.bytes,
    ))
}
