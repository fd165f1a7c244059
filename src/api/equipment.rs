//! Equipment API endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::equipment::{CreateEquipment, Equipment, EquipmentFilter, MoveEquipment, UpdateEquipment},
};

/// List equipment matching the filter
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    params(EquipmentFilter),
    responses(
        (status = 200, description = "Equipment list", body = Vec<Equipment>),
        (status = 400, description = "Unknown location, category or state")
    )
)]
pub async fn list_equipment(
    State(state): State<crate::AppState>,
    Query(filter): Query<EquipmentFilter>,
) -> AppResult<Json<Vec<Equipment>>> {
    let equipment = state.services.equipment.list(&filter).await;
    Ok(Json(equipment))
}

/// Get equipment by ID
#[utoipa::path(
    get,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = String, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment details", body = Equipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.get_by_id(&id).await?;
    Ok(Json(equipment))
}

/// Create equipment
#[utoipa::path(
    post,
    path = "/equipment",
    tag = "equipment",
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment created", body = Equipment),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateEquipment>,
) -> AppResult<(StatusCode, Json<Equipment>)> {
    let equipment = state.services.equipment.create(data).await?;
    Ok((StatusCode::CREATED, Json(equipment)))
}

/// Update equipment (partial)
#[utoipa::path(
    put,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = String, Path, description = "Equipment ID")),
    request_body = UpdateEquipment,
    responses(
        (status = 200, description = "Equipment updated", body = Equipment),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn update_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(data): Json<UpdateEquipment>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.update(&id, data).await?;
    Ok(Json(equipment))
}

/// Move equipment to another location
#[utoipa::path(
    put,
    path = "/equipment/{id}/location",
    tag = "equipment",
    params(("id" = String, Path, description = "Equipment ID")),
    request_body = MoveEquipment,
    responses(
        (status = 200, description = "Equipment moved", body = Equipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn move_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    Json(data): Json<MoveEquipment>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.move_to(&id, data.location).await?;
    Ok(Json(equipment))
}

/// Delete equipment
#[utoipa::path(
    delete,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = String, Path, description = "Equipment ID")),
    responses(
        (status = 204, description = "Equipment deleted"),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn delete_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.services.equipment.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// QR label for an item
#[utoipa::path(
    get,
    path = "/equipment/{id}/qrcode",
    tag = "equipment",
    params(("id" = String, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "SVG QR code", content_type = "image/svg+xml", body = String),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn equipment_qrcode(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let svg = state.services.labels.qr_svg(&id).await?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

/// Scanned label content
#[derive(Debug, Deserialize, ToSchema)]
pub struct ScanRequest {
    /// Raw text read from the QR code
    pub content: String,
}

/// Resolve a scanned QR label to its item
#[utoipa::path(
    post,
    path = "/equipment/scan",
    tag = "equipment",
    request_body = ScanRequest,
    responses(
        (status = 200, description = "Scanned equipment", body = Equipment),
        (status = 400, description = "Unreadable label"),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn scan_equipment(
    State(state): State<crate::AppState>,
    Json(data): Json<ScanRequest>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.labels.resolve(&data.content).await?;
    Ok(Json(equipment))
}
