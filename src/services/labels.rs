//! QR labels for equipment

use qrcode::{render::svg, types::QrError, EcLevel, QrCode};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::equipment::Equipment,
};

use super::equipment::EquipmentService;

/// Content encoded in a label
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LabelPayload {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub serial_number: String,
    #[serde(default)]
    pub inventory_number: String,
}

impl From<&Equipment> for LabelPayload {
    fn from(item: &Equipment) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            model: item.model.clone(),
            serial_number: item.serial_number.clone(),
            inventory_number: item.inventory_number.clone(),
        }
    }
}

#[derive(Clone)]
pub struct LabelService {
    equipment: EquipmentService,
}

impl LabelService {
    pub fn new(equipment: EquipmentService) -> Self {
        Self { equipment }
    }

    /// SVG label for the item with the given id
    pub async fn qr_svg(&self, id: &str) -> AppResult<String> {
        let item = self.equipment.get_by_id(id).await?;
        render_svg(&payload(&item)?)
    }

    /// Current record for a scanned label
    pub async fn resolve(&self, scanned: &str) -> AppResult<Equipment> {
        let id = scanned_id(scanned)?;
        self.equipment.get_by_id(&id).await
    }
}

pub fn payload(item: &Equipment) -> AppResult<String> {
    serde_json::to_string(&LabelPayload::from(item)).map_err(|e| AppError::Internal(e.to_string()))
}

pub fn render_svg(content: &str) -> AppResult<String> {
    let code = QrCode::with_error_correction_level(content.as_bytes(), EcLevel::H).map_err(|e| match e {
        QrError::DataTooLong => AppError::BadRequest(format!(
            "Label content is {} bytes, too long for a QR code",
            content.len()
        )),
        other => AppError::Internal(format!("QR encoding failed: {}", other)),
    })?;
    Ok(code
        .render::<svg::Color>()
        .min_dimensions(128, 128)
        .quiet_zone(true)
        .build())
}

/// Labels carry a JSON payload; older ones carry the bare id
pub fn scanned_id(scanned: &str) -> AppResult<String> {
    let scanned = scanned.trim();
    if scanned.is_empty() {
        return Err(AppError::BadRequest("Empty scan".to_string()));
    }
    if scanned.starts_with('{') {
        let payload: LabelPayload = serde_json::from_str(scanned)
            .map_err(|e| AppError::BadRequest(format!("Unreadable label: {}", e)))?;
        return Ok(payload.id);
    }
    Ok(scanned.to_string())
}
