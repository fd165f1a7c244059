//! Business logic services

pub mod equipment;
pub mod export;
pub mod labels;
pub mod stats;

use crate::{config::ExportConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub equipment: equipment::EquipmentService,
    pub export: export::ExportService,
    pub labels: labels::LabelService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services and load the inventory from the store
    pub async fn new(repository: Repository, export_config: &ExportConfig) -> AppResult<Self> {
        let equipment = equipment::EquipmentService::new(repository);
        equipment.load().await?;

        Ok(Self {
            export: export::ExportService::new(export_config),
            labels: labels::LabelService::new(equipment.clone()),
            stats: stats::StatsService::new(equipment.clone()),
            equipment,
        })
    }
}
