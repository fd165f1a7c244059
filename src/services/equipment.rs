//! Equipment service
//!
//! Holds the working copy of the inventory: loaded once from the store,
//! then patched after every successful write. Reads and filtering never
//! hit the store. Writes hold the copy's write lock across the store call,
//! so the copy sees them in the order the store applied them.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::Location,
        equipment::{CreateEquipment, Equipment, EquipmentFilter, UpdateEquipment},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
    items: Arc<RwLock<Vec<Equipment>>>,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self {
            repository,
            items: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Replace the working copy with the store's current contents
    pub async fn load(&self) -> AppResult<usize> {
        let rows = self.repository.equipment.list().await.map_err(|e| {
            tracing::error!("Error loading equipment: {}", e);
            e
        })?;
        let count = rows.len();
        *self.items.write().await = rows;
        tracing::info!(count, "Inventory loaded");
        Ok(count)
    }

    /// Every item, in store order
    pub async fn all(&self) -> Vec<Equipment> {
        self.items.read().await.clone()
    }

    pub async fn list(&self, filter: &EquipmentFilter) -> Vec<Equipment> {
        filter.apply(self.items.read().await.iter())
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Equipment> {
        self.items
            .read()
            .await
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    pub async fn create(&self, data: CreateEquipment) -> AppResult<Equipment> {
        let data = data.normalized();
        data.validate()?;

        let mut items = self.items.write().await;
        let created = self.repository.equipment.create(&data).await.map_err(|e| {
            tracing::error!("Error adding equipment: {}", e);
            e
        })?;
        items.push(created.clone());
        tracing::info!(id = %created.id, name = %created.name, "Equipment added");
        Ok(created)
    }

    pub async fn update(&self, id: &str, data: UpdateEquipment) -> AppResult<Equipment> {
        let data = data.normalized();
        data.validate()?;

        let mut items = self.items.write().await;
        let updated = self.repository.equipment.update(id, &data).await.map_err(|e| {
            tracing::error!("Error updating equipment {}: {}", id, e);
            e
        })?;
        replace(&mut items, &updated);
        tracing::info!(id, "Equipment updated");
        Ok(updated)
    }

    /// Relocate an item; only the location changes
    pub async fn move_to(&self, id: &str, location: Location) -> AppResult<Equipment> {
        let mut items = self.items.write().await;
        let moved = self
            .repository
            .equipment
            .update(id, &UpdateEquipment::location_only(location))
            .await
            .map_err(|e| {
                tracing::error!("Error moving equipment {}: {}", id, e);
                e
            })?;
        replace(&mut items, &moved);
        tracing::info!(id, location = location.as_str(), "Equipment moved");
        Ok(moved)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let mut items = self.items.write().await;
        self.repository.equipment.delete(id).await.map_err(|e| {
            tracing::error!("Error deleting equipment {}: {}", id, e);
            e
        })?;
        items.retain(|item| item.id != id);
        tracing::info!(id, "Equipment deleted");
        Ok(())
    }

    /// Items last updated within the inclusive date bounds (UTC days)
    pub async fn updated_between(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Vec<Equipment> {
        self.items
            .read()
            .await
            .iter()
            .filter(|item| {
                let day = item.last_updated.date_naive();
                start_date.map_or(true, |s| day >= s) && end_date.map_or(true, |e| day <= e)
            })
            .cloned()
            .collect()
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.repository.equipment.ping().await
    }
}

/// Overwrite the cached copy of `record`; unknown ids are left out
fn replace(items: &mut [Equipment], record: &Equipment) {
    if let Some(slot) = items.iter_mut().find(|item| item.id == record.id) {
        *slot = record.clone();
    }
}
