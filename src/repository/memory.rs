//! In-process equipment store for development and tests

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::EquipmentStore;
use crate::{
    error::{AppError, AppResult},
    models::equipment::{CreateEquipment, Equipment, UpdateEquipment},
};

/// Keeps records in insertion order
#[derive(Default)]
pub struct MemoryEquipmentStore {
    rows: RwLock<Vec<Equipment>>,
}

#[async_trait]
impl EquipmentStore for MemoryEquipmentStore {
    async fn list(&self) -> AppResult<Vec<Equipment>> {
        Ok(self.rows.read().await.clone())
    }

    async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        let row = Equipment {
            id: Uuid::new_v4().to_string(),
            name: data.name.clone(),
            model: data.model.clone(),
            serial_number: data.serial_number.clone(),
            inventory_number: data.inventory_number.clone(),
            quantity: data.quantity,
            category: data.category,
            location: data.location,
            state: data.state,
            notes: data.notes.clone(),
            last_updated: Utc::now(),
        };
        self.rows.write().await.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: &str, data: &UpdateEquipment) -> AppResult<Equipment> {
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))?;
        row.apply(data);
        row.last_updated = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| row.id != id);
        if rows.len() == before {
            return Err(AppError::NotFound(format!("Equipment {} not found", id)));
        }
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::{Category, EquipmentState, Location};

    fn new_item() -> CreateEquipment {
        CreateEquipment {
            name: "DJI Mini".into(),
            model: "Mini 3".into(),
            serial_number: "DJ-77".into(),
            inventory_number: "INV-9".into(),
            quantity: 1,
            category: Category::Drones,
            location: Location::TecEdu,
            state: EquipmentState::Available,
            notes: String::new(),
        }
    }

    #[tokio::test]
    async fn assigns_distinct_ids() {
        let store = MemoryEquipmentStore::default();
        let a = store.create(&new_item()).await.unwrap();
        let b = store.create(&new_item()).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_refreshes_timestamp() {
        let store = MemoryEquipmentStore::default();
        let created = store.create(&new_item()).await.unwrap();
        let updated = store
            .update(&created.id, &UpdateEquipment { quantity: Some(3), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(updated.quantity, 3);
        assert_eq!(updated.name, created.name);
        assert!(updated.last_updated >= created.last_updated);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let store = MemoryEquipmentStore::default();
        assert!(matches!(store.delete("missing").await, Err(AppError::NotFound(_))));
        assert!(matches!(
            store.update("missing", &UpdateEquipment::default()).await,
            Err(AppError::NotFound(_))
        ));
    }
}
