//! Repository layer: the equipment collection behind a storage trait

pub mod equipment;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::equipment::{CreateEquipment, Equipment, UpdateEquipment},
};

/// Operations the inventory needs from its backing store.
///
/// Identifiers and `last_updated` timestamps are assigned by the store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EquipmentStore: Send + Sync {
    /// Read the whole collection
    async fn list(&self) -> AppResult<Vec<Equipment>>;

    async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment>;

    /// Partial update; returns the stored record
    async fn update(&self, id: &str, data: &UpdateEquipment) -> AppResult<Equipment>;

    async fn delete(&self, id: &str) -> AppResult<()>;

    /// Cheap round-trip used by the readiness probe
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding the configured store
#[derive(Clone)]
pub struct Repository {
    pub equipment: Arc<dyn EquipmentStore>,
}

impl Repository {
    /// Repository backed by PostgreSQL
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        Self::with_store(Arc::new(equipment::PgEquipmentStore::new(pool)))
    }

    /// Repository backed by process memory
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(memory::MemoryEquipmentStore::default()))
    }

    pub fn with_store(store: Arc<dyn EquipmentStore>) -> Self {
        Self { equipment: store }
    }
}
