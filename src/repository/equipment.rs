//! PostgreSQL equipment store

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::EquipmentStore;
use crate::{
    error::{AppError, AppResult},
    models::equipment::{CreateEquipment, Equipment, UpdateEquipment},
};

const COLUMNS: &str = "id, name, model, serial_number, inventory_number, quantity, \
                       category, location, state, notes, last_updated";

#[derive(Clone)]
pub struct PgEquipmentStore {
    pool: Pool<Postgres>,
}

impl PgEquipmentStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EquipmentStore for PgEquipmentStore {
    async fn list(&self) -> AppResult<Vec<Equipment>> {
        let rows = sqlx::query_as::<_, Equipment>(&format!(
            "SELECT {} FROM equipment ORDER BY seq",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        let row = sqlx::query_as::<_, Equipment>(&format!(
            r#"
            INSERT INTO equipment
                (name, model, serial_number, inventory_number, quantity, category, location, state, notes, last_updated)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW())
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(&data.name)
        .bind(&data.model)
        .bind(&data.serial_number)
        .bind(&data.inventory_number)
        .bind(data.quantity)
        .bind(data.category)
        .bind(data.location)
        .bind(data.state)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: &str, data: &UpdateEquipment) -> AppResult<Equipment> {
        let mut sets = vec!["last_updated = NOW()".to_string()];
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.model, "model");
        add_field!(data.serial_number, "serial_number");
        add_field!(data.inventory_number, "inventory_number");
        add_field!(data.quantity, "quantity");
        add_field!(data.category, "category");
        add_field!(data.location, "location");
        add_field!(data.state, "state");
        add_field!(data.notes, "notes");

        let query = format!(
            "UPDATE equipment SET {} WHERE id = ${} RETURNING {}",
            sets.join(", "),
            idx,
            COLUMNS
        );

        let mut builder = sqlx::query_as::<_, Equipment>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.model);
        bind_field!(data.serial_number);
        bind_field!(data.inventory_number);
        bind_field!(data.quantity);
        bind_field!(data.category);
        bind_field!(data.location);
        bind_field!(data.state);
        bind_field!(data.notes);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment {} not found", id)));
        }
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
