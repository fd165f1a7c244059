//! Equipment model

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::{Category, EquipmentState, Location};

/// Equipment record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    /// Identifier assigned by the store
    pub id: String,
    pub name: String,
    pub model: String,
    pub serial_number: String,
    pub inventory_number: String,
    /// Number of units (at least 1)
    pub quantity: i32,
    pub category: Category,
    pub location: Location,
    pub state: EquipmentState,
    pub notes: String,
    /// Refreshed by the store on every write
    pub last_updated: DateTime<Utc>,
}

impl Equipment {
    /// Apply a partial update in place. The caller owns the timestamp.
    pub fn apply(&mut self, data: &UpdateEquipment) {
        if let Some(ref v) = data.name {
            self.name = v.clone();
        }
        if let Some(ref v) = data.model {
            self.model = v.clone();
        }
        if let Some(ref v) = data.serial_number {
            self.serial_number = v.clone();
        }
        if let Some(ref v) = data.inventory_number {
            self.inventory_number = v.clone();
        }
        if let Some(v) = data.quantity {
            self.quantity = v;
        }
        if let Some(v) = data.category {
            self.category = v;
        }
        if let Some(v) = data.location {
            self.location = v;
        }
        if let Some(v) = data.state {
            self.state = v;
        }
        if let Some(ref v) = data.notes {
            self.notes = v.clone();
        }
    }
}

/// Create equipment request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(length(min = 1, max = 200, message = "Name must be 1 to 200 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "Model must be 1 to 100 characters"))]
    pub model: String,
    #[validate(length(min = 1, max = 100, message = "Serial number must be 1 to 100 characters"))]
    pub serial_number: String,
    #[validate(length(min = 1, max = 100, message = "Inventory number must be 1 to 100 characters"))]
    pub inventory_number: String,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
    pub category: Category,
    pub location: Location,
    #[serde(default)]
    pub state: EquipmentState,
    #[serde(default)]
    pub notes: String,
}

impl CreateEquipment {
    /// Trim free-text fields before validation
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.model = self.model.trim().to_string();
        self.serial_number = self.serial_number.trim().to_string();
        self.inventory_number = self.inventory_number.trim().to_string();
        self.notes = self.notes.trim().to_string();
        self
    }
}

/// Update equipment request; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipment {
    #[validate(length(min = 1, max = 200, message = "Name must be 1 to 200 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Model must be 1 to 100 characters"))]
    pub model: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Serial number must be 1 to 100 characters"))]
    pub serial_number: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Inventory number must be 1 to 100 characters"))]
    pub inventory_number: Option<String>,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: Option<i32>,
    pub category: Option<Category>,
    pub location: Option<Location>,
    pub state: Option<EquipmentState>,
    pub notes: Option<String>,
}

impl UpdateEquipment {
    pub fn normalized(mut self) -> Self {
        for field in [
            &mut self.name,
            &mut self.model,
            &mut self.serial_number,
            &mut self.inventory_number,
            &mut self.notes,
        ] {
            if let Some(v) = field.as_mut() {
                *v = v.trim().to_string();
            }
        }
        self
    }

    /// Relocation touches nothing but the location
    pub fn location_only(location: Location) -> Self {
        Self {
            location: Some(location),
            ..Default::default()
        }
    }
}

/// Move equipment request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MoveEquipment {
    pub location: Location,
}

/// Inventory filter. Enum constraints accept `all` or an empty value as "no constraint".
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EquipmentFilter {
    /// Case-insensitive search over name, model, serial number and inventory number
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "constraint")]
    #[param(value_type = Option<String>)]
    pub location: Option<Location>,
    #[serde(default, deserialize_with = "constraint")]
    #[param(value_type = Option<String>)]
    pub category: Option<Category>,
    #[serde(default, deserialize_with = "constraint")]
    #[param(value_type = Option<String>)]
    pub state: Option<EquipmentState>,
}

impl EquipmentFilter {
    pub fn matches(&self, item: &Equipment) -> bool {
        let matches_search = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                [
                    &item.name,
                    &item.model,
                    &item.serial_number,
                    &item.inventory_number,
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&term))
            }
        };

        matches_search
            && self.location.map_or(true, |l| item.location == l)
            && self.category.map_or(true, |c| item.category == c)
            && self.state.map_or(true, |s| item.state == s)
    }

    /// Matching items, in input order
    pub fn apply<'a, I>(&self, items: I) -> Vec<Equipment>
    where
        I: IntoIterator<Item = &'a Equipment>,
    {
        items
            .into_iter()
            .filter(|item| self.matches(item))
            .cloned()
            .collect()
    }
}

fn constraint<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr<Err = String>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("all") => Ok(None),
        Some(v) => v.parse().map(Some).map_err(de::Error::custom),
    }
}
