//! Data models for the equipment inventory

pub mod enums;
pub mod equipment;

// Re-export commonly used types
pub use enums::{Category, EnumOption, EquipmentState, Location};
pub use equipment::{CreateEquipment, Equipment, EquipmentFilter, MoveEquipment, UpdateEquipment};
