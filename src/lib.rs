//! Equipment Inventory
//!
//! REST JSON server for an institution's audiovisual and IT equipment:
//! record items, filter them, chart their distribution, follow update
//! activity and export the inventory as XLSX, CSV or PDF.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
