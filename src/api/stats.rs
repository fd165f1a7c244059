//! Statistics endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::{AppError, AppResult},
    models::enums::{Category, EnumOption, EquipmentState, Location},
    services::stats::{ActivityDay, DashboardStats},
};

/// Dashboard chart data
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Counts by location, category and state", body = DashboardStats)
    )
)]
pub async fn get_stats(State(state): State<crate::AppState>) -> AppResult<Json<DashboardStats>> {
    Ok(Json(state.services.stats.dashboard().await))
}

/// Query parameters for the activity calendar
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ActivityQuery {
    /// First day, inclusive (YYYY-MM-DD)
    pub start_date: Option<NaiveDate>,
    /// Last day, inclusive (YYYY-MM-DD)
    pub end_date: Option<NaiveDate>,
}

/// Update activity grouped by day
#[utoipa::path(
    get,
    path = "/stats/activity",
    tag = "stats",
    params(ActivityQuery),
    responses(
        (status = 200, description = "Items grouped by day of last update", body = Vec<ActivityDay>),
        (status = 400, description = "Start date after end date")
    )
)]
pub async fn get_activity(
    State(state): State<crate::AppState>,
    Query(query): Query<ActivityQuery>,
) -> AppResult<Json<Vec<ActivityDay>>> {
    if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
        if start > end {
            return Err(AppError::BadRequest("start_date is after end_date".to_string()));
        }
    }
    let days = state
        .services
        .stats
        .activity(query.start_date, query.end_date)
        .await;
    Ok(Json(days))
}

/// Fixed lists for forms and filters
#[derive(Serialize, ToSchema)]
pub struct OptionsResponse {
    pub locations: Vec<EnumOption>,
    pub categories: Vec<EnumOption>,
    pub states: Vec<EnumOption>,
}

/// Locations, categories and states
#[utoipa::path(
    get,
    path = "/options",
    tag = "stats",
    responses(
        (status = 200, description = "Fixed classification lists", body = OptionsResponse)
    )
)]
pub async fn get_options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        locations: Location::options(),
        categories: Category::options(),
        states: EquipmentState::options(),
    })
}
