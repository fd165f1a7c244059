//! Dashboard and activity statistics over the working copy

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{
    enums::{Category, EquipmentState, Location},
    equipment::Equipment,
};

use super::equipment::EquipmentService;

#[derive(Debug, Serialize, ToSchema)]
pub struct StatEntry {
    /// Slug of the bucket
    pub key: String,
    /// Label
    pub label: String,
    /// Number of items in the bucket
    pub value: i64,
}

/// Chart data for the dashboard
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    /// Number of item records
    pub total_items: i64,
    /// Sum of quantities
    pub total_units: i64,
    pub by_location: Vec<StatEntry>,
    pub by_category: Vec<StatEntry>,
    pub by_state: Vec<StatEntry>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActivityItem {
    pub id: String,
    pub name: String,
    pub location: Location,
    pub category: Category,
}

/// Items whose last update fell on one day
#[derive(Debug, Serialize, ToSchema)]
pub struct ActivityDay {
    pub date: NaiveDate,
    pub count: i64,
    pub items: Vec<ActivityItem>,
}

#[derive(Clone)]
pub struct StatsService {
    equipment: EquipmentService,
}

impl StatsService {
    pub fn new(equipment: EquipmentService) -> Self {
        Self { equipment }
    }

    pub async fn dashboard(&self) -> DashboardStats {
        dashboard(&self.equipment.all().await)
    }

    pub async fn activity(&self, start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Vec<ActivityDay> {
        activity(&self.equipment.updated_between(start_date, end_date).await)
    }
}

/// Counts per fixed-list member, zero buckets included
pub fn dashboard(items: &[Equipment]) -> DashboardStats {
    fn count<T: Copy + PartialEq>(
        items: &[Equipment],
        all: &[T],
        key: impl Fn(&Equipment) -> T,
        describe: impl Fn(&T) -> (&'static str, &'static str),
    ) -> Vec<StatEntry> {
        all.iter()
            .map(|bucket| {
                let (slug, label) = describe(bucket);
                StatEntry {
                    key: slug.to_string(),
                    label: label.to_string(),
                    value: items.iter().filter(|item| key(*item) == *bucket).count() as i64,
                }
            })
            .collect()
    }

    DashboardStats {
        total_items: items.len() as i64,
        total_units: items.iter().map(|item| item.quantity as i64).sum(),
        by_location: count(items, Location::ALL, |i| i.location, |l| (l.as_str(), l.label())),
        by_category: count(items, Category::ALL, |i| i.category, |c| (c.as_str(), c.label())),
        by_state: count(items, EquipmentState::ALL, |i| i.state, |s| (s.as_str(), s.label())),
    }
}

/// Group by UTC day of `last_updated`, oldest day first
pub fn activity(items: &[Equipment]) -> Vec<ActivityDay> {
    let mut days: BTreeMap<NaiveDate, Vec<ActivityItem>> = BTreeMap::new();
    for item in items {
        days.entry(item.last_updated.date_naive())
            .or_default()
            .push(ActivityItem {
                id: item.id.clone(),
                name: item.name.clone(),
                location: item.location,
                category: item.category,
            });
    }

    days.into_iter()
        .map(|(date, items)| ActivityDay {
            date,
            count: items.len() as i64,
            items,
        })
        .collect()
}
