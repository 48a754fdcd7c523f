//! Availability report for admins

use chrono::{DateTime, Utc};
use serde::Serialize;

use routeassist_domain::model::RouteRecord;
use routeassist_domain::service::{group_available_by_city, interest_count, normalize_routes, CityGroup};
use routeassist_types::{Result, TableKind};

use super::load_interest;
use crate::repository::AppContext;

#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityRow {
    #[serde(flatten)]
    pub route: RouteRecord,
    /// Distinct drivers who registered interest
    pub interest_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityReport {
    pub generated_at: DateTime<Utc>,
    pub total_routes: usize,
    pub assigned_routes: usize,
    pub available: Vec<CityGroup<AvailabilityRow>>,
}

impl AvailabilityReport {
    pub fn rows(&self) -> impl Iterator<Item = &AvailabilityRow> {
        self.available.iter().flat_map(|g| g.routes.iter())
    }
}

pub fn build_availability_report(ctx: &AppContext) -> Result<AvailabilityReport> {
    let routes = normalize_routes(&ctx.gateway.fetch(TableKind::Routes)?)?;
    let interest = load_interest(ctx)?;

    let available: Vec<AvailabilityRow> = routes
        .iter()
        .filter(|r| r.is_available())
        .map(|r| AvailabilityRow {
            route: r.clone(),
            interest_count: interest_count(&interest, r),
        })
        .collect();

    Ok(AvailabilityReport {
        generated_at: Utc::now(),
        total_routes: routes.len(),
        assigned_routes: routes.len() - available.len(),
        available: group_available_by_city(available, |row: &AvailabilityRow| row.route.city.as_str()),
    })
}
