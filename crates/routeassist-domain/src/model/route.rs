//! Route assignment rows

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the routes table after normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRecord {
    pub route_code: String,
    pub city: String,
    pub neighborhood: String,
    pub vehicle_type: Option<String>,
    pub plate: Option<String>,
    /// `None` when the source cell was empty or unparseable
    pub dispatch_date: Option<NaiveDate>,
    /// Empty string means unassigned
    pub assigned_driver_id: String,
}

impl RouteRecord {
    pub fn is_available(&self) -> bool {
        self.assigned_driver_id.is_empty()
    }

    pub fn key(&self) -> RouteKey {
        RouteKey {
            route_code: self.route_code.clone(),
            dispatch_date: self.dispatch_date,
        }
    }

    /// Date as shown to drivers, `-` when unparsed
    pub fn date_label(&self) -> String {
        crate::service::dates::format_date(self.dispatch_date)
    }
}

/// Natural key used to match interest rows against routes.
///
/// Route codes repeat across dates, so the code alone is not enough.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteKey {
    pub route_code: String,
    pub dispatch_date: Option<NaiveDate>,
}
