//! Interest log rows

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::RouteRecord;

/// A recorded expression of interest, as read back from the log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestRecord {
    pub driver_id: String,
    pub route_code: String,
    pub dispatch_date: Option<NaiveDate>,
    pub submitted_at: Option<NaiveDateTime>,
}

/// One interest submission as written to a sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestSubmission {
    pub submission_id: Uuid,
    pub driver_id: String,
    pub route_code: String,
    pub city: String,
    pub neighborhood: String,
    #[serde(default)]
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub plate: Option<String>,
    #[serde(default)]
    pub dispatch_date: Option<NaiveDate>,
    pub submitted_at: DateTime<Utc>,
}

impl InterestSubmission {
    pub fn for_route(driver_id: &str, route: &RouteRecord, submitted_at: DateTime<Utc>) -> Self {
        Self {
            submission_id: Uuid::new_v4(),
            driver_id: driver_id.trim().to_string(),
            route_code: route.route_code.clone(),
            city: route.city.clone(),
            neighborhood: route.neighborhood.clone(),
            vehicle_type: route.vehicle_type.clone(),
            plate: route.plate.clone(),
            dispatch_date: route.dispatch_date,
            submitted_at,
        }
    }
}

impl From<&InterestSubmission> for InterestRecord {
    fn from(submission: &InterestSubmission) -> Self {
        Self {
            driver_id: submission.driver_id.clone(),
            route_code: submission.route_code.clone(),
            dispatch_date: submission.dispatch_date,
            submitted_at: Some(submission.submitted_at.naive_utc()),
        }
    }
}
