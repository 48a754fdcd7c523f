//! Use cases
//!
//! Each function is one synchronous request: load what it needs through the
//! [`AppContext`](crate::repository::AppContext), decide, and return an
//! outcome. Only unusable source data surfaces as `Err`.

pub mod admin_service;
pub mod interest_service;
pub mod lookup_service;
pub mod report_service;

pub use admin_service::{authenticate, current_status, run_admin_action};
pub use interest_service::{submit_interest, RouteSelector, SubmitOutcome};
pub use lookup_service::{lookup_driver, LookupOutcome};
pub use report_service::{build_availability_report, AvailabilityReport, AvailabilityRow};

use routeassist_domain::model::InterestRecord;
use routeassist_domain::service::normalize_interest;
use routeassist_types::{Result, SourceError, TableKind};

use crate::repository::AppContext;

/// Interest log from the remote table if configured, else from the sink
pub(crate) fn load_interest(ctx: &AppContext) -> Result<Vec<InterestRecord>> {
    if ctx.gateway.has_source(TableKind::Interest) {
        let raw = ctx.gateway.fetch(TableKind::Interest)?;
        return Ok(normalize_interest(&raw)?);
    }
    match ctx.sink.read_back()? {
        Some(records) => Ok(records),
        None => Err(SourceError::NotConfigured(TableKind::Interest).into()),
    }
}
