//! Driver lookup

use routeassist_domain::service::{
    normalize_drivers, normalize_routes, reconcile, validate_driver, DriverView, Reconciliation,
};
use routeassist_types::{Result, TableKind};

use super::load_interest;
use crate::repository::AppContext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Window closed by an admin; nothing was fetched
    ConsultationClosed,
    UnknownDriver,
    Found(DriverView),
}

/// Everything a driver sees after typing their ID
pub fn lookup_driver(ctx: &AppContext, driver_id: &str) -> Result<LookupOutcome> {
    let admin = ctx.admin.store.load()?;
    if !admin.is_open() {
        return Ok(LookupOutcome::ConsultationClosed);
    }

    let drivers = normalize_drivers(&ctx.gateway.fetch(TableKind::Drivers)?)?;
    if !validate_driver(driver_id, &drivers) {
        return Ok(LookupOutcome::UnknownDriver);
    }

    let routes = normalize_routes(&ctx.gateway.fetch(TableKind::Routes)?)?;
    let interest = load_interest(ctx)?;

    match reconcile(&routes, &drivers, &interest, driver_id) {
        Reconciliation::UnknownDriver => Ok(LookupOutcome::UnknownDriver),
        Reconciliation::Known(mut view) => {
            if let Some(form) = &ctx.config.form {
                for group in &mut view.available {
                    for available in &mut group.routes {
                        available.form_link = Some(form.build_link(&view.driver_id, &available.route)?);
                    }
                }
            }
            tracing::debug!(
                driver_id = %view.driver_id,
                assigned = view.assigned.len(),
                available = view.available_count(),
                "lookup complete"
            );
            Ok(LookupOutcome::Found(view))
        }
    }
}
