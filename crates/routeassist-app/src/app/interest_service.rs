//! Interest submission

use chrono::{NaiveDate, Utc};

use routeassist_domain::model::{InterestSubmission, RouteRecord};
use routeassist_domain::service::{
    has_expressed_interest, normalize_drivers, normalize_routes, partition_routes, validate_driver,
};
use routeassist_types::{Result, TableKind};

use super::load_interest;
use crate::repository::AppContext;

/// Which open route a driver is asking for.
///
/// Route codes repeat across dates and cities; the optional fields narrow
/// the match until exactly one route is left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteSelector<'a> {
    pub route_code: &'a str,
    pub dispatch_date: Option<NaiveDate>,
    pub city: Option<&'a str>,
    pub neighborhood: Option<&'a str>,
}

fn same_text(expected: Option<&str>, actual: &str) -> bool {
    match expected.map(str::trim).filter(|e| !e.is_empty()) {
        Some(expected) => expected.to_lowercase() == actual.trim().to_lowercase(),
        None => true,
    }
}

impl<'a> RouteSelector<'a> {
    pub fn code(route_code: &'a str) -> Self {
        Self {
            route_code,
            ..Default::default()
        }
    }

    pub fn on(mut self, dispatch_date: Option<NaiveDate>) -> Self {
        self.dispatch_date = dispatch_date;
        self
    }

    pub fn in_city(mut self, city: Option<&'a str>) -> Self {
        self.city = city;
        self
    }

    pub fn in_neighborhood(mut self, neighborhood: Option<&'a str>) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    pub fn matches(&self, route: &RouteRecord) -> bool {
        route.route_code == self.route_code.trim()
            && (self.dispatch_date.is_none() || route.dispatch_date == self.dispatch_date)
            && same_text(self.city, &route.city)
            && same_text(self.neighborhood, &route.neighborhood)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    ConsultationClosed,
    UnknownDriver,
    /// No unassigned route matches the selector
    RouteNotAvailable,
    /// Several open routes match; the caller must narrow the selector
    Ambiguous(Vec<RouteRecord>),
    AlreadyRegistered(RouteRecord),
    Recorded {
        submission: InterestSubmission,
        form_link: Option<String>,
    },
}

/// Record a driver's interest in one unassigned route.
///
/// Interest is not an allocation: any number of drivers may register for
/// the same route. A driver registering twice gets `AlreadyRegistered`.
pub fn submit_interest(ctx: &AppContext, driver_id: &str, selector: RouteSelector<'_>) -> Result<SubmitOutcome> {
    let admin = ctx.admin.store.load()?;
    if !admin.is_open() {
        return Ok(SubmitOutcome::ConsultationClosed);
    }

    let drivers = normalize_drivers(&ctx.gateway.fetch(TableKind::Drivers)?)?;
    if !validate_driver(driver_id, &drivers) {
        return Ok(SubmitOutcome::UnknownDriver);
    }
    let driver_id = driver_id.trim();

    let routes = normalize_routes(&ctx.gateway.fetch(TableKind::Routes)?)?;
    let mut candidates: Vec<RouteRecord> = Vec::new();
    for route in partition_routes(&routes, driver_id).available {
        // the same route listed twice is still one route
        if selector.matches(&route) && !candidates.contains(&route) {
            candidates.push(route);
        }
    }

    let route = match candidates.len() {
        0 => return Ok(SubmitOutcome::RouteNotAvailable),
        1 => candidates.remove(0),
        _ => return Ok(SubmitOutcome::Ambiguous(candidates)),
    };

    let interest = load_interest(ctx)?;
    if has_expressed_interest(&interest, driver_id, &route) {
        return Ok(SubmitOutcome::AlreadyRegistered(route));
    }

    let submission = InterestSubmission::for_route(driver_id, &route, Utc::now());
    ctx.sink.append(&submission)?;
    tracing::info!(
        driver_id,
        route_code = %route.route_code,
        city = %route.city,
        sink = %ctx.sink.describe(),
        "interest recorded"
    );

    let form_link = match &ctx.config.form {
        Some(form) => Some(form.build_link(driver_id, &route)?),
        None => None,
    };

    Ok(SubmitOutcome::Recorded {
        submission,
        form_link,
    })
}
