//! Route reconciliation
//!
//! Given the routes, drivers and interest tables, decides for one driver
//! which routes are theirs, which are open to claim, and which of the open
//! ones they already asked for. Everything here is a pure function of its
//! inputs; fetching and caching happen elsewhere.

use serde::Serialize;

use routeassist_types::{SourceError, TableKind};

use super::columns;
use super::dates::{parse_date, parse_datetime};
use crate::model::{DriverRecord, DriverRoster, InterestRecord, RawTable, RouteRecord};

/// Assignment cells that mean "nobody"
const UNASSIGNED_SENTINELS: [&str; 3] = ["nan", "-", "none"];

/// Normalize an assignment cell: sentinels and blanks become `""`
pub fn normalize_assignment(value: Option<&str>) -> String {
    let trimmed = value.unwrap_or("").trim();
    if UNASSIGNED_SENTINELS
        .iter()
        .any(|s| trimmed.eq_ignore_ascii_case(s))
    {
        String::new()
    } else {
        trimmed.to_string()
    }
}

fn required(table: &RawTable, kind: TableKind, aliases: &[&str]) -> Result<usize, SourceError> {
    table.column(aliases).ok_or_else(|| SourceError::MissingColumn {
        table: kind,
        column: aliases[0].to_string(),
    })
}

fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Turn raw route rows into records, keeping every row in input order
pub fn normalize_routes(raw: &RawTable) -> Result<Vec<RouteRecord>, SourceError> {
    if raw.headers.is_empty() || raw.is_empty() {
        return Err(SourceError::Empty(TableKind::Routes));
    }

    let id = required(raw, TableKind::Routes, columns::ID)?;
    let route = required(raw, TableKind::Routes, columns::ROUTE)?;
    let city = required(raw, TableKind::Routes, columns::CITY)?;
    let neighborhood = required(raw, TableKind::Routes, columns::NEIGHBORHOOD)?;
    let date = required(raw, TableKind::Routes, columns::DISPATCH_DATE)?;
    let vehicle = raw.column(columns::VEHICLE_TYPE);
    let plate = raw.column(columns::PLATE);

    let records = raw
        .rows
        .iter()
        .map(|row| RouteRecord {
            route_code: row[route].trim().to_string(),
            city: row[city].trim().to_string(),
            neighborhood: row[neighborhood].trim().to_string(),
            vehicle_type: optional_text(RawTable::cell(row, vehicle)),
            plate: optional_text(RawTable::cell(row, plate)),
            dispatch_date: parse_date(&row[date]),
            assigned_driver_id: normalize_assignment(Some(row[id].as_str())),
        })
        .collect();

    Ok(records)
}

/// Build the roster of valid driver ids.
///
/// An empty roster is an outage, not a list of zero drivers: it would
/// reject everyone.
pub fn normalize_drivers(raw: &RawTable) -> Result<DriverRoster, SourceError> {
    if raw.headers.is_empty() {
        return Err(SourceError::Empty(TableKind::Drivers));
    }
    let id = required(raw, TableKind::Drivers, columns::ID)?;
    let name = raw.column(columns::DRIVER_NAME);

    let roster = DriverRoster::from_records(raw.rows.iter().filter_map(|row| {
        let driver_id = row[id].trim();
        if driver_id.is_empty() {
            return None;
        }
        Some(DriverRecord {
            driver_id: driver_id.to_string(),
            name: RawTable::cell(row, name).unwrap_or("").trim().to_string(),
        })
    }));

    if roster.is_empty() {
        return Err(SourceError::Empty(TableKind::Drivers));
    }
    Ok(roster)
}

/// Read the interest log. Zero rows is a valid log.
pub fn normalize_interest(raw: &RawTable) -> Result<Vec<InterestRecord>, SourceError> {
    if raw.headers.is_empty() {
        return Ok(Vec::new());
    }
    let id = required(raw, TableKind::Interest, columns::ID)?;
    let route = required(raw, TableKind::Interest, columns::INTEREST_ROUTE)?;
    let date = required(raw, TableKind::Interest, columns::DISPATCH_DATE)?;
    let submitted = raw.column(columns::INTEREST_TIMESTAMP);

    Ok(raw
        .rows
        .iter()
        .map(|row| InterestRecord {
            driver_id: row[id].trim().to_string(),
            route_code: row[route].trim().to_string(),
            dispatch_date: parse_date(&row[date]),
            submitted_at: RawTable::cell(row, submitted).and_then(parse_datetime),
        })
        .collect())
}

pub fn validate_driver(driver_id: &str, drivers: &DriverRoster) -> bool {
    let driver_id = driver_id.trim();
    !driver_id.is_empty() && drivers.contains(driver_id)
}

/// Routes split for one driver
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoutePartition {
    pub assigned: Vec<RouteRecord>,
    pub available: Vec<RouteRecord>,
}

/// Split routes into this driver's own and the unassigned ones.
///
/// Routes assigned to someone else land in neither list.
pub fn partition_routes(routes: &[RouteRecord], driver_id: &str) -> RoutePartition {
    let driver_id = driver_id.trim();
    let mut partition = RoutePartition::default();
    for route in routes {
        if route.is_available() {
            partition.available.push(route.clone());
        } else if !driver_id.is_empty() && route.assigned_driver_id == driver_id {
            partition.assigned.push(route.clone());
        }
    }
    partition
}

pub fn has_expressed_interest(
    interest_log: &[InterestRecord],
    driver_id: &str,
    route: &RouteRecord,
) -> bool {
    let driver_id = driver_id.trim();
    interest_log.iter().any(|record| {
        record.driver_id == driver_id
            && record.route_code == route.route_code
            && record.dispatch_date == route.dispatch_date
    })
}

/// Number of distinct drivers interested in a route
pub fn interest_count(interest_log: &[InterestRecord], route: &RouteRecord) -> usize {
    let mut drivers: Vec<&str> = interest_log
        .iter()
        .filter(|r| r.route_code == route.route_code && r.dispatch_date == route.dispatch_date)
        .map(|r| r.driver_id.as_str())
        .collect();
    drivers.sort_unstable();
    drivers.dedup();
    drivers.len()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityGroup<T> {
    pub city: String,
    pub routes: Vec<T>,
}

/// Group by exact city string, cities in first-seen order
pub fn group_available_by_city<T, F>(available: Vec<T>, city_of: F) -> Vec<CityGroup<T>>
where
    F: Fn(&T) -> &str,
{
    let mut groups: Vec<CityGroup<T>> = Vec::new();
    for item in available {
        match groups.iter().position(|g| g.city == city_of(&item)) {
            Some(idx) => groups[idx].routes.push(item),
            None => {
                let city = city_of(&item).to_string();
                groups.push(CityGroup {
                    city,
                    routes: vec![item],
                });
            }
        }
    }
    groups
}

/// An open route plus whether the queried driver already asked for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailableRoute {
    #[serde(flatten)]
    pub route: RouteRecord,
    pub interested: bool,
    /// Pre-filled form link, attached by the caller when a form is configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_link: Option<String>,
}

/// Everything one driver gets to see
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriverView {
    pub driver_id: String,
    pub driver_name: Option<String>,
    pub assigned: Vec<RouteRecord>,
    pub available: Vec<CityGroup<AvailableRoute>>,
}

impl DriverView {
    pub fn available_count(&self) -> usize {
        self.available.iter().map(|g| g.routes.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    UnknownDriver,
    Known(DriverView),
}

/// Run the whole decision procedure for one driver.
///
/// The roster check comes first; an unknown id gets nothing computed.
pub fn reconcile(
    routes: &[RouteRecord],
    drivers: &DriverRoster,
    interest_log: &[InterestRecord],
    driver_id: &str,
) -> Reconciliation {
    if !validate_driver(driver_id, drivers) {
        tracing::debug!(driver_id, "driver not in roster");
        return Reconciliation::UnknownDriver;
    }
    let driver_id = driver_id.trim();
    let partition = partition_routes(routes, driver_id);

    let available = partition
        .available
        .into_iter()
        .map(|route| AvailableRoute {
            interested: has_expressed_interest(interest_log, driver_id, &route),
            route,
            form_link: None,
        })
        .collect();

    Reconciliation::Known(DriverView {
        driver_id: driver_id.to_string(),
        driver_name: drivers
            .name_of(driver_id)
            .filter(|n| !n.is_empty())
            .map(str::to_string),
        assigned: partition.assigned,
        available: group_available_by_city(available, |r: &AvailableRoute| r.route.city.as_str()),
    })
}
