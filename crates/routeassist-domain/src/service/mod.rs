//! Domain services

pub mod admin_gate;
pub mod columns;
pub mod dates;
pub mod reconciliation;

pub use admin_gate::{apply_admin_action, AdminAction, CredentialTable, GateOutcome};
pub use reconciliation::{
    group_available_by_city, has_expressed_interest, interest_count, normalize_drivers,
    normalize_interest, normalize_routes, partition_routes, reconcile, validate_driver,
    AvailableRoute, CityGroup, DriverView, Reconciliation, RoutePartition,
};
