//! Domain model types

pub mod admin;
pub mod driver;
pub mod interest;
pub mod route;
pub mod table;

pub use admin::{ActionLogEntry, AdminConfig, AdminStatus, AdminTier, DEFAULT_MASTER_PASSWORD};
pub use driver::{DriverRecord, DriverRoster};
pub use interest::{InterestRecord, InterestSubmission};
pub use route::{RouteKey, RouteRecord};
pub use table::RawTable;
