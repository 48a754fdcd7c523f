//! Persistence implementations
//!
//! File-based implementations of the admin document and interest log ports.

mod file_admin_config_store;
mod file_interest_log;

pub use file_admin_config_store::FileAdminConfigStore;
pub use file_interest_log::FileInterestLog;
