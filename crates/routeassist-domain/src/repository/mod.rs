//! Port traits implemented by the infrastructure layer

use std::time::Duration;

use routeassist_types::{Result, SourceError, TableKind};

use crate::model::{AdminConfig, InterestRecord, InterestSubmission, RawTable};

/// Somewhere a spreadsheet export can be read from
pub trait TableSource {
    /// Human-readable location (URL or path), also used as the cache key
    fn location(&self) -> &str;

    /// Fetch the whole table in one blocking call
    fn fetch(&self, table: TableKind) -> std::result::Result<RawTable, SourceError>;
}

/// Bounded-staleness cache of fetched tables
pub trait TableCache {
    /// Cached table, or `None` when absent or older than `ttl`
    fn get(&self, key: &str, ttl: Duration) -> Result<Option<RawTable>>;

    fn put(&self, key: &str, table: &RawTable) -> Result<()>;

    /// Drop one entry; returns whether anything was removed
    fn invalidate(&self, key: &str) -> Result<bool>;

    /// Drop every entry; returns how many were removed
    fn clear(&self) -> Result<usize>;
}

/// Load/save port for the admin document
pub trait AdminConfigStore {
    /// Load the document, writing defaults on first run
    fn load(&self) -> Result<AdminConfig>;

    /// Rewrite the whole document
    fn save(&self, config: &AdminConfig) -> Result<()>;
}

/// Destination for interest submissions
pub trait InterestSink {
    fn describe(&self) -> String;

    fn append(&self, submission: &InterestSubmission) -> Result<()>;

    /// Interest already recorded by this sink, when it can be read back.
    ///
    /// Write-only sinks return `None` and the interest table source is used
    /// instead.
    fn read_back(&self) -> Result<Option<Vec<InterestRecord>>> {
        Ok(None)
    }
}
