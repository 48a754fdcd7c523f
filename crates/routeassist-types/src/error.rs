//! Error types for routeassist

use thiserror::Error;

use crate::TableKind;

/// A required source table could not be used.
///
/// Every variant is fatal for the current request: callers halt instead of
/// rendering a partial table.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{0} table is empty")]
    Empty(TableKind),

    #[error("{table} table is missing required column '{column}'")]
    MissingColumn { table: TableKind, column: String },

    #[error("failed to fetch {table} table from {location}: {reason}")]
    Fetch {
        table: TableKind,
        location: String,
        reason: String,
    },

    #[error("failed to parse {table} table: {reason}")]
    Parse { table: TableKind, reason: String },

    #[error("no location configured for {0} table")]
    NotConfigured(TableKind),
}

impl SourceError {
    pub fn table(&self) -> TableKind {
        match self {
            SourceError::Empty(table) | SourceError::NotConfigured(table) => *table,
            SourceError::MissingColumn { table, .. }
            | SourceError::Fetch { table, .. }
            | SourceError::Parse { table, .. } => *table,
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration value: {0}")]
    Invalid(String),
}

/// Cache-related errors
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache is disabled. Enable with: routeassist config --set-cache true")]
    Disabled,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data unavailable: {0}")]
    DataUnavailable(#[from] SourceError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Interest sink error: {0}")]
    Sink(String),

    #[error("Excel export error: {0}")]
    Excel(String),
}

pub type Result<T> = std::result::Result<T, Error>;
