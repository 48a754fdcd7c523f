//! Table sources: local files and HTTP(S) exports, CSV or XLSX

use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;

use routeassist_domain::model::RawTable;
use routeassist_domain::repository::TableSource;
use routeassist_types::{SourceError, TableKind};

use crate::csv_table::parse_bytes;
use crate::xlsx_table::{is_xlsx, parse_xlsx};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Parse an export, picking XLSX by zip signature or location, else CSV
pub fn parse_export(table: TableKind, location: &str, bytes: &[u8]) -> Result<RawTable, SourceError> {
    if is_xlsx(location, bytes) {
        parse_xlsx(table, bytes)
    } else {
        parse_bytes(table, bytes)
    }
}

/// CSV file on local disk
pub struct FileTableSource {
    path: PathBuf,
    location: String,
}

impl FileTableSource {
    pub fn new(path: PathBuf) -> Self {
        let location = path.display().to_string();
        Self { path, location }
    }
}

impl TableSource for FileTableSource {
    fn location(&self) -> &str {
        &self.location
    }

    fn fetch(&self, table: TableKind) -> Result<RawTable, SourceError> {
        let bytes = std::fs::read(&self.path).map_err(|e| SourceError::Fetch {
            table,
            location: self.location.clone(),
            reason: e.to_string(),
        })?;
        parse_export(table, &self.location, &bytes)
    }
}

/// CSV export served over HTTP (e.g. a published sheet with `format=csv`)
pub struct HttpTableSource {
    url: String,
    client: Client,
}

impl HttpTableSource {
    /// `table` only labels a client construction failure
    pub fn new(table: TableKind, url: impl Into<String>) -> Result<Self, SourceError> {
        let url = url.into();
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| SourceError::Fetch {
                table,
                location: url.clone(),
                reason: format!("failed to build HTTP client: {}", e),
            })?;
        Ok(Self { url, client })
    }
}

impl TableSource for HttpTableSource {
    fn location(&self) -> &str {
        &self.url
    }

    fn fetch(&self, table: TableKind) -> Result<RawTable, SourceError> {
        let fetch_err = |reason: String| SourceError::Fetch {
            table,
            location: self.url.clone(),
            reason,
        };

        tracing::debug!(%table, url = %self.url, "fetching table");
        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| fetch_err(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_err(format!("HTTP {}", status)));
        }

        let bytes = response.bytes().map_err(|e| fetch_err(e.to_string()))?;
        parse_export(table, &self.url, &bytes)
    }
}

pub fn is_remote(location: &str) -> bool {
    let lower = location.trim().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Pick a source implementation from a configured location
pub fn open_source(table: TableKind, location: &str) -> Result<Box<dyn TableSource>, SourceError> {
    let location = location.trim();
    if is_remote(location) {
        Ok(Box::new(HttpTableSource::new(table, location)?))
    } else {
        Ok(Box::new(FileTableSource::new(PathBuf::from(location))))
    }
}
