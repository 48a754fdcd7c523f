//! Source tables behind a bounded-staleness cache

use std::collections::HashMap;
use std::time::Duration;

use routeassist_domain::model::RawTable;
use routeassist_domain::repository::{TableCache, TableSource};
use routeassist_types::{Result, SourceError, TableKind};

pub struct DataGateway {
    sources: HashMap<TableKind, Box<dyn TableSource>>,
    cache: Option<Box<dyn TableCache>>,
    ttls: HashMap<TableKind, Duration>,
    force_refresh: bool,
}

impl DataGateway {
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
            cache: None,
            ttls: HashMap::new(),
            force_refresh: false,
        }
    }

    pub fn with_source(mut self, table: TableKind, source: Box<dyn TableSource>) -> Self {
        self.sources.insert(table, source);
        self
    }

    pub fn with_cache(mut self, cache: Box<dyn TableCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_ttl(mut self, table: TableKind, ttl: Duration) -> Self {
        self.ttls.insert(table, ttl);
        self
    }

    /// Ignore cached copies and refetch every table read through this gateway
    pub fn with_force_refresh(mut self, force_refresh: bool) -> Self {
        self.force_refresh = force_refresh;
        self
    }

    pub fn has_source(&self, table: TableKind) -> bool {
        self.sources.contains_key(&table)
    }

    fn cache_key(table: TableKind, source: &dyn TableSource) -> String {
        format!("{}:{}", table, source.location())
    }

    /// Fetch a table, serving a cached copy while it is younger than its TTL
    pub fn fetch(&self, table: TableKind) -> Result<RawTable> {
        let source = self
            .sources
            .get(&table)
            .ok_or(SourceError::NotConfigured(table))?;
        let key = Self::cache_key(table, source.as_ref());

        if let Some(cache) = &self.cache {
            if self.force_refresh {
                cache.invalidate(&key)?;
            } else {
                let ttl = self.ttls.get(&table).copied().unwrap_or(Duration::ZERO);
                if let Some(cached) = cache.get(&key, ttl)? {
                    return Ok(cached);
                }
            }
        }

        let fetched = source.fetch(table)?;
        tracing::debug!(%table, rows = fetched.len(), "fetched from source");

        if let Some(cache) = &self.cache {
            // An empty table is usually an outage; don't pin it for a whole TTL
            if !fetched.is_empty() {
                if let Err(e) = cache.put(&key, &fetched) {
                    tracing::warn!(%table, error = %e, "failed to write cache entry");
                }
            }
        }

        Ok(fetched)
    }
}

impl Default for DataGateway {
    fn default() -> Self {
        Self::new()
    }
}
