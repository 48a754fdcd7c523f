//! Adapters wired from configuration

use routeassist_domain::repository::{AdminConfigStore, InterestSink};
use routeassist_infra::persistence::{FileAdminConfigStore, FileInterestLog};
use routeassist_infra::source::open_source;
use routeassist_infra::table_cache::DiskTableCache;
use routeassist_infra::webhook_sink::WebhookInterestSink;
use routeassist_types::{ConfigError, Result, TableKind};

use crate::config::{Config, SinkKind};
use crate::gateway::DataGateway;

/// Open file-based admin document store
pub fn open_admin_store(config: &Config) -> Result<FileAdminConfigStore> {
    FileAdminConfigStore::open(config.store_dir()?)
}

/// Open the local interest log
pub fn open_interest_log(config: &Config) -> Result<FileInterestLog> {
    FileInterestLog::open(config.store_dir()?)
}

/// Open the table cache
pub fn open_table_cache(config: &Config) -> Result<DiskTableCache> {
    DiskTableCache::new(config.cache_dir()?)
}

/// Open the configured interest sink
pub fn open_interest_sink(config: &Config) -> Result<Box<dyn InterestSink>> {
    match config.sink.kind {
        SinkKind::Local => Ok(Box::new(open_interest_log(config)?)),
        SinkKind::Webhook => {
            let url = config
                .sink
                .webhook_url
                .as_deref()
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .ok_or_else(|| ConfigError::Invalid("webhook sink needs sink.webhook_url".to_string()))?;
            Ok(Box::new(WebhookInterestSink::new(url)?))
        }
    }
}

/// Build the data gateway for every configured source
pub fn open_gateway(config: &Config, force_refresh: bool) -> Result<DataGateway> {
    let mut gateway = DataGateway::new().with_force_refresh(force_refresh);

    for table in [TableKind::Routes, TableKind::Drivers, TableKind::Interest] {
        if let Some(location) = config.sources.location(table) {
            gateway = gateway
                .with_source(table, open_source(table, location)?)
                .with_ttl(table, config.cache.ttl(table));
        }
    }

    if config.cache.enabled {
        gateway = gateway.with_cache(Box::new(open_table_cache(config)?));
    }

    Ok(gateway)
}

/// Admin document plus the configured ADMIN credential.
///
/// Opens no source, cache or sink.
pub struct AdminContext {
    pub store: Box<dyn AdminConfigStore>,
    pub admin_password: String,
}

impl AdminContext {
    pub fn open(config: &Config) -> Result<Self> {
        Ok(Self {
            store: Box::new(open_admin_store(config)?),
            admin_password: config.admin_password.clone(),
        })
    }
}

/// Everything a driver-facing use case needs, wired once per request
pub struct AppContext {
    pub gateway: DataGateway,
    pub admin: AdminContext,
    pub sink: Box<dyn InterestSink>,
    pub config: Config,
}

impl AppContext {
    pub fn open(config: Config, force_refresh: bool) -> Result<Self> {
        Ok(Self {
            admin: AdminContext::open(&config)?,
            gateway: open_gateway(&config, force_refresh)?,
            sink: open_interest_sink(&config)?,
            config,
        })
    }
}
