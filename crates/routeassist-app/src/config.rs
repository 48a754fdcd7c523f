//! Configuration management for routeassist
//!
//! Config stored at: ~/.config/routeassist/config.json

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use routeassist_infra::form_link::FormLinkTemplate;
use routeassist_types::{ConfigError, OutputFormat, Result, TableKind};

/// Where each spreadsheet export lives (URL or local path)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default)]
    pub routes: Option<String>,

    #[serde(default)]
    pub drivers: Option<String>,

    /// Remote interest table; when unset the local interest log is read
    #[serde(default)]
    pub interest: Option<String>,
}

impl SourcesConfig {
    pub fn location(&self, table: TableKind) -> Option<&str> {
        let location = match table {
            TableKind::Routes => self.routes.as_deref(),
            TableKind::Drivers => self.drivers.as_deref(),
            TableKind::Interest => self.interest.as_deref(),
        };
        location.map(str::trim).filter(|l| !l.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Cache directory override
    #[serde(default)]
    pub dir: Option<PathBuf>,

    #[serde(default = "default_routes_ttl")]
    pub routes_ttl_secs: u64,

    #[serde(default = "default_drivers_ttl")]
    pub drivers_ttl_secs: u64,

    #[serde(default = "default_interest_ttl")]
    pub interest_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
            routes_ttl_secs: default_routes_ttl(),
            drivers_ttl_secs: default_drivers_ttl(),
            interest_ttl_secs: default_interest_ttl(),
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self, table: TableKind) -> Duration {
        let secs = match table {
            TableKind::Routes => self.routes_ttl_secs,
            TableKind::Drivers => self.drivers_ttl_secs,
            TableKind::Interest => self.interest_ttl_secs,
        };
        Duration::from_secs(secs)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    #[default]
    Local,
    Webhook,
}

impl std::fmt::Display for SinkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SinkKind::Local => write!(f, "local"),
            SinkKind::Webhook => write!(f, "webhook"),
        }
    }
}

impl std::str::FromStr for SinkKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(SinkKind::Local),
            "webhook" => Ok(SinkKind::Webhook),
            other => Err(ConfigError::Invalid(format!("unknown sink kind '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SinkConfig {
    #[serde(default)]
    pub kind: SinkKind,

    #[serde(default)]
    pub webhook_url: Option<String>,
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sources: SourcesConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub sink: SinkConfig,

    /// Pre-filled form link settings (optional)
    #[serde(default)]
    pub form: Option<FormLinkTemplate>,

    /// Credential for the ADMIN tier; MASTER lives in the admin document
    #[serde(default = "default_admin_password")]
    pub admin_password: String,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Directory for the admin document and local interest log
    #[serde(default)]
    pub store_dir: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn default_routes_ttl() -> u64 {
    60
}

fn default_drivers_ttl() -> u64 {
    600
}

fn default_interest_ttl() -> u64 {
    30
}

fn default_admin_password() -> String {
    "routeassist-admin".to_string()
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: SourcesConfig::default(),
            cache: CacheConfig::default(),
            sink: SinkConfig::default(),
            form: None,
            admin_password: default_admin_password(),
            output_format: default_output_format(),
            store_dir: None,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("routeassist");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Get the cache directory path
    pub fn cache_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.cache.dir {
            return Ok(dir.clone());
        }

        let cache_dir = dirs::cache_dir()
            .ok_or(ConfigError::NotFound)?
            .join("routeassist");
        Ok(cache_dir)
    }

    /// Get the store directory path
    pub fn store_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.store_dir {
            return Ok(dir.clone());
        }
        Ok(Self::config_dir()?.join("store"))
    }

    /// Load config from the default path, or use defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let unset = "(not set)";
        writeln!(f, "RouteAssist Configuration")?;
        writeln!(f, "=========================")?;
        writeln!(f)?;
        writeln!(f, "Routes source:    {}", self.sources.routes.as_deref().unwrap_or(unset))?;
        writeln!(f, "Drivers source:   {}", self.sources.drivers.as_deref().unwrap_or(unset))?;
        writeln!(
            f,
            "Interest source:  {}",
            self.sources.interest.as_deref().unwrap_or("(local log)")
        )?;
        writeln!(f, "Cache enabled:    {}", self.cache.enabled)?;
        writeln!(
            f,
            "Cache dir:        {}",
            self.cache_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(
            f,
            "Cache TTL (s):    routes {} / drivers {} / interest {}",
            self.cache.routes_ttl_secs, self.cache.drivers_ttl_secs, self.cache.interest_ttl_secs
        )?;
        writeln!(f, "Interest sink:    {}", self.sink.kind)?;
        if self.sink.kind == SinkKind::Webhook {
            writeln!(f, "Webhook URL:      {}", self.sink.webhook_url.as_deref().unwrap_or(unset))?;
        }
        writeln!(
            f,
            "Form link:        {}",
            self.form.as_ref().map(|t| t.base_url.as_str()).unwrap_or(unset)
        )?;
        writeln!(f, "Output format:    {}", self.output_format)?;
        writeln!(
            f,
            "Store dir:        {}",
            self.store_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:      {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert!(config.cache.enabled);
        assert_eq!(config.cache.ttl(TableKind::Drivers), Duration::from_secs(600));
        assert_eq!(config.cache.ttl(TableKind::Interest), Duration::from_secs(30));
        assert_eq!(config.sink.kind, SinkKind::Local);
        assert_eq!(config.output_format, OutputFormat::Table);
        assert!(config.form.is_none());
    }

    #[test]
    fn test_blank_location_counts_as_unset() {
        let sources = SourcesConfig {
            routes: Some("  ".to_string()),
            drivers: Some(" drivers.csv ".to_string()),
            interest: None,
        };
        assert_eq!(sources.location(TableKind::Routes), None);
        assert_eq!(sources.location(TableKind::Drivers), Some("drivers.csv"));
        assert_eq!(sources.location(TableKind::Interest), None);
    }

    #[test]
    fn test_save_and_load_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let mut config = Config::default();
        config.sources.routes = Some("https://example.test/routes.csv".to_string());
        config.sink.kind = SinkKind::Webhook;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.sources.routes, config.sources.routes);
        assert_eq!(loaded.sink.kind, SinkKind::Webhook);
    }

    #[test]
    fn test_sink_kind_parse() {
        assert_eq!("Webhook".parse::<SinkKind>().unwrap(), SinkKind::Webhook);
        assert!("sheet".parse::<SinkKind>().is_err());
    }
}
