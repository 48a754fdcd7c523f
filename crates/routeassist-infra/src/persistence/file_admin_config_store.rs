//! JSON file holding the admin document

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use routeassist_domain::model::AdminConfig;
use routeassist_domain::repository::AdminConfigStore;
use routeassist_types::{ConfigError, Result};

pub struct FileAdminConfigStore {
    path: PathBuf,
}

impl FileAdminConfigStore {
    /// Store backed by `<store_dir>/admin.json`
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        Ok(Self {
            path: store_dir.join("admin.json"),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AdminConfigStore for FileAdminConfigStore {
    fn load(&self) -> Result<AdminConfig> {
        if !self.path.exists() {
            let config = AdminConfig::default();
            self.save(&config)?;
            tracing::info!(path = %self.path.display(), "created default admin document");
            return Ok(config);
        }

        let file = File::open(&self.path)?;
        let config = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            ConfigError::ParseError(format!("{}: {}", self.path.display(), e))
        })?;
        Ok(config)
    }

    fn save(&self, config: &AdminConfig) -> Result<()> {
        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), config)?;
        Ok(())
    }
}
