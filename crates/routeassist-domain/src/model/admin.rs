//! Admin-controlled consultation window

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Master password written on first run
pub const DEFAULT_MASTER_PASSWORD: &str = "routeassist-master";

/// Whether drivers may currently consult and claim routes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AdminStatus {
    Open,
    #[default]
    Closed,
}

impl AdminStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AdminStatus::Open => "OPEN",
            AdminStatus::Closed => "CLOSED",
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            AdminStatus::Open => AdminStatus::Closed,
            AdminStatus::Closed => AdminStatus::Open,
        }
    }
}

impl std::fmt::Display for AdminStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Privilege tier unlocked by an admin credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AdminTier {
    Admin,
    Master,
}

impl AdminTier {
    pub fn label(&self) -> &'static str {
        match self {
            AdminTier::Master => "MASTER",
            AdminTier::Admin => "ADMIN",
        }
    }
}

impl std::fmt::Display for AdminTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLogEntry {
    pub timestamp: DateTime<Utc>,
    pub actor: AdminTier,
    pub action: String,
}

/// Persisted admin document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub status: AdminStatus,

    #[serde(default = "default_master_password")]
    pub master_password: String,

    #[serde(default)]
    pub action_log: Vec<ActionLogEntry>,
}

fn default_master_password() -> String {
    DEFAULT_MASTER_PASSWORD.to_string()
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            status: AdminStatus::Closed,
            master_password: default_master_password(),
            action_log: Vec::new(),
        }
    }
}

impl AdminConfig {
    pub fn is_open(&self) -> bool {
        self.status == AdminStatus::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_closed() {
        let config = AdminConfig::default();
        assert_eq!(config.status, AdminStatus::Closed);
        assert!(config.action_log.is_empty());
        assert!(!config.is_open());
    }

    #[test]
    fn test_document_shape() {
        let json = r#"{"status":"OPEN","master_password":"x","action_log":[
            {"timestamp":"2026-01-24T10:00:00Z","actor":"MASTER","action":"ABRIU CONSULTA"}]}"#;
        let config: AdminConfig = serde_json::from_str(json).unwrap();
        assert!(config.is_open());
        assert_eq!(config.action_log[0].actor, AdminTier::Master);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: AdminConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AdminConfig::default());
    }
}
