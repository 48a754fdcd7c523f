//! Password-gated open/close toggle for the consultation window

use chrono::{DateTime, Utc};

use crate::model::{ActionLogEntry, AdminConfig, AdminStatus, AdminTier};

pub const ACTION_OPEN: &str = "ABRIU CONSULTA";
pub const ACTION_CLOSE: &str = "FECHOU CONSULTA";
pub const ACTION_CHANGE_PASSWORD: &str = "ALTEROU SENHA MASTER";

/// Credential → tier lookup, checked in insertion order
#[derive(Debug, Clone, Default)]
pub struct CredentialTable {
    entries: Vec<(String, AdminTier)>,
}

impl CredentialTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// MASTER from the persisted document, ADMIN from application config
    pub fn for_config(config: &AdminConfig, admin_password: &str) -> Self {
        Self::new()
            .with(&config.master_password, AdminTier::Master)
            .with(admin_password, AdminTier::Admin)
    }

    pub fn with(mut self, credential: &str, tier: AdminTier) -> Self {
        if !credential.is_empty() {
            self.entries.push((credential.to_string(), tier));
        }
        self
    }

    pub fn tier_for(&self, credential: &str) -> Option<AdminTier> {
        if credential.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|(c, _)| c == credential)
            .map(|(_, tier)| *tier)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAction {
    Open,
    Close,
    /// Open when closed, close when open
    Toggle,
    ChangeMasterPassword(String),
}

impl AdminAction {
    fn required_tier(&self) -> AdminTier {
        match self {
            AdminAction::ChangeMasterPassword(_) => AdminTier::Master,
            _ => AdminTier::Admin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// State changed; the entry was appended to the action log
    Applied {
        tier: AdminTier,
        status: AdminStatus,
        entry: ActionLogEntry,
    },
    /// Credential accepted but the window was already in the requested state
    AlreadyInState(AdminStatus),
    /// No tier matches the credential
    Rejected,
    /// Tier matched but is too low for the action
    Forbidden(AdminTier),
    InvalidPassword,
}

impl GateOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, GateOutcome::Applied { .. })
    }
}

/// Authenticate and apply one admin action.
///
/// Only `Applied` touches `config`; every other outcome leaves status and
/// log exactly as they were. Persisting is the caller's job.
pub fn apply_admin_action(
    config: &mut AdminConfig,
    credentials: &CredentialTable,
    password: &str,
    action: AdminAction,
    now: DateTime<Utc>,
) -> GateOutcome {
    let Some(tier) = credentials.tier_for(password) else {
        tracing::warn!("admin credential rejected");
        return GateOutcome::Rejected;
    };
    if tier < action.required_tier() {
        return GateOutcome::Forbidden(tier);
    }

    let action_name = match action {
        AdminAction::ChangeMasterPassword(new_password) => {
            if new_password.trim().is_empty() {
                return GateOutcome::InvalidPassword;
            }
            config.master_password = new_password;
            ACTION_CHANGE_PASSWORD
        }
        status_action => {
            let target = match status_action {
                AdminAction::Open => AdminStatus::Open,
                AdminAction::Close => AdminStatus::Closed,
                _ => config.status.flipped(),
            };
            if target == config.status {
                return GateOutcome::AlreadyInState(target);
            }
            config.status = target;
            match target {
                AdminStatus::Open => ACTION_OPEN,
                AdminStatus::Closed => ACTION_CLOSE,
            }
        }
    };

    let entry = ActionLogEntry {
        timestamp: now,
        actor: tier,
        action: action_name.to_string(),
    };
    config.action_log.push(entry.clone());
    tracing::info!(actor = %tier, action = action_name, status = %config.status, "admin action applied");

    GateOutcome::Applied {
        tier,
        status: config.status,
        entry,
    }
}
