//! Admin gate use cases

use chrono::Utc;

use routeassist_domain::model::{AdminConfig, AdminStatus, AdminTier};
use routeassist_domain::service::{apply_admin_action, AdminAction, CredentialTable, GateOutcome};
use routeassist_types::Result;

use crate::repository::AdminContext;

pub fn current_status(ctx: &AdminContext) -> Result<AdminStatus> {
    Ok(ctx.store.load()?.status)
}

fn credentials(ctx: &AdminContext, config: &AdminConfig) -> CredentialTable {
    CredentialTable::for_config(config, &ctx.admin_password)
}

/// Authenticate, apply, and persist when the state changed
pub fn run_admin_action(ctx: &AdminContext, password: &str, action: AdminAction) -> Result<GateOutcome> {
    let mut config = ctx.store.load()?;
    let credentials = credentials(ctx, &config);

    let outcome = apply_admin_action(&mut config, &credentials, password, action, Utc::now());
    if outcome.is_applied() {
        ctx.store.save(&config)?;
    }
    Ok(outcome)
}

/// Tier for a credential together with the current document
pub fn authenticate(ctx: &AdminContext, password: &str) -> Result<Option<(AdminTier, AdminConfig)>> {
    let config = ctx.store.load()?;
    let tier = credentials(ctx, &config).tier_for(password);
    if tier.is_none() {
        tracing::warn!("admin credential rejected");
    }
    Ok(tier.map(|tier| (tier, config)))
}
