//! Command handlers

use std::path::PathBuf;

use crate::cli::{AdminCommand, Cli, Commands};
use crate::output::{output_action_log, output_gate, output_lookup, output_status, output_submit};
use routeassist_app::app::{
    authenticate, build_availability_report, current_status, lookup_driver, run_admin_action,
    submit_interest, RouteSelector,
};
use routeassist_app::config::{Config, SinkKind};
use routeassist_app::export::export_to_excel;
use routeassist_app::repository::{open_table_cache, AdminContext, AppContext};
use routeassist_domain::repository::TableCache;
use routeassist_domain::service::{AdminAction, GateOutcome};
use routeassist_types::{CacheError, Error, OutputFormat, Result};

pub fn execute(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let output_format = cli.format.unwrap_or(config.output_format);
    tracing::debug!(refresh = cli.refresh, format = %output_format, "configuration loaded");

    match cli.command {
        Commands::Lookup { driver_id } => {
            let ctx = AppContext::open(config, cli.refresh)?;
            cmd_lookup(&ctx, &driver_id, output_format)
        }
        Commands::Interest {
            driver_id,
            route,
            date,
            city,
            neighborhood,
        } => {
            let ctx = AppContext::open(config, cli.refresh)?;
            let selector = RouteSelector::code(&route)
                .on(date)
                .in_city(city.as_deref())
                .in_neighborhood(neighborhood.as_deref());
            cmd_interest(&ctx, &driver_id, selector, output_format)
        }
        Commands::Status => {
            let admin = AdminContext::open(&config)?;
            output_status(output_format, current_status(&admin)?)
        }
        Commands::Admin { password, action } => {
            let admin = AdminContext::open(&config)?;
            cmd_admin(&admin, &password, action, output_format)
        }
        Commands::Export { password, output } => cmd_export(config, cli.refresh, &password, output, output_format),
        Commands::Config {
            show,
            set_routes,
            set_drivers,
            set_interest,
            set_cache,
            set_sink,
            set_webhook,
            set_admin_password,
            set_output,
            reset,
        } => cmd_config(
            show,
            ConfigUpdate {
                routes: set_routes,
                drivers: set_drivers,
                interest: set_interest,
                cache: set_cache,
                sink: set_sink,
                webhook: set_webhook,
                admin_password: set_admin_password,
                output: set_output,
            },
            reset,
        ),
        Commands::Cache { clear, stats } => cmd_cache(&config, clear, stats),
    }
}

fn cmd_lookup(ctx: &AppContext, driver_id: &str, output_format: OutputFormat) -> Result<()> {
    let outcome = lookup_driver(ctx, driver_id)?;
    output_lookup(output_format, &outcome)
}

fn cmd_interest(
    ctx: &AppContext,
    driver_id: &str,
    selector: RouteSelector<'_>,
    output_format: OutputFormat,
) -> Result<()> {
    let outcome = submit_interest(ctx, driver_id, selector)?;
    output_submit(output_format, &outcome)
}

fn cmd_admin(ctx: &AdminContext, password: &str, command: AdminCommand, output_format: OutputFormat) -> Result<()> {
    let action = match command {
        AdminCommand::Open => AdminAction::Open,
        AdminCommand::Close => AdminAction::Close,
        AdminCommand::Toggle => AdminAction::Toggle,
        AdminCommand::SetPassword { new_password } => AdminAction::ChangeMasterPassword(new_password),
        AdminCommand::Log => {
            return match authenticate(ctx, password)? {
                Some((_, admin)) => output_action_log(output_format, &admin.action_log),
                None => output_gate(output_format, &GateOutcome::Rejected),
            };
        }
    };

    let outcome = run_admin_action(ctx, password, action)?;
    output_gate(output_format, &outcome)
}

fn cmd_export(
    config: Config,
    refresh: bool,
    password: &str,
    output: PathBuf,
    output_format: OutputFormat,
) -> Result<()> {
    let Some((_, admin)) = authenticate(&AdminContext::open(&config)?, password)? else {
        return output_gate(output_format, &GateOutcome::Rejected);
    };

    let ctx = AppContext::open(config, refresh)?;
    let report = build_availability_report(&ctx)?;
    export_to_excel(&report, &admin.action_log, &output)?;

    println!(
        "Exported {} open routes ({} total) to: {}",
        report.rows().count(),
        report.total_routes,
        output.display()
    );
    Ok(())
}

/// Requested config changes, one field per `--set-*` flag
struct ConfigUpdate {
    routes: Option<String>,
    drivers: Option<String>,
    interest: Option<String>,
    cache: Option<bool>,
    sink: Option<SinkKind>,
    webhook: Option<String>,
    admin_password: Option<String>,
    output: Option<OutputFormat>,
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn cmd_config(show: bool, update: ConfigUpdate, reset: bool) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(routes) = update.routes {
        config.sources.routes = non_blank(routes);
        modified = true;
    }

    if let Some(drivers) = update.drivers {
        config.sources.drivers = non_blank(drivers);
        modified = true;
    }

    if let Some(interest) = update.interest {
        config.sources.interest = non_blank(interest);
        modified = true;
    }

    if let Some(cache_enabled) = update.cache {
        config.cache.enabled = cache_enabled;
        modified = true;
    }

    if let Some(sink) = update.sink {
        config.sink.kind = sink;
        modified = true;
    }

    if let Some(webhook) = update.webhook {
        config.sink.webhook_url = non_blank(webhook);
        modified = true;
    }

    if let Some(password) = update.admin_password {
        if password.trim().is_empty() {
            return Err(routeassist_types::ConfigError::Invalid(
                "admin password must not be empty".to_string(),
            )
            .into());
        }
        config.admin_password = password;
        modified = true;
    }

    if let Some(output_format) = update.output {
        config.output_format = output_format;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}

fn cmd_cache(config: &Config, clear: bool, stats: bool) -> Result<()> {
    if !config.cache.enabled {
        return Err(Error::Cache(CacheError::Disabled));
    }

    let cache = open_table_cache(config)?;

    if clear {
        let count = cache.clear()?;
        println!("Cleared {} cached tables", count);
    }

    if stats || !clear {
        let stats = cache.stats()?;
        println!("{}", stats.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank("  ".to_string()), None);
        assert_eq!(non_blank(" https://x/export?format=csv ".to_string()).as_deref(), Some("https://x/export?format=csv"));
    }
}
