//! CLI definition using clap

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use routeassist_app::config::SinkKind;
use routeassist_types::OutputFormat;

#[derive(Parser)]
#[command(name = "routeassist")]
#[command(version)]
#[command(about = "Route lookup and interest registration for delivery drivers")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Ignore cached tables and fetch every source again
    #[arg(long, global = true)]
    pub refresh: bool,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a driver's assigned routes and the open ones by city
    Lookup {
        /// Driver ID
        driver_id: String,
    },

    /// Register interest in an unassigned route
    Interest {
        /// Driver ID
        driver_id: String,

        /// Route code
        route: String,

        /// Dispatch date (YYYY-MM-DD or DD/MM/YYYY) when the code repeats across dates
        #[arg(long, short = 'd', value_parser = parse_date_arg)]
        date: Option<NaiveDate>,

        /// City, when the code repeats across cities
        #[arg(long, short = 'c')]
        city: Option<String>,

        /// Neighborhood, when code, date and city are still not enough
        #[arg(long, short = 'n')]
        neighborhood: Option<String>,
    },

    /// Show whether the consultation window is open
    Status,

    /// Admin operations (password required)
    Admin {
        /// Admin or master password
        #[arg(long, short = 'p')]
        password: String,

        #[command(subcommand)]
        action: AdminCommand,
    },

    /// Export the availability report to Excel (password required)
    Export {
        /// Admin or master password
        #[arg(long, short = 'p')]
        password: String,

        /// Output file path
        #[arg(long, short = 'o', default_value = "routeassist_report.xlsx")]
        output: PathBuf,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set routes source (CSV path or URL)
        #[arg(long)]
        set_routes: Option<String>,

        /// Set drivers source (CSV path or URL)
        #[arg(long)]
        set_drivers: Option<String>,

        /// Set interest source (CSV path or URL, empty to use the local log)
        #[arg(long)]
        set_interest: Option<String>,

        /// Enable/disable cache
        #[arg(long)]
        set_cache: Option<bool>,

        /// Set interest sink (local, webhook)
        #[arg(long)]
        set_sink: Option<SinkKind>,

        /// Set webhook URL for the webhook sink
        #[arg(long)]
        set_webhook: Option<String>,

        /// Set admin password
        #[arg(long)]
        set_admin_password: Option<String>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },

    /// Manage table cache
    Cache {
        /// Clear all cached tables
        #[arg(long)]
        clear: bool,

        /// Show cache statistics
        #[arg(long)]
        stats: bool,
    },
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Open the consultation window
    Open,
    /// Close the consultation window
    Close,
    /// Flip the consultation window
    Toggle,
    /// Show the admin action log
    Log,
    /// Change the master password (master only)
    SetPassword {
        /// New master password
        new_password: String,
    },
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    routeassist_domain::service::dates::parse_date(value)
        .ok_or_else(|| format!("invalid date '{}'", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_interest_with_date() {
        let cli = Cli::parse_from(["routeassist", "interest", "D9", "A12", "--date", "24/01/2026"]);
        match cli.command {
            Commands::Interest { driver_id, route, date, city, neighborhood } => {
                assert_eq!(driver_id, "D9");
                assert_eq!(route, "A12");
                assert_eq!(date, NaiveDate::from_ymd_opt(2026, 1, 24));
                assert_eq!(city, None);
                assert_eq!(neighborhood, None);
            }
            _ => panic!("expected interest command"),
        }
    }

    #[test]
    fn test_parse_interest_with_city() {
        let cli = Cli::parse_from(["routeassist", "interest", "D9", "A12", "-d", "2026-01-24", "--city", "Ananindeua"]);
        match cli.command {
            Commands::Interest { city, neighborhood, .. } => {
                assert_eq!(city.as_deref(), Some("Ananindeua"));
                assert_eq!(neighborhood, None);
            }
            _ => panic!("expected interest command"),
        }
    }

    #[test]
    fn test_parse_admin_global_flags() {
        let cli = Cli::parse_from(["routeassist", "admin", "-p", "secret", "toggle", "--format", "json"]);
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert!(matches!(
            cli.command,
            Commands::Admin { ref password, action: AdminCommand::Toggle } if password == "secret"
        ));
    }

    #[test]
    fn test_rejects_bad_date() {
        assert!(Cli::try_parse_from(["routeassist", "interest", "D9", "A12", "--date", "soon"]).is_err());
    }
}
