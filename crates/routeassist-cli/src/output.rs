//! Output formatting module

use chrono::Local;
use serde_json::json;

use routeassist_app::app::{LookupOutcome, SubmitOutcome};
use routeassist_domain::model::{ActionLogEntry, AdminStatus, RouteRecord};
use routeassist_domain::service::dates::format_date;
use routeassist_domain::service::{DriverView, GateOutcome};
use routeassist_types::{OutputFormat, Result};

const CLOSED_MESSAGE: &str = "Consultation is closed. Try again when an admin opens it.";
const UNKNOWN_DRIVER_MESSAGE: &str = "Driver ID not found. Check the ID and try again.";

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn route_line(route: &RouteRecord) -> String {
    let mut line = format!(
        "{:<8} {:<12} {:<20} {}",
        route.route_code,
        route.date_label(),
        route.neighborhood,
        route.vehicle_type.as_deref().unwrap_or("-")
    );
    if let Some(plate) = &route.plate {
        line.push_str(&format!("  [{}]", plate));
    }
    line
}

fn print_driver_view(view: &DriverView) {
    let name = view.driver_name.as_deref().filter(|n| !n.is_empty());
    println!("\nDriver: {}{}", view.driver_id, name.map(|n| format!(" ({})", n)).unwrap_or_default());
    println!("=============================");

    println!("\nAssigned routes ({})", view.assigned.len());
    if view.assigned.is_empty() {
        println!("  No route assigned to you yet.");
    }
    for route in &view.assigned {
        println!("  {} - {}", route_line(route), route.city);
    }

    println!("\nAvailable routes ({})", view.available_count());
    if view.available.is_empty() {
        println!("  No open routes right now.");
    }
    for group in &view.available {
        println!("\n  {} ({})", group.city, group.routes.len());
        for available in &group.routes {
            let marker = if available.interested { "*" } else { " " };
            println!("  {} {}", marker, route_line(&available.route));
            if let Some(link) = &available.form_link {
                println!("      {}", link);
            }
        }
    }
    if view.available.iter().flat_map(|g| &g.routes).any(|r| r.interested) {
        println!("\n  * interest already registered");
    }
}

pub fn output_lookup(format: OutputFormat, outcome: &LookupOutcome) -> Result<()> {
    if format == OutputFormat::Json {
        let value = match outcome {
            LookupOutcome::ConsultationClosed => json!({ "status": "consultation_closed" }),
            LookupOutcome::UnknownDriver => json!({ "status": "unknown_driver" }),
            LookupOutcome::Found(view) => json!({ "status": "found", "driver": view }),
        };
        return print_json(&value);
    }

    match outcome {
        LookupOutcome::ConsultationClosed => println!("{}", CLOSED_MESSAGE),
        LookupOutcome::UnknownDriver => println!("{}", UNKNOWN_DRIVER_MESSAGE),
        LookupOutcome::Found(view) => print_driver_view(view),
    }
    Ok(())
}

pub fn output_submit(format: OutputFormat, outcome: &SubmitOutcome) -> Result<()> {
    if format == OutputFormat::Json {
        let value = match outcome {
            SubmitOutcome::ConsultationClosed => json!({ "status": "consultation_closed" }),
            SubmitOutcome::UnknownDriver => json!({ "status": "unknown_driver" }),
            SubmitOutcome::RouteNotAvailable => json!({ "status": "route_not_available" }),
            SubmitOutcome::Ambiguous(candidates) => {
                json!({ "status": "ambiguous", "candidates": candidates })
            }
            SubmitOutcome::AlreadyRegistered(route) => {
                json!({ "status": "already_registered", "route": route })
            }
            SubmitOutcome::Recorded { submission, form_link } => {
                json!({ "status": "recorded", "submission": submission, "form_link": form_link })
            }
        };
        return print_json(&value);
    }

    match outcome {
        SubmitOutcome::ConsultationClosed => println!("{}", CLOSED_MESSAGE),
        SubmitOutcome::UnknownDriver => println!("{}", UNKNOWN_DRIVER_MESSAGE),
        SubmitOutcome::RouteNotAvailable => {
            println!("That route is not open. It may already be assigned or the code/date is wrong.")
        }
        SubmitOutcome::Ambiguous(candidates) => {
            println!("Route code matches several routes. Repeat with --date, --city or --neighborhood:");
            for route in candidates {
                println!("  {} - {}", route_line(route), route.city);
            }
        }
        SubmitOutcome::AlreadyRegistered(route) => {
            println!(
                "Interest in {} ({}) was already registered.",
                route.route_code,
                route.date_label()
            );
        }
        SubmitOutcome::Recorded { submission, form_link } => {
            println!(
                "Interest registered: {} {} / {} ({})",
                submission.route_code,
                submission.city,
                submission.neighborhood,
                format_date(submission.dispatch_date)
            );
            if let Some(link) = form_link {
                println!("Confirm on the form: {}", link);
            }
        }
    }
    Ok(())
}

pub fn output_status(format: OutputFormat, status: AdminStatus) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(&json!({ "status": status }));
    }
    println!("Consultation: {}", status);
    Ok(())
}

fn gate_json(outcome: &GateOutcome) -> serde_json::Value {
    match outcome {
        GateOutcome::Applied { tier, status, entry } => {
            json!({ "result": "applied", "tier": tier, "status": status, "entry": entry })
        }
        GateOutcome::AlreadyInState(status) => json!({ "result": "unchanged", "status": status }),
        GateOutcome::Rejected => json!({ "result": "rejected" }),
        GateOutcome::Forbidden(tier) => json!({ "result": "forbidden", "tier": tier }),
        GateOutcome::InvalidPassword => json!({ "result": "invalid_password" }),
    }
}

/// Admin gate result. Log and export rejections come through here too.
pub fn output_gate(format: OutputFormat, outcome: &GateOutcome) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(&gate_json(outcome));
    }

    match outcome {
        GateOutcome::Applied { tier, status, entry } => {
            println!("{} by {}. Consultation: {}", entry.action, tier, status);
        }
        GateOutcome::AlreadyInState(status) => println!("Consultation already {}", status),
        GateOutcome::Rejected => println!("Wrong password."),
        GateOutcome::Forbidden(tier) => println!("{} password cannot do that.", tier),
        GateOutcome::InvalidPassword => println!("New password must not be empty."),
    }
    Ok(())
}

pub fn output_action_log(format: OutputFormat, log: &[ActionLogEntry]) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(&json!(log));
    }

    if log.is_empty() {
        println!("No admin actions recorded.");
        return Ok(());
    }

    println!("\n{:<20} {:<8} Action", "Time", "By");
    println!("{}", "-".repeat(50));
    for entry in log {
        println!(
            "{:<20} {:<8} {}",
            entry.timestamp.with_timezone(&Local).format("%d/%m/%Y %H:%M:%S").to_string(),
            entry.actor.label(),
            entry.action
        );
    }
    println!("\nTotal: {} entries", log.len());
    Ok(())
}
