//! End-to-end use cases against CSV files on disk

use std::path::Path;

use assert_matches::assert_matches;
use chrono::NaiveDate;
use tempfile::TempDir;

use routeassist_app::app::{
    authenticate, build_availability_report, current_status, lookup_driver, run_admin_action,
    submit_interest, LookupOutcome, RouteSelector, SubmitOutcome,
};
use routeassist_app::config::{Config, SinkKind};
use routeassist_app::export::export_to_excel;
use routeassist_app::repository::{AdminContext, AppContext};
use routeassist_domain::model::{AdminStatus, AdminTier, DEFAULT_MASTER_PASSWORD};
use routeassist_domain::service::{AdminAction, GateOutcome};
use routeassist_infra::form_link::FormLinkTemplate;
use routeassist_types::{Error, SourceError, TableKind};

const ROUTES_CSV: &str = "\
ID,Rota,Cidade,Bairro,Data Exp.,Placa
,A12,Belém,Marco,24/01/2026,
D9,B07,Belém,Pedreira,24/01/2026,QDA1B23
nan,D03,Ananindeua,Cidade Nova,24/01/2026,
D1,C44,Ananindeua,Centro,24/01/2026,
";

const DRIVERS_CSV: &str = "ID,Nome\nD9,Carlos\n D1 ,Ana\n";

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path.display().to_string()
}

fn setup(drivers_csv: &str) -> (TempDir, Config) {
    setup_with(ROUTES_CSV, drivers_csv)
}

fn setup_with(routes_csv: &str, drivers_csv: &str) -> (TempDir, Config) {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.sources.routes = Some(write(dir.path(), "routes.csv", routes_csv));
    config.sources.drivers = Some(write(dir.path(), "drivers.csv", drivers_csv));
    config.cache.dir = Some(dir.path().join("cache"));
    config.store_dir = Some(dir.path().join("store"));
    (dir, config)
}

fn open_window(ctx: &AppContext) {
    let outcome = run_admin_action(&ctx.admin, DEFAULT_MASTER_PASSWORD, AdminAction::Open).unwrap();
    assert!(outcome.is_applied());
}

#[test]
fn test_closed_window_blocks_lookup() {
    let (_dir, config) = setup(DRIVERS_CSV);
    let ctx = AppContext::open(config, false).unwrap();
    assert_eq!(current_status(&ctx.admin).unwrap(), AdminStatus::Closed);
    assert_eq!(lookup_driver(&ctx, "D9").unwrap(), LookupOutcome::ConsultationClosed);
    assert_matches!(
        submit_interest(&ctx, "D9", RouteSelector::code("A12")).unwrap(),
        SubmitOutcome::ConsultationClosed
    );
}

#[test]
fn test_lookup_partitions_for_driver() {
    let (_dir, config) = setup(DRIVERS_CSV);
    let ctx = AppContext::open(config, false).unwrap();
    open_window(&ctx);

    let view = assert_matches!(lookup_driver(&ctx, " D9 ").unwrap(), LookupOutcome::Found(v) => v);
    assert_eq!(view.driver_id, "D9");
    assert_eq!(view.driver_name.as_deref(), Some("Carlos"));
    assert_eq!(view.assigned.len(), 1);
    assert_eq!(view.assigned[0].route_code, "B07");

    let cities: Vec<_> = view.available.iter().map(|g| g.city.as_str()).collect();
    assert_eq!(cities, vec!["Belém", "Ananindeua"]);
    assert_eq!(view.available_count(), 2);
    assert!(view.available.iter().flat_map(|g| &g.routes).all(|r| !r.interested));
    assert!(view
        .available
        .iter()
        .flat_map(|g| &g.routes)
        .all(|r| r.route.route_code != "C44"));
}

#[test]
fn test_unknown_driver_is_rejected() {
    let (_dir, config) = setup(DRIVERS_CSV);
    let ctx = AppContext::open(config, false).unwrap();
    open_window(&ctx);
    assert_eq!(lookup_driver(&ctx, "D999").unwrap(), LookupOutcome::UnknownDriver);
    assert_matches!(
        submit_interest(&ctx, "D999", RouteSelector::code("A12")).unwrap(),
        SubmitOutcome::UnknownDriver
    );
}

#[test]
fn test_interest_flow() {
    let (_dir, config) = setup(DRIVERS_CSV);
    let ctx = AppContext::open(config, false).unwrap();
    open_window(&ctx);

    let date = NaiveDate::from_ymd_opt(2026, 1, 24);
    let submission = assert_matches!(
        submit_interest(&ctx, "D9", RouteSelector::code("A12").on(date)).unwrap(),
        SubmitOutcome::Recorded { submission, form_link: None } => submission
    );
    assert_eq!(submission.city, "Belém");
    assert_eq!(submission.neighborhood, "Marco");

    let view = assert_matches!(lookup_driver(&ctx, "D9").unwrap(), LookupOutcome::Found(v) => v);
    let a12 = view
        .available
        .iter()
        .flat_map(|g| &g.routes)
        .find(|r| r.route.route_code == "A12")
        .unwrap();
    assert!(a12.interested);

    assert_matches!(
        submit_interest(&ctx, "D9", RouteSelector::code("A12")).unwrap(),
        SubmitOutcome::AlreadyRegistered(_)
    );

    // another driver may still register for the same route
    assert_matches!(
        submit_interest(&ctx, "D1", RouteSelector::code("A12")).unwrap(),
        SubmitOutcome::Recorded { .. }
    );

    let report = build_availability_report(&ctx).unwrap();
    assert_eq!(report.total_routes, 4);
    assert_eq!(report.assigned_routes, 2);
    let a12_row = report.rows().find(|r| r.route.route_code == "A12").unwrap();
    assert_eq!(a12_row.interest_count, 2);
}

#[test]
fn test_claimed_route_is_not_available() {
    let (_dir, config) = setup(DRIVERS_CSV);
    let ctx = AppContext::open(config, false).unwrap();
    open_window(&ctx);

    assert_matches!(
        submit_interest(&ctx, "D1", RouteSelector::code("B07")).unwrap(),
        SubmitOutcome::RouteNotAvailable
    );
    assert_matches!(
        submit_interest(&ctx, "D9", RouteSelector::code("A12").on(NaiveDate::from_ymd_opt(2026, 2, 1))).unwrap(),
        SubmitOutcome::RouteNotAvailable
    );
}

#[test]
fn test_empty_roster_is_data_unavailable() {
    let (_dir, config) = setup("ID,Nome\n");
    let ctx = AppContext::open(config, false).unwrap();
    open_window(&ctx);

    let err = lookup_driver(&ctx, "D9").unwrap_err();
    assert_matches!(err, Error::DataUnavailable(SourceError::Empty(TableKind::Drivers)));
}

#[test]
fn test_form_links_attached() {
    let (_dir, mut config) = setup(DRIVERS_CSV);
    config.form = Some(FormLinkTemplate {
        base_url: "https://docs.google.com/forms/d/e/FORM/viewform".to_string(),
        driver_id_entry: "1".to_string(),
        route_entry: "2".to_string(),
        city_entry: "3".to_string(),
        neighborhood_entry: "4".to_string(),
        dispatch_date_entry: Some("5".to_string()),
        vehicle_type_entry: None,
        plate_entry: None,
        answer_entry: None,
        answer_text: "Tenho Interesse".to_string(),
    });
    let ctx = AppContext::open(config, false).unwrap();
    open_window(&ctx);

    let view = assert_matches!(lookup_driver(&ctx, "D9").unwrap(), LookupOutcome::Found(v) => v);
    let link = view.available[0].routes[0].form_link.as_deref().unwrap();
    assert!(link.contains("entry.1=D9"));
    assert!(link.contains("entry.2=A12"));
    assert!(link.contains("entry.5=24%2F01%2F2026"));
}

#[test]
fn test_admin_gate_persists() {
    let (_dir, config) = setup(DRIVERS_CSV);
    let ctx = AppContext::open(config.clone(), false).unwrap();

    let outcome = run_admin_action(&ctx.admin, "wrong", AdminAction::Toggle).unwrap();
    assert_eq!(outcome, GateOutcome::Rejected);
    assert_eq!(current_status(&ctx.admin).unwrap(), AdminStatus::Closed);

    let outcome = run_admin_action(&ctx.admin, &config.admin_password, AdminAction::Toggle).unwrap();
    assert_matches!(outcome, GateOutcome::Applied { tier: AdminTier::Admin, status: AdminStatus::Open, .. });

    // fresh context reads the persisted document
    let reopened = AppContext::open(config.clone(), false).unwrap();
    let (tier, admin) = authenticate(&reopened.admin, DEFAULT_MASTER_PASSWORD).unwrap().unwrap();
    assert_eq!(tier, AdminTier::Master);
    assert_eq!(admin.status, AdminStatus::Open);
    assert_eq!(admin.action_log.len(), 1);
    assert_eq!(admin.action_log[0].action, "ABRIU CONSULTA");
    assert!(authenticate(&reopened.admin, "wrong").unwrap().is_none());
}

#[test]
fn test_export_report() {
    let (dir, config) = setup(DRIVERS_CSV);
    let ctx = AppContext::open(config, false).unwrap();
    open_window(&ctx);

    let (_, admin) = authenticate(&ctx.admin, DEFAULT_MASTER_PASSWORD).unwrap().unwrap();
    let report = build_availability_report(&ctx).unwrap();
    let path = dir.path().join("report.xlsx");
    export_to_excel(&report, &admin.action_log, &path).unwrap();
    assert!(path.exists());
}

const SHARED_CODE_CSV: &str = "\
ID,Rota,Cidade,Bairro,Data Exp.
,A12,Belém,Marco,24/01/2026
,A12,Ananindeua,Centro,24/01/2026
,A12,Belém,Marco,25/01/2026
";

#[test]
fn test_shared_route_code_needs_city() {
    let (_dir, config) = setup_with(SHARED_CODE_CSV, DRIVERS_CSV);
    let ctx = AppContext::open(config, false).unwrap();
    open_window(&ctx);

    let date = NaiveDate::from_ymd_opt(2026, 1, 24);
    let candidates = assert_matches!(
        submit_interest(&ctx, "D9", RouteSelector::code("A12").on(date)).unwrap(),
        SubmitOutcome::Ambiguous(c) => c
    );
    let cities: Vec<_> = candidates.iter().map(|r| r.city.as_str()).collect();
    assert_eq!(cities, vec!["Belém", "Ananindeua"]);

    let selector = RouteSelector::code("A12").on(date).in_city(Some("ananindeua"));
    let submission = assert_matches!(
        submit_interest(&ctx, "D9", selector).unwrap(),
        SubmitOutcome::Recorded { submission, .. } => submission
    );
    assert_eq!(submission.city, "Ananindeua");
    assert_eq!(submission.neighborhood, "Centro");

    // city alone still leaves two dates in Belém
    assert_matches!(
        submit_interest(&ctx, "D1", RouteSelector::code("A12").in_city(Some("Belém"))).unwrap(),
        SubmitOutcome::Ambiguous(c) if c.len() == 2
    );
    assert_matches!(
        submit_interest(&ctx, "D1", RouteSelector::code("A12").in_city(Some("Marabá"))).unwrap(),
        SubmitOutcome::RouteNotAvailable
    );
}

#[test]
fn test_admin_gate_ignores_sink_settings() {
    let (_dir, mut config) = setup(DRIVERS_CSV);
    config.sink.kind = SinkKind::Webhook;
    config.sink.webhook_url = None;

    assert!(AppContext::open(config.clone(), false).is_err());

    let admin = AdminContext::open(&config).unwrap();
    let outcome = run_admin_action(&admin, DEFAULT_MASTER_PASSWORD, AdminAction::Open).unwrap();
    assert!(outcome.is_applied());
    assert_eq!(current_status(&admin).unwrap(), AdminStatus::Open);
    assert!(authenticate(&admin, &config.admin_password).unwrap().is_some());
}
