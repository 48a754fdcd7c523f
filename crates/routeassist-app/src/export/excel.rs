//! Excel export of route availability and the admin action log

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use routeassist_domain::model::ActionLogEntry;
use routeassist_types::{Error, Result};

use crate::app::AvailabilityReport;

fn excel_err(e: XlsxError) -> Error {
    Error::Excel(e.to_string())
}

/// Export the availability report and action log to an Excel file
pub fn export_to_excel(
    report: &AvailabilityReport,
    action_log: &[ActionLogEntry],
    output_path: &Path,
) -> Result<()> {
    let mut workbook = Workbook::new();

    let summary_sheet = workbook.add_worksheet();
    write_summary_sheet(summary_sheet, report)?;

    let available_sheet = workbook.add_worksheet();
    write_available_sheet(available_sheet, report)?;

    let log_sheet = workbook.add_worksheet();
    write_action_log_sheet(log_sheet, action_log)?;

    workbook.save(output_path).map_err(excel_err)?;
    Ok(())
}

fn write_summary_sheet(sheet: &mut Worksheet, report: &AvailabilityReport) -> Result<()> {
    sheet.set_name("Summary").map_err(excel_err)?;
    let header_format = Format::new().set_bold();

    sheet
        .write_string_with_format(0, 0, "RouteAssist Availability Report", &header_format)
        .map_err(excel_err)?;

    let available_count = report.rows().count();
    let lines: [(&str, String); 4] = [
        ("Generated at:", report.generated_at.to_rfc3339()),
        ("Total routes:", report.total_routes.to_string()),
        ("Assigned:", report.assigned_routes.to_string()),
        ("Available:", available_count.to_string()),
    ];
    for (idx, (label, value)) in lines.iter().enumerate() {
        let row = (idx + 2) as u32;
        sheet.write_string(row, 0, *label).map_err(excel_err)?;
        sheet.write_string(row, 1, value).map_err(excel_err)?;
    }

    sheet
        .write_string_with_format(7, 0, "Available by city", &header_format)
        .map_err(excel_err)?;
    for (idx, group) in report.available.iter().enumerate() {
        let row = (idx + 8) as u32;
        sheet.write_string(row, 0, &group.city).map_err(excel_err)?;
        sheet
            .write_number(row, 1, group.routes.len() as f64)
            .map_err(excel_err)?;
    }

    sheet.set_column_width(0, 22).map_err(excel_err)?;
    sheet.set_column_width(1, 28).map_err(excel_err)?;
    Ok(())
}

fn write_available_sheet(sheet: &mut Worksheet, report: &AvailabilityReport) -> Result<()> {
    sheet.set_name("Available").map_err(excel_err)?;
    let header_format = Format::new().set_bold();

    let headers = [
        "Route",
        "City",
        "Neighborhood",
        "Dispatch Date",
        "Vehicle Type",
        "Plate",
        "Interested Drivers",
    ];
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(excel_err)?;
    }

    for (row_idx, entry) in report.rows().enumerate() {
        let row = (row_idx + 1) as u32;
        let route = &entry.route;
        sheet.write_string(row, 0, &route.route_code).map_err(excel_err)?;
        sheet.write_string(row, 1, &route.city).map_err(excel_err)?;
        sheet.write_string(row, 2, &route.neighborhood).map_err(excel_err)?;
        sheet.write_string(row, 3, route.date_label()).map_err(excel_err)?;
        sheet
            .write_string(row, 4, route.vehicle_type.as_deref().unwrap_or(""))
            .map_err(excel_err)?;
        sheet
            .write_string(row, 5, route.plate.as_deref().unwrap_or(""))
            .map_err(excel_err)?;
        sheet
            .write_number(row, 6, entry.interest_count as f64)
            .map_err(excel_err)?;
    }

    sheet.set_column_width(1, 18).map_err(excel_err)?;
    sheet.set_column_width(2, 22).map_err(excel_err)?;
    sheet.set_column_width(3, 14).map_err(excel_err)?;
    sheet.set_column_width(6, 18).map_err(excel_err)?;
    Ok(())
}

fn write_action_log_sheet(sheet: &mut Worksheet, action_log: &[ActionLogEntry]) -> Result<()> {
    sheet.set_name("Action Log").map_err(excel_err)?;
    let header_format = Format::new().set_bold();

    for (col, header) in ["Timestamp", "Actor", "Action"].iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(excel_err)?;
    }

    for (row_idx, entry) in action_log.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        sheet
            .write_string(row, 0, entry.timestamp.to_rfc3339())
            .map_err(excel_err)?;
        sheet.write_string(row, 1, entry.actor.label()).map_err(excel_err)?;
        sheet.write_string(row, 2, &entry.action).map_err(excel_err)?;
    }

    sheet.set_column_width(0, 28).map_err(excel_err)?;
    sheet.set_column_width(2, 24).map_err(excel_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use routeassist_domain::model::{AdminTier, RouteRecord};
    use routeassist_domain::service::CityGroup;

    use crate::app::AvailabilityRow;

    #[test]
    fn test_export_writes_workbook() {
        let route = RouteRecord {
            route_code: "A12".to_string(),
            city: "Belém".to_string(),
            neighborhood: "Marco".to_string(),
            vehicle_type: None,
            plate: Some("QDA1B23".to_string()),
            dispatch_date: None,
            assigned_driver_id: String::new(),
        };
        let report = AvailabilityReport {
            generated_at: Utc.with_ymd_and_hms(2026, 1, 24, 8, 0, 0).unwrap(),
            total_routes: 2,
            assigned_routes: 1,
            available: vec![CityGroup {
                city: "Belém".to_string(),
                routes: vec![AvailabilityRow { route, interest_count: 3 }],
            }],
        };
        let log = vec![ActionLogEntry {
            timestamp: Utc.with_ymd_and_hms(2026, 1, 24, 7, 0, 0).unwrap(),
            actor: AdminTier::Master,
            action: "ABRIU CONSULTA".to_string(),
        }];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");
        export_to_excel(&report, &log, &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
