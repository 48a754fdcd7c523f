//! XLSX decoding for spreadsheet exports
//!
//! Only the first worksheet is read. Cells are rendered to the same text a
//! CSV export of the sheet would carry, so normalization does not care
//! which format a table came from.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::Timelike;

use routeassist_domain::model::RawTable;
use routeassist_types::{SourceError, TableKind};

/// Local file header signature of a zip archive
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Whether a fetched export should go through the XLSX reader
pub fn is_xlsx(location: &str, bytes: &[u8]) -> bool {
    if bytes.starts_with(ZIP_MAGIC) {
        return true;
    }
    let location = location.trim().to_ascii_lowercase();
    location.ends_with(".xlsx") || location.contains("format=xlsx")
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        // IDs typed into a sheet come back as floats
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) if value.num_seconds_from_midnight() == 0 => {
                value.format("%Y-%m-%d").to_string()
            }
            Some(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.as_f64().to_string(),
        },
    }
}

/// Parse the first worksheet of an XLSX workbook into a raw table.
///
/// Same shape rules as the CSV path: first row is the header, rows whose
/// cells are all blank are skipped.
pub fn parse_xlsx(table: TableKind, bytes: &[u8]) -> Result<RawTable, SourceError> {
    let parse_err = |reason: String| SourceError::Parse { table, reason };

    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes.to_vec())).map_err(|e| parse_err(e.to_string()))?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| parse_err(e.to_string()))?,
        None => return Ok(RawTable::default()),
    };

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(cell_text).collect(),
        None => return Ok(RawTable::default()),
    };

    let rows = rows
        .map(|row| row.iter().map(cell_text).collect::<Vec<_>>())
        .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
        .collect();

    tracing::debug!(%table, columns = headers.len(), "parsed xlsx worksheet");
    Ok(RawTable::new(headers, rows))
}
