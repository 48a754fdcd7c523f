//! CSV decoding for spreadsheet exports
//!
//! Sheets exports are UTF-8, but files saved from desktop spreadsheet
//! apps on Windows often come out as Windows-1252.

use std::borrow::Cow;

use encoding_rs::WINDOWS_1252;

use routeassist_domain::model::RawTable;
use routeassist_types::{SourceError, TableKind};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decode raw bytes to text, falling back to Windows-1252
pub fn decode_bytes(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            tracing::warn!("input is not valid UTF-8, decoding as Windows-1252");
            let (decoded, _, _) = WINDOWS_1252.decode(bytes);
            decoded
        }
    }
}

/// Parse CSV text into a raw table.
///
/// Rows whose cells are all blank are skipped; exports pad the sheet with
/// them. No header row at all yields an empty table.
pub fn parse_table(table: TableKind, text: &str) -> Result<RawTable, SourceError> {
    if text.trim().is_empty() {
        return Ok(RawTable::default());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let parse_err = |e: csv::Error| SourceError::Parse {
        table,
        reason: e.to_string(),
    };

    let headers: Vec<String> = reader
        .headers()
        .map_err(parse_err)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(parse_err)?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable::new(headers, rows))
}

pub fn parse_bytes(table: TableKind, bytes: &[u8]) -> Result<RawTable, SourceError> {
    parse_table(table, &decode_bytes(bytes))
}
