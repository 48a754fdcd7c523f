//! Untyped tabular data as delivered by a spreadsheet export

use serde::{Deserialize, Serialize};

/// Header row plus data rows, all cells as text.
///
/// Header cells are trimmed on construction and every row is padded to the
/// header width, so a cell lookup never goes out of bounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers: Vec<String> = headers.into_iter().map(|h| h.trim().to_string()).collect();
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                if row.len() < width {
                    row.resize(width, String::new());
                }
                row
            })
            .collect();
        Self { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Index of the first header matching any alias (case-insensitive).
    pub fn column(&self, aliases: &[&str]) -> Option<usize> {
        aliases.iter().find_map(|alias| {
            self.headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(alias.trim()) || h == alias.trim())
        })
    }

    /// Cell text for a row, `None` when the column does not exist
    pub fn cell(row: &[String], column: Option<usize>) -> Option<&str> {
        column.and_then(|idx| row.get(idx)).map(String::as_str)
    }
}
