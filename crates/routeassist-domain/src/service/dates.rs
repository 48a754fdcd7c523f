//! Lenient date parsing for spreadsheet cells

use chrono::{NaiveDate, NaiveDateTime};

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d", "%d-%m-%Y"];
const TIME_SUFFIXES: [&str; 3] = ["%H:%M:%S", "%H:%M:%S%.f", "%H:%M"];

/// Placeholder shown for a missing or unparseable date
pub const DATE_PLACEHOLDER: &str = "-";

/// Parse a date cell. Never fails: anything unrecognized is `None`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }
    parse_datetime(s).map(|dt| dt.date())
}

/// Parse a timestamp cell (date plus time, `T` or space separated)
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    for date_fmt in DATE_FORMATS {
        for time_fmt in TIME_SUFFIXES {
            for sep in [" ", "T"] {
                let fmt = format!("{}{}{}", date_fmt, sep, time_fmt);
                if let Ok(dt) = NaiveDateTime::parse_from_str(s, &fmt) {
                    return Some(dt);
                }
            }
        }
    }
    None
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%d/%m/%Y").to_string(),
        None => DATE_PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_iso() {
        assert_eq!(parse_date("2026-01-24"), Some(ymd(2026, 1, 24)));
    }

    #[test]
    fn test_parse_brazilian() {
        assert_eq!(parse_date("24/01/2026"), Some(ymd(2026, 1, 24)));
    }

    #[test]
    fn test_parse_with_time_component() {
        assert_eq!(parse_date("2026-01-24 00:00:00"), Some(ymd(2026, 1, 24)));
        assert_eq!(parse_date("24/01/2026 08:30"), Some(ymd(2026, 1, 24)));
    }

    #[test]
    fn test_garbage_is_none() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("nan"), None);
        assert_eq!(parse_date("amanhã"), None);
        assert_eq!(parse_date("31/02/2026"), None);
    }

    #[test]
    fn test_parse_timestamp() {
        let dt = parse_datetime("24/01/2026 14:05:09").unwrap();
        assert_eq!(dt.date(), ymd(2026, 1, 24));
        assert!(parse_datetime("2026-01-24").is_none());
    }

    #[test]
    fn test_format_placeholder() {
        assert_eq!(format_date(None), "-");
        assert_eq!(format_date(Some(ymd(2026, 1, 24))), "24/01/2026");
    }
}
