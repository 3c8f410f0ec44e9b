//! Date display helpers.

use chrono::{DateTime, NaiveDate};

/// Format an API date (RFC 3339 timestamp or `YYYY-MM-DD`) as `01 May 2024`.
///
/// Unparseable input is shown verbatim rather than hidden.
pub fn format_display_date(raw: &str) -> String {
    const FORMAT: &str = "%d %b %Y";

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.format(FORMAT).to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format(FORMAT).to_string();
    }
    raw.to_string()
}
