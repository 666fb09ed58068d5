//! Date helper functions

use chrono::{DateTime, NaiveDate};

/// Placeholder rendered for unparseable date input
pub const INVALID_DATE: &str = "invalid date";

/// Format an ISO-ish date string for display, lowercased
///
/// The default site format is `%-d %b %Y`, a short localized form like
/// `15 mar 2021`. Invalid input renders as [`INVALID_DATE`] instead of
/// failing the page.
///
/// # Examples
/// ```ignore
/// format_date("2021-03-15T10:00:00+0000", "%-d %b %Y") // -> "15 mar 2021"
/// ```
pub fn format_date(date: &str, format: &str) -> String {
    match parse(date) {
        Some(parsed) => parsed.format(format).to_string().to_lowercase(),
        None => INVALID_DATE.to_string(),
    }
}

/// Parse the date formats the CMS emits
fn parse(date: &str) -> Option<NaiveDate> {
    // Full timestamps, with and without a colon in the offset
    if let Ok(parsed) = DateTime::parse_from_rfc3339(date) {
        return Some(parsed.date_naive());
    }
    if let Ok(parsed) = DateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(parsed.date_naive());
    }

    // Bare dates
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cms_timestamp() {
        assert_eq!(
            format_date("2021-03-15T10:00:00+0000", "%-d %b %Y"),
            "15 mar 2021"
        );
    }

    #[test]
    fn test_format_rfc3339_timestamp() {
        assert_eq!(
            format_date("2021-03-15T10:00:00+00:00", "%-d %b %Y"),
            "15 mar 2021"
        );
    }

    #[test]
    fn test_format_bare_date() {
        assert_eq!(format_date("2021-03-05", "%-d %b %Y"), "5 mar 2021");
    }

    #[test]
    fn test_format_is_deterministic() {
        let first = format_date("2021-03-15T10:00:00+0000", "%-d %b %Y");
        let second = format_date("2021-03-15T10:00:00+0000", "%-d %b %Y");
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(format_date("not a date", "%-d %b %Y"), INVALID_DATE);
        assert_eq!(format_date("", "%-d %b %Y"), INVALID_DATE);
    }
}
