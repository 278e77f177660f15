//! Date labels shared by the PDF and HTML renderers.

use chrono::{DateTime, NaiveDate};

pub const PRESENT: &str = "Present";
pub const UNSPECIFIED: &str = "Unspecified";

/// Parses the calendar-date spellings the bot flow and the backend produce.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d") {
        return Some(date);
    }
    NaiveDate::parse_from_str(raw, "%m/%d/%Y").ok()
}

/// `"Jan 2024"` for a parseable date, `"Present"` for an absent one.
/// Unparseable text is shown as written.
pub fn format_date(raw: Option<&str>) -> String {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => PRESENT.to_string(),
        Some(text) => parse_calendar_date(text)
            .map(|date| date.format("%b %Y").to_string())
            .unwrap_or_else(|| text.to_string()),
    }
}

/// `"{start} - {end}"` for an entry.
///
/// Only `is_current` yields "Present"; a missing end date on a finished
/// entry reads "Unspecified". Returns `None` when there is nothing to show.
pub fn date_range(start: Option<&str>, end: Option<&str>, is_current: bool) -> Option<String> {
    let start = start.map(str::trim).filter(|s| !s.is_empty());
    let end = end.map(str::trim).filter(|s| !s.is_empty());

    if start.is_none() && end.is_none() && !is_current {
        return None;
    }

    let start_label = start
        .map(|s| format_date(Some(s)))
        .unwrap_or_else(|| UNSPECIFIED.to_string());
    let end_label = if is_current {
        PRESENT.to_string()
    } else {
        end.map(|e| format_date(Some(e)))
            .unwrap_or_else(|| UNSPECIFIED.to_string())
    };

    Some(format!("{start_label} - {end_label}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_iso() {
        assert_eq!(format_date(Some("2024-01-15")), "Jan 2024");
    }

    #[test]
    fn test_format_date_absent_is_present() {
        assert_eq!(format_date(None), "Present");
        assert_eq!(format_date(Some("  ")), "Present");
    }

    #[test]
    fn test_format_date_other_spellings() {
        assert_eq!(format_date(Some("2023-11-02T08:30:00Z")), "Nov 2023");
        assert_eq!(format_date(Some("2022-07")), "Jul 2022");
        assert_eq!(format_date(Some("03/09/2021")), "Mar 2021");
    }

    #[test]
    fn test_format_date_unparseable_is_verbatim() {
        assert_eq!(format_date(Some("last spring")), "last spring");
    }

    #[test]
    fn test_current_role_ends_in_present() {
        assert_eq!(
            date_range(Some("2021-03-01"), None, true).as_deref(),
            Some("Mar 2021 - Present")
        );
    }

    #[test]
    fn test_current_flag_overrides_end_date() {
        assert_eq!(
            date_range(Some("2021-03-01"), Some("2022-05-01"), true).as_deref(),
            Some("Mar 2021 - Present")
        );
    }

    #[test]
    fn test_finished_role_without_end_is_unspecified() {
        assert_eq!(
            date_range(Some("2021-03-01"), None, false).as_deref(),
            Some("Mar 2021 - Unspecified")
        );
    }

    #[test]
    fn test_closed_range() {
        assert_eq!(
            date_range(Some("2019-06-01"), Some("2020-12-31"), false).as_deref(),
            Some("Jun 2019 - Dec 2020")
        );
    }

    #[test]
    fn test_nothing_known_is_none() {
        assert_eq!(date_range(None, Some(""), false), None);
    }

    #[test]
    fn test_missing_start_current() {
        assert_eq!(
            date_range(None, None, true).as_deref(),
            Some("Unspecified - Present")
        );
    }
}
