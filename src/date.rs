use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

pub(crate) const INVALID_DATE: &str = "Invalid Date";

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses a front-matter date. Naive forms are read as UTC.
pub(crate) fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

pub(crate) fn to_iso_string(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `January 5, 2025`
pub(crate) fn format_long(value: &str) -> String {
    parse_date(value).map_or_else(
        || INVALID_DATE.to_string(),
        |dt| dt.format("%B %-d, %Y").to_string(),
    )
}

/// `Jan 5, 2025`
pub(crate) fn format_short(value: &str) -> String {
    parse_date(value).map_or_else(
        || INVALID_DATE.to_string(),
        |dt| dt.format("%b %-d, %Y").to_string(),
    )
}
