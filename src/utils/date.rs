//! Date parsing for content front matter.
//!
//! Front matter dates arrive as free-form strings. Accepted shapes:
//!
//! | Format                  | Example                     |
//! |-------------------------|-----------------------------|
//! | RFC 3339                | `2024-06-15T14:30:45+02:00` |
//! | Date and time (naive)   | `2024-06-15 14:30:45`       |
//! | Date and time, `T` sep  | `2024-06-15T14:30:45`       |
//! | Date only               | `2024-06-15`                |
//!
//! Naive values carry no offset and are taken as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse a front matter date string into a UTC timestamp.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
