//! Strict date/datetime detection for string values.
//!
//! Deliberately trades recall for precision: only the unambiguous formats
//! below classify, everything else stays a plain string. A pattern match
//! alone is not enough; the candidate must also parse under the calendar
//! (`2023-02-30` is rejected).

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::ir::Primitive;

static DATE_DASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());
static DATE_SLASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}/\d{2}/\d{2}$").unwrap());

/// ISO-8601 with a literal `T`, seconds required, optional fractional
/// seconds, optional `Z` or `±HH:MM` / `±HHMM` offset.
static DATETIME_ISO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.\d+)?(Z|[+-]\d{2}:?\d{2})?$").unwrap()
});

/// Classify a string as a `Date` or `DateTime` literal, or neither.
pub fn classify(s: &str) -> Option<Primitive> {
    if DATE_DASH.is_match(s) {
        return NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().map(|_| Primitive::Date);
    }
    if DATE_SLASH.is_match(s) {
        return NaiveDate::parse_from_str(s, "%Y/%m/%d").ok().map(|_| Primitive::Date);
    }
    if let Some(caps) = DATETIME_ISO.captures(s) {
        let valid = match caps.get(1).map(|m| m.as_str()) {
            None => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").is_ok(),
            Some("Z") => DateTime::parse_from_rfc3339(s).is_ok(),
            // chrono's %z accepts the offset with or without the colon
            Some(_) => DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z").is_ok(),
        };
        return valid.then_some(Primitive::DateTime);
    }
    None
}

// ------------------------------- Tests ------------------------------------ //
