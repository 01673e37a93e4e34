//! Record field extraction from catalog metadata
//!
//! The publication year comes from `date-start`. No fallback year is ever
//! substituted: a missing or unparseable date fails the item.

use crate::types::CatalogItem;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde_json::Value;
use thiserror::Error;

/// Metadata field holding the item's start date
pub const DATE_START_FIELD: &str = "date-start";

/// Metadata field holding the canonical identifier
pub const IDENTIFIER_FIELD: &str = "identifier";

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%d %B %Y"];

/// Field extraction errors
#[derive(Debug, Error, PartialEq)]
pub enum ExtractError {
    #[error("Missing metadata field: {0}")]
    MissingField(&'static str),

    #[error("Unparseable date '{value}'")]
    DateParse { value: String },
}

/// Identifier for the record: metadata value if present, else the search hit
pub fn extract_identifier(item: &CatalogItem) -> String {
    item.metadata
        .get(IDENTIFIER_FIELD)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(&item.identifier)
        .to_string()
}

/// Calendar year of the item's `date-start`
pub fn extract_year(item: &CatalogItem) -> Result<i32, ExtractError> {
    let raw = item
        .metadata
        .get(DATE_START_FIELD)
        .ok_or(ExtractError::MissingField(DATE_START_FIELD))?;

    // Repeated fields arrive as arrays; the first entry wins
    let value = match raw {
        Value::Array(values) => values
            .first()
            .ok_or(ExtractError::MissingField(DATE_START_FIELD))?,
        other => other,
    };

    match value {
        Value::String(s) => parse_year(s),
        other => Err(ExtractError::DateParse {
            value: other.to_string(),
        }),
    }
}

/// Parse the year out of a timestamp string
///
/// Accepts RFC 3339, naive date-times, `YYYY-MM-DD`, `YYYY/MM/DD`,
/// month-name dates (`March 1, 1942`, `March 1942`), `YYYY-MM` and `YYYY`.
pub fn parse_year(value: &str) -> Result<i32, ExtractError> {
    let s = value.trim();
    let fail = || ExtractError::DateParse {
        value: value.to_string(),
    };

    if s.is_empty() {
        return Err(fail());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.year());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt.year());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Ok(date.year());
        }
    }
    // chrono needs a day to build a date, so pin one for YYYY-MM and "March 1942"
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d") {
        return Ok(date.year());
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("1 {}", s), "%d %B %Y") {
        return Ok(date.year());
    }
    if s.len() == 4 && s.chars().all(|c| c.is_ascii_digit()) {
        return s.parse().map_err(|_| fail());
    }

    Err(fail())
}
