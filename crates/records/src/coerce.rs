//! Boundary coercion for loosely-typed upstream columns.
//!
//! Dates and flags arrive as whatever the feed produced (ISO strings, timestamps,
//! empty strings, 0/1 integers). Anything that cannot be read is coerced to
//! `None` instead of failing the whole relation.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse a calendar date from the formats upstream feeds are known to emit.
///
/// Time-of-day components are dropped; only date granularity matters to the engine.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDate {
    Text(String),
    Other(IgnoredAny),
}

/// `deserialize_with` helper for optional date columns.
///
/// Use together with `#[serde(default)]` so absent columns also become `None`.
pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawDate> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawDate::Text(s)) => parse_date(&s),
        _ => None,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Bool(bool),
    Int(i64),
    Float(f64),
    Other(IgnoredAny),
}

/// `deserialize_with` helper for 0/1 indicator columns.
pub fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawFlag> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawFlag::Bool(b)) => Some(b),
        Some(RawFlag::Int(0)) => Some(false),
        Some(RawFlag::Int(1)) => Some(true),
        Some(RawFlag::Float(f)) if f == 0.0 => Some(false),
        Some(RawFlag::Float(f)) if f == 1.0 => Some(true),
        _ => None,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    Text(String),
    Other(IgnoredAny),
}

/// `deserialize_with` helper for required text columns.
///
/// Null and non-string cells read as an empty string, so one bad registry row does
/// not fail the whole relation.
pub fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawText> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawText::Text(s)) => s.trim().to_string(),
        _ => String::new(),
    })
}
