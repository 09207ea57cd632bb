//! Field-resolution tables for loosely-shaped upstream JSON.
//!
//! # Responsibility
//! - Resolve one logical field from an ordered list of candidate keys.
//! - Coerce scalar JSON values (numbers, numeric strings, flags, dates) into
//!   the core's typed representation.
//!
//! # Invariants
//! - Candidates are tried in order; the first one that yields a usable value
//!   wins. `null` and values that fail coercion fall through to the next key.
//! - Coercion never panics and never errors: unusable input is `None`.
//! - Malformed timestamps are logged here once and then treated as absent.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::warn;
use serde_json::{Map, Value};

/// Ordered candidate keys for one logical field.
pub type Candidates = &'static [&'static str];

/// JSON object shape shared by every resolver.
pub type JsonObject = Map<String, Value>;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Returns the first candidate value for which `coerce` yields `Some`.
pub fn resolve_with<T>(
    object: &JsonObject,
    candidates: &[&str],
    coerce: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    candidates
        .iter()
        .filter_map(|key| object.get(*key))
        .find_map(|value| coerce(value))
}

/// Returns the first candidate holding a non-null value, uncoerced.
pub fn resolve_raw<'a>(object: &'a JsonObject, candidates: &[&str]) -> Option<&'a Value> {
    candidates
        .iter()
        .filter_map(|key| object.get(*key))
        .find(|value| !value.is_null())
}

pub fn resolve_i64(object: &JsonObject, candidates: &[&str]) -> Option<i64> {
    resolve_with(object, candidates, as_i64)
}

pub fn resolve_positive_i64(object: &JsonObject, candidates: &[&str]) -> Option<i64> {
    resolve_with(object, candidates, as_positive_i64)
}

pub fn resolve_text(object: &JsonObject, candidates: &[&str]) -> Option<String> {
    resolve_with(object, candidates, as_text)
}

pub fn resolve_flag(object: &JsonObject, candidates: &[&str]) -> Option<bool> {
    resolve_with(object, candidates, as_flag)
}

/// Resolves an epoch-millisecond timestamp.
///
/// Candidates holding a value that cannot be parsed are logged as
/// `event=timestamp_malformed` and skipped.
pub fn resolve_timestamp(object: &JsonObject, candidates: &[&str], field: &str) -> Option<i64> {
    for key in candidates {
        let Some(value) = object.get(*key) else {
            continue;
        };
        match parse_timestamp(value) {
            TimestampParse::Parsed(millis) => return Some(millis),
            TimestampParse::Absent => {}
            TimestampParse::Malformed => {
                warn!(
                    "event=timestamp_malformed module=fields status=degraded field={} key={}",
                    field, key
                );
            }
        }
    }
    None
}

/// Integer coercion: JSON integers, integral floats and numeric strings.
pub fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.fract() == 0.0 && float.abs() < i64::MAX as f64)
                .map(|float| float as i64)
        }),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
}

pub fn as_positive_i64(value: &Value) -> Option<i64> {
    as_i64(value).filter(|id| *id > 0)
}

/// Trimmed text, or `None` when blank.
///
/// This is the only text shape `as_text` ever yields, so values passed
/// through it survive a JSON round trip unchanged.
pub fn canonical_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Text coercion: non-blank strings (trimmed) and numbers.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => canonical_text(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Flag coercion: booleans, `0`/`1` and their string forms.
pub fn as_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => match number.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Outcome of parsing one timestamp value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampParse {
    /// `null`, missing or blank.
    Absent,
    /// Epoch milliseconds.
    Parsed(i64),
    /// Present but not understood.
    Malformed,
}

/// Parses epoch milliseconds, RFC 3339 and `YYYY-MM-DD[ HH:MM[:SS]]` values.
///
/// Naive date/time strings are interpreted as UTC.
pub fn parse_timestamp(value: &Value) -> TimestampParse {
    match value {
        Value::Null => TimestampParse::Absent,
        Value::Number(_) => match as_i64(value) {
            Some(millis) => TimestampParse::Parsed(millis),
            None => TimestampParse::Malformed,
        },
        Value::String(text) => parse_timestamp_str(text),
        _ => TimestampParse::Malformed,
    }
}

fn parse_timestamp_str(text: &str) -> TimestampParse {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return TimestampParse::Absent;
    }
    if let Ok(millis) = trimmed.parse::<i64>() {
        return TimestampParse::Parsed(millis);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return TimestampParse::Parsed(parsed.timestamp_millis());
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return TimestampParse::Parsed(parsed.and_utc().timestamp_millis());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return TimestampParse::Parsed(midnight.and_utc().timestamp_millis());
        }
    }
    TimestampParse::Malformed
}
