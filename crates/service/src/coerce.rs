//! Lenient field decoding for request bodies.
//!
//! Clients send strings padded with whitespace, numbers as strings and dates
//! in a few formats. These helpers are used with `#[serde(deserialize_with)]`
//! so that every body struct applies the same rules: trimmed text with blanks
//! treated as absent, integers from numbers or numeric strings, and dates as
//! `%d-%m-%y`, `%Y-%m-%d` or RFC 3339.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Short day-month-year form used by the registry's clients.
pub const DATEFORMAT: &str = "%d-%m-%y";

pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let v = Option::<Value>::deserialize(d)?;
    match v {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(clean(&s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(de::Error::custom(format!("expected text, got {}", other))),
    }
}

pub fn int<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i32>, D::Error> {
    let v = Option::<Value>::deserialize(d)?;
    match v {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|i| i32::try_from(i).ok())
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("expected an integer, got {}", n))),
        Some(Value::String(s)) => match clean(&s) {
            None => Ok(None),
            Some(s) => s
                .parse::<i32>()
                .map(Some)
                .map_err(|_| de::Error::custom(format!("expected an integer, got {:?}", s))),
        },
        Some(other) => Err(de::Error::custom(format!("expected an integer, got {}", other))),
    }
}

pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    let v = Option::<Value>::deserialize(d)?;
    match v {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(b)),
        Some(Value::Number(n)) => Ok(Some(n.as_i64().unwrap_or(0) != 0)),
        Some(Value::String(s)) => match clean(&s).map(|s| s.to_lowercase()) {
            None => Ok(None),
            Some(s) if matches!(s.as_str(), "true" | "yes" | "1") => Ok(Some(true)),
            Some(s) if matches!(s.as_str(), "false" | "no" | "0") => Ok(Some(false)),
            Some(s) => Err(de::Error::custom(format!("expected a boolean, got {:?}", s))),
        },
        Some(other) => Err(de::Error::custom(format!("expected a boolean, got {}", other))),
    }
}

pub fn date<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<FixedOffset>>, D::Error> {
    match text(d)? {
        None => Ok(None),
        Some(s) => parse_date(&s)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("unrecognised date {:?}, expected dd-mm-yy", s))),
    }
}

fn clean(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

pub fn parse_date(s: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    [DATEFORMAT, "%Y-%m-%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive).fixed_offset())
}
