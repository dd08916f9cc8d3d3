//! Normalization helpers for values persisted by older app versions.
//!
//! The store predates strict typing: completion flags were written variously
//! as JSON booleans, the strings `"true"`/`"false"`, or null, and date keys
//! occasionally carry a trailing time component. These helpers fold all of
//! that back into canonical Rust types during deserialization, so the rest of
//! the crate only ever sees strict `bool` and `NaiveDate` values.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Canonical storage format for date keys (`YYYY-MM-DD`).
///
/// Lexicographic order of keys in this format equals calendar order, which
/// the range queries rely on.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Folds a loosely-typed persisted flag into a strict boolean.
///
/// Only JSON `true` and the exact string `"true"` count as set; `false`,
/// `"false"`, null, numbers, and any other shape normalize to `false`.
#[must_use]
pub fn normalize_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s == "true",
        _ => false,
    }
}

/// Serde adapter deserializing a flag field through [`normalize_bool`].
///
/// Combine with `#[serde(default)]` on the field so a missing key also
/// normalizes to `false`.
///
/// # Errors
/// Returns an error only when the surrounding JSON is malformed; any value
/// shape is accepted.
pub fn deserialize_loose_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(normalize_bool(&value))
}

/// Parses a stored date key, tolerating a trailing time component.
///
/// Older exports wrote full ISO datetimes (`2024-03-01T08:30:00`) where the
/// canonical form is the bare `2024-03-01` key; both parse to the same date.
/// Returns `None` when the value is not a date at all.
#[must_use]
pub fn parse_date_key(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, DATE_KEY_FORMAT).ok()
}

/// Formats a date as its canonical storage key.
#[must_use]
pub fn format_date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Serde adapter pair for `NaiveDate` fields stored as date keys.
///
/// Use as `#[serde(with = "crate::entities::normalize::date_key")]`.
/// Serialization always writes the canonical bare key; deserialization goes
/// through [`parse_date_key`] and therefore accepts legacy datetime strings.
pub mod date_key {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de};

    /// Serializes `date` as a canonical `YYYY-MM-DD` string.
    ///
    /// # Errors
    /// Propagates serializer failures.
    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_date_key(*date))
    }

    /// Deserializes a date key, accepting a trailing time component.
    ///
    /// # Errors
    /// Fails when the stored value is not a string or does not start with a
    /// parseable date.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_date_key(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid date key: {raw}")))
    }
}
