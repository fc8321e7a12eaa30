//! Serde helpers for fields that arrive either as JSON strings or JSON numbers.
//!
//! Clients and the portal bridge are inconsistent about `year` and `credit`
//! typing, so both shapes are folded into a string before validation.

use serde::{de, Deserialize, Deserializer, Serializer};
use serde_json::Value;

use crate::models::course::CrnInput;

pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!(
            "expected string or number, found {}",
            other
        ))),
    }
}

pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected string or number, found {}",
            other
        ))),
    }
}

/// An explicit `null` CRN is treated the same as a missing one.
pub fn crn_or_absent<'de, D>(deserializer: D) -> Result<CrnInput, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<CrnInput>::deserialize(deserializer)?.unwrap_or_default())
}

/// Whole credit totals are written as integers (`6`, not `6.0`).
pub fn credits<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
