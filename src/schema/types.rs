//! Column type definitions and cast rules
//!
//! Supported column types:
//! - string: UTF-8 string
//! - int: 64-bit signed integer
//! - float: 64-bit floating point
//! - bool: Boolean
//! - timestamp: RFC 3339 instant, normalized to UTC
//! - json: arbitrary JSON, passed through

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Supported column types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Int,
    /// 64-bit floating point
    Float,
    /// Boolean
    Bool,
    /// Instant, normalized to RFC 3339 UTC
    Timestamp,
    /// Arbitrary JSON, no cast applied
    Json,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Bool => "bool",
            FieldType::Timestamp => "timestamp",
            FieldType::Json => "json",
        }
    }

    /// Cast a raw cell to this column type.
    ///
    /// Casts are lenient the way driver values arrive: numeric strings
    /// parse under int/float, "true"/"t"/"1" parse under bool, timestamps
    /// normalize to RFC 3339 UTC. Null survives every cast. A cell that
    /// does not fit the rule passes through unchanged rather than being
    /// dropped.
    pub fn cast(&self, raw: Value) -> Value {
        if raw.is_null() {
            return raw;
        }
        match self {
            FieldType::String => cast_string(raw),
            FieldType::Int => cast_int(raw),
            FieldType::Float => cast_float(raw),
            FieldType::Bool => cast_bool(raw),
            FieldType::Timestamp => cast_timestamp(raw),
            FieldType::Json => raw,
        }
    }
}

fn cast_string(raw: Value) -> Value {
    match raw {
        Value::String(_) => raw,
        Value::Number(n) => Value::String(n.to_string()),
        Value::Bool(b) => Value::String(b.to_string()),
        other => other,
    }
}

fn cast_int(raw: Value) -> Value {
    match &raw {
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                raw
            } else {
                // Drivers sometimes deliver integral columns as floats
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 => Value::from(f as i64),
                    _ => raw,
                }
            }
        }
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(i) => Value::from(i),
            Err(_) => raw,
        },
        Value::Bool(b) => Value::from(*b as i64),
        _ => raw,
    }
}

fn cast_float(raw: Value) -> Value {
    match &raw {
        Value::Number(n) => match n.as_f64() {
            Some(f) => Value::from(f),
            None => raw,
        },
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(f) => Value::from(f),
            Err(_) => raw,
        },
        _ => raw,
    }
}

fn cast_bool(raw: Value) -> Value {
    match &raw {
        Value::Bool(_) => raw,
        Value::Number(n) => Value::Bool(n.as_i64().map(|i| i != 0).unwrap_or(true)),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "1" => Value::Bool(true),
            "false" | "f" | "0" => Value::Bool(false),
            _ => raw.clone(),
        },
        _ => raw,
    }
}

fn cast_timestamp(raw: Value) -> Value {
    match &raw {
        Value::String(s) => {
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Value::String(dt.with_timezone(&Utc).to_rfc3339());
            }
            // Common driver format without zone, assumed UTC
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
                return Value::String(naive.and_utc().to_rfc3339());
            }
            raw.clone()
        }
        Value::Number(n) => match n.as_i64().and_then(|secs| DateTime::from_timestamp(secs, 0)) {
            Some(dt) => Value::String(dt.to_rfc3339()),
            None => raw.clone(),
        },
        _ => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_int_cast_parses_numeric_strings() {
        assert_eq!(FieldType::Int.cast(json!("42")), json!(42));
        assert_eq!(FieldType::Int.cast(json!(" 7 ")), json!(7));
        assert_eq!(FieldType::Int.cast(json!(42)), json!(42));
    }

    #[test]
    fn test_int_cast_integral_float() {
        assert_eq!(FieldType::Int.cast(json!(42.0)), json!(42));
    }

    #[test]
    fn test_int_cast_passes_through_garbage() {
        assert_eq!(FieldType::Int.cast(json!("abc")), json!("abc"));
    }

    #[test]
    fn test_float_cast() {
        assert_eq!(FieldType::Float.cast(json!("2.5")), json!(2.5));
        assert_eq!(FieldType::Float.cast(json!(3)), json!(3.0));
    }

    #[test]
    fn test_bool_cast() {
        assert_eq!(FieldType::Bool.cast(json!("t")), json!(true));
        assert_eq!(FieldType::Bool.cast(json!("0")), json!(false));
        assert_eq!(FieldType::Bool.cast(json!(1)), json!(true));
        assert_eq!(FieldType::Bool.cast(json!("maybe")), json!("maybe"));
    }

    #[test]
    fn test_string_cast_stringifies_scalars() {
        assert_eq!(FieldType::String.cast(json!(12)), json!("12"));
        assert_eq!(FieldType::String.cast(json!(true)), json!("true"));
        assert_eq!(FieldType::String.cast(json!("x")), json!("x"));
    }

    #[test]
    fn test_timestamp_cast_normalizes_to_utc() {
        let cast = FieldType::Timestamp.cast(json!("2024-03-01T12:00:00+02:00"));
        assert_eq!(cast, json!("2024-03-01T10:00:00+00:00"));
    }

    #[test]
    fn test_timestamp_cast_naive_assumed_utc() {
        let cast = FieldType::Timestamp.cast(json!("2024-03-01 12:00:00"));
        assert_eq!(cast, json!("2024-03-01T12:00:00+00:00"));
    }

    #[test]
    fn test_null_survives_every_cast() {
        for ft in [
            FieldType::String,
            FieldType::Int,
            FieldType::Float,
            FieldType::Bool,
            FieldType::Timestamp,
            FieldType::Json,
        ] {
            assert_eq!(ft.cast(Value::Null), Value::Null, "{}", ft.type_name());
        }
    }
}
