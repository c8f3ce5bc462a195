//! Property-list decoding with the `plist` crate.

use std::io::Cursor;
use std::time::SystemTime;

use chrono::{DateTime, SecondsFormat, Utc};
use hostfacts_core::domain::Structured;
use hostfacts_core::ports::{DecodeError, PlistDecoder};
use plist::Value;

/// Decodes XML and binary property lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlistCrateDecoder;

impl PlistCrateDecoder {
    pub const fn new() -> Self {
        Self
    }
}

impl PlistDecoder for PlistCrateDecoder {
    fn decode(&self, payload: &[u8]) -> Result<Structured, DecodeError> {
        if payload.is_empty() {
            return Err(DecodeError::Empty);
        }
        let value = Value::from_reader(Cursor::new(payload))
            .map_err(|e| DecodeError::Malformed(e.to_string()))?;
        convert(value)
    }
}

fn convert(value: Value) -> Result<Structured, DecodeError> {
    Ok(match value {
        Value::Dictionary(dict) => Structured::Dict(
            dict.into_iter()
                .map(|(key, value)| convert(value).map(|value| (key, value)))
                .collect::<Result<_, _>>()?,
        ),
        Value::Array(items) => Structured::Array(
            items
                .into_iter()
                .map(convert)
                .collect::<Result<_, _>>()?,
        ),
        Value::String(text) => Structured::String(text),
        Value::Boolean(flag) => Structured::Boolean(flag),
        Value::Data(bytes) => Structured::Data(bytes),
        Value::Real(real) => Structured::Real(real),
        Value::Integer(integer) => match integer.as_signed() {
            Some(signed) => Structured::Integer(signed),
            None => integer
                .as_unsigned()
                .map(|unsigned| Structured::Real(unsigned as f64))
                .ok_or_else(|| DecodeError::Malformed(format!("integer {integer:?} out of range")))?,
        },
        Value::Date(date) => {
            let at: DateTime<Utc> = SystemTime::from(date).into();
            Structured::Date(at.to_rfc3339_opts(SecondsFormat::Secs, true))
        }
        other => {
            return Err(DecodeError::Malformed(format!(
                "unsupported property list value {other:?}"
            )));
        }
    })
}
