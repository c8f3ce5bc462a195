//! Structured-data decoding port.

use super::DecodeError;
use crate::domain::Structured;

/// Decodes XML or binary property lists into a `Structured` tree.
pub trait PlistDecoder: Send + Sync {
    fn decode(&self, payload: &[u8]) -> Result<Structured, DecodeError>;
}
