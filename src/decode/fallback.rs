//! Ordered-fallback decoding for untagged payloads.

use serde_json::Value;

use super::DecodeError;

/// One candidate shape in an ordered-fallback decode.
///
/// `parse` is a pure attempt: `Some` commits to this shape, `None` falls
/// through to the next candidate. The `name` is what failure reports show,
/// so it should read like a type name.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<T> {
    pub name: &'static str,
    pub parse: fn(&Value) -> Option<T>,
}

/// Try each candidate in list order and commit to the first success.
///
/// The list order is the tie-break: a payload that could satisfy more than
/// one candidate always decodes as the earliest one. When every candidate
/// declines, the failure names each attempted shape.
pub fn first_match<T>(payload: &Value, candidates: &[Candidate<T>]) -> Result<T, DecodeError> {
    for candidate in candidates {
        if let Some(value) = (candidate.parse)(payload) {
            return Ok(value);
        }
    }
    Err(DecodeError::NoMatchingVariant {
        attempted: candidates.iter().map(|candidate| candidate.name).collect(),
    })
}
