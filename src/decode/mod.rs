//! 变体解码模块：处理带判别字段和无判别字段的多态载荷。
//!
//! # Decode Module
//!
//! Two decoding strategies cover every polymorphic payload on the wire:
//!
//! | Strategy | Used for | Entry point |
//! |----------|----------|-------------|
//! | Discriminator dispatch | `Message` (`role` field) | [`discriminator`] + per-variant decode |
//! | Ordered fallback | `Content` / content parts (no tag) | [`first_match`] over a [`Candidate`] list |
//!
//! Both strategies report failures through [`DecodeError`], which always
//! names the discriminator value seen, the variant whose shape was violated,
//! or every candidate shape that was attempted. A bare "decode failed" never
//! leaves this module.
//!
//! Candidate parses are plain functions returning `Option`; no error is used
//! as control flow while falling through the priority list.

mod fallback;

pub use fallback::{first_match, Candidate};

use serde_json::Value;
use thiserror::Error;

/// Decode failure taxonomy for polymorphic payloads.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The payload has no discriminator field at all (or is not an object,
    /// in which case no field can exist).
    #[error("missing discriminator field `{field}`")]
    MissingDiscriminator { field: &'static str },

    /// The discriminator is present but its value names no known variant.
    #[error("unknown variant `{value}` for discriminator `{field}`, expected one of {}", tag_list(.expected))]
    UnknownVariant {
        field: &'static str,
        value: String,
        expected: &'static [&'static str],
    },

    /// The discriminator selected a variant, but the remaining fields do not
    /// satisfy that variant's shape. `reason` names the offending field.
    #[error("payload does not match the `{variant}` variant: {reason}")]
    VariantShapeMismatch {
        variant: &'static str,
        reason: String,
    },

    /// Ordered fallback exhausted every candidate shape.
    #[error("no candidate shape matched, attempted {}", tag_list(.attempted))]
    NoMatchingVariant { attempted: Vec<&'static str> },
}

/// Extract a discriminator value from an object payload.
///
/// Absent field (or non-object payload) is [`DecodeError::MissingDiscriminator`].
/// A present but non-string value cannot name a variant and is reported as
/// [`DecodeError::UnknownVariant`] with the value rendered as JSON.
pub fn discriminator<'a>(
    payload: &'a Value,
    field: &'static str,
    expected: &'static [&'static str],
) -> Result<&'a str, DecodeError> {
    match payload.get(field) {
        Some(Value::String(tag)) => Ok(tag),
        Some(other) => Err(DecodeError::UnknownVariant {
            field,
            value: other.to_string(),
            expected,
        }),
        None => Err(DecodeError::MissingDiscriminator { field }),
    }
}

fn tag_list(tags: &[&str]) -> String {
    tags.iter()
        .map(|tag| format!("`{tag}`"))
        .collect::<Vec<_>>()
        .join(", ")
}
