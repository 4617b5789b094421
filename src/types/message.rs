//! Chat message types with role-discriminated decoding and polymorphic content.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::decode::{self, Candidate, DecodeError};
use crate::types::chat::ToolCall;

/// Speaker role, carried on the wire in the `role` discriminator field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

impl Role {
    /// Known discriminator tags, in declaration order.
    pub const NAMES: &'static [&'static str] = &["system", "user", "assistant", "tool"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chat message, one variant per role.
///
/// Serialization writes the variant's fields plus the `role` tag. Decoding
/// goes through [`Message::decode`]: dispatch on `role`, then check the
/// remaining fields against the selected variant's shape. An unrecognized
/// role is always an error, never a default variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    System(SystemMessage),
    User(UserMessage),
    Assistant(AssistantMessage),
    Tool(ToolMessage),
}

/// Fields of a `role: system` message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemMessage {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Fields of a `role: user` message. `content` is itself polymorphic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMessage {
    pub content: Content,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Fields of a `role: assistant` message. `content` may be absent when the
/// model responded with tool calls only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

/// Fields of a `role: tool` message (a tool result echoed back to the model).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolMessage {
    pub content: String,
    pub tool_call_id: String,
}

impl Message {
    /// Decode a message payload by dispatching on the `role` field.
    ///
    /// Produces exactly one variant or a [`DecodeError`] naming what went
    /// wrong: the missing discriminator, the unrecognized role value, or the
    /// field that violated the selected variant's shape.
    pub fn decode(payload: &Value) -> Result<Self, DecodeError> {
        let role = decode::discriminator(payload, "role", Role::NAMES)?;
        match role {
            "system" => variant(payload, "system").map(Message::System),
            "user" => variant(payload, "user").map(Message::User),
            "assistant" => variant(payload, "assistant").map(Message::Assistant),
            "tool" => variant(payload, "tool").map(Message::Tool),
            other => Err(DecodeError::UnknownVariant {
                field: "role",
                value: other.to_owned(),
                expected: Role::NAMES,
            }),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Message::System(_) => Role::System,
            Message::User(_) => Role::User,
            Message::Assistant(_) => Role::Assistant,
            Message::Tool(_) => Role::Tool,
        }
    }

    /// System message with plain text content.
    pub fn system(content: impl Into<String>) -> Self {
        Message::System(SystemMessage {
            content: content.into(),
            name: None,
        })
    }

    /// User message; accepts plain text or prepared [`Content`].
    pub fn user(content: impl Into<Content>) -> Self {
        Message::User(UserMessage {
            content: content.into(),
            name: None,
        })
    }

    /// Assistant message with plain text content.
    pub fn assistant(content: impl Into<String>) -> Self {
        Message::Assistant(AssistantMessage {
            content: Some(content.into()),
            name: None,
            tool_calls: None,
        })
    }

    /// Tool-result message answering the given tool call.
    pub fn tool(content: impl Into<String>, tool_call_id: impl Into<String>) -> Self {
        Message::Tool(ToolMessage {
            content: content.into(),
            tool_call_id: tool_call_id.into(),
        })
    }
}

impl<'de> Deserialize<'de> for Message {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let payload = Value::deserialize(deserializer)?;
        Message::decode(&payload).map_err(serde::de::Error::custom)
    }
}

/// Decode the non-discriminator fields against one variant's shape.
fn variant<T: DeserializeOwned>(payload: &Value, name: &'static str) -> Result<T, DecodeError> {
    T::deserialize(payload).map_err(|source| DecodeError::VariantShapeMismatch {
        variant: name,
        reason: source.to_string(),
    })
}

/// User-message content: a bare string or a sequence of typed parts.
///
/// The wire carries no discriminator between the two encodings, so decoding
/// tries the scalar shape first and the part-array shape second; the first
/// success wins ([`Content::decode`]).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Parts(Vec<ContentPart>),
}

/// One element of structured content, distinguished by ordered fallback:
/// text part first, image part second.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContentPart {
    Text(TextContentPart),
    Image(ImageContentPart),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContentPart {
    #[serde(rename = "type")]
    pub part_type: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageContentPart {
    #[serde(rename = "type")]
    pub part_type: String,
    pub image_url: ImageUrl,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Content {
    /// Candidate shapes in priority order, as shown in failure reports. The
    /// two part shapes are listed individually because the array form only
    /// fails when some element matches neither of them.
    const SHAPES: &'static [&'static str] = &["String", "TextContentPart", "ImageContentPart"];

    /// Decode content by ordered fallback: scalar text, then part array.
    ///
    /// The priority order is fixed; a payload that could satisfy more than
    /// one shape always decodes as the earliest. Total failure names every
    /// attempted shape.
    pub fn decode(payload: &Value) -> Result<Self, DecodeError> {
        if let Some(text) = payload.as_str() {
            return Ok(Content::Text(text.to_owned()));
        }
        if let Some(items) = payload.as_array() {
            let mut parts = Vec::with_capacity(items.len());
            let mut all_parts = true;
            for item in items {
                match ContentPart::decode(item) {
                    Ok(part) => parts.push(part),
                    Err(_) => {
                        all_parts = false;
                        break;
                    }
                }
            }
            if all_parts {
                return Ok(Content::Parts(parts));
            }
        }
        Err(DecodeError::NoMatchingVariant {
            attempted: Self::SHAPES.to_vec(),
        })
    }

    pub fn text(text: impl Into<String>) -> Self {
        Content::Text(text.into())
    }

    pub fn parts(parts: impl Into<Vec<ContentPart>>) -> Self {
        Content::Parts(parts.into())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_owned())
    }
}

impl From<Vec<ContentPart>> for Content {
    fn from(parts: Vec<ContentPart>) -> Self {
        Content::Parts(parts)
    }
}

impl ContentPart {
    const CANDIDATES: &'static [Candidate<ContentPart>] = &[
        Candidate {
            name: "TextContentPart",
            parse: parse_text_part,
        },
        Candidate {
            name: "ImageContentPart",
            parse: parse_image_part,
        },
    ];

    /// Decode one part by ordered fallback over the two part shapes.
    pub fn decode(payload: &Value) -> Result<Self, DecodeError> {
        decode::first_match(payload, Self::CANDIDATES)
    }

    /// `{"type": "text", ...}` part.
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text(TextContentPart {
            part_type: "text".to_owned(),
            text: text.into(),
        })
    }

    /// `{"type": "image_url", ...}` part.
    pub fn image_url(url: impl Into<String>) -> Self {
        ContentPart::Image(ImageContentPart {
            part_type: "image_url".to_owned(),
            image_url: ImageUrl {
                url: url.into(),
                detail: None,
            },
        })
    }
}

fn parse_text_part(payload: &Value) -> Option<ContentPart> {
    TextContentPart::deserialize(payload)
        .ok()
        .map(ContentPart::Text)
}

fn parse_image_part(payload: &Value) -> Option<ContentPart> {
    ImageContentPart::deserialize(payload)
        .ok()
        .map(ContentPart::Image)
}

impl<'de> Deserialize<'de> for Content {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let payload = Value::deserialize(deserializer)?;
        Content::decode(&payload).map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for ContentPart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let payload = Value::deserialize(deserializer)?;
        ContentPart::decode(&payload).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_every_role() {
        let system = Message::decode(&json!({"role": "system", "content": "be brief"})).unwrap();
        assert_eq!(system, Message::system("be brief"));

        let user = Message::decode(&json!({"role": "user", "content": "hello"})).unwrap();
        assert_eq!(user, Message::user("hello"));

        let assistant =
            Message::decode(&json!({"role": "assistant", "content": "hi there"})).unwrap();
        assert_eq!(assistant, Message::assistant("hi there"));

        let tool = Message::decode(
            &json!({"role": "tool", "content": "{\"ok\":true}", "tool_call_id": "call_1"}),
        )
        .unwrap();
        assert_eq!(tool, Message::tool("{\"ok\":true}", "call_1"));
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let err = Message::decode(&json!({"role": "narrator", "content": "once upon"})).unwrap_err();
        match err {
            DecodeError::UnknownVariant { field, value, expected } => {
                assert_eq!(field, "role");
                assert_eq!(value, "narrator");
                assert_eq!(expected, Role::NAMES);
            }
            other => panic!("expected UnknownVariant, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_role_is_rejected() {
        let err = Message::decode(&json!({"content": "hello"})).unwrap_err();
        assert_eq!(err, DecodeError::MissingDiscriminator { field: "role" });
    }

    #[test]
    fn test_variant_shape_mismatch_names_variant_and_field() {
        // system requires `content`
        let err = Message::decode(&json!({"role": "system"})).unwrap_err();
        match err {
            DecodeError::VariantShapeMismatch { variant, reason } => {
                assert_eq!(variant, "system");
                assert!(reason.contains("content"), "reason: {reason}");
            }
            other => panic!("expected VariantShapeMismatch, got {other:?}"),
        }

        // tool requires `tool_call_id`
        let err = Message::decode(&json!({"role": "tool", "content": "ok"})).unwrap_err();
        match err {
            DecodeError::VariantShapeMismatch { variant, reason } => {
                assert_eq!(variant, "tool");
                assert!(reason.contains("tool_call_id"), "reason: {reason}");
            }
            other => panic!("expected VariantShapeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_assistant_tool_calls_decode() {
        let payload = json!({
            "role": "assistant",
            "content": null,
            "tool_calls": [{
                "id": "call_abc123",
                "type": "function",
                "function": {"name": "get_weather", "arguments": "{\"location\": \"Tokyo\"}"}
            }]
        });
        let message = Message::decode(&payload).unwrap();
        match message {
            Message::Assistant(assistant) => {
                assert_eq!(assistant.content, None);
                let calls = assistant.tool_calls.unwrap();
                assert_eq!(calls.len(), 1);
                assert_eq!(calls[0].id, "call_abc123");
                assert_eq!(calls[0].function.name, "get_weather");
            }
            other => panic!("expected assistant, got {other:?}"),
        }
    }

    #[test]
    fn test_content_scalar_decodes_first() {
        assert_eq!(
            Content::decode(&json!("hello")).unwrap(),
            Content::Text("hello".to_owned())
        );
    }

    #[test]
    fn test_content_part_array_decodes_second() {
        let payload = json!([
            {"type": "text", "text": "hi"},
            {"type": "image_url", "image_url": {"url": "https://example.com/cat.png"}}
        ]);
        let content = Content::decode(&payload).unwrap();
        assert_eq!(
            content,
            Content::Parts(vec![
                ContentPart::text("hi"),
                ContentPart::image_url("https://example.com/cat.png"),
            ])
        );
    }

    #[test]
    fn test_content_failure_names_all_three_shapes() {
        let err = Content::decode(&json!({"neither": "shape"})).unwrap_err();
        assert_eq!(
            err,
            DecodeError::NoMatchingVariant {
                attempted: vec!["String", "TextContentPart", "ImageContentPart"],
            }
        );
    }

    #[test]
    fn test_content_array_with_foreign_element_fails_as_a_whole() {
        let payload = json!([
            {"type": "text", "text": "hi"},
            {"unrelated": true}
        ]);
        let err = Content::decode(&payload).unwrap_err();
        assert!(matches!(err, DecodeError::NoMatchingVariant { .. }));
    }

    #[test]
    fn test_ambiguous_part_prefers_text_shape() {
        // Satisfies both part shapes at once; the earlier candidate must win,
        // on every run.
        let payload = json!({
            "type": "text",
            "text": "hi",
            "image_url": {"url": "https://example.com/cat.png"}
        });
        for _ in 0..64 {
            let part = ContentPart::decode(&payload).unwrap();
            assert!(matches!(part, ContentPart::Text(_)), "got {part:?}");
        }
    }

    #[test]
    fn test_part_failure_names_both_part_shapes() {
        let err = ContentPart::decode(&json!({"type": "audio"})).unwrap_err();
        assert_eq!(
            err,
            DecodeError::NoMatchingVariant {
                attempted: vec!["TextContentPart", "ImageContentPart"],
            }
        );
    }

    #[test]
    fn test_message_round_trips_through_serde() {
        let message = Message::user(Content::parts(vec![
            ContentPart::text("what is in this image?"),
            ContentPart::image_url("https://example.com/photo.jpg"),
        ]));
        let encoded = serde_json::to_value(&message).unwrap();
        assert_eq!(encoded["role"], "user");
        assert_eq!(encoded["content"][0]["type"], "text");
        assert_eq!(encoded["content"][1]["type"], "image_url");

        let decoded: Message = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, message);
    }

    #[test]
    fn test_serialized_message_omits_absent_options() {
        let encoded = serde_json::to_value(Message::system("be brief")).unwrap();
        assert_eq!(encoded, json!({"role": "system", "content": "be brief"}));
    }

    #[test]
    fn test_deserialize_reports_decode_taxonomy_text() {
        let err = serde_json::from_value::<Message>(json!({"role": "narrator"})).unwrap_err();
        assert!(err.to_string().contains("unknown variant `narrator`"));
    }
}
