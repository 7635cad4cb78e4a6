//! Conversation message types.
//!
//! The serialized field names match the export format consumed by the
//! persistence collaborator: `role`, `content`, `model`, `modelId`,
//! `inputTokens`, `outputTokens`, `timestamp`. Optional fields are omitted
//! when absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from a text-generation backend.
    Assistant,
    /// A visible error turn recorded in place of a response.
    Error,
}

/// A single message in a conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender.
    pub role: MessageRole,
    /// The content of the message.
    pub content: String,
    /// Human-readable model label (assistant turns) or `"System"` (error turns).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// The model identifier the turn was sent to or produced by.
    #[serde(rename = "modelId", default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    /// Approximate prompt token count, assistant turns only.
    #[serde(
        rename = "inputTokens",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub input_tokens: Option<u32>,
    /// Approximate response token count, assistant turns only.
    #[serde(
        rename = "outputTokens",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub output_tokens: Option<u32>,
    /// Stamped by the conversation store on append; non-decreasing in store order.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// A user turn, tagged with the model id it is addressed to.
    pub fn user(content: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            model: None,
            model_id: Some(model_id.into()),
            input_tokens: None,
            output_tokens: None,
            timestamp: DateTime::UNIX_EPOCH,
        }
    }

    /// An assistant turn carrying the backend's label and token accounting.
    pub fn assistant(
        content: impl Into<String>,
        model: impl Into<String>,
        model_id: impl Into<String>,
        input_tokens: u32,
        output_tokens: u32,
    ) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            model: Some(model.into()),
            model_id: Some(model_id.into()),
            input_tokens: Some(input_tokens),
            output_tokens: Some(output_tokens),
            timestamp: DateTime::UNIX_EPOCH,
        }
    }

    /// A visible error turn.
    pub fn error(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Error,
            content: content.into(),
            model: Some("System".to_string()),
            model_id: None,
            input_tokens: None,
            output_tokens: None,
            timestamp: DateTime::UNIX_EPOCH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&MessageRole::Assistant).unwrap(),
            "\"assistant\""
        );
        assert_eq!(serde_json::to_string(&MessageRole::Error).unwrap(), "\"error\"");
    }

    #[test]
    fn test_user_message_omits_token_fields() {
        let message = Message::user("hello", "model-a");
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["modelId"], "model-a");
        assert!(json.get("inputTokens").is_none());
        assert!(json.get("outputTokens").is_none());
        assert!(json.get("model").is_none());
    }

    #[test]
    fn test_assistant_message_uses_camel_case_keys() {
        let message = Message::assistant("hi", "Model A", "model-a", 3, 7);
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["model"], "Model A");
        assert_eq!(json["modelId"], "model-a");
        assert_eq!(json["inputTokens"], 3);
        assert_eq!(json["outputTokens"], 7);
    }

    #[test]
    fn test_error_message_labelled_system() {
        let message = Message::error("Error: backend unavailable");
        assert_eq!(message.role, MessageRole::Error);
        assert_eq!(message.model.as_deref(), Some("System"));
    }
}
