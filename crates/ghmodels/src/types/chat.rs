//! Chat completion request and response records.

use serde::{Deserialize, Serialize};

use super::Message;
use crate::rate_limit::RateLimitInfo;

/// Body of a chat completion request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model identifier, e.g. `openai/gpt-4.1`.
    pub model: String,
    /// Conversation so far, oldest first.
    pub messages: Vec<Message>,
}

impl ChatRequest {
    /// Creates an empty request for the given model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
        }
    }

    /// Appends a message to the conversation.
    #[must_use]
    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Appends several messages to the conversation.
    #[must_use]
    pub fn with_messages(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        self.messages.extend(messages);
        self
    }
}

/// One generated message slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Choice {
    /// The generated message.
    pub message: Message,
}

/// Token accounting reported by the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Usage {
    /// Tokens consumed by the request messages.
    pub prompt_tokens: u64,
    /// Tokens generated in the choices.
    pub completion_tokens: u64,
    /// Sum of prompt and completion tokens.
    pub total_tokens: u64,
}

/// Result of a chat completion.
///
/// `rate_limit` never comes from the body. The client fills it from the
/// response headers, and it is the only populated field of the partial
/// response attached to a status error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatResponse {
    /// Response identifier.
    pub id: String,
    /// Object type, e.g. `chat.completion`.
    pub object: String,
    /// Generated choices.
    pub choices: Vec<Choice>,
    /// Token usage.
    pub usage: Usage,
    /// Rate-limit window taken from the response headers.
    #[serde(skip)]
    pub rate_limit: RateLimitInfo,
}

impl ChatResponse {
    /// Creates a response that carries nothing but rate-limit information.
    pub fn from_rate_limit(rate_limit: RateLimitInfo) -> Self {
        Self {
            rate_limit,
            ..Default::default()
        }
    }

    /// Returns the content of the first choice, if any.
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .map(|choice| choice.message.content.as_str())
    }
}
