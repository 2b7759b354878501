//! Chat messages.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Author of a chat message.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumString
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    /// Instructions that steer the model.
    System,
    /// Input written by the end user.
    #[default]
    User,
    /// Output generated by the model.
    Assistant,
}

/// A single message in a conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who authored the message.
    pub role: Role,
    /// Message text.
    #[serde(default)]
    pub content: String,
}

impl Message {
    /// Creates a message with the given role.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let message = Message::assistant("hi");
        let json = serde_json::to_string(&message).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
    }

    #[test]
    fn test_role_string_forms() {
        assert_eq!(Role::System.as_ref(), "system");
        assert_eq!(Role::from_str("user").unwrap(), Role::User);
        assert!(Role::from_str("tool").is_err());
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let result = serde_json::from_str::<Message>(r#"{"role":"narrator","content":"x"}"#);
        assert!(result.is_err());
    }
}
