//! Error types for ghmodels operations.

use strum::{AsRefStr, IntoStaticStr};

use crate::rate_limit::RateLimitInfo;
use crate::types::ChatResponse;

/// Result type for ghmodels operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors returned by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Connection, timeout or body read failure.
    Transport,
    /// The service answered with a status outside the accepted range.
    UnexpectedStatus,
    /// The request body could not be encoded.
    Serialize,
    /// The response body could not be decoded.
    Decode,
    /// The client was configured with invalid values.
    Config,
    /// An argument was rejected before any network activity.
    InvalidInput,
}

/// Errors returned by [`ModelsClient`](crate::ModelsClient).
///
/// Nothing is retried internally. Each variant carries what is needed to
/// diagnose the failure: the underlying transport error, the status code and
/// raw body, or the body that failed to decode.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network, connection, timeout or cancellation failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Status code outside the accepted range.
    ///
    /// Chat calls attach a partial response holding the rate-limit
    /// information read from the failed response.
    #[error(
        "unexpected status code: {status}{}",
        .body.as_ref().map(|b| format!(", response body: {b}")).unwrap_or_default()
    )]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Raw response body, when it was read.
        body: Option<String>,
        /// Partial response carrying only rate-limit information.
        partial: Option<Box<ChatResponse>>,
    },

    /// The request could not be encoded as JSON.
    #[error("failed to serialize request: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The response body could not be decoded.
    #[error("failed to decode response: {source} (body: {body})")]
    Decode {
        #[source]
        source: serde_json::Error,
        /// Raw response body.
        body: String,
    },

    /// Invalid client configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) => ErrorKind::Transport,
            Self::UnexpectedStatus { .. } => ErrorKind::UnexpectedStatus,
            Self::Serialize(_) => ErrorKind::Serialize,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Config(_) => ErrorKind::Config,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
        }
    }

    /// Returns the HTTP status code, if the service answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns the raw response body attached to this error.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::UnexpectedStatus { body, .. } => body.as_deref(),
            Self::Decode { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Returns the partial response attached to a chat status error.
    pub fn partial_response(&self) -> Option<&ChatResponse> {
        match self {
            Self::UnexpectedStatus { partial, .. } => partial.as_deref(),
            _ => None,
        }
    }

    /// Consumes the error and returns the partial response, if any.
    pub fn into_partial_response(self) -> Option<ChatResponse> {
        match self {
            Self::UnexpectedStatus { partial, .. } => partial.map(|p| *p),
            _ => None,
        }
    }

    /// Returns the rate-limit information carried by the partial response.
    pub fn rate_limit(&self) -> Option<RateLimitInfo> {
        self.partial_response().map(|p| p.rate_limit)
    }

    /// Returns true if the service rejected the call with 429.
    pub fn is_rate_limited(&self) -> bool {
        self.status_code() == Some(429)
    }

    /// Returns true if the call timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error(status: u16, retry_after: i64) -> Error {
        Error::UnexpectedStatus {
            status,
            body: Some("{}".to_string()),
            partial: Some(Box::new(ChatResponse::from_rate_limit(RateLimitInfo {
                retry_after,
                ..Default::default()
            }))),
        }
    }

    #[test]
    fn test_status_error_accessors() {
        let error = status_error(429, 30);
        assert_eq!(error.kind(), ErrorKind::UnexpectedStatus);
        assert_eq!(error.status_code(), Some(429));
        assert_eq!(error.body(), Some("{}"));
        assert!(error.is_rate_limited());
        assert!(!error.is_timeout());
        assert_eq!(error.rate_limit().map(|r| r.retry_after), Some(30));

        let partial = error.into_partial_response().unwrap();
        assert!(partial.choices.is_empty());
        assert!(partial.id.is_empty());
    }

    #[test]
    fn test_status_error_display() {
        let error = status_error(503, 0);
        assert_eq!(
            error.to_string(),
            "unexpected status code: 503, response body: {}"
        );

        let error = Error::UnexpectedStatus {
            status: 404,
            body: None,
            partial: None,
        };
        assert_eq!(error.to_string(), "unexpected status code: 404");
        assert!(error.rate_limit().is_none());
    }

    #[test]
    fn test_decode_error_keeps_body() {
        let source = serde_json::from_str::<ChatResponse>("{not json").unwrap_err();
        let error = Error::Decode {
            source,
            body: "{not json".to_string(),
        };
        assert_eq!(error.kind(), ErrorKind::Decode);
        assert_eq!(error.body(), Some("{not json"));
        assert!(error.to_string().contains("{not json"));
        assert!(error.partial_response().is_none());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ErrorKind::UnexpectedStatus.as_ref(), "unexpected_status");
        assert_eq!(Error::config("bad").kind().as_ref(), "config");
        let name: &'static str = Error::invalid_input("x").kind().into();
        assert_eq!(name, "invalid_input");
    }
}
