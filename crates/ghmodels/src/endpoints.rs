//! Free-function entry points over [`ModelsClient`].
//!
//! These forward to the client without adding behavior. They exist for
//! callers that prefer passing the client explicitly.

use crate::http::ModelsClient;
use crate::error::Result;
use crate::types::{ChatRequest, ChatResponse};

/// Sends a chat completion request.
///
/// See [`ModelsClient::chat_completion`].
pub async fn chat_completion(client: &ModelsClient, request: &ChatRequest) -> Result<ChatResponse> {
    client.chat_completion(request).await
}

/// Sends a chat completion request to an organization-scoped endpoint.
///
/// See [`ModelsClient::org_chat_completion`].
pub async fn org_chat_completion(
    client: &ModelsClient,
    org: &str,
    request: &ChatRequest,
) -> Result<ChatResponse> {
    client.org_chat_completion(org, request).await
}
