//! Authenticated HTTP client for the inference API.

use std::sync::Arc;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderValue, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use url::Url;

use super::ClientConfig;
use crate::TRACING_TARGET_CLIENT;
use crate::error::{Error, Result};
use crate::rate_limit::RateLimitInfo;
use crate::types::{ChatRequest, ChatResponse, Model};

/// Media type the catalog endpoint answers with.
const CATALOG_MEDIA_TYPE: &str = "application/vnd.github+json";

const JSON_MEDIA_TYPE: &str = "application/json";

/// Inner client that holds the HTTP client and the immutable call settings.
struct ModelsClientInner {
    http: Client,
    authorization: HeaderValue,
    user_agent: HeaderValue,
    base_url: Url,
    config: ClientConfig,
}

/// Client for the model catalog and chat completion endpoints.
///
/// Cloning is cheap and clones share the same HTTP handle. The client holds
/// no per-call state, so it can be used from many tasks at once.
///
/// Every call is a single request/response exchange. Nothing is retried:
/// on a 429 the caller finds `Retry-After` in [`Error::rate_limit`] and
/// decides what to do. Dropping a returned future aborts the request in
/// flight; the configured timeout surfaces as [`Error::Transport`].
///
/// # Examples
///
/// ```rust,no_run
/// use ghmodels::{ChatRequest, ClientConfig, Message, ModelsClient};
///
/// # async fn run() -> ghmodels::Result<()> {
/// let config = ClientConfig::default().with_timeout(60);
/// let client = ModelsClient::with_config("github-token", config)?;
///
/// for model in client.list_models().await? {
///     println!("{}", model.id);
/// }
///
/// let request = ChatRequest::new("openai/gpt-4.1").with_message(Message::user("Hello"));
/// let response = client.chat_completion(&request).await?;
/// println!("{} requests left", response.rate_limit.remaining);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ModelsClient {
    inner: Arc<ModelsClientInner>,
}

impl std::fmt::Debug for ModelsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelsClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl ModelsClient {
    /// Creates a client for the production endpoint with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the token cannot be sent as a header or
    /// the HTTP client cannot be created.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_config(token, ClientConfig::default())
    }

    /// Creates a client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid or the HTTP
    /// client cannot be created.
    pub fn with_config(token: impl Into<String>, config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| Error::config(format!("failed to create HTTP client: {e}")))?;

        Self::with_http_client(token, http, config)
    }

    /// Creates a client that sends its requests through `http`.
    ///
    /// The configured timeout and user agent are applied to every request
    /// and take precedence over the handle's own defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid or the
    /// token or user agent contain bytes not allowed in a header.
    pub fn with_http_client(
        token: impl Into<String>,
        http: Client,
        config: ClientConfig,
    ) -> Result<Self> {
        let base_url = config.parsed_base_url()?;

        let mut authorization = HeaderValue::try_from(format!("Bearer {}", token.into()))
            .map_err(|_| Error::config("token contains characters not allowed in a header"))?;
        authorization.set_sensitive(true);

        let user_agent = HeaderValue::try_from(config.effective_user_agent())
            .map_err(|_| Error::config("user agent contains characters not allowed in a header"))?;

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            base_url = %base_url,
            timeout_ms = config.effective_timeout().as_millis(),
            "Creating models client"
        );

        let inner = ModelsClientInner {
            http,
            authorization,
            user_agent,
            base_url,
            config,
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Gets the parsed base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Lists the models exposed by the catalog.
    ///
    /// # Errors
    ///
    /// - [`Error::Transport`] if the request could not be completed.
    /// - [`Error::UnexpectedStatus`] for any status other than 200. The body
    ///   is not read in this case.
    /// - [`Error::Decode`] if the body is not a JSON array of models.
    pub async fn list_models(&self) -> Result<Vec<Model>> {
        let url = self.endpoint(&["catalog", "models"])?;

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            url = %url,
            "Listing catalog models"
        );

        let response = self
            .request(Method::GET, url)
            .header(ACCEPT, CATALOG_MEDIA_TYPE)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(
                target: TRACING_TARGET_CLIENT,
                status = status.as_u16(),
                "Catalog request failed"
            );

            return Err(Error::UnexpectedStatus {
                status: status.as_u16(),
                body: None,
                partial: None,
            });
        }

        let body = response.bytes().await?;
        let models: Vec<Model> = serde_json::from_slice(&body).map_err(|source| Error::Decode {
            source,
            body: String::from_utf8_lossy(&body).into_owned(),
        })?;

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            count = models.len(),
            "Retrieved catalog models"
        );

        Ok(models)
    }

    /// Sends a chat completion request.
    ///
    /// On success the returned response carries the rate-limit information
    /// read from the response headers.
    ///
    /// # Errors
    ///
    /// - [`Error::Serialize`] if the request cannot be encoded. Nothing is
    ///   sent in this case.
    /// - [`Error::Transport`] if the request could not be completed.
    /// - [`Error::UnexpectedStatus`] for a status outside 200-299. The error
    ///   carries the raw body and a partial response whose only populated
    ///   field is `rate_limit`.
    /// - [`Error::Decode`] if a successful body cannot be decoded. No
    ///   partial response is attached.
    pub async fn chat_completion(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let url = self.endpoint(&["inference", "chat", "completions"])?;
        self.send_chat(url, request).await
    }

    /// Sends a chat completion request attributed to an organization.
    ///
    /// Behaves exactly like [`chat_completion`](Self::chat_completion) but
    /// targets `{base_url}/orgs/{org}/inference/chat/completions`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `org` is blank, otherwise the same
    /// errors as [`chat_completion`](Self::chat_completion).
    pub async fn org_chat_completion(
        &self,
        org: &str,
        request: &ChatRequest,
    ) -> Result<ChatResponse> {
        let org = org.trim();
        if org.is_empty() {
            return Err(Error::invalid_input("organization must not be empty"));
        }

        let url = self.endpoint(&["orgs", org, "inference", "chat", "completions"])?;
        self.send_chat(url, request).await
    }

    async fn send_chat(&self, url: Url, request: &ChatRequest) -> Result<ChatResponse> {
        let payload = serde_json::to_vec(request).map_err(Error::Serialize)?;

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            url = %url,
            model = %request.model,
            message_count = request.messages.len(),
            "Sending chat completion request"
        );

        let response = self
            .request(Method::POST, url)
            .header(ACCEPT, JSON_MEDIA_TYPE)
            .header(CONTENT_TYPE, JSON_MEDIA_TYPE)
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        // Read before branching on status so error paths carry it too.
        let rate_limit = RateLimitInfo::from_headers(response.headers());
        let body = response.bytes().await?;

        if !status.is_success() {
            tracing::warn!(
                target: TRACING_TARGET_CLIENT,
                status = status.as_u16(),
                remaining = rate_limit.remaining,
                retry_after = rate_limit.retry_after,
                "Chat completion request failed"
            );

            return Err(Error::UnexpectedStatus {
                status: status.as_u16(),
                body: Some(String::from_utf8_lossy(&body).into_owned()),
                partial: Some(Box::new(ChatResponse::from_rate_limit(rate_limit))),
            });
        }

        let mut response: ChatResponse =
            serde_json::from_slice(&body).map_err(|source| Error::Decode {
                source,
                body: String::from_utf8_lossy(&body).into_owned(),
            })?;
        response.rate_limit = rate_limit;

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            id = %response.id,
            choices = response.choices.len(),
            total_tokens = response.usage.total_tokens,
            remaining = rate_limit.remaining,
            "Received chat completion response"
        );

        Ok(response)
    }

    /// Builds a request carrying the authorization, user agent and timeout.
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.inner
            .http
            .request(method, url)
            .header(AUTHORIZATION, self.inner.authorization.clone())
            .header(USER_AGENT, self.inner.user_agent.clone())
            .timeout(self.inner.config.effective_timeout())
    }

    /// Appends path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::config("base url cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}
