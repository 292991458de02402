//! Single-request executor: bearer injection and response interpretation.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;
use taskdesk_proto::error::ErrorBody;

use super::{ApiError, ApiRequest, ApiSettings};
use crate::i18n::Catalog;
use crate::session::ACCESS_TOKEN_KEY;
use crate::storage::KeyValueStore;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Performs one HTTP call against the API.
///
/// The access credential is read from durable storage on every call, so a
/// credential written by [`crate::session::SessionStore`] (or by another
/// process) is picked up without any cache invalidation.
pub struct RequestExecutor {
    client: reqwest::Client,
    base_url: String,
    storage: Arc<dyn KeyValueStore>,
    catalog: Arc<Catalog>,
}

impl RequestExecutor {
    /// Builds an executor with its own `reqwest` client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP client cannot be built
    /// (e.g. TLS backend initialization failure).
    pub fn new(
        settings: &ApiSettings,
        storage: Arc<dyn KeyValueStore>,
        catalog: Arc<Catalog>,
    ) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .connect_timeout(settings.connect_timeout)
            .user_agent(concat!("taskdesk/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, &settings.base_url, storage, catalog))
    }

    /// Builds an executor around an existing `reqwest` client.
    #[must_use]
    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        storage: Arc<dyn KeyValueStore>,
        catalog: Arc<Catalog>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            storage,
            catalog,
        }
    }

    /// Base URL endpoint paths are appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> Result<url::Url, ApiError> {
        let raw = format!("{}{path}", self.base_url);
        url::Url::parse(&raw).map_err(|source| ApiError::InvalidUrl { url: raw, source })
    }

    /// Issues `request` and decodes a successful body as `T`.
    ///
    /// `fallback` is the message used when a failed response carries no
    /// usable message or known error code.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Transport`] if no response was received;
    /// - [`ApiError::Rejected`] for non-2xx statuses;
    /// - [`ApiError::Decode`] if a 2xx body does not match `T`;
    /// - [`ApiError::InvalidUrl`] if the endpoint URL is malformed.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let url = self.url_for(&request.path)?;
        let mut builder = self.client.request(request.method.as_reqwest(), url);

        if !request.has_content_type() {
            builder = builder.header(CONTENT_TYPE, JSON_CONTENT_TYPE);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(token) = self.storage.get(ACCESS_TOKEN_KEY)
            && !token.is_empty()
        {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        tracing::debug!(method = %request.method, path = %request.path, "sending request");
        let response = builder.send().await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let bytes = response.bytes().await?;
        tracing::debug!(status, path = %request.path, len = bytes.len(), "response received");

        interpret_response(status, content_type.as_deref(), &bytes, fallback, &self.catalog)
    }
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Turns a raw response into the caller's type or an [`ApiError`].
///
/// The body is treated as JSON only when `content_type` mentions
/// `application/json`; otherwise (and for an empty JSON body) it is `null`.
/// A non-2xx status yields [`ApiError::Rejected`] with the message chosen by
/// [`ErrorBody::resolve_message`]. A 2xx `null` body decodes into types that
/// accept it, such as `()` or `Option<_>`.
///
/// # Errors
///
/// Returns [`ApiError::Rejected`] for non-2xx statuses and
/// [`ApiError::Decode`] for malformed or mismatched 2xx bodies.
pub fn interpret_response<T: DeserializeOwned>(
    status: u16,
    content_type: Option<&str>,
    body: &[u8],
    fallback: &str,
    catalog: &Catalog,
) -> Result<T, ApiError> {
    let is_json = content_type.is_some_and(|ct| ct.contains(JSON_CONTENT_TYPE));
    let parsed = if is_json && !body.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_slice::<Value>(body)
    } else {
        Ok(Value::Null)
    };

    if !(200..300).contains(&status) {
        // An unparseable error body carries no message; use the fallback.
        let data = parsed.unwrap_or(Value::Null);
        let message = ErrorBody::from_value(&data)
            .resolve_message(fallback, |key| catalog.lookup(key).map(str::to_string));
        return Err(ApiError::Rejected { status, message });
    }

    let data = parsed.map_err(ApiError::Decode)?;
    serde_json::from_value(data).map_err(ApiError::Decode)
}
