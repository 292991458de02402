//! HTTP access to the task API.
//!
//! Layered bottom-up:
//! - [`executor::RequestExecutor`] performs one call, injects the bearer
//!   credential, and turns non-2xx responses into [`ApiError::Rejected`];
//! - [`busy::BusyState`] counts requests in flight for the loading indicator;
//! - [`client::ApiClient`] wraps the executor with the busy state and failure
//!   toasts, and exposes one typed method per endpoint.

pub mod busy;
pub mod client;
pub mod executor;

use std::time::Duration;

use serde::Serialize;

pub use busy::{BusyGuard, BusyState};
pub use client::ApiClient;
pub use executor::{RequestExecutor, interpret_response};

/// Errors produced while talking to the API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout...).
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("{message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Message chosen from the error body or the caller's fallback.
        message: String,
    },

    /// A 2xx body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(#[source] serde_json::Error),

    /// A request body could not be serialized.
    #[error("could not encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// The configured base URL and the endpoint path do not form a URL.
    #[error("invalid request URL {url}: {source}")]
    InvalidUrl {
        /// The URL that failed to parse.
        url: String,
        /// Parser error.
        source: url::ParseError,
    },

    /// A failure already reported to the user, reduced to the fallback message.
    #[error("{0}")]
    Failed(String),
}

/// HTTP methods used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl Method {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_reqwest().as_str())
    }
}

/// A request relative to the API base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Endpoint path, e.g. `/tasks/abc`.
    pub path: String,
    /// Extra headers; a `Content-Type` here overrides the JSON default.
    pub headers: Vec<(String, String)>,
    /// Serialized body.
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// Creates a body-less request.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// `GET path`.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// `POST path`.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// `PATCH path`.
    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    /// `DELETE path`.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Adds a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Serializes `body` as the JSON request body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if serialization fails.
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_vec(body).map_err(ApiError::Encode)?);
        Ok(self)
    }

    /// Whether a `Content-Type` header was supplied explicitly.
    #[must_use]
    pub fn has_content_type(&self) -> bool {
        self.headers
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case("content-type"))
    }
}

/// Connection settings for the API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    /// Base URL every endpoint path is appended to.
    pub base_url: String,
    /// Total time allowed for one request.
    pub request_timeout: Duration,
    /// Time allowed to establish a connection.
    pub connect_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: taskdesk_proto::endpoints::DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}
