//! Account endpoints: login, registration, and password recovery bodies.

use serde::{Deserialize, Serialize};

/// Body of `POST /users/login` and `POST /users/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Account email address.
    pub email: String,
    /// Plain-text password (sent over the API's transport security).
    pub password: String,
}

impl Credentials {
    /// Creates a credentials body.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Successful login/registration response: the two bearer credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Short-lived credential sent as `Authorization: Bearer <token>`.
    pub access_token: String,
    /// Long-lived credential. Stored, never exchanged by the client.
    pub refresh_token: String,
}

/// Body of `POST /users/recover`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoverRequest {
    /// Address the recovery email is sent to.
    pub email: String,
}

/// Response of `POST /users/recover`.
///
/// The shape is owned by the API; clients should not depend on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoverResponse {
    /// Optional human-readable confirmation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
