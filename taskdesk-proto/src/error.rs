//! Error bodies returned by the API on non-2xx responses.
//!
//! The API reports failures either as `{"message": "..."}` or as
//! `{"error": "<code>"}` (auth provider codes such as
//! `auth/invalid-credential`). [`ErrorBody`] makes that explicit, and
//! [`ErrorBody::resolve_message`] applies the fixed priority:
//! message, then localized code, then the caller's fallback.

use serde::Serialize;
use serde_json::Value;

/// Prefix under which error codes are looked up in translation catalogs.
pub const CODE_KEY_PREFIX: &str = "firebase.";

/// A parsed error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorBody {
    /// A human-readable message supplied by the server.
    Message {
        /// The message text.
        message: String,
    },
    /// A machine-readable error code.
    Code {
        /// The error code.
        error: String,
    },
    /// No usable error information (non-JSON body, empty object, ...).
    Empty,
}

impl ErrorBody {
    /// Builds a message body.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }

    /// Builds a code body.
    #[must_use]
    pub fn code(error: impl Into<String>) -> Self {
        Self::Code {
            error: error.into(),
        }
    }

    /// Classifies an untyped JSON body.
    ///
    /// A non-empty string `message` wins over an `error` code; anything
    /// else is [`ErrorBody::Empty`].
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        if let Some(message) = value.get("message").and_then(Value::as_str)
            && !message.is_empty()
        {
            return Self::message(message);
        }
        if let Some(code) = value.get("error").and_then(Value::as_str)
            && !code.is_empty()
        {
            return Self::code(code);
        }
        Self::Empty
    }

    /// Translation key for an error code (`firebase.<code>`).
    #[must_use]
    pub fn code_key(code: &str) -> String {
        format!("{CODE_KEY_PREFIX}{code}")
    }

    /// Picks the user-facing message for this body.
    ///
    /// `lookup` maps a translation key to its text, returning `None` when the
    /// key is unknown; unknown codes fall through to `fallback`.
    pub fn resolve_message<F>(&self, fallback: &str, lookup: F) -> String
    where
        F: FnOnce(&str) -> Option<String>,
    {
        match self {
            Self::Message { message } => message.clone(),
            Self::Code { error } => {
                lookup(&Self::code_key(error)).unwrap_or_else(|| fallback.to_string())
            }
            Self::Empty => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_wins_over_code() {
        let body = ErrorBody::from_value(&json!({"message": "invalid token", "error": "x"}));
        assert_eq!(body, ErrorBody::message("invalid token"));
    }

    #[test]
    fn empty_message_falls_back_to_code() {
        let body = ErrorBody::from_value(&json!({"message": "", "error": "auth/x"}));
        assert_eq!(body, ErrorBody::code("auth/x"));
    }

    #[test]
    fn non_object_is_empty() {
        assert_eq!(ErrorBody::from_value(&Value::Null), ErrorBody::Empty);
        assert_eq!(ErrorBody::from_value(&json!([1, 2])), ErrorBody::Empty);
        assert_eq!(ErrorBody::from_value(&json!({"message": 5})), ErrorBody::Empty);
    }

    #[test]
    fn resolve_uses_lookup_for_known_code() {
        let body = ErrorBody::code("auth/invalid-credential");
        let msg = body.resolve_message("fallback", |key| {
            (key == "firebase.auth/invalid-credential").then(|| "bad login".to_string())
        });
        assert_eq!(msg, "bad login");
    }

    #[test]
    fn resolve_unknown_code_uses_fallback() {
        let body = ErrorBody::code("nope");
        assert_eq!(body.resolve_message("fallback", |_| None), "fallback");
    }

    #[test]
    fn serializes_to_api_shapes() {
        assert_eq!(
            serde_json::to_value(ErrorBody::message("m")).expect("serialize"),
            json!({"message": "m"})
        );
        assert_eq!(
            serde_json::to_value(ErrorBody::code("c")).expect("serialize"),
            json!({"error": "c"})
        );
    }
}
