//! Property tests for error body classification.
//!
//! Uses proptest to verify:
//! 1. A non-empty `message` always wins, whatever `error` holds.
//! 2. Without a message, a known code resolves to its translation.
//! 3. Without a message, an unknown code resolves to the fallback.
//! 4. Arbitrary JSON never panics and always yields some message.

use proptest::prelude::*;
use serde_json::{Value, json};
use taskdesk_proto::error::ErrorBody;

const FALLBACK: &str = "The request could not be completed";
const KNOWN_CODE: &str = "auth/invalid-credential";
const KNOWN_TEXT: &str = "Invalid email or password";

fn lookup(key: &str) -> Option<String> {
    (key == ErrorBody::code_key(KNOWN_CODE)).then(|| KNOWN_TEXT.to_string())
}

/// Strategy for an optional `error` field: absent, known, or arbitrary.
fn arb_code() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(KNOWN_CODE.to_string())),
        "[a-z/-]{0,20}".prop_map(Some),
    ]
}

/// Strategy for arbitrary JSON values a server might send.
fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        ".{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::hash_map("(message|error|[a-z]{1,6})", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn body(message: Option<&str>, code: Option<&str>) -> Value {
    let mut map = serde_json::Map::new();
    if let Some(message) = message {
        map.insert("message".to_string(), json!(message));
    }
    if let Some(code) = code {
        map.insert("error".to_string(), json!(code));
    }
    Value::Object(map)
}

proptest! {
    #[test]
    fn message_wins_over_code(message in ".{1,40}", code in arb_code()) {
        let value = body(Some(&message), code.as_deref());
        let resolved = ErrorBody::from_value(&value).resolve_message(FALLBACK, lookup);
        prop_assert_eq!(resolved, message);
    }

    #[test]
    fn code_resolves_without_message(empty_message in any::<bool>(), code in arb_code()) {
        let message = empty_message.then_some("");
        let value = body(message, code.as_deref());
        let resolved = ErrorBody::from_value(&value).resolve_message(FALLBACK, lookup);

        let expected = match code.as_deref() {
            Some(KNOWN_CODE) => KNOWN_TEXT,
            _ => FALLBACK,
        };
        prop_assert_eq!(resolved, expected);
    }

    #[test]
    fn arbitrary_json_resolves_to_something(value in arb_json()) {
        let resolved = ErrorBody::from_value(&value).resolve_message(FALLBACK, lookup);
        prop_assert!(!resolved.is_empty());
    }
}
