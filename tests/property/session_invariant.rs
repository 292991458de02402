//! Property tests for the session store.
//!
//! Uses proptest to verify, for any sequence of credential updates:
//! 1. The session is authenticated iff both credentials are non-empty.
//! 2. Durable storage holds both credentials or neither.
//! 3. Restoring from storage reproduces the in-memory session.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use proptest::prelude::*;
use taskdesk::session::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, SessionStore};
use taskdesk::storage::{KeyValueStore, MemoryStore};

/// Strategy for one credential argument: absent, empty, or a short token.
fn arb_credential() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        "[A-Za-z0-9._-]{1,24}".prop_map(Some),
    ]
}

fn arb_updates() -> impl Strategy<Value = Vec<(Option<String>, Option<String>)>> {
    prop::collection::vec((arb_credential(), arb_credential()), 1..16)
}

fn non_empty(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

proptest! {
    #[test]
    fn authenticated_iff_both_credentials(updates in arb_updates()) {
        let storage = Arc::new(MemoryStore::new());
        let store = SessionStore::new(storage.clone());

        for (access, refresh) in &updates {
            let authenticated = store.update(access.as_deref(), refresh.as_deref());
            let expected = non_empty(access.as_deref()) && non_empty(refresh.as_deref());

            prop_assert_eq!(authenticated, expected);
            prop_assert_eq!(store.is_authenticated(), expected);

            let stored_access = storage.get(ACCESS_TOKEN_KEY);
            let stored_refresh = storage.get(REFRESH_TOKEN_KEY);
            prop_assert_eq!(stored_access.is_some(), stored_refresh.is_some());
            prop_assert_eq!(stored_access.is_some(), expected);
            if expected {
                prop_assert_eq!(stored_access.as_deref(), access.as_deref());
                prop_assert_eq!(stored_refresh.as_deref(), refresh.as_deref());
            }
        }
    }

    #[test]
    fn restore_reproduces_last_session(updates in arb_updates()) {
        let storage = Arc::new(MemoryStore::new());
        let store = SessionStore::new(storage.clone());
        for (access, refresh) in &updates {
            store.update(access.as_deref(), refresh.as_deref());
        }

        let restored = SessionStore::restore(storage);
        prop_assert_eq!(restored.snapshot(), store.snapshot());
    }

    #[test]
    fn half_stored_pair_restores_unauthenticated(token in "[a-z]{1,12}", keep_access in any::<bool>()) {
        let storage = Arc::new(MemoryStore::new());
        let key = if keep_access { ACCESS_TOKEN_KEY } else { REFRESH_TOKEN_KEY };
        storage.set(key, &token).unwrap();

        let restored = SessionStore::restore(storage.clone());

        prop_assert!(!restored.is_authenticated());
        prop_assert!(storage.get(ACCESS_TOKEN_KEY).is_none());
        prop_assert!(storage.get(REFRESH_TOKEN_KEY).is_none());
    }
}
