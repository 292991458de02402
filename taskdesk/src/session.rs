//! Session store: the two bearer credentials and the authenticated flag.
//!
//! [`SessionStore::update`] is the only way credentials change. It either
//! stores both (memory and durable storage) or clears both, so a session with
//! a single credential cannot be represented.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::storage::KeyValueStore;

/// Durable storage key for the access credential.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Durable storage key for the refresh credential.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Snapshot of the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    access_token: Option<String>,
    refresh_token: Option<String>,
}

impl Session {
    /// Access credential, if authenticated.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Refresh credential, if authenticated.
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// True iff both credentials are present and non-empty.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty())
            && self.refresh_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Process-wide session, mirrored into durable storage.
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    session: RwLock<Session>,
}

impl SessionStore {
    /// Creates an unauthenticated store without touching storage.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            session: RwLock::new(Session::default()),
        }
    }

    /// Creates a store from whatever credentials durable storage holds.
    ///
    /// Missing or empty keys behave as a full clear.
    #[must_use]
    pub fn restore(storage: Arc<dyn KeyValueStore>) -> Self {
        let access = storage.get(ACCESS_TOKEN_KEY);
        let refresh = storage.get(REFRESH_TOKEN_KEY);
        let store = Self::new(storage);
        let authenticated = store.update(access.as_deref(), refresh.as_deref());
        tracing::info!(authenticated, "session restored");
        store
    }

    /// Sets both credentials, or clears both if either is missing or empty.
    ///
    /// Returns whether the session is now authenticated. A storage failure is
    /// logged; the in-memory session is updated regardless.
    pub fn update(&self, access: Option<&str>, refresh: Option<&str>) -> bool {
        let pair = access
            .filter(|a| !a.is_empty())
            .zip(refresh.filter(|r| !r.is_empty()));

        let mut session = self.session.write();
        let result = match pair {
            Some((access, refresh)) => {
                *session = Session {
                    access_token: Some(access.to_string()),
                    refresh_token: Some(refresh.to_string()),
                };
                self.storage.write_batch(&[
                    (ACCESS_TOKEN_KEY, Some(access)),
                    (REFRESH_TOKEN_KEY, Some(refresh)),
                ])
            }
            None => {
                *session = Session::default();
                self.storage
                    .write_batch(&[(ACCESS_TOKEN_KEY, None), (REFRESH_TOKEN_KEY, None)])
            }
        };
        let authenticated = session.is_authenticated();
        drop(session);

        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to persist session");
        }
        tracing::debug!(authenticated, "session updated");
        authenticated
    }

    /// Clears both credentials (logout).
    pub fn clear(&self) {
        self.update(None, None);
    }

    /// Copy of the current session.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.session.read().clone()
    }

    /// Whether the session currently holds both credentials.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_authenticated()
    }

    /// Current access credential.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.session.read().access_token.clone()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}
