//! Application context shared by the dispatcher and the UI loop.
//!
//! Everything that would otherwise be process-global (session, busy state,
//! notifier, catalog, language preference, API client) lives here and is
//! passed around behind an `Arc`.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::api::{ApiClient, ApiError, ApiSettings, BusyState, RequestExecutor};
use crate::i18n::{Catalog, LanguagePreference};
use crate::notify::{Notifier, Toast};
use crate::session::SessionStore;
use crate::storage::KeyValueStore;

/// Shared application services.
#[derive(Debug)]
pub struct AppContext {
    /// Credentials and the authenticated flag.
    pub session: SessionStore,
    /// Outstanding request counter.
    pub busy: Arc<BusyState>,
    /// Toast sender.
    pub notifier: Notifier,
    /// Active translations.
    pub catalog: Arc<Catalog>,
    /// Persisted language selector.
    pub language: LanguagePreference,
    /// Busy-aware API client.
    pub api: ApiClient,
}

impl AppContext {
    /// Builds the context on top of `storage`.
    ///
    /// The catalog is seeded from the startup locale, then the selector
    /// preference is applied, then the session is restored.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the HTTP client cannot be built.
    pub fn new(
        settings: &ApiSettings,
        storage: Arc<dyn KeyValueStore>,
    ) -> Result<(Self, mpsc::UnboundedReceiver<Toast>), ApiError> {
        let catalog = Arc::new(Catalog::from_storage(storage.as_ref()));
        let language = LanguagePreference::load(storage.clone(), catalog.clone());
        let session = SessionStore::restore(storage.clone());

        let executor = RequestExecutor::new(settings, storage, catalog.clone())?;
        let busy = Arc::new(BusyState::new());
        let (notifier, toasts) = Notifier::channel();
        let api = ApiClient::new(executor, busy.clone(), notifier.clone(), catalog.clone());

        let ctx = Self {
            session,
            busy,
            notifier,
            catalog,
            language,
            api,
        };
        Ok((ctx, toasts))
    }

    /// Translates `key` in the active language.
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.catalog.t(key)
    }
}
