//! Integration tests for the account flows: login, registration, recovery,
//! and logout against the in-process mock API.
//!
//! These tests validate:
//! - A successful login stores both credentials and routes to Home
//! - API error codes are shown as localized toasts and leave the session alone
//! - Registration signs the new account in
//! - Recovery confirms with a toast
//! - Credentials survive a restart through the shared storage
//! - Logout clears the session and routes to Login

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use taskdesk::api::ApiSettings;
use taskdesk::context::AppContext;
use taskdesk::features::login::{self, LoginForm};
use taskdesk::features::logout;
use taskdesk::features::recover::{self, RecoverForm};
use taskdesk::features::register::{self, RegisterForm};
use taskdesk::i18n::LANGUAGE_KEY;
use taskdesk::notify::{Toast, ToastLevel};
use taskdesk::routes::Route;
use taskdesk::session::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use taskdesk::storage::{KeyValueStore, MemoryStore};
use taskdesk_mock_api::server;
use taskdesk_mock_api::store::MockState;
use tokio::sync::mpsc::UnboundedReceiver;

/// Start the mock API in-process and return its base URL.
async fn start_api() -> (String, Arc<MockState>, tokio::task::JoinHandle<()>) {
    let state = Arc::new(MockState::new());
    let (addr, handle) = server::start_server_with_state("127.0.0.1:0", state.clone())
        .await
        .expect("failed to start mock api");
    (format!("http://{addr}/api"), state, handle)
}

/// Build an English-language context over `storage`.
fn context(base_url: &str, storage: Arc<MemoryStore>) -> (AppContext, UnboundedReceiver<Toast>) {
    storage.set(LANGUAGE_KEY, "en").unwrap();
    let settings = ApiSettings {
        base_url: base_url.to_string(),
        ..ApiSettings::default()
    };
    AppContext::new(&settings, storage).unwrap()
}

fn drain(toasts: &mut UnboundedReceiver<Toast>) -> Vec<Toast> {
    let mut out = Vec::new();
    while let Ok(toast) = toasts.try_recv() {
        out.push(toast);
    }
    out
}

#[tokio::test]
async fn login_stores_credentials_and_routes_home() {
    let (url, state, _handle) = start_api().await;
    state.register("a@b.com", "pw").await.unwrap();
    let storage = Arc::new(MemoryStore::new());
    let (ctx, mut toasts) = context(&url, storage.clone());

    let route = login::submit(&ctx, &LoginForm::new("a@b.com", "pw")).await;

    assert_eq!(route, Some(Route::Home));
    assert!(ctx.session.is_authenticated());
    let token = storage.get(ACCESS_TOKEN_KEY).expect("access token stored");
    assert_eq!(state.authenticate(&token).await.unwrap(), "a@b.com");
    assert!(storage.get(REFRESH_TOKEN_KEY).is_some());
    assert!(!ctx.busy.is_busy());
    assert!(drain(&mut toasts).is_empty());
}

#[tokio::test]
async fn bad_login_toasts_localized_code() {
    let (url, _state, _handle) = start_api().await;
    let storage = Arc::new(MemoryStore::new());
    let (ctx, mut toasts) = context(&url, storage.clone());

    let route = login::submit(&ctx, &LoginForm::new("a@b.com", "wrong")).await;

    assert_eq!(route, None);
    assert!(!ctx.session.is_authenticated());
    assert!(storage.get(ACCESS_TOKEN_KEY).is_none());
    assert!(!ctx.busy.is_busy());
    let shown = drain(&mut toasts);
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].level, ToastLevel::Error);
    assert_eq!(shown[0].message, "Invalid email or password");
}

#[tokio::test]
async fn invalid_form_never_reaches_the_api() {
    let (url, _state, _handle) = start_api().await;
    let (ctx, mut toasts) = context(&url, Arc::new(MemoryStore::new()));

    let route = login::submit(&ctx, &LoginForm::new("not-an-email", "pw")).await;

    assert_eq!(route, None);
    let shown = drain(&mut toasts);
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].message, ctx.t("validation.email_invalid"));
}

#[tokio::test]
async fn register_signs_new_account_in() {
    let (url, state, _handle) = start_api().await;
    let (ctx, _toasts) = context(&url, Arc::new(MemoryStore::new()));

    let route = register::submit(&ctx, &RegisterForm::new("new@b.com", "secret")).await;

    assert_eq!(route, Some(Route::Home));
    assert!(ctx.session.is_authenticated());
    assert!(state.login("new@b.com", "secret").await.is_ok());
}

#[tokio::test]
async fn duplicate_registration_toasts_code_message() {
    let (url, state, _handle) = start_api().await;
    state.register("a@b.com", "pw").await.unwrap();
    let (ctx, mut toasts) = context(&url, Arc::new(MemoryStore::new()));

    let route = register::submit(&ctx, &RegisterForm::new("a@b.com", "pw")).await;

    assert_eq!(route, None);
    assert!(!ctx.session.is_authenticated());
    let shown = drain(&mut toasts);
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].message, "This email is already registered");
}

#[tokio::test]
async fn recover_confirms_with_toast() {
    let (url, _state, _handle) = start_api().await;
    let (ctx, mut toasts) = context(&url, Arc::new(MemoryStore::new()));

    assert!(recover::submit(&ctx, &RecoverForm::new("a@b.com")).await);

    let shown = drain(&mut toasts);
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].level, ToastLevel::Info);
    assert_eq!(shown[0].message, "Recovery email sent");
}

#[tokio::test]
async fn session_survives_restart() {
    let (url, state, _handle) = start_api().await;
    state.register("a@b.com", "pw").await.unwrap();
    let storage = Arc::new(MemoryStore::new());

    {
        let (ctx, _toasts) = context(&url, storage.clone());
        login::submit(&ctx, &LoginForm::new("a@b.com", "pw")).await;
    }

    let (restarted, _toasts) = context(&url, storage);
    assert!(restarted.session.is_authenticated());
    assert!(restarted.api.list_tasks().await.is_ok());
}

#[tokio::test]
async fn logout_clears_session() {
    let (url, state, _handle) = start_api().await;
    state.register("a@b.com", "pw").await.unwrap();
    let storage = Arc::new(MemoryStore::new());
    let (ctx, _toasts) = context(&url, storage.clone());
    login::submit(&ctx, &LoginForm::new("a@b.com", "pw")).await;

    assert_eq!(logout(&ctx), Route::Login);
    assert!(!ctx.session.is_authenticated());
    assert!(storage.get(ACCESS_TOKEN_KEY).is_none());
    assert!(storage.get(REFRESH_TOKEN_KEY).is_none());
}
