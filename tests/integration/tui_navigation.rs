//! Integration tests for the TUI loop wiring: key events on [`App`] produce
//! commands, the dispatcher runs them against the mock API, and the
//! resulting events drive navigation and the task board.
//!
//! These tests validate:
//! - Typing credentials and pressing Enter logs in and lands on Home
//! - Entering Home loads the task list
//! - Guards keep an anonymous user off Home and a signed-in user off Login
//! - Creating, toggling, and deleting from the keyboard update the board
//! - Logging out clears the board and the login inputs, then returns to Login

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskdesk::api::ApiSettings;
use taskdesk::app::{App, HomeMode};
use taskdesk::context::AppContext;
use taskdesk::dispatch::{self, Command, Event};
use taskdesk::i18n::LANGUAGE_KEY;
use taskdesk::routes::Route;
use taskdesk::storage::{KeyValueStore, MemoryStore};
use taskdesk_mock_api::server;
use taskdesk_mock_api::store::MockState;
use tokio::sync::mpsc;

/// A running client wired to the mock API.
struct Harness {
    app: App,
    ctx: Arc<AppContext>,
    state: Arc<MockState>,
    cmd_tx: mpsc::Sender<Command>,
    evt_rx: mpsc::Receiver<Event>,
    _server: tokio::task::JoinHandle<()>,
}

impl Harness {
    async fn start() -> Self {
        let state = Arc::new(MockState::new());
        let (addr, server) = server::start_server_with_state("127.0.0.1:0", state.clone())
            .await
            .expect("failed to start mock api");
        let storage = Arc::new(MemoryStore::new());
        storage.set(LANGUAGE_KEY, "en").unwrap();
        let settings = ApiSettings {
            base_url: format!("http://{addr}/api"),
            ..ApiSettings::default()
        };
        let (ctx, _toasts) = AppContext::new(&settings, storage).unwrap();
        let ctx = Arc::new(ctx);
        let (cmd_tx, evt_rx) =
            dispatch::spawn_dispatcher(Arc::clone(&ctx), dispatch::DEFAULT_CHANNEL_CAPACITY);
        Self {
            app: App::new(),
            ctx,
            state,
            cmd_tx,
            evt_rx,
            _server: server,
        }
    }

    fn authenticated(&self) -> bool {
        self.ctx.session.is_authenticated()
    }

    /// Feeds a key to the app, returning the command it produced.
    fn key(&mut self, code: KeyCode) -> Option<Command> {
        let authenticated = self.authenticated();
        self.app
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE), authenticated)
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            assert!(self.key(KeyCode::Char(c)).is_none());
        }
    }

    /// Sends `command`, then applies events until one arrives, following up
    /// on any command an event triggers.
    async fn run(&mut self, command: Command) {
        let mut next = Some(command);
        while let Some(command) = next.take() {
            self.cmd_tx.send(command).await.unwrap();
            let event = tokio::time::timeout(Duration::from_secs(5), self.evt_rx.recv())
                .await
                .expect("timeout waiting for event")
                .expect("dispatcher closed");
            let authenticated = self.authenticated();
            next = self.app.apply_event(event, authenticated);
        }
    }
}

#[tokio::test]
async fn anonymous_user_is_kept_off_home() {
    let mut h = Harness::start().await;

    assert_eq!(h.app.navigate(Route::Home, h.authenticated()), None);
    assert_eq!(h.app.route(), Route::Login);
}

#[tokio::test]
async fn keyboard_login_lands_on_home_with_tasks() {
    let mut h = Harness::start().await;
    h.state.register("a@b.com", "pw").await.unwrap();
    h.state.create_task("a@b.com", "existing").await.unwrap();

    h.type_text("a@b.com");
    assert!(h.key(KeyCode::Tab).is_none());
    h.type_text("pw");
    let command = h.key(KeyCode::Enter).expect("enter submits");
    assert!(matches!(command, Command::Login(_)));

    h.run(command).await;

    assert_eq!(h.app.route(), Route::Home);
    assert_eq!(h.app.board.len(), 1);
    assert_eq!(h.app.board.tasks()[0].title, "existing");
}

#[tokio::test]
async fn signed_in_user_is_redirected_from_login() {
    let mut h = Harness::start().await;
    let tokens = h.state.register("a@b.com", "pw").await.unwrap();
    h.ctx
        .session
        .update(Some(&tokens.access_token), Some(&tokens.refresh_token));

    let command = h.app.enforce_guard(h.authenticated());

    assert_eq!(h.app.route(), Route::Home);
    assert_eq!(command, Some(Command::LoadTasks));
}

#[tokio::test]
async fn keyboard_task_lifecycle() {
    let mut h = Harness::start().await;
    h.state.register("a@b.com", "pw").await.unwrap();
    h.type_text("a@b.com");
    h.key(KeyCode::Tab);
    h.type_text("pw");
    let login = h.key(KeyCode::Enter).unwrap();
    h.run(login).await;
    assert!(h.app.board.is_empty());

    // Create
    assert!(h.key(KeyCode::Char('n')).is_none());
    assert_eq!(h.app.home_mode(), HomeMode::Editing);
    h.type_text("buy milk");
    let create = h.key(KeyCode::Enter).unwrap();
    h.run(create).await;
    assert_eq!(h.app.home_mode(), HomeMode::Browse);
    assert_eq!(h.app.board.len(), 1);
    assert!(!h.app.board.tasks()[0].done);

    // Toggle
    let toggle = h.key(KeyCode::Char(' ')).unwrap();
    assert!(matches!(toggle, Command::SetTaskStatus { done: true, .. }));
    h.run(toggle).await;
    assert!(h.app.board.tasks()[0].done);
    assert!(h.state.list_tasks("a@b.com").await[0].done);

    // Delete, cancelled first
    assert!(h.key(KeyCode::Char('d')).is_none());
    assert_eq!(h.app.home_mode(), HomeMode::ConfirmDelete);
    assert!(h.key(KeyCode::Char('n')).is_none());
    assert_eq!(h.app.board.len(), 1);

    assert!(h.key(KeyCode::Char('d')).is_none());
    let delete = h.key(KeyCode::Char('y')).unwrap();
    h.run(delete).await;
    assert!(h.app.board.is_empty());
    assert!(h.state.list_tasks("a@b.com").await.is_empty());
}

#[tokio::test]
async fn logout_clears_board_and_returns_to_login() {
    let mut h = Harness::start().await;
    h.state.register("a@b.com", "pw").await.unwrap();
    h.state.create_task("a@b.com", "private").await.unwrap();
    h.type_text("a@b.com");
    h.key(KeyCode::Tab);
    h.type_text("pw");
    let login = h.key(KeyCode::Enter).unwrap();
    h.run(login).await;
    assert_eq!(h.app.board.len(), 1);

    let logout = h.key(KeyCode::Char('L')).unwrap();
    assert_eq!(logout, Command::Logout);
    h.run(logout).await;

    assert_eq!(h.app.route(), Route::Login);
    assert!(h.app.board.is_empty());
    assert!(!h.authenticated());
    assert!(h.app.login.email.is_empty());
    assert!(h.app.login.password.is_empty());
}
