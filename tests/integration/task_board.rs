//! Integration tests for the Home screen task flows against the mock API.
//!
//! These tests validate:
//! - Creating a task appends exactly one entry with `done == false`
//! - Toggling completion replaces only the affected entry
//! - The completion flag follows the request even when the API echoes a
//!   stale document
//! - Deleting removes the entry after the API confirms
//! - A rejected token leaves the list unchanged and shows the API message,
//!   both when mutating and when reloading the list
//! - The busy flag is lowered once every request has settled

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use taskdesk::api::ApiSettings;
use taskdesk::app::App;
use taskdesk::context::AppContext;
use taskdesk::dispatch::{self, Command, Event};
use taskdesk::features::tasks::{TaskBoard, TaskError, TaskService};
use taskdesk::i18n::LANGUAGE_KEY;
use taskdesk::routes::Route;
use taskdesk::notify::{Toast, ToastLevel};
use taskdesk::session::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use taskdesk::storage::{KeyValueStore, MemoryStore};
use taskdesk_mock_api::server;
use taskdesk_mock_api::store::MockState;
use tokio::sync::mpsc::UnboundedReceiver;

const EMAIL: &str = "a@b.com";

/// Start the mock API over `state` and return its base URL.
async fn start_api(state: MockState) -> (String, Arc<MockState>, tokio::task::JoinHandle<()>) {
    let state = Arc::new(state);
    let (addr, handle) = server::start_server_with_state("127.0.0.1:0", state.clone())
        .await
        .expect("failed to start mock api");
    (format!("http://{addr}/api"), state, handle)
}

/// An English context already signed in as [`EMAIL`].
async fn signed_in(url: &str, state: &MockState) -> (AppContext, UnboundedReceiver<Toast>) {
    let tokens = state.register(EMAIL, "pw").await.unwrap();
    let storage = Arc::new(MemoryStore::new());
    storage.set(LANGUAGE_KEY, "en").unwrap();
    storage.set(ACCESS_TOKEN_KEY, &tokens.access_token).unwrap();
    storage.set(REFRESH_TOKEN_KEY, &tokens.refresh_token).unwrap();
    let settings = ApiSettings {
        base_url: url.to_string(),
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
async fn create_appends_one_pending_task() {
    let (url, state, _handle) = start_api(MockState::new()).await;
    let (ctx, mut toasts) = signed_in(&url, &state).await;
    let service = TaskService::new(&ctx);
    let mut board = TaskBoard::new();
    board.replace_all(service.load().await.unwrap());
    assert!(board.is_empty());

    let task = service.create("buy milk").await.unwrap();
    board.append(task);

    assert_eq!(board.len(), 1);
    assert_eq!(board.tasks()[0].title, "buy milk");
    assert!(!board.tasks()[0].done);
    assert_eq!(state.list_tasks(EMAIL).await.len(), 1);
    assert!(!ctx.busy.is_busy());

    let shown = drain(&mut toasts);
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].level, ToastLevel::Info);
    assert_eq!(shown[0].message, "Task created");
}

#[tokio::test]
async fn blank_title_is_rejected_before_the_request() {
    let (url, state, _handle) = start_api(MockState::new()).await;
    let (ctx, mut toasts) = signed_in(&url, &state).await;

    let result = TaskService::new(&ctx).create("   ").await;

    assert!(matches!(result, Err(TaskError::Invalid(_))));
    assert!(state.list_tasks(EMAIL).await.is_empty());
    let shown = drain(&mut toasts);
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].level, ToastLevel::Error);
}

#[tokio::test]
async fn toggle_replaces_only_the_target() {
    let (url, state, _handle) = start_api(MockState::new()).await;
    let (ctx, _toasts) = signed_in(&url, &state).await;
    let service = TaskService::new(&ctx);
    state.create_task(EMAIL, "first").await.unwrap();
    state.create_task(EMAIL, "second").await.unwrap();
    let mut board = TaskBoard::new();
    board.replace_all(service.load().await.unwrap());
    let before = board.tasks().to_vec();

    let target = before[1].id.clone();
    let updated = service.set_status(&target, true).await.unwrap();
    assert!(board.replace(updated));

    assert_eq!(board.tasks()[0], before[0]);
    assert_eq!(board.tasks()[1].id, target);
    assert!(board.tasks()[1].done);
    assert_eq!(board.stats().completed, 1);
    assert_eq!(board.stats().pending, 1);
}

#[tokio::test]
async fn status_follows_request_despite_stale_echo() {
    let (url, state, _handle) = start_api(MockState::new().with_stale_status_echo()).await;
    let (ctx, _toasts) = signed_in(&url, &state).await;
    let task = state.create_task(EMAIL, "t").await.unwrap();

    let updated = TaskService::new(&ctx).set_status(&task.id, true).await.unwrap();

    assert!(updated.done);
}

#[tokio::test]
async fn rename_keeps_position() {
    let (url, state, _handle) = start_api(MockState::new()).await;
    let (ctx, _toasts) = signed_in(&url, &state).await;
    let service = TaskService::new(&ctx);
    state.create_task(EMAIL, "a").await.unwrap();
    state.create_task(EMAIL, "b").await.unwrap();
    let mut board = TaskBoard::new();
    board.replace_all(service.load().await.unwrap());
    let id = board.tasks()[0].id.clone();

    let renamed = service.update(&id, "  a2 ").await.unwrap();
    board.replace(renamed);

    assert_eq!(board.tasks()[0].id, id);
    assert_eq!(board.tasks()[0].title, "a2");
    assert_eq!(board.tasks()[1].title, "b");
}

#[tokio::test]
async fn delete_removes_after_confirmation() {
    let (url, state, _handle) = start_api(MockState::new()).await;
    let (ctx, mut toasts) = signed_in(&url, &state).await;
    let service = TaskService::new(&ctx);
    state.create_task(EMAIL, "doomed").await.unwrap();
    let mut board = TaskBoard::new();
    board.replace_all(service.load().await.unwrap());
    let id = board.tasks()[0].id.clone();

    board.request_delete(&id);
    let confirmed = board.confirm_delete().unwrap();
    service.delete(&confirmed).await.unwrap();
    assert!(board.remove(&confirmed));

    assert!(board.is_empty());
    assert!(state.list_tasks(EMAIL).await.is_empty());
    let shown = drain(&mut toasts);
    assert_eq!(shown.last().map(|t| t.message.as_str()), Some("Task deleted"));
}

#[tokio::test]
async fn rejected_token_leaves_list_unchanged() {
    let (url, state, _handle) = start_api(MockState::new()).await;
    let (ctx, mut toasts) = signed_in(&url, &state).await;
    let service = TaskService::new(&ctx);
    state.create_task(EMAIL, "keep me").await.unwrap();
    let mut board = TaskBoard::new();
    board.replace_all(service.load().await.unwrap());
    let before = board.tasks().to_vec();
    drain(&mut toasts);

    state.revoke_all_tokens().await;
    let id = before[0].id.clone();
    let result = service.delete(&id).await;

    assert!(result.is_err());
    assert_eq!(board.tasks(), before.as_slice());
    assert_eq!(state.list_tasks(EMAIL).await.len(), 1);
    assert!(!ctx.busy.is_busy());
    let shown = drain(&mut toasts);
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].level, ToastLevel::Error);
    assert_eq!(shown[0].message, "invalid token");
}

#[tokio::test]
async fn rejected_reload_keeps_board() {
    let (url, state, _handle) = start_api(MockState::new()).await;
    let (ctx, mut toasts) = signed_in(&url, &state).await;
    state.create_task(EMAIL, "keep me").await.unwrap();
    let ctx = Arc::new(ctx);
    let (cmd_tx, mut evt_rx) =
        dispatch::spawn_dispatcher(Arc::clone(&ctx), dispatch::DEFAULT_CHANNEL_CAPACITY);
    let timeout = std::time::Duration::from_secs(5);

    let mut app = App::new();
    let load = app.navigate(Route::Home, true).unwrap();
    cmd_tx.send(load).await.unwrap();
    let loaded = tokio::time::timeout(timeout, evt_rx.recv())
        .await
        .expect("timeout waiting for event")
        .expect("channel closed");
    assert_eq!(app.apply_event(loaded, true), None);
    let before = app.board.tasks().to_vec();
    assert_eq!(before.len(), 1);
    drain(&mut toasts);

    state.revoke_all_tokens().await;
    cmd_tx.send(Command::LoadTasks).await.unwrap();
    let toast = tokio::time::timeout(timeout, toasts.recv())
        .await
        .expect("timeout waiting for toast")
        .expect("notifier closed");
    assert_eq!(toast.level, ToastLevel::Error);
    assert_eq!(toast.message, "invalid token");

    // The channel only closes once every in-flight command has finished,
    // so a `None` here means the failed reload produced no event.
    cmd_tx.send(Command::Shutdown).await.unwrap();
    drop(cmd_tx);
    let after = tokio::time::timeout(timeout, evt_rx.recv())
        .await
        .expect("timeout waiting for dispatcher");
    assert!(after.is_none(), "failed reload must not emit an event");

    assert_eq!(app.board.tasks(), before.as_slice());
    assert_eq!(app.route(), Route::Home);
    assert!(drain(&mut toasts).is_empty());
}

#[tokio::test]
async fn busy_clears_after_concurrent_requests() {
    let (url, state, _handle) = start_api(MockState::new()).await;
    let (ctx, _toasts) = signed_in(&url, &state).await;
    let service = TaskService::new(&ctx);

    let (a, b, c) = tokio::join!(
        service.create("one"),
        service.create("two"),
        service.load(),
    );

    assert!(a.is_ok());
    assert!(b.is_ok());
    assert!(c.is_ok());
    assert!(!ctx.busy.is_busy());
    assert_eq!(ctx.busy.in_flight(), 0);
    assert_eq!(state.list_tasks(EMAIL).await.len(), 2);
}

#[tokio::test]
async fn dispatcher_reports_created_task() {
    let (url, state, _handle) = start_api(MockState::new()).await;
    let (ctx, _toasts) = signed_in(&url, &state).await;
    let (cmd_tx, mut evt_rx) =
        dispatch::spawn_dispatcher(Arc::new(ctx), dispatch::DEFAULT_CHANNEL_CAPACITY);

    cmd_tx
        .send(Command::CreateTask {
            title: "via dispatcher".to_string(),
        })
        .await
        .unwrap();
    let event = tokio::time::timeout(std::time::Duration::from_secs(5), evt_rx.recv())
        .await
        .expect("timeout waiting for event")
        .expect("channel closed");

    match event {
        Event::TaskCreated(task) => {
            assert_eq!(task.title, "via dispatcher");
            assert!(!task.done);
        }
        other => panic!("unexpected event: {other:?}"),
    }
    cmd_tx.send(Command::Shutdown).await.unwrap();
}
