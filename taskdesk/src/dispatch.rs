//! Dispatcher wiring the TUI loop to the async feature flows.
//!
//! The UI loop never awaits the network. It sends a [`Command`] per user
//! action and drains [`Event`]s on each tick. Each command runs on its own
//! tokio task, so a slow request never delays the next action.
//!
//! ```text
//! TUI (main thread)  <── Event ───  dispatcher + per-command tasks
//!                     ─── Command ─>
//! ```

use std::sync::Arc;

use taskdesk_proto::task::Task;
use tokio::sync::mpsc;

use crate::context::AppContext;
use crate::features::login::{self, LoginForm};
use crate::features::logout;
use crate::features::recover::{self, RecoverForm};
use crate::features::register::{self, RegisterForm};
use crate::features::tasks::TaskService;
use crate::i18n::Language;
use crate::routes::Route;

/// Default channel capacity for commands and events.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// User actions sent from the TUI loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit the login form.
    Login(LoginForm),
    /// Submit the registration form.
    Register(RegisterForm),
    /// Submit the recovery form.
    Recover(RecoverForm),
    /// End the session.
    Logout,
    /// Fetch the task list.
    LoadTasks,
    /// Create a task.
    CreateTask {
        /// Title input.
        title: String,
    },
    /// Rename a task.
    UpdateTask {
        /// Task id.
        id: String,
        /// Title input.
        title: String,
    },
    /// Set a task's completion flag.
    SetTaskStatus {
        /// Task id.
        id: String,
        /// Requested flag.
        done: bool,
    },
    /// Delete a task (already confirmed by the user).
    DeleteTask {
        /// Task id.
        id: String,
    },
    /// Switch to the next UI language.
    CycleLanguage,
    /// Stop the dispatcher.
    Shutdown,
}

/// Confirmed outcomes sent back to the TUI loop.
///
/// Failures produce no event: the user has already seen a toast and the UI
/// state stays as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Show another screen (after login, registration, or logout).
    Navigate(Route),
    /// The full task list.
    TasksLoaded(Vec<Task>),
    /// A created task to append.
    TaskCreated(Task),
    /// A renamed task to replace by id.
    TaskUpdated(Task),
    /// A task whose completion flag changed, to replace by id.
    TaskStatusChanged(Task),
    /// A task to remove from the list.
    TaskDeleted {
        /// Task id.
        id: String,
    },
    /// The recovery email was accepted.
    RecoverySent,
    /// The UI language changed.
    LanguageChanged(Language),
}

/// Spawn the dispatcher and return its channel handles.
///
/// The dispatcher stops on [`Command::Shutdown`] or when the command sender
/// is dropped. Commands already running finish on their own tasks.
#[must_use]
pub fn spawn_dispatcher(
    ctx: Arc<AppContext>,
    capacity: usize,
) -> (mpsc::Sender<Command>, mpsc::Receiver<Event>) {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(capacity);
    let (evt_tx, evt_rx) = mpsc::channel::<Event>(capacity);

    tokio::spawn(async move {
        while let Some(command) = cmd_rx.recv().await {
            if command == Command::Shutdown {
                tracing::info!("dispatcher shutting down");
                break;
            }
            let ctx = Arc::clone(&ctx);
            let evt_tx = evt_tx.clone();
            tokio::spawn(async move {
                if let Some(event) = handle(&ctx, command).await
                    && evt_tx.send(event).await.is_err()
                {
                    tracing::debug!("event receiver dropped");
                }
            });
        }
    });

    (cmd_tx, evt_rx)
}

/// Runs one command to completion and returns its event, if any.
pub async fn handle(ctx: &AppContext, command: Command) -> Option<Event> {
    tracing::debug!(?command, "dispatching");
    let tasks = TaskService::new(ctx);

    match command {
        Command::Login(form) => login::submit(ctx, &form).await.map(Event::Navigate),
        Command::Register(form) => register::submit(ctx, &form).await.map(Event::Navigate),
        Command::Recover(form) => recover::submit(ctx, &form)
            .await
            .then_some(Event::RecoverySent),
        Command::Logout => Some(Event::Navigate(logout(ctx))),
        Command::LoadTasks => tasks
            .load()
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "loading tasks failed"))
            .ok()
            .map(Event::TasksLoaded),
        Command::CreateTask { title } => tasks
            .create(&title)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "creating task failed"))
            .ok()
            .map(Event::TaskCreated),
        Command::UpdateTask { id, title } => tasks
            .update(&id, &title)
            .await
            .inspect_err(|e| tracing::warn!(id = %id, error = %e, "updating task failed"))
            .ok()
            .map(Event::TaskUpdated),
        Command::SetTaskStatus { id, done } => tasks
            .set_status(&id, done)
            .await
            .inspect_err(|e| tracing::warn!(id = %id, error = %e, "changing task status failed"))
            .ok()
            .map(Event::TaskStatusChanged),
        Command::DeleteTask { id } => match tasks.delete(&id).await {
            Ok(()) => Some(Event::TaskDeleted { id }),
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "deleting task failed");
                None
            }
        },
        Command::CycleLanguage => Some(Event::LanguageChanged(ctx.language.cycle())),
        Command::Shutdown => None,
    }
}
