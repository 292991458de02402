//! Task list: the in-memory board and the service performing round trips.
//!
//! The board is a cache of what the API returned. [`TaskService`] issues the
//! request and hands back the confirmed entity; only then is the board
//! patched (append, replace-by-id, or filter-by-id). A failed request never
//! reaches the patch step, so the board is left exactly as it was.

use taskdesk_proto::task::Task;

use super::{ValidationError, reject, validate_title};
use crate::api::ApiError;
use crate::context::AppContext;

/// Errors from task mutations.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// The title was rejected before any request.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The request failed. The user has already been notified.
    #[error(transparent)]
    Api(#[from] ApiError),
}

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

/// The create/edit form of the Home screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    /// Title input.
    pub title: String,
    /// Id of the task being edited; `None` when creating.
    pub editing: Option<String>,
    /// Whether the form is shown.
    pub visible: bool,
}

impl TaskForm {
    /// Opens an empty form for a new task.
    pub fn begin_create(&mut self) {
        self.title.clear();
        self.editing = None;
        self.visible = true;
    }

    /// Opens the form prefilled with `task`.
    pub fn begin_edit(&mut self, task: &Task) {
        self.title.clone_from(&task.title);
        self.editing = Some(task.id.clone());
        self.visible = true;
    }

    /// Clears and hides the form (submit succeeded or cancel).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// Completion counters shown above the list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    /// Number of tasks.
    pub total: usize,
    /// Tasks marked done.
    pub completed: usize,
    /// Tasks not yet done.
    pub pending: usize,
}

/// Ordered task list plus the Home screen's transient state.
#[derive(Debug, Clone, Default)]
pub struct TaskBoard {
    tasks: Vec<Task>,
    /// Create/edit form.
    pub form: TaskForm,
    pending_delete: Option<String>,
}

impl TaskBoard {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tasks in display order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the board holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Replaces the whole list (initial load).
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        if let Some(id) = &self.pending_delete
            && self.get(id).is_none()
        {
            self.pending_delete = None;
        }
    }

    /// Appends a newly created task.
    pub fn append(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Replaces the entry with the same id. Returns whether one was found.
    pub fn replace(&mut self, task: Task) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => {
                *slot = task;
                true
            }
            None => false,
        }
    }

    /// Removes the entry with `id`. Returns whether one was found.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.pending_delete.as_deref() == Some(id) {
            self.pending_delete = None;
        }
        self.tasks.len() != before
    }

    /// Empties the list and all transient state (leaving the screen).
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Completion counters.
    #[must_use]
    pub fn stats(&self) -> TaskStats {
        let completed = self.tasks.iter().filter(|t| t.done).count();
        TaskStats {
            total: self.tasks.len(),
            completed,
            pending: self.tasks.len() - completed,
        }
    }

    /// Asks for confirmation before deleting `id`. Unknown ids are ignored.
    pub fn request_delete(&mut self, id: &str) {
        if self.get(id).is_some() {
            self.pending_delete = Some(id.to_string());
        }
    }

    /// Id awaiting delete confirmation.
    #[must_use]
    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    /// Confirms the pending deletion and returns the id to delete.
    ///
    /// The task stays on the board until the API confirms the deletion.
    pub fn confirm_delete(&mut self) -> Option<String> {
        self.pending_delete.take()
    }

    /// Drops the pending deletion without any request.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Performs the task round trips through the shared API client.
///
/// Every successful mutation raises its confirmation toast. The returned
/// value is what the board should be patched with.
#[derive(Debug, Clone, Copy)]
pub struct TaskService<'a> {
    ctx: &'a AppContext,
}

impl<'a> TaskService<'a> {
    /// Creates a service bound to `ctx`.
    #[must_use]
    pub const fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    /// Fetches the full list.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Failed`] if the request fails.
    pub async fn load(&self) -> Result<Vec<Task>, ApiError> {
        let tasks = self.ctx.api.list_tasks().await?;
        tracing::debug!(count = tasks.len(), "tasks loaded");
        Ok(tasks)
    }

    /// Creates a task and returns it for appending.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Invalid`] (after toasting the reason) for a bad
    /// title, or [`TaskError::Api`] if the request fails.
    pub async fn create(&self, title: &str) -> Result<Task, TaskError> {
        let title = self.checked_title(title)?;
        let task = self.ctx.api.create_task(title).await?;
        tracing::info!(id = %task.id, "task created");
        self.ctx.notifier.info(self.ctx.t("home.toast_task_created"));
        Ok(task)
    }

    /// Renames a task and returns the replacement entry.
    ///
    /// # Errors
    ///
    /// Same as [`TaskService::create`].
    pub async fn update(&self, id: &str, title: &str) -> Result<Task, TaskError> {
        let title = self.checked_title(title)?;
        let task = self.ctx.api.update_task(id, title).await?;
        tracing::info!(id, "task updated");
        self.ctx.notifier.info(self.ctx.t("home.toast_task_modified"));
        Ok(task)
    }

    /// Sets the completion flag and returns the replacement entry.
    ///
    /// The entry's `done` is forced to the requested value regardless of
    /// what the response body says.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Failed`] if the request fails.
    pub async fn set_status(&self, id: &str, done: bool) -> Result<Task, ApiError> {
        let mut task = self.ctx.api.update_task_status(id, done).await?;
        task.done = done;
        tracing::info!(id, done, "task status changed");
        self.ctx.notifier.info(self.ctx.t("home.toast_task_modified"));
        Ok(task)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Failed`] if the request fails.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let response = self.ctx.api.delete_task(id).await?;
        tracing::info!(id, message = %response.message, "task deleted");
        self.ctx.notifier.info(self.ctx.t("home.toast_task_deleted"));
        Ok(())
    }

    fn checked_title<'t>(&self, title: &'t str) -> Result<&'t str, ValidationError> {
        validate_title(title).inspect_err(|e| reject(self.ctx, *e))
    }
}
