//! In-memory backing store for the mock API.
//!
//! [`MockState`] keeps registered users, issued access tokens, and each
//! user's tasks in insertion order. Every operation that touches tasks is
//! scoped to the owning user, so one account can never see or modify
//! another's tasks.

use std::collections::HashMap;

use chrono::Utc;
use taskdesk_proto::auth::TokenPair;
use taskdesk_proto::task::Task;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Failures reported by [`MockState`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Login with an unknown email or a wrong password.
    #[error("invalid credentials")]
    InvalidCredential,
    /// Registration with an email that already has an account.
    #[error("email already in use")]
    EmailInUse,
    /// The bearer token is missing or was never issued.
    #[error("invalid token")]
    InvalidToken,
    /// No task with the given id belongs to the caller.
    #[error("task not found")]
    TaskNotFound,
    /// The task title is empty after trimming.
    #[error("title is required")]
    TitleRequired,
}

#[derive(Debug, Default)]
struct Inner {
    /// email -> password
    users: HashMap<String, String>,
    /// access token -> email
    tokens: HashMap<String, String>,
    /// email -> tasks, oldest first
    tasks: HashMap<String, Vec<Task>>,
}

/// Shared mock API state.
#[derive(Debug, Default)]
pub struct MockState {
    inner: RwLock<Inner>,
    stale_status_echo: bool,
}

impl MockState {
    /// Creates an empty state with no users.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `PATCH /tasks/done/{id}` answer with the task as it was
    /// before the change, like document stores that return the
    /// pre-update record.
    #[must_use]
    pub fn with_stale_status_echo(mut self) -> Self {
        self.stale_status_echo = true;
        self
    }

    /// Registers a new account and signs it in.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmailInUse`] if the email is already registered.
    pub async fn register(&self, email: &str, password: &str) -> Result<TokenPair, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.users.contains_key(email) {
            return Err(StoreError::EmailInUse);
        }
        inner.users.insert(email.to_string(), password.to_string());
        Ok(issue(&mut inner, email))
    }

    /// Signs in an existing account, issuing a fresh token pair. The
    /// account's previous access token stops working.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidCredential`] if the email is unknown or
    /// the password does not match.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, StoreError> {
        let mut inner = self.inner.write().await;
        match inner.users.get(email) {
            Some(stored) if stored == password => Ok(issue(&mut inner, email)),
            _ => Err(StoreError::InvalidCredential),
        }
    }

    /// Resolves an access token to the account that owns it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidToken`] for tokens this state never issued.
    pub async fn authenticate(&self, token: &str) -> Result<String, StoreError> {
        self.inner
            .read()
            .await
            .tokens
            .get(token)
            .cloned()
            .ok_or(StoreError::InvalidToken)
    }

    /// Invalidates every token issued so far. Accounts and tasks survive.
    pub async fn revoke_all_tokens(&self) {
        self.inner.write().await.tokens.clear();
    }

    /// Returns the owner's tasks in creation order.
    pub async fn list_tasks(&self, owner: &str) -> Vec<Task> {
        self.inner
            .read()
            .await
            .tasks
            .get(owner)
            .cloned()
            .unwrap_or_default()
    }

    /// Creates a task for `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TitleRequired`] if the trimmed title is empty.
    pub async fn create_task(&self, owner: &str, title: &str) -> Result<Task, StoreError> {
        let title = required_title(title)?;
        let task = Task {
            id: Uuid::now_v7().to_string(),
            title,
            done: false,
            created_by: owner.to_string(),
            created_at: Utc::now(),
            updated_by: None,
            updated_at: None,
        };
        self.inner
            .write()
            .await
            .tasks
            .entry(owner.to_string())
            .or_default()
            .push(task.clone());
        tracing::debug!(owner, id = %task.id, "task created");
        Ok(task)
    }

    /// Replaces a task's title and returns the updated task.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TitleRequired`] for an empty title or
    /// [`StoreError::TaskNotFound`] if the owner has no such task.
    pub async fn update_title(
        &self,
        owner: &str,
        id: &str,
        title: &str,
    ) -> Result<Task, StoreError> {
        let title = required_title(title)?;
        let mut inner = self.inner.write().await;
        let task = find_mut(&mut inner, owner, id)?;
        task.title = title;
        touch(task, owner);
        Ok(task.clone())
    }

    /// Sets a task's `done` flag.
    ///
    /// Returns the updated task, or the previous version when the state was
    /// built with [`MockState::with_stale_status_echo`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TaskNotFound`] if the owner has no such task.
    pub async fn set_done(&self, owner: &str, id: &str, done: bool) -> Result<Task, StoreError> {
        let mut inner = self.inner.write().await;
        let task = find_mut(&mut inner, owner, id)?;
        let previous = task.clone();
        task.done = done;
        touch(task, owner);
        if self.stale_status_echo {
            Ok(previous)
        } else {
            Ok(task.clone())
        }
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TaskNotFound`] if the owner has no such task.
    pub async fn delete_task(&self, owner: &str, id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let tasks = inner
            .tasks
            .get_mut(owner)
            .ok_or(StoreError::TaskNotFound)?;
        let index = tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::TaskNotFound)?;
        tasks.remove(index);
        drop(inner);
        tracing::debug!(owner, id, "task deleted");
        Ok(())
    }
}

/// One live access token per account: the new pair replaces the old one.
fn issue(inner: &mut Inner, email: &str) -> TokenPair {
    inner.tokens.retain(|_, owner| owner != email);
    let pair = TokenPair {
        access_token: Uuid::now_v7().simple().to_string(),
        refresh_token: Uuid::now_v7().simple().to_string(),
    };
    inner
        .tokens
        .insert(pair.access_token.clone(), email.to_string());
    pair
}

fn required_title(title: &str) -> Result<String, StoreError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(StoreError::TitleRequired);
    }
    Ok(title.to_string())
}

fn find_mut<'a>(inner: &'a mut Inner, owner: &str, id: &str) -> Result<&'a mut Task, StoreError> {
    inner
        .tasks
        .get_mut(owner)
        .and_then(|tasks| tasks.iter_mut().find(|t| t.id == id))
        .ok_or(StoreError::TaskNotFound)
}

fn touch(task: &mut Task, owner: &str) {
    task.updated_by = Some(owner.to_string());
    task.updated_at = Some(Utc::now());
}
