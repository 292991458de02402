//! Endpoint paths, relative to the API base URL.

/// Base URL used when no configuration overrides it.
pub const DEFAULT_BASE_URL: &str = "http://localhost:4000/api";

/// `POST`: exchange credentials for a [`crate::auth::TokenPair`].
pub const USERS_LOGIN: &str = "/users/login";

/// `POST`: create an account and receive a [`crate::auth::TokenPair`].
pub const USERS_REGISTER: &str = "/users/register";

/// `POST`: request a password recovery email.
pub const USERS_RECOVER: &str = "/users/recover";

/// `GET`: list the caller's tasks.
pub const TASKS: &str = "/tasks";

/// `POST`: create a task. The trailing slash is part of the contract.
pub const TASKS_CREATE: &str = "/tasks/";

/// `PATCH` (title) / `DELETE`: a single task.
#[must_use]
pub fn task(id: &str) -> String {
    format!("{TASKS}/{id}")
}

/// `PATCH`: set a task's `done` flag.
#[must_use]
pub fn task_status(id: &str) -> String {
    format!("{TASKS}/done/{id}")
}
