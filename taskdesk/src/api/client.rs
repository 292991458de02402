//! Busy-aware request wrapper and typed endpoint methods.

use std::sync::Arc;

use serde::de::{DeserializeOwned, IgnoredAny};
use taskdesk_proto::auth::{Credentials, RecoverRequest, TokenPair};
use taskdesk_proto::endpoints;
use taskdesk_proto::task::{
    CreateTaskRequest, DeleteTaskResponse, Task, UpdateStatusRequest, UpdateTaskRequest,
};

use super::{ApiError, ApiRequest, BusyState, RequestExecutor};
use crate::i18n::Catalog;
use crate::notify::Notifier;

/// Translation key of the generic request failure message.
pub const REQUEST_ERROR_KEY: &str = "request_error";

/// Wraps a [`RequestExecutor`] with the shared busy state and failure toasts.
///
/// On failure the precise reason is shown as a toast and logged; the caller
/// receives [`ApiError::Failed`] carrying only the fallback message.
pub struct ApiClient {
    executor: RequestExecutor,
    busy: Arc<BusyState>,
    notifier: Notifier,
    catalog: Arc<Catalog>,
}

impl ApiClient {
    /// Creates a client sharing `busy` and `notifier` with the UI.
    #[must_use]
    pub const fn new(
        executor: RequestExecutor,
        busy: Arc<BusyState>,
        notifier: Notifier,
        catalog: Arc<Catalog>,
    ) -> Self {
        Self {
            executor,
            busy,
            notifier,
            catalog,
        }
    }

    /// Sends `request`, keeping the busy state raised for its duration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Failed`] with `fallback` as its message whenever
    /// the underlying request fails. The underlying error has already been
    /// shown to the user by then.
    pub async fn send<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let _busy = self.busy.acquire();
        let method = request.method;
        let path = request.path.clone();

        match self.executor.execute(request, fallback).await {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!(%method, %path, error = %e, "request failed");
                self.notifier.error(e.to_string());
                Err(ApiError::Failed(fallback.to_string()))
            }
        }
    }

    fn request_error(&self) -> String {
        self.catalog.t(REQUEST_ERROR_KEY)
    }

    /// `POST /users/login`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Failed`] if the request fails.
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenPair, ApiError> {
        let req = ApiRequest::post(endpoints::USERS_LOGIN).json(credentials)?;
        self.send(req, &self.request_error()).await
    }

    /// `POST /users/register`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Failed`] if the request fails.
    pub async fn register(&self, credentials: &Credentials) -> Result<TokenPair, ApiError> {
        let req = ApiRequest::post(endpoints::USERS_REGISTER).json(credentials)?;
        self.send(req, &self.request_error()).await
    }

    /// `POST /users/recover`. The response body is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Failed`] if the request fails.
    pub async fn recover(&self, email: &str) -> Result<(), ApiError> {
        let body = RecoverRequest {
            email: email.to_string(),
        };
        let req = ApiRequest::post(endpoints::USERS_RECOVER).json(&body)?;
        let _: IgnoredAny = self.send(req, &self.request_error()).await?;
        Ok(())
    }

    /// `GET /tasks`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Failed`] if the request fails.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        self.send(ApiRequest::get(endpoints::TASKS), &self.request_error())
            .await
    }

    /// `POST /tasks/`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Failed`] if the request fails.
    pub async fn create_task(&self, title: &str) -> Result<Task, ApiError> {
        let body = CreateTaskRequest {
            title: title.to_string(),
        };
        let req = ApiRequest::post(endpoints::TASKS_CREATE).json(&body)?;
        self.send(req, &self.request_error()).await
    }

    /// `PATCH /tasks/:id` with a new title.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Failed`] if the request fails.
    pub async fn update_task(&self, id: &str, title: &str) -> Result<Task, ApiError> {
        let body = UpdateTaskRequest {
            title: title.to_string(),
        };
        let req = ApiRequest::patch(endpoints::task(id)).json(&body)?;
        self.send(req, &self.request_error()).await
    }

    /// `PATCH /tasks/done/:id`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Failed`] if the request fails.
    pub async fn update_task_status(&self, id: &str, done: bool) -> Result<Task, ApiError> {
        let req = ApiRequest::patch(endpoints::task_status(id)).json(&UpdateStatusRequest { done })?;
        self.send(req, &self.request_error()).await
    }

    /// `DELETE /tasks/:id`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Failed`] if the request fails.
    pub async fn delete_task(&self, id: &str) -> Result<DeleteTaskResponse, ApiError> {
        self.send(ApiRequest::delete(endpoints::task(id)), &self.request_error())
            .await
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("executor", &self.executor)
            .field("in_flight", &self.busy.in_flight())
            .finish_non_exhaustive()
    }
}
