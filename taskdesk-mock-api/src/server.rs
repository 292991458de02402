//! HTTP surface of the mock API.
//!
//! Serves the account and task endpoints under `/api` on top of a shared
//! [`MockState`]. Task routes require `Authorization: Bearer <token>` with a
//! token issued by login or registration. Failures use the same two error
//! body shapes as the real API: `{"message": ...}` and `{"error": <code>}`.

use std::sync::Arc;

use axum::Json;
use axum::extract::{FromRequestParts, Path, Request, State};
use axum::http::request::Parts;
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{patch, post};
use taskdesk_proto::auth::{Credentials, RecoverRequest, RecoverResponse, TokenPair};
use taskdesk_proto::error::ErrorBody;
use taskdesk_proto::task::{
    CreateTaskRequest, DeleteTaskResponse, Task, UpdateStatusRequest, UpdateTaskRequest,
};

use crate::store::{MockState, StoreError};

/// Error code for a failed login.
pub const INVALID_CREDENTIAL_CODE: &str = "auth/invalid-credential";

/// Error code for a registration with a taken email.
pub const EMAIL_IN_USE_CODE: &str = "auth/email-already-in-use";

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::InvalidCredential => (
                StatusCode::UNAUTHORIZED,
                ErrorBody::code(INVALID_CREDENTIAL_CODE),
            ),
            Self::EmailInUse => (StatusCode::CONFLICT, ErrorBody::code(EMAIL_IN_USE_CODE)),
            Self::InvalidToken => (StatusCode::UNAUTHORIZED, ErrorBody::message(self.to_string())),
            Self::TaskNotFound => (StatusCode::NOT_FOUND, ErrorBody::message(self.to_string())),
            Self::TitleRequired => (StatusCode::BAD_REQUEST, ErrorBody::message(self.to_string())),
        };
        (status, Json(body)).into_response()
    }
}

/// The account a request is made on behalf of, taken from its bearer token.
#[derive(Debug, Clone)]
pub struct Caller(pub String);

impl FromRequestParts<Arc<MockState>> for Caller {
    type Rejection = StoreError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<MockState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(StoreError::InvalidToken)?;
        state.authenticate(token.trim()).await.map(Self)
    }
}

/// Builds the router with every endpoint nested under `/api`.
pub fn router(state: Arc<MockState>) -> axum::Router {
    let api = axum::Router::new()
        .route("/users/login", post(login))
        .route("/users/register", post(register))
        .route("/users/recover", post(recover))
        .route("/tasks", post(create_task).get(list_tasks))
        .route("/tasks/", post(create_task).get(list_tasks))
        .route("/tasks/{id}", patch(update_task).delete(delete_task))
        .route("/tasks/done/{id}", patch(update_status));

    axum::Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let response = next.run(request).await;
    tracing::info!(%method, %uri, status = response.status().as_u16(), "request");
    response
}

async fn login(
    State(state): State<Arc<MockState>>,
    Json(body): Json<Credentials>,
) -> Result<Json<TokenPair>, StoreError> {
    state.login(&body.email, &body.password).await.map(Json)
}

async fn register(
    State(state): State<Arc<MockState>>,
    Json(body): Json<Credentials>,
) -> Result<(StatusCode, Json<TokenPair>), StoreError> {
    let pair = state.register(&body.email, &body.password).await?;
    tracing::info!(email = %body.email, "account registered");
    Ok((StatusCode::CREATED, Json(pair)))
}

async fn recover(Json(body): Json<RecoverRequest>) -> Json<RecoverResponse> {
    tracing::info!(email = %body.email, "recovery email requested");
    Json(RecoverResponse {
        message: Some(format!("recovery email sent to {}", body.email)),
    })
}

async fn list_tasks(State(state): State<Arc<MockState>>, Caller(owner): Caller) -> Json<Vec<Task>> {
    Json(state.list_tasks(&owner).await)
}

async fn create_task(
    State(state): State<Arc<MockState>>,
    Caller(owner): Caller,
    Json(body): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), StoreError> {
    let task = state.create_task(&owner, &body.title).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

async fn update_task(
    State(state): State<Arc<MockState>>,
    Caller(owner): Caller,
    Path(id): Path<String>,
    Json(body): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, StoreError> {
    state.update_title(&owner, &id, &body.title).await.map(Json)
}

async fn update_status(
    State(state): State<Arc<MockState>>,
    Caller(owner): Caller,
    Path(id): Path<String>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<Task>, StoreError> {
    state.set_done(&owner, &id, body.done).await.map(Json)
}

async fn delete_task(
    State(state): State<Arc<MockState>>,
    Caller(owner): Caller,
    Path(id): Path<String>,
) -> Result<Json<DeleteTaskResponse>, StoreError> {
    state.delete_task(&owner, &id).await?;
    Ok(Json(DeleteTaskResponse {
        message: "task deleted".to_string(),
    }))
}

/// Starts the mock API on the given address with an empty state and returns
/// the bound address and a join handle.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server(
    addr: &str,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    start_server_with_state(addr, Arc::new(MockState::new())).await
}

/// Starts the mock API over a caller-provided [`MockState`].
///
/// Tests keep a clone of the `Arc` to seed accounts or inspect tasks
/// while the server runs.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server_with_state(
    addr: &str,
    state: Arc<MockState>,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "mock api server error");
        }
    });

    Ok((bound_addr, handle))
}
