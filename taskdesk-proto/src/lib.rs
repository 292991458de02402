//! Wire types for the `TaskDesk` HTTP API.
//!
//! Everything that crosses the HTTP boundary between the client and the
//! task API lives here: JSON request/response bodies, the [`task::Task`]
//! entity, the discriminated [`error::ErrorBody`], and endpoint paths.

pub mod auth;
pub mod endpoints;
pub mod error;
pub mod task;
