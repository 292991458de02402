//! `TaskDesk` mock API library.
//!
//! An in-memory implementation of the task API the `TaskDesk` client talks
//! to. Integration tests start it in-process on an OS-assigned port; the
//! binary serves it for local demos.

pub mod config;
pub mod server;
pub mod store;
