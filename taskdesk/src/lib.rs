//! `TaskDesk`: terminal client for a task-management API.

pub mod api;
pub mod app;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod features;
pub mod i18n;
pub mod notify;
pub mod routes;
pub mod session;
pub mod storage;
pub mod ui;
