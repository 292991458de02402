//! Non-blocking user notifications ("toasts").
//!
//! Any component holding a [`Notifier`] can push a [`Toast`]; the UI loop
//! owns the receiving half and drains it once per frame.

use std::time::{Duration, Instant};

use tokio::sync::mpsc;

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    /// Confirmation or neutral information.
    Info,
    /// A failed request or rejected input.
    Error,
}

/// A single notification.
#[derive(Debug, Clone)]
pub struct Toast {
    /// Text shown to the user.
    pub message: String,
    /// Severity.
    pub level: ToastLevel,
    /// When the toast was raised.
    pub created_at: Instant,
}

impl Toast {
    /// Creates a toast raised now.
    #[must_use]
    pub fn new(message: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            message: message.into(),
            level,
            created_at: Instant::now(),
        }
    }

    /// Whether the toast has been visible for at least `ttl` as of `now`.
    #[must_use]
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.created_at) >= ttl
    }
}

/// Cloneable sending half of the notification channel.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Toast>,
}

impl Notifier {
    /// Creates a notifier and the receiver the UI drains.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Toast>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Raises an informational toast.
    pub fn info(&self, message: impl Into<String>) {
        self.push(message.into(), ToastLevel::Info);
    }

    /// Raises an error toast.
    pub fn error(&self, message: impl Into<String>) {
        self.push(message.into(), ToastLevel::Error);
    }

    fn push(&self, message: String, level: ToastLevel) {
        tracing::debug!(?level, %message, "toast");
        let toast = Toast::new(message, level);
        // UI gone: nothing left to show it.
        let _ = self.tx.send(toast);
    }
}
