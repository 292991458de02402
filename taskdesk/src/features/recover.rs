//! Password recovery screen flow.

use super::{reject, validate_email};
use crate::context::AppContext;

/// Inputs of the recovery screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecoverForm {
    /// Address the recovery email is sent to.
    pub email: String,
}

impl RecoverForm {
    /// Creates a populated form.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

/// Requests a recovery email. Returns whether the API accepted it.
///
/// Success is confirmed with a toast; the screen does not change.
pub async fn submit(ctx: &AppContext, form: &RecoverForm) -> bool {
    if let Err(e) = validate_email(&form.email) {
        reject(ctx, e);
        return false;
    }

    match ctx.api.recover(form.email.trim()).await {
        Ok(()) => {
            ctx.notifier.info(ctx.t("recover.toast_email_sent"));
            true
        }
        Err(e) => {
            tracing::error!(error = %e, "recovery request failed");
            false
        }
    }
}
