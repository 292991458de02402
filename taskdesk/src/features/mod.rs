//! Screen flows: each composes the API client with one endpoint and owns the
//! transient form state of its screen.
//!
//! Forms are validated before any request is issued. A rejected form raises
//! an error toast with the localized reason and never reaches the network.

pub mod login;
pub mod recover;
pub mod register;
pub mod tasks;

use taskdesk_proto::auth::Credentials;
use taskdesk_proto::task::MAX_TASK_TITLE_LENGTH;

use crate::context::AppContext;
use crate::routes::Route;

/// Input rejected before a request was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Email field is empty.
    #[error("email is required")]
    EmailRequired,
    /// Email is not of the form `local@domain`.
    #[error("email is not valid")]
    EmailInvalid,
    /// Password field is empty.
    #[error("password is required")]
    PasswordRequired,
    /// Task title is empty after trimming.
    #[error("title is required")]
    TitleRequired,
    /// Task title exceeds the maximum length.
    #[error("title exceeds {max} characters")]
    TitleTooLong {
        /// Maximum accepted length in characters.
        max: usize,
    },
}

impl ValidationError {
    /// Catalog key of the user-facing message.
    #[must_use]
    pub const fn message_key(self) -> &'static str {
        match self {
            Self::EmailRequired => "validation.email_required",
            Self::EmailInvalid => "validation.email_invalid",
            Self::PasswordRequired => "validation.password_required",
            Self::TitleRequired => "validation.title_required",
            Self::TitleTooLong { .. } => "validation.title_too_long",
        }
    }
}

/// Checks that `email` is non-empty and looks like `local@domain`.
///
/// # Errors
///
/// Returns [`ValidationError::EmailRequired`] or [`ValidationError::EmailInvalid`].
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace) =>
        {
            Ok(())
        }
        _ => Err(ValidationError::EmailInvalid),
    }
}

/// Checks that `password` is non-empty. Whitespace is significant.
///
/// # Errors
///
/// Returns [`ValidationError::PasswordRequired`].
pub const fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        Err(ValidationError::PasswordRequired)
    } else {
        Ok(())
    }
}

/// Validates a task title and returns it trimmed.
///
/// # Errors
///
/// Returns [`ValidationError::TitleRequired`] or [`ValidationError::TitleTooLong`].
pub fn validate_title(title: &str) -> Result<&str, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    if title.chars().count() > MAX_TASK_TITLE_LENGTH {
        return Err(ValidationError::TitleTooLong {
            max: MAX_TASK_TITLE_LENGTH,
        });
    }
    Ok(title)
}

/// Email and password inputs shared by the login and registration screens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialsForm {
    /// Email input.
    pub email: String,
    /// Password input.
    pub password: String,
}

impl CredentialsForm {
    /// Creates a populated form.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Validates both fields, email first.
    ///
    /// # Errors
    ///
    /// Returns the first failing field's [`ValidationError`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_email(&self.email)?;
        validate_password(&self.password)
    }

    /// Request body for the login and registration endpoints.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.email.trim(), &self.password)
    }
}

/// Shows a rejected form to the user.
pub(crate) fn reject(ctx: &AppContext, error: ValidationError) {
    tracing::debug!(%error, "form rejected");
    ctx.notifier.error(ctx.t(error.message_key()));
}

/// Ends the session and returns the screen to show next.
pub fn logout(ctx: &AppContext) -> Route {
    ctx.session.clear();
    tracing::info!("logged out");
    Route::Login
}
