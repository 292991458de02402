//! Registration screen flow.

use super::{CredentialsForm, reject};
use crate::context::AppContext;
use crate::routes::Route;

/// Inputs of the registration screen.
pub type RegisterForm = CredentialsForm;

/// Submits the registration form.
///
/// A successful registration signs the user in and returns the Home route.
pub async fn submit(ctx: &AppContext, form: &RegisterForm) -> Option<Route> {
    if let Err(e) = form.validate() {
        reject(ctx, e);
        return None;
    }

    match ctx.api.register(&form.credentials()).await {
        Ok(tokens) => {
            if ctx
                .session
                .update(Some(&tokens.access_token), Some(&tokens.refresh_token))
            {
                tracing::info!("registered and logged in");
                Some(Route::Home)
            } else {
                tracing::warn!("registration response carried empty credentials");
                None
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "{}", ctx.t("register_error"));
            None
        }
    }
}
