//! Login screen flow.

use super::{CredentialsForm, reject};
use crate::context::AppContext;
use crate::routes::Route;

/// Inputs of the login screen.
pub type LoginForm = CredentialsForm;

/// Submits the login form.
///
/// On success both credentials are stored and the Home route is returned.
/// A failed request has already been toasted by the API client; it is only
/// logged here and the form is left as it was.
pub async fn submit(ctx: &AppContext, form: &LoginForm) -> Option<Route> {
    if let Err(e) = form.validate() {
        reject(ctx, e);
        return None;
    }

    match ctx.api.login(&form.credentials()).await {
        Ok(tokens) => {
            let authenticated = ctx
                .session
                .update(Some(&tokens.access_token), Some(&tokens.refresh_token));
            if authenticated {
                tracing::info!("logged in");
                Some(Route::Home)
            } else {
                tracing::warn!("login response carried empty credentials");
                None
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "login failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::ApiSettings;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn invalid_form_toasts_without_request() {
        let settings = ApiSettings {
            base_url: "http://127.0.0.1:9/api".to_string(),
            ..ApiSettings::default()
        };
        let (ctx, mut toasts) = AppContext::new(&settings, Arc::new(MemoryStore::new())).unwrap();

        let route = submit(&ctx, &LoginForm::new("not-an-email", "x")).await;
        assert_eq!(route, None);

        let toast = toasts.try_recv().unwrap();
        assert_eq!(toast.message, ctx.t("validation.email_invalid"));
        assert!(toasts.try_recv().is_err());
        assert!(!ctx.session.is_authenticated());
    }

    #[tokio::test]
    async fn unreachable_api_leaves_session_untouched() {
        let settings = ApiSettings {
            base_url: "http://127.0.0.1:9/api".to_string(),
            ..ApiSettings::default()
        };
        let (ctx, mut toasts) = AppContext::new(&settings, Arc::new(MemoryStore::new())).unwrap();

        let route = submit(&ctx, &LoginForm::new("a@b.com", "x")).await;
        assert_eq!(route, None);
        assert!(!ctx.session.is_authenticated());
        assert!(!ctx.busy.is_busy());
        assert!(toasts.try_recv().is_ok());
    }
}
