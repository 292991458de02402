//! Screens and the guards deciding which of them are reachable.

use std::fmt;

/// A screen of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    /// `/login`.
    #[default]
    Login,
    /// `/register`.
    Register,
    /// `/recover`.
    Recover,
    /// `/home`, the task list. Requires a session.
    Home,
}

impl Route {
    /// Path of the route.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Recover => "/recover",
            Self::Home => "/home",
        }
    }

    /// Maps a path to a route. Unknown paths land on [`Route::Login`].
    #[must_use]
    pub fn parse(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/register" => Self::Register,
            "/recover" => Self::Recover,
            "/home" => Self::Home,
            _ => Self::Login,
        }
    }

    /// Whether the route needs an authenticated session.
    #[must_use]
    pub const fn is_protected(self) -> bool {
        matches!(self, Self::Home)
    }

    /// Key of the screen title in the catalog.
    #[must_use]
    pub const fn title_key(self) -> &'static str {
        match self {
            Self::Login => "login.title",
            Self::Register => "register.title",
            Self::Recover => "recover.title",
            Self::Home => "home.title",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Guard for protected screens: redirects to login without a session.
#[must_use]
pub const fn protected(authenticated: bool) -> Option<Route> {
    if authenticated { None } else { Some(Route::Login) }
}

/// Guard for public-only screens: redirects home with a session.
#[must_use]
pub const fn public_only(authenticated: bool) -> Option<Route> {
    if authenticated { Some(Route::Home) } else { None }
}

/// Applies the guard `route` requires and returns the screen to show.
#[must_use]
pub const fn resolve(route: Route, authenticated: bool) -> Route {
    let redirect = if route.is_protected() {
        protected(authenticated)
    } else {
        public_only(authenticated)
    };
    match redirect {
        Some(target) => target,
        None => route,
    }
}
