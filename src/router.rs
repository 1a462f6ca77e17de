//! Named routes and the authentication guard
//!
//! Each route carries two flags:
//! - `requires_auth`: unauthenticated visitors are sent to `login`
//! - `guest`: authenticated visitors are sent to `home`

use std::sync::{PoisonError, RwLock};

/// A navigable screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Home,
    /// `/login`
    Login,
    /// `/register`
    Register,
    /// `/reset-password`
    ResetPassword,
    /// `/reset-password/:token`
    ResetPasswordConfirm {
        /// Reset token from the emailed link
        token: String,
    },
    /// `/tasks`
    Tasks,
}

impl Route {
    /// Route name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Login => "login",
            Self::Register => "register",
            Self::ResetPassword => "reset-password",
            Self::ResetPasswordConfirm { .. } => "reset-password-confirm",
            Self::Tasks => "tasks",
        }
    }

    /// Route path with parameters filled in
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::ResetPassword => "/reset-password".to_string(),
            Self::ResetPasswordConfirm { token } => format!("/reset-password/{token}"),
            Self::Tasks => "/tasks".to_string(),
        }
    }

    /// Match a path back to its route
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Self::Home),
            "/login" => Some(Self::Login),
            "/register" => Some(Self::Register),
            "/reset-password" => Some(Self::ResetPassword),
            "/tasks" => Some(Self::Tasks),
            _ => trimmed
                .strip_prefix("/reset-password/")
                .filter(|token| !token.is_empty() && !token.contains('/'))
                .map(|token| Self::ResetPasswordConfirm {
                    token: token.to_string(),
                }),
        }
    }

    /// Only reachable with a session
    #[must_use]
    pub const fn requires_auth(&self) -> bool {
        matches!(self, Self::Home | Self::Tasks)
    }

    /// Only reachable without a session
    #[must_use]
    pub const fn guest(&self) -> bool {
        matches!(
            self,
            Self::Login | Self::Register | Self::ResetPassword | Self::ResetPasswordConfirm { .. }
        )
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Decide where a navigation to `target` actually lands
#[must_use]
pub fn guard(target: Route, authenticated: bool) -> Route {
    if target.requires_auth() && !authenticated {
        Route::Login
    } else if target.guest() && authenticated {
        Route::Home
    } else {
        target
    }
}

/// Tracks the current route
#[derive(Debug)]
pub struct Router {
    current: RwLock<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

impl Router {
    /// Start at the given route
    #[must_use]
    pub const fn new(initial: Route) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    /// Current route
    #[must_use]
    pub fn current(&self) -> Route {
        self.current.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Navigate through the guard; returns the route entered
    pub fn navigate(&self, target: Route, authenticated: bool) -> Route {
        let resolved = guard(target, authenticated);
        self.push(resolved.clone());
        resolved
    }

    /// Navigate without the guard
    pub fn push(&self, route: Route) {
        log::debug!("Navigating to {route}");
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = route;
    }
}
