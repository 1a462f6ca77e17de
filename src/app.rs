//! Application wiring
//!
//! [`App`] is built once at start-up and owns the router and both stores,
//! which share one HTTP client and one session. It is also where session
//! policy lives: the HTTP layer only reports a 401, and [`SessionExpiry`]
//! decides what that means.

use std::sync::{Arc, Weak};

use crate::client::{AuthApi, HttpClient, TasksApi, UnauthorizedListener};
use crate::config::Config;
use crate::notify::{Notification, Notifier};
use crate::router::{Route, Router};
use crate::session::SessionState;
use crate::storage::Storage;
use crate::stores::{AuthStore, TaskStore};

/// Shown once each time the server rejects the session
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please log in again.";

/// Reaction to a rejected session: clear it, tell the user, go to login
///
/// The auth store is held weakly since it owns the HTTP client this listener
/// is registered on.
#[derive(Debug)]
pub struct SessionExpiry {
    auth: Weak<AuthStore>,
    router: Arc<Router>,
    notifier: Arc<dyn Notifier>,
}

impl SessionExpiry {
    /// Create the listener
    #[must_use]
    pub const fn new(
        auth: Weak<AuthStore>,
        router: Arc<Router>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            auth,
            router,
            notifier,
        }
    }
}

impl UnauthorizedListener for SessionExpiry {
    fn on_unauthorized(&self) {
        log::debug!("Server rejected the session, logging out");
        match self.auth.upgrade() {
            Some(auth) => auth.clean_credentials(),
            None => log::debug!("Auth store is gone, nothing to clear"),
        }
        self.notifier.notify(Notification::warning(SESSION_EXPIRED_MESSAGE));
        self.router.push(Route::Login);
    }
}

/// The assembled client application
#[derive(Debug)]
pub struct App {
    router: Arc<Router>,
    auth: Arc<AuthStore>,
    tasks: TaskStore,
}

impl App {
    /// Wire everything together
    ///
    /// The session is restored from `storage` before anything else runs.
    #[must_use]
    pub fn new(config: &Config, storage: Arc<dyn Storage>, notifier: Arc<dyn Notifier>) -> Self {
        let session = SessionState::restore(Arc::clone(&storage));
        let router = Arc::new(Router::default());
        let http = HttpClient::new(config.api.url.clone(), storage);

        let auth = Arc::new(AuthStore::new(AuthApi::new(http.clone()), session));
        http.subscribe(Arc::new(SessionExpiry::new(
            Arc::downgrade(&auth),
            Arc::clone(&router),
            notifier,
        )));

        Self {
            tasks: TaskStore::new(TasksApi::new(http)),
            auth,
            router,
        }
    }

    /// Authentication store
    #[must_use]
    pub fn auth(&self) -> &AuthStore {
        &self.auth
    }

    /// Task store
    #[must_use]
    pub const fn tasks(&self) -> &TaskStore {
        &self.tasks
    }

    /// Router
    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Navigate through the auth guard; returns the route entered
    pub fn navigate(&self, target: Route) -> Route {
        self.router.navigate(target, self.auth.is_authenticated())
    }
}
