//! Authentication store
//!
//! Holds the logged-in user and token (through [`SessionState`]), a loading
//! flag and the last error. "Authenticated" means a token is held.

use super::ActionState;
use crate::client::{ApiError, AuthApi};
use crate::models::{AuthResponse, AuthSession, Credentials, Registration, User};
use crate::session::SessionState;

/// Authentication state and actions
#[derive(Debug)]
pub struct AuthStore {
    api: AuthApi,
    session: SessionState,
    state: ActionState,
}

impl AuthStore {
    /// Create the store; the session is re-read from storage immediately
    #[must_use]
    pub fn new(api: AuthApi, session: SessionState) -> Self {
        let store = Self {
            api,
            session,
            state: ActionState::default(),
        };
        store.init();
        store
    }

    /// Load the session from durable storage
    ///
    /// A missing token, a missing user or an unreadable user clears both
    /// stored keys; a partial session is never held.
    pub fn init(&self) {
        self.session.reload();
    }

    // === Getters ===

    /// Whether a token is held
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// The logged-in user
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.session.user()
    }

    /// The current bearer token
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.session.token()
    }

    /// Whether an action is in flight
    #[must_use]
    pub fn loading(&self) -> bool {
        self.state.loading()
    }

    /// Message of the last failed action
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state.error()
    }

    /// Shared session handle
    #[must_use]
    pub const fn session(&self) -> &SessionState {
        &self.session
    }

    // === Actions ===

    /// Log in; returns whether a session was established
    pub async fn login(&self, credentials: &Credentials) -> bool {
        let _loading = self.state.begin();
        let result = self.api.login(credentials).await;
        self.accept(result, "Failed to login")
    }

    /// Register a new account and log in as it
    pub async fn register(&self, registration: &Registration) -> bool {
        let _loading = self.state.begin();
        let result = self.api.register(registration).await;
        self.accept(result, "Failed to register")
    }

    fn accept(&self, result: Result<AuthResponse, ApiError>, fallback: &str) -> bool {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                self.state.fail(&e, fallback);
                return false;
            },
        };

        log::debug!("Authenticated as {}", response.user.email);
        match self.session.establish(AuthSession::from(response)) {
            Ok(()) => true,
            Err(e) => {
                self.state.fail(&ApiError::transport(e.to_string()), fallback);
                false
            },
        }
    }

    /// Log out
    ///
    /// The server is told first on a best-effort basis; the local session is
    /// torn down whatever the outcome.
    pub async fn logout(&self) {
        let loading = self.state.begin();
        if let Err(e) = self.api.logout().await {
            log::error!("Logout API call failed: {e}");
        }
        drop(loading);
        self.clean_credentials();
    }

    /// Drop the session from memory and storage
    ///
    /// Synchronous and idempotent, so it can run from anywhere, including the
    /// 401 handler.
    pub fn clean_credentials(&self) {
        self.session.clear();
        self.state.reset();
    }

    /// Ask the server to email a password reset link
    pub async fn request_password_reset(&self, email: &str) -> bool {
        let _loading = self.state.begin();
        match self.api.request_password_reset(email).await {
            Ok(_) => true,
            Err(e) => {
                self.state.fail(&e, "Failed to request password reset");
                false
            },
        }
    }

    /// Set a new password using a reset token
    pub async fn reset_password(&self, token: &str, password: &str) -> bool {
        let _loading = self.state.begin();
        match self.api.reset_password(token, password).await {
            Ok(_) => true,
            Err(e) => {
                self.state.fail(&e, "Failed to reset password");
                false
            },
        }
    }
}
