//! Shared session state
//!
//! [`SessionState`] is the in-memory mirror of the durable `token` / `user`
//! keys. It holds a single `Option<AuthSession>`, so a token can never be
//! held without its user. Clones share the same state.

use std::sync::{Arc, PoisonError, RwLock};

use crate::models::{AuthSession, User};
use crate::storage::{Storage, StorageError, TOKEN_KEY, USER_KEY};

/// In-memory session plus the storage it is persisted to
#[derive(Debug, Clone)]
pub struct SessionState {
    current: Arc<RwLock<Option<AuthSession>>>,
    storage: Arc<dyn Storage>,
}

impl SessionState {
    /// Restore the session from storage
    ///
    /// Both keys must be present and the user must parse; anything less
    /// clears both keys and starts logged out.
    #[must_use]
    pub fn restore(storage: Arc<dyn Storage>) -> Self {
        let state = Self {
            current: Arc::new(RwLock::new(None)),
            storage,
        };
        state.reload();
        state
    }

    /// Re-read the session from storage, replacing what is held in memory
    pub fn reload(&self) {
        match Self::read_stored(self.storage.as_ref()) {
            Some(session) => {
                *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
            },
            None => self.clear(),
        }
    }

    fn read_stored(storage: &dyn Storage) -> Option<AuthSession> {
        let token = storage.get(TOKEN_KEY)?;
        let user = storage.get(USER_KEY)?;
        match serde_json::from_str::<User>(&user) {
            Ok(user) => Some(AuthSession { token, user }),
            Err(e) => {
                log::warn!("Stored user is unreadable, clearing session: {e}");
                None
            },
        }
    }

    /// Hold a new session and persist it
    pub fn establish(&self, session: AuthSession) -> Result<(), StorageError> {
        let user = serde_json::to_string(&session.user)?;
        let persisted = self
            .storage
            .set(TOKEN_KEY, &session.token)
            .and_then(|()| self.storage.set(USER_KEY, &user));
        if let Err(e) = persisted {
            // Never leave half a session on disk
            self.clear_storage();
            return Err(e);
        }
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
        Ok(())
    }

    /// Drop the session from memory and storage; safe to call repeatedly
    pub fn clear(&self) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
        self.clear_storage();
    }

    fn clear_storage(&self) {
        if let Err(e) = self.storage.remove_all(&[TOKEN_KEY, USER_KEY]) {
            log::warn!("Failed to clear stored session: {e}");
        }
    }

    /// Current session, if any
    #[must_use]
    pub fn current(&self) -> Option<AuthSession> {
        self.current.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Current bearer token
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.current().map(|s| s.token)
    }

    /// Current user
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.current().map(|s| s.user)
    }

    /// Whether a token is held
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    /// Storage the session is persisted to
    #[must_use]
    pub fn storage(&self) -> Arc<dyn Storage> {
        Arc::clone(&self.storage)
    }
}
