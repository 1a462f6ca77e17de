//! User and authentication models
//!
//! Credentials and registration data are request bodies only. The pair of a
//! token and a user is an [`AuthSession`], the one thing the client persists.

use serde::{Deserialize, Serialize};

/// An authenticated user as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier
    #[serde(alias = "_id")]
    pub id: String,
    /// Login email
    pub email: String,
    /// Display name
    pub username: String,
}

/// Login request body
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    /// Login email
    pub email: String,
    /// Plain-text password
    pub password: String,
}

impl Credentials {
    /// Create login credentials
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Registration request body
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    /// Login email
    pub email: String,
    /// Plain-text password
    pub password: String,
    /// Display name
    pub username: String,
}

/// Response to a successful login or registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Bearer token for subsequent requests
    pub access_token: String,
    /// The authenticated user
    pub user: User,
}

/// A bearer token paired with the user it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    /// Bearer token
    pub token: String,
    /// Owner of the token
    pub user: User,
}

impl From<AuthResponse> for AuthSession {
    fn from(response: AuthResponse) -> Self {
        Self {
            token: response.access_token,
            user: response.user,
        }
    }
}

/// Plain `{ "message": ... }` acknowledgement body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Server message
    #[serde(default)]
    pub message: String,
}
