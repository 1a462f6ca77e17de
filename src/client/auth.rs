//! Authentication endpoints

use serde_json::json;

use super::error::ApiError;
use super::http::HttpClient;
use crate::models::{AuthResponse, Credentials, MessageResponse, Registration};

/// Typed wrapper over the `/api/auth` and `/api/users` endpoints
#[derive(Debug, Clone)]
pub struct AuthApi {
    http: HttpClient,
}

impl AuthApi {
    /// Create the client on top of a shared HTTP client
    #[must_use]
    pub const fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// `POST /api/auth/login`
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        self.http.post("/api/auth/login", credentials).await
    }

    /// `POST /api/users`
    pub async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError> {
        self.http.post("/api/users", registration).await
    }

    /// `POST /api/auth/logout`
    pub async fn logout(&self) -> Result<MessageResponse, ApiError> {
        self.http.post("/api/auth/logout", &json!({})).await
    }

    /// `POST /api/auth/reset-password`
    pub async fn request_password_reset(&self, email: &str) -> Result<MessageResponse, ApiError> {
        self.http.post("/api/auth/reset-password", &json!({ "email": email })).await
    }

    /// `POST /api/auth/reset-password/{token}`
    pub async fn reset_password(
        &self,
        token: &str,
        password: &str,
    ) -> Result<MessageResponse, ApiError> {
        let endpoint = format!("/api/auth/reset-password/{token}");
        self.http.post(&endpoint, &json!({ "password": password })).await
    }
}
