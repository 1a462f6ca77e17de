//! JSON-over-HTTP request wrapper
//!
//! Every API call goes through [`HttpClient::request`]:
//! - the bearer token is read from durable storage on each call
//! - bodies are JSON, responses are parsed as JSON
//! - non-2xx responses become [`ApiError::Http`] with the server's message
//! - a 401 additionally fires every registered [`UnauthorizedListener`]
//!
//! The wrapper knows nothing about stores, routing or notifications. Session
//! policy lives with whoever subscribes to the unauthorized signal.

use std::fmt::Debug;
use std::sync::{Arc, PoisonError, RwLock};

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::{ApiError, message_from_body};
use crate::storage::{Storage, TOKEN_KEY};

/// Default API base URL
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Receives the "session rejected" signal raised on HTTP 401
pub trait UnauthorizedListener: Debug + Send + Sync {
    /// Called once per 401 response, before the error is returned
    fn on_unauthorized(&self);
}

/// Shared HTTP client; clones share the connection pool and listeners
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    storage: Arc<dyn Storage>,
    listeners: Arc<RwLock<Vec<Arc<dyn UnauthorizedListener>>>>,
}

impl HttpClient {
    /// Create a client for the given base URL
    #[must_use]
    pub fn new(base_url: impl Into<String>, storage: Arc<dyn Storage>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            storage,
            listeners: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Base URL requests are resolved against
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Register a listener for 401 responses
    pub fn subscribe(&self, listener: Arc<dyn UnauthorizedListener>) {
        self.listeners.write().unwrap_or_else(PoisonError::into_inner).push(listener);
    }

    /// HTTP GET
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request::<T, ()>(Method::GET, endpoint, None, &[]).await
    }

    /// HTTP POST with a JSON body
    pub async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, endpoint, Some(body), &[]).await
    }

    /// HTTP PUT with a JSON body
    pub async fn put<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, endpoint, Some(body), &[]).await
    }

    /// HTTP DELETE
    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request::<T, ()>(Method::DELETE, endpoint, None, &[]).await
    }

    /// Send a request and decode the JSON response
    ///
    /// `headers` are applied after the defaults, so they can override
    /// `Content-Type` or `Authorization`.
    pub async fn request<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        headers: &[(&str, &str)],
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{endpoint}", self.base_url);
        log::debug!("{method} {url}");

        let mut request =
            self.client.request(method.clone(), &url).headers(self.build_headers(headers)?);
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = message_from_body(&text);
            log::debug!("{method} {endpoint} failed with {}: {message}", status.as_u16());
            if status == StatusCode::UNAUTHORIZED {
                self.notify_unauthorized();
            }
            return Err(ApiError::http(status.as_u16(), message));
        }

        serde_json::from_str(&text).map_err(|e| {
            log::warn!("Failed to parse response from {method} {endpoint}: {e}");
            ApiError::from(e)
        })
    }

    fn build_headers(&self, overrides: &[(&str, &str)]) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.storage.get(TOKEN_KEY) {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| ApiError::transport(format!("Invalid stored token: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }

        for (name, value) in overrides {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ApiError::transport(format!("Invalid header name {name}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ApiError::transport(format!("Invalid header value: {e}")))?;
            headers.insert(name, value);
        }

        Ok(headers)
    }

    fn notify_unauthorized(&self) {
        // Snapshot so listeners may subscribe or issue requests themselves
        let listeners: Vec<_> =
            self.listeners.read().unwrap_or_else(PoisonError::into_inner).clone();
        for listener in listeners {
            listener.on_unauthorized();
        }
    }
}
