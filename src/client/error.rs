//! Client error types with HTTP status mapping

use thiserror::Error;

/// Status reported for failures that never produced an HTTP response
pub const TRANSPORT_STATUS: u16 = 500;

/// Message used when an error response carries none of its own
pub const FALLBACK_MESSAGE: &str = "An error occurred";

/// A failed API call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status
    #[error("{message} (HTTP {status})")]
    Http {
        /// Server-supplied message, or [`FALLBACK_MESSAGE`]
        message: String,
        /// HTTP status code
        status: u16,
    },

    /// The request never completed or the body could not be decoded
    #[error("{message}")]
    Transport {
        /// Underlying error text
        message: String,
    },
}

impl ApiError {
    /// Create an HTTP-level error
    #[must_use]
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            message: message.into(),
            status,
        }
    }

    /// Create a transport or decoding error
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Human-readable message
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Http { message, .. } | Self::Transport { message } => message,
        }
    }

    /// HTTP status code; transport failures report 500
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::Http { status, .. } => *status,
            Self::Transport { .. } => TRANSPORT_STATUS,
        }
    }

    /// Whether the server rejected the session (HTTP 401)
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401, .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::transport(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::transport(err.to_string())
    }
}

/// Pull the `message` field out of an error body, falling back to
/// [`FALLBACK_MESSAGE`] when the body is not JSON or has no usable message
#[must_use]
pub fn message_from_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .as_ref()
        .and_then(|value| value.get("message"))
        .and_then(serde_json::Value::as_str)
        .filter(|message| !message.is_empty())
        .map_or_else(|| FALLBACK_MESSAGE.to_string(), String::from)
}
