//! Error type for backend calls.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when talking to the shop backend.
///
/// The `Display` output is the human-readable message shown to the shopper.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend could not be reached.
    #[error("Cannot connect to server. Make sure the backend is running at {base_url}.")]
    Transport {
        base_url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// The backend answered 2xx with a body of the wrong shape.
    #[error("Unexpected response from server: {0}")]
    Decode(String),

    /// The backend accepted the checkout request but reported `success: false`.
    #[error("{0}")]
    CheckoutRejected(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),
}

/// Error body the backend sends alongside non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl ApiError {
    /// Build a [`ApiError::Server`] from a status and the raw response body.
    ///
    /// Prefers the backend's own `error` message when the body carries one.
    #[must_use]
    pub fn server(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Server error: {}", status.as_u16()));

        Self::Server {
            status: status.as_u16(),
            message,
        }
    }

    /// Whether the backend was unreachable (as opposed to answering badly).
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}
