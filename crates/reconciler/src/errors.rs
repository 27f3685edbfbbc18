//! Error type propagated through the [`crate::host::GitHost`] port.
//!
//! The engine never catches these: any remote failure aborts processing of
//! the single event it belongs to and no status is emitted, which GitHub
//! surfaces as a pending check. Configuration and listener errors are defined
//! where they occur (`cli` and `listener`).

use thiserror::Error;

/// A failed remote call against the GitHub API.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ApiError {
    /// The API answered with a non-success status.
    #[error("GitHub API error: {message}")]
    Api {
        /// Error message reported by the API.
        message: String,
        /// HTTP status code, if one was received.
        status: Option<u16>,
    },

    /// The request never produced an API answer (connect, TLS, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The response body did not match the expected shape.
    #[error("failed to decode GitHub response: {0}")]
    Decode(String),
}
