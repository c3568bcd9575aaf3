//! Error types for remote API calls.

use thiserror::Error;

/// Errors produced while talking to the remote fleet-management API.
///
/// None of these are retried here; a caller that wants a retry makes the
/// call again.
#[derive(Debug, Error)]
pub enum GeotabError {
    /// The request never produced an HTTP response (DNS, connect, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The remote endpoint answered with a non-2xx status.
    #[error("HTTP error: status {status} - {text}")]
    Transport {
        /// HTTP status code.
        status: u16,
        /// Response body or status text, as returned.
        text: String,
    },

    /// A 2xx response whose body could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The remote API returned a structured error payload.
    #[error("API error (code {code}): {message}")]
    Api {
        /// Remote error message, surfaced verbatim.
        message: String,
        /// Remote numeric error code.
        code: i64,
    },

    /// The authentication response lacked usable credentials.
    #[error("Authentication failed: {message}")]
    Authentication {
        /// Description of what was missing.
        message: String,
    },

    /// Locally detected malformed or incomplete credentials; no network
    /// call was made.
    #[error("Invalid credentials: {message}")]
    Validation {
        /// Description of the missing field.
        message: String,
    },
}

impl GeotabError {
    /// Creates a new `Authentication` error.
    #[must_use]
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Creates a new `Validation` error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Returns `true` when the failure means the caller should log in again.
    ///
    /// Covers terminal authentication failures plus remote API errors whose
    /// cause is an invalid or expired session.
    #[must_use]
    pub fn is_authentication(&self) -> bool {
        match self {
            Self::Authentication { .. } => true,
            Self::Api { message, .. } => {
                message.contains("InvalidUser") || message.contains("expired")
            }
            _ => false,
        }
    }

    /// Returns `true` when the remote service itself was unreachable or
    /// answered outside the protocol (an upstream-unavailable condition).
    #[must_use]
    pub fn is_upstream_unavailable(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Transport { .. } | Self::Decode(_)
        )
    }
}

/// Convenience result type for remote API operations.
pub type Result<T> = std::result::Result<T, GeotabError>;
