//! Client-facing error model.

use thiserror::Error;

/// Result type used across the client core.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the transport and session layers.
///
/// Guard outcomes (unknown route, permission denial) are redirects, not
/// errors, and never appear here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid credentials or an expired/invalid token. Callers must clear
    /// the persisted session and return to the login page.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Transport unreachable. No session state may be mutated.
    #[error("network error: {0}")]
    Network(String),

    /// Application-level failure reported by the server envelope.
    #[error("server rejected request ({code}): {message}")]
    Server { code: i32, message: String },

    /// The response body did not match the expected shape.
    #[error("malformed payload: {0}")]
    Payload(String),
}

impl ApiError {
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn payload(msg: impl Into<String>) -> Self {
        Self::Payload(msg.into())
    }

    pub fn server(code: i32, message: impl Into<String>) -> Self {
        Self::Server {
            code,
            message: message.into(),
        }
    }

    /// True when the session must be cleared and the user sent back to login.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}
