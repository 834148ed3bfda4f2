//! Session store error types.

use thiserror::Error;

/// Failures raised by a session store.
///
/// These are infrastructure failures. The HTTP layer passes them through
/// unchanged instead of translating them into API error codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionStoreError {
    /// The backing store could not be reached or refused the command.
    #[error("Session store unavailable: {0}")]
    Unavailable(String),

    /// A stored record could not be encoded or decoded.
    #[error("Session record corrupt: {0}")]
    Serialization(String),
}

impl SessionStoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        SessionStoreError::Unavailable(message.into())
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        SessionStoreError::Serialization(message.into())
    }
}

impl From<serde_json::Error> for SessionStoreError {
    fn from(err: serde_json::Error) -> Self {
        SessionStoreError::Serialization(err.to_string())
    }
}
