/*
[INPUT]:  Error sources (transport, envelope, validation, credential exchange)
[OUTPUT]: Structured error types callers can match on
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use std::time::Duration;

use thiserror::Error;

/// Main error type for the Iamport adapter
#[derive(Error, Debug)]
pub enum IamportError {
    /// Call attempted after the connection pool was closed
    #[error("Session is closed")]
    ConnectionClosed,

    /// Gateway answered with a non-200 HTTP status
    #[error("HTTP error {code}: {reason}")]
    Http { code: u16, reason: String },

    /// Envelope carried a nonzero business code
    #[error("API error (code {code}): {message}")]
    Response { code: i64, message: String },

    /// A required request field was missing; nothing was sent
    #[error("Essential parameter is missing!: {field}")]
    Validation { field: String },

    /// Credential exchange failed
    #[error("Authentication failed: {0}")]
    Auth(#[source] Box<IamportError>),

    /// Transport-level failure (connect, TLS, broken body)
    #[error("HTTP request failed: {0}")]
    Transport(reqwest::Error),

    /// Total request timeout elapsed
    #[error("Request timeout after {duration:?}")]
    Timeout { duration: Duration },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Payload did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl IamportError {
    /// Classify a reqwest failure, splitting out timeouts.
    pub(crate) fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            IamportError::Timeout { duration: timeout }
        } else {
            IamportError::Transport(err)
        }
    }

    pub(crate) fn missing(field: impl Into<String>) -> Self {
        IamportError::Validation {
            field: field.into(),
        }
    }

    /// Check if the error came from the credential exchange
    pub fn is_auth_error(&self) -> bool {
        matches!(self, IamportError::Auth(_))
    }

    /// Check if the error was raised before any request was sent
    pub fn is_validation_error(&self) -> bool {
        matches!(self, IamportError::Validation { .. })
    }

    /// HTTP status or business code carried by the error, if any.
    ///
    /// Auth errors report the code of the failure they wrap.
    pub fn code(&self) -> Option<i64> {
        match self {
            IamportError::Http { code, .. } => Some(i64::from(*code)),
            IamportError::Response { code, .. } => Some(*code),
            IamportError::Auth(inner) => inner.code(),
            _ => None,
        }
    }
}

/// Result type alias for Iamport operations
pub type Result<T> = std::result::Result<T, IamportError>;
