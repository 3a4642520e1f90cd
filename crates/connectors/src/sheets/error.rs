use thiserror::Error;

/// Errors raised by a sheet client while talking to the hosting service.
#[derive(Debug, Error)]
pub enum SheetError {
    /// Transport-level failure (DNS, TLS, connection reset, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a server error or asked us to slow down.
    #[error("Transient API error (HTTP {status}): {message}")]
    Transient { status: u16, message: String },

    /// The service rejected the request.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid access token: {0}")]
    InvalidToken(String),
}

impl SheetError {
    pub fn is_transient(&self) -> bool {
        match self {
            SheetError::Transient { .. } => true,
            SheetError::Http(err) => err.is_timeout() || err.is_connect(),
            _ => false,
        }
    }
}
