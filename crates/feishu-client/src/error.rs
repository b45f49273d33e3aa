use thiserror::Error;

/// Errors produced by the transport layer.
///
/// Every variant is passed up untouched; the client never retries.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Network, TLS or timeout failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response whose body was not a platform envelope.
    #[error("Unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    /// The platform answered with a non-zero `code` (validation, rate
    /// limiting, permission errors, ...).
    #[error("API error [code={code}]: {msg}")]
    Api { code: i64, msg: String },

    /// The token endpoint refused the app credentials.
    #[error("Authentication failed [code={code}]: {msg}")]
    Auth { code: i64, msg: String },

    /// Body could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Success envelope without the payload the call expects.
    #[error("Response is missing {0}")]
    MissingData(&'static str),
}

impl ClientError {
    /// Platform error code, if the platform produced one.
    pub fn api_code(&self) -> Option<i64> {
        match self {
            ClientError::Api { code, .. } | ClientError::Auth { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ClientError>;
