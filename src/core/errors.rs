//! Custom error types for Apertium API calls

use thiserror::Error;

/// Translation-related errors
///
/// Transport and decoder failures carry the `[apertium-translator]` prefix in
/// their message and keep the underlying error reachable through
/// [`std::error::Error::source`].
#[derive(Error, Debug)]
pub enum TranslatorError {
    /// Missing or malformed credential
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
    },

    /// Connection-level failure
    #[error("[apertium-translator] Error connecting to Apertium API")]
    TransportError {
        #[source]
        source: reqwest::Error,
    },

    /// Non-200 HTTP status, message is the response body
    #[error("[apertium-translator] Error from Apertium API: {status} - {message}")]
    ServiceError {
        status: u16,
        message: String,
    },

    /// Response body does not have the expected JSON shape
    #[error("[apertium-translator] Error retrieving translation: {message}")]
    MalformedResponse {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Failure while draining the response body
    #[error("[apertium-translator] Error reading translation stream")]
    ReadError {
        #[source]
        source: reqwest::Error,
    },

    /// Request URL could not be built
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),
}

impl TranslatorError {
    /// Shape mismatch without an underlying parse error
    pub fn malformed(message: impl Into<String>) -> Self {
        TranslatorError::MalformedResponse {
            message: message.into(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for TranslatorError {
    fn from(err: serde_json::Error) -> Self {
        TranslatorError::MalformedResponse {
            message: "invalid JSON".to_string(),
            source: Some(err),
        }
    }
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslatorError>;
