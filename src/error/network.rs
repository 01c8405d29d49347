//! Network-related error types.
//!
//! Transport failures only. A response that arrived, whatever its status,
//! is classified by [`super::ApiError`] instead.

use std::fmt;

use crate::traits::HttpError;

/// Network-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// Connection to the server failed.
    ConnectionFailed { url: String, message: String },

    /// Request timed out.
    Timeout { url: String, message: String },

    /// The URL could not be used to build a request.
    InvalidUrl { url: String },

    /// The connection broke while reading the body.
    Io { message: String },

    /// Generic network error.
    Other { message: String },
}

impl NetworkError {
    /// Classify a transport error for the request to `url`.
    pub fn from_http(err: HttpError, url: &str) -> Self {
        match err {
            HttpError::ConnectionFailed(message) => NetworkError::ConnectionFailed {
                url: url.to_string(),
                message,
            },
            HttpError::Timeout(message) => NetworkError::Timeout {
                url: url.to_string(),
                message,
            },
            HttpError::InvalidUrl(_) => NetworkError::InvalidUrl {
                url: url.to_string(),
            },
            HttpError::Io(message) => NetworkError::Io { message },
            HttpError::Other(message) => NetworkError::Other { message },
        }
    }

    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            NetworkError::ConnectionFailed { .. }
                | NetworkError::Timeout { .. }
                | NetworkError::Io { .. }
        )
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed { url, .. } => format!(
                "Unable to reach the prophet server at {}. Is the backend running?",
                extract_origin(url)
            ),
            NetworkError::Timeout { .. } => {
                "The server did not answer in time. Please try again.".to_string()
            }
            NetworkError::InvalidUrl { url } => {
                format!("'{}' is not a valid server address.", url)
            }
            NetworkError::Io { .. } => {
                "The connection was interrupted while reading the response.".to_string()
            }
            NetworkError::Other { message } => format!("Network error: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_CONN",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::InvalidUrl { .. } => "E_NET_URL",
            NetworkError::Io { .. } => "E_NET_IO",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { url, message } => {
                write!(f, "Connection failed to '{}': {}", url, message)
            }
            NetworkError::Timeout { url, message } => {
                write!(f, "Request to '{}' timed out: {}", url, message)
            }
            NetworkError::InvalidUrl { url } => write!(f, "Invalid URL '{}'", url),
            NetworkError::Io { message } => write!(f, "IO error: {}", message),
            NetworkError::Other { message } => write!(f, "Network error: {}", message),
        }
    }
}

impl std::error::Error for NetworkError {}

/// Scheme, host and port of a URL, for messages that should not echo paths or queries.
fn extract_origin(url: &str) -> &str {
    let after_scheme = url.find("://").map(|i| i + 3).unwrap_or(0);
    match url[after_scheme..].find('/') {
        Some(end) => &url[..after_scheme + end],
        None => url,
    }
}
