//! Errors returned by resource API calls.
//!
//! Every failed call ends up here: either the transport failed, or the
//! backend answered with something other than a `code == 200` envelope.

use std::fmt;

use super::category::ErrorCategory;
use super::network::NetworkError;

/// Failure of a single API request.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response.
    Transport(NetworkError),

    /// The backend answered with an envelope whose `code` is not 200.
    Application {
        /// HTTP status of the response carrying the envelope
        status: u16,
        /// Envelope `code`
        code: i64,
        /// Envelope `message`, empty when the backend sent none
        message: String,
    },

    /// Non-2xx response whose body is not an envelope.
    Status { status: u16, message: String },

    /// A 2xx response that could not be decoded into the expected shape.
    Decode { message: String },

    /// A successful envelope without the `data` the call needs.
    MissingData,

    /// The request body could not be serialized.
    Encode { message: String },
}

impl ApiError {
    /// Best-available human message for this failure.
    ///
    /// Prefers the backend's envelope message, then the transport error.
    pub fn message(&self) -> String {
        match self {
            ApiError::Transport(err) => err.to_string(),
            ApiError::Application { code, message, .. } => {
                if message.is_empty() {
                    format!("Request failed with code {}", code)
                } else {
                    message.clone()
                }
            }
            ApiError::Status { status, message } => {
                if message.is_empty() {
                    format!("Request failed with status {}", status)
                } else {
                    message.clone()
                }
            }
            ApiError::Decode { message } => format!("Invalid response: {}", message),
            ApiError::MissingData => "Response carried no data".to_string(),
            ApiError::Encode { message } => format!("Invalid request: {}", message),
        }
    }

    /// True when the backend rejected the session token.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            ApiError::Application { status, code, .. } => *status == 401 || *code == 401,
            ApiError::Status { status, .. } => *status == 401,
            _ => false,
        }
    }

    /// Envelope code or HTTP status, whichever describes the failure.
    pub fn code(&self) -> Option<i64> {
        match self {
            ApiError::Application { code, .. } => Some(*code),
            ApiError::Status { status, .. } => Some(i64::from(*status)),
            _ => None,
        }
    }

    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        if self.is_unauthorized() {
            return ErrorCategory::Auth;
        }
        match self {
            ApiError::Transport(_) => ErrorCategory::Network,
            ApiError::Application { .. } | ApiError::Status { .. } => match self.code() {
                Some(403) => ErrorCategory::Auth,
                Some(code) if code >= 500 => ErrorCategory::Server,
                _ => ErrorCategory::Client,
            },
            ApiError::Decode { .. } | ApiError::MissingData => ErrorCategory::Server,
            ApiError::Encode { .. } => ErrorCategory::Client,
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Transport(err) => err.error_code(),
            ApiError::Application { .. } => "E_API_APP",
            ApiError::Status { .. } => "E_API_STATUS",
            ApiError::Decode { .. } => "E_API_DECODE",
            ApiError::MissingData => "E_API_NO_DATA",
            ApiError::Encode { .. } => "E_API_ENCODE",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(err) => write!(f, "{}", err),
            ApiError::Application { code, .. } => {
                write!(f, "API error {}: {}", code, self.message())
            }
            ApiError::Status { status, .. } => {
                write!(f, "HTTP {}: {}", status, self.message())
            }
            _ => write!(f, "{}", self.message()),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NetworkError> for ApiError {
    fn from(err: NetworkError) -> Self {
        ApiError::Transport(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode {
            message: err.to_string(),
        }
    }
}
