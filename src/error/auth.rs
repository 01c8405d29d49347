//! Authentication-related error types.

use std::fmt;

use super::api::ApiError;
use super::storage::StorageError;

/// Session and login failures surfaced by the auth store.
#[derive(Debug)]
pub enum AuthError {
    /// No token is stored; the user must log in first.
    NotLoggedIn,

    /// The backend rejected the stored token.
    SessionExpired,

    /// An auth API call failed. `operation` is `login`, `register`, ...
    Api {
        operation: &'static str,
        error: ApiError,
    },

    /// The captcha image in the response could not be decoded.
    InvalidCaptcha { message: String },

    /// The token could not be written to or removed from storage.
    Persist(StorageError),
}

impl AuthError {
    /// Wrap an API failure of an auth operation.
    pub fn api(operation: &'static str, error: ApiError) -> Self {
        if error.is_unauthorized() && operation == "me" {
            return AuthError::SessionExpired;
        }
        AuthError::Api { operation, error }
    }

    /// Best-available message, as shown next to a login form.
    pub fn message(&self) -> String {
        match self {
            AuthError::Api { error, .. } => error.message(),
            other => other.user_message(),
        }
    }

    /// Check if this error might be resolved by logging in again.
    pub fn requires_reauth(&self) -> bool {
        match self {
            AuthError::NotLoggedIn | AuthError::SessionExpired => true,
            AuthError::Api { error, .. } => error.is_unauthorized(),
            _ => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::NotLoggedIn => {
                "You are not signed in. Run `prophet login` first.".to_string()
            }
            AuthError::SessionExpired => {
                "Your session has expired. Please sign in again.".to_string()
            }
            AuthError::Api { operation, error } => {
                format!("{} failed: {}", operation, error.message())
            }
            AuthError::InvalidCaptcha { .. } => {
                "The server sent a captcha image that could not be read.".to_string()
            }
            AuthError::Persist(_) => {
                "Could not save your session. Please check file permissions.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::NotLoggedIn => "E_AUTH_NOT_AUTH",
            AuthError::SessionExpired => "E_AUTH_EXPIRED",
            AuthError::Api { .. } => "E_AUTH_API",
            AuthError::InvalidCaptcha { .. } => "E_AUTH_CAPTCHA",
            AuthError::Persist(_) => "E_AUTH_PERSIST",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::NotLoggedIn => write!(f, "Not logged in"),
            AuthError::SessionExpired => write!(f, "Session expired"),
            AuthError::Api { operation, error } => write!(f, "{} failed: {}", operation, error),
            AuthError::InvalidCaptcha { message } => write!(f, "Invalid captcha: {}", message),
            AuthError::Persist(err) => write!(f, "Failed to persist session: {}", err),
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuthError::Api { error, .. } => Some(error),
            AuthError::Persist(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for AuthError {
    fn from(err: StorageError) -> Self {
        AuthError::Persist(err)
    }
}
