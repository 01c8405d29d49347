//! Unified error type for the prophet client.

use std::fmt;

use super::api::ApiError;
use super::auth::AuthError;
use super::category::ErrorCategory;
use super::context::ErrorContext;
use super::network::NetworkError;
use super::storage::StorageError;
use crate::models::GraphError;

/// Unified error type for the prophet client.
#[derive(Debug)]
pub enum ProphetError {
    /// Transport failures outside of an API call.
    Network(NetworkError),

    /// A resource API call failed.
    Api(ApiError),

    /// Session and login errors.
    Auth(AuthError),

    /// Persisted state could not be read or written.
    Storage(StorageError),

    /// A graph failed local consistency checks.
    Graph(GraphError),

    /// Reading or writing a local file failed.
    Io(std::io::Error),

    /// Invalid configuration (base URL, data directory, settings).
    Config { message: String },

    /// Invalid command-line usage.
    Usage { message: String },

    /// Wrapped error with additional context.
    WithContext {
        error: Box<ProphetError>,
        context: ErrorContext,
    },
}

impl ProphetError {
    pub fn config(message: impl Into<String>) -> Self {
        ProphetError::Config {
            message: message.into(),
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        ProphetError::Usage {
            message: message.into(),
        }
    }

    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ProphetError::Network(_) => ErrorCategory::Network,
            ProphetError::Api(err) => err.category(),
            ProphetError::Auth(err) => {
                if err.requires_reauth() {
                    ErrorCategory::Auth
                } else if let AuthError::Api { error, .. } = err {
                    error.category()
                } else {
                    ErrorCategory::Storage
                }
            }
            ProphetError::Storage(_) | ProphetError::Io(_) => ErrorCategory::Storage,
            ProphetError::Graph(_) => ErrorCategory::Validation,
            ProphetError::Config { .. } => ErrorCategory::Configuration,
            ProphetError::Usage { .. } => ErrorCategory::Client,
            ProphetError::WithContext { error, .. } => error.category(),
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProphetError::Network(err) => err.is_retryable(),
            ProphetError::Api(ApiError::Transport(err)) => err.is_retryable(),
            ProphetError::WithContext { error, .. } => error.is_retryable(),
            other => other.category().is_retryable(),
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ProphetError::Network(err) => err.user_message(),
            ProphetError::Api(ApiError::Transport(err)) => err.user_message(),
            ProphetError::Api(err) => err.message(),
            ProphetError::Auth(err) => err.user_message(),
            ProphetError::Storage(err) => err.to_string(),
            ProphetError::Graph(err) => err.to_string(),
            ProphetError::Io(err) => err.to_string(),
            ProphetError::Config { message } | ProphetError::Usage { message } => message.clone(),
            ProphetError::WithContext { error, .. } => error.user_message(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ProphetError::Network(err) => err.error_code(),
            ProphetError::Api(err) => err.error_code(),
            ProphetError::Auth(err) => err.error_code(),
            ProphetError::Storage(err) => err.error_code(),
            ProphetError::Graph(_) => "E_GRAPH_INVALID",
            ProphetError::Io(_) => "E_SYS_IO",
            ProphetError::Config { .. } => "E_CONFIG",
            ProphetError::Usage { .. } => "E_USAGE",
            ProphetError::WithContext { error, .. } => error.error_code(),
        }
    }

    /// Attach context to this error.
    pub fn with_context(self, ctx: ErrorContext) -> Self {
        ProphetError::WithContext {
            error: Box::new(self),
            context: ctx,
        }
    }

    /// Get the context if this error has one attached.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            ProphetError::WithContext { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Get the inner error without context.
    pub fn inner(&self) -> &ProphetError {
        match self {
            ProphetError::WithContext { error, .. } => error.inner(),
            _ => self,
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }

    /// Check if this error requires logging in again.
    pub fn requires_reauth(&self) -> bool {
        match self {
            ProphetError::Auth(err) => err.requires_reauth(),
            ProphetError::Api(err) => err.is_unauthorized(),
            ProphetError::WithContext { error, .. } => error.requires_reauth(),
            _ => false,
        }
    }
}

impl fmt::Display for ProphetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProphetError::Network(err) => write!(f, "{}", err),
            ProphetError::Api(err) => write!(f, "{}", err),
            ProphetError::Auth(err) => write!(f, "{}", err),
            ProphetError::Storage(err) => write!(f, "{}", err),
            ProphetError::Graph(err) => write!(f, "{}", err),
            ProphetError::Io(err) => write!(f, "I/O error: {}", err),
            ProphetError::Config { message } => write!(f, "Configuration error: {}", message),
            ProphetError::Usage { message } => write!(f, "{}", message),
            ProphetError::WithContext { error, context } => {
                write!(f, "{} {}", context, error)
            }
        }
    }
}

impl std::error::Error for ProphetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProphetError::Network(err) => Some(err),
            ProphetError::Api(err) => Some(err),
            ProphetError::Auth(err) => Some(err),
            ProphetError::Storage(err) => Some(err),
            ProphetError::Graph(err) => Some(err),
            ProphetError::Io(err) => Some(err),
            ProphetError::Config { .. } | ProphetError::Usage { .. } => None,
            ProphetError::WithContext { error, .. } => error.source(),
        }
    }
}

// ============================================================================
// From implementations for automatic error conversion
// ============================================================================

impl From<NetworkError> for ProphetError {
    fn from(err: NetworkError) -> Self {
        ProphetError::Network(err)
    }
}

impl From<ApiError> for ProphetError {
    fn from(err: ApiError) -> Self {
        ProphetError::Api(err)
    }
}

impl From<AuthError> for ProphetError {
    fn from(err: AuthError) -> Self {
        ProphetError::Auth(err)
    }
}

impl From<StorageError> for ProphetError {
    fn from(err: StorageError) -> Self {
        ProphetError::Storage(err)
    }
}

impl From<GraphError> for ProphetError {
    fn from(err: GraphError) -> Self {
        ProphetError::Graph(err)
    }
}

impl From<std::io::Error> for ProphetError {
    fn from(err: std::io::Error) -> Self {
        ProphetError::Io(err)
    }
}

impl From<serde_json::Error> for ProphetError {
    fn from(err: serde_json::Error) -> Self {
        ProphetError::Usage {
            message: format!("invalid JSON: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_user_message_is_backend_message() {
        let err: ProphetError = ApiError::Application {
            status: 400,
            code: 400,
            message: "Tag already exists".to_string(),
        }
        .into();
        assert_eq!(err.user_message(), "Tag already exists");
        assert_eq!(err.category(), ErrorCategory::Client);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_transport_error_is_retryable() {
        let err: ProphetError = ApiError::Transport(NetworkError::ConnectionFailed {
            url: "http://localhost:5000/api/hosts".to_string(),
            message: "refused".to_string(),
        })
        .into();
        assert!(err.is_retryable());
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.error_code(), "E_NET_CONN");
    }

    #[test]
    fn test_with_context_keeps_behaviour() {
        let err: ProphetError = AuthError::NotLoggedIn.into();
        let with_ctx = err.with_context(ErrorContext::new("whoami"));
        assert!(with_ctx.requires_reauth());
        assert_eq!(with_ctx.category(), ErrorCategory::Auth);
        assert_eq!(with_ctx.to_string(), "[whoami] Not logged in");
    }

    #[test]
    fn test_unauthorized_api_error_requires_reauth() {
        let err: ProphetError = ApiError::Status {
            status: 401,
            message: "Unauthorized".to_string(),
        }
        .into();
        assert!(err.requires_reauth());
    }

    #[test]
    fn test_io_error_conversion() {
        let err: ProphetError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "graph.json").into();
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert_eq!(err.error_code(), "E_SYS_IO");
    }
}
