//! Error category classification for unified error handling.
//!
//! Categories drive what the CLI tells the user to do next: retry, sign in
//! again, fix input, or fix configuration.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Backend unreachable, connection reset, timeout.
    Network,

    /// Missing, invalid or expired session.
    Auth,

    /// Backend failed to process a valid request (5xx, malformed response).
    Server,

    /// The request was rejected as invalid (4xx other than auth).
    Client,

    /// Local data failed a consistency check before sending.
    Validation,

    /// Local persistence (token and preference file) failed.
    Storage,

    /// Bad base URL, missing home directory, unusable settings.
    Configuration,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::Validation => "validation",
            ErrorCategory::Storage => "storage",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Returns a user-friendly description of the category.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Network connectivity issue",
            ErrorCategory::Auth => "Authentication problem",
            ErrorCategory::Server => "Server-side issue",
            ErrorCategory::Client => "Request rejected",
            ErrorCategory::Validation => "Invalid data",
            ErrorCategory::Storage => "Local storage problem",
            ErrorCategory::Configuration => "Configuration problem",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check that the prophet backend is reachable and try again",
            ErrorCategory::Auth => "Run `prophet login` to sign in again",
            ErrorCategory::Server => "The server may be experiencing issues. Please try again later",
            ErrorCategory::Client => "Check the command arguments and try again",
            ErrorCategory::Validation => "Fix the reported problems and try again",
            ErrorCategory::Storage => "Check permissions on the prophet data directory",
            ErrorCategory::Configuration => "Check PROPHET_API_URL and PROPHET_HOME",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_retryable() {
        assert!(ErrorCategory::Network.is_retryable());
        assert!(ErrorCategory::Server.is_retryable());
        assert!(!ErrorCategory::Auth.is_retryable());
        assert!(!ErrorCategory::Client.is_retryable());
        assert!(!ErrorCategory::Validation.is_retryable());
        assert!(!ErrorCategory::Storage.is_retryable());
        assert!(!ErrorCategory::Configuration.is_retryable());
    }

    #[test]
    fn test_category_display() {
        assert_eq!(format!("{}", ErrorCategory::Network), "network");
        assert_eq!(format!("{}", ErrorCategory::Validation), "validation");
    }

    #[test]
    fn test_category_recovery_hint() {
        assert!(ErrorCategory::Auth.recovery_hint().contains("prophet login"));
        assert!(ErrorCategory::Configuration
            .recovery_hint()
            .contains("PROPHET_API_URL"));
    }
}
