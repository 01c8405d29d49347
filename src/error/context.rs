//! Error context for enriched error information.

use chrono::{DateTime, Utc};

/// Where and when an error occurred.
///
/// Attached to a [`super::ProphetError`] by the CLI so that logs name the
/// command and the resource it was working on.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorContext {
    /// Human-readable description of the operation that failed.
    pub operation: String,

    /// Resource kind, e.g. `host` or `application`.
    pub resource: Option<String>,

    /// Identifier of the resource.
    pub resource_id: Option<String>,

    /// Timestamp when the error occurred.
    pub timestamp: DateTime<Utc>,
}

impl ErrorContext {
    /// Create a new ErrorContext for an operation.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            resource: None,
            resource_id: None,
            timestamp: Utc::now(),
        }
    }

    /// Name the resource the operation targeted.
    pub fn with_resource(mut self, kind: impl Into<String>, id: impl ToString) -> Self {
        self.resource = Some(kind.into());
        self.resource_id = Some(id.to_string());
        self
    }

    /// Get a formatted context string suitable for logging.
    pub fn to_log_string(&self) -> String {
        let mut parts = vec![format!("operation={}", self.operation)];

        if let Some(ref resource) = self.resource {
            parts.push(format!("resource={}", resource));
        }

        if let Some(ref id) = self.resource_id {
            parts.push(format!("resource_id={}", id));
        }

        parts.push(format!("timestamp={}", self.timestamp.to_rfc3339()));

        parts.join(" ")
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.operation)?;

        match (&self.resource, &self.resource_id) {
            (Some(kind), Some(id)) => write!(f, " {} {}", kind, id),
            (Some(kind), None) => write!(f, " {}", kind),
            _ => Ok(()),
        }
    }
}
