//! Result type alias for prophet operations.

use super::context::ErrorContext;
use super::prophet_error::ProphetError;

/// Type alias for Results using ProphetError.
pub type ProphetResult<T> = Result<T, ProphetError>;

/// Extension trait for Result types to add context to errors.
pub trait ResultExt<T> {
    /// Add context to an error if the result is Err.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use prophet::error::{ErrorContext, ResultExt};
    ///
    /// let host = api.hosts().get(id).await
    ///     .context(ErrorContext::new("show host").with_resource("host", id))?;
    /// ```
    fn context(self, ctx: ErrorContext) -> ProphetResult<T>;

    /// Add context using a closure (only called on error).
    fn with_context<F>(self, f: F) -> ProphetResult<T>
    where
        F: FnOnce() -> ErrorContext;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<ProphetError>,
{
    fn context(self, ctx: ErrorContext) -> ProphetResult<T> {
        self.map_err(|e| e.into().with_context(ctx))
    }

    fn with_context<F>(self, f: F) -> ProphetResult<T>
    where
        F: FnOnce() -> ErrorContext,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}
