//! Shared error definitions for context collaborators.

use thiserror::Error;

/// Result alias for registration-context operations.
pub type ContextResult<T> = Result<T, ContextError>;

/// Opaque failure raised by a [`RegistrationContext`](crate::RegistrationContext)
/// implementation.
///
/// The adapter never inspects or recovers from these; they propagate unchanged
/// to whoever drove the scan.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ContextError(#[from] anyhow::Error);

impl ContextError {
    /// Wraps an arbitrary error raised by a context implementation.
    pub fn new<E>(source: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self(source.into())
    }

    /// Creates a context error from a plain message.
    #[must_use]
    pub fn message(text: impl Into<String>) -> Self {
        Self(anyhow::anyhow!("{}", text.into()))
    }
}
