//! Errors raised while constructing or queueing directives.

use thiserror::Error;

/// Result alias for directive construction and queueing.
pub type DirectiveResult<T> = Result<T, DirectiveError>;

/// Errors surfaced by the directive builder.
///
/// All of these are configuration errors in the fatal sense: they are raised
/// immediately at declaration time, never deferred to the scan.
#[derive(Debug, Error)]
pub enum DirectiveError {
    /// The directive path contained no tokens at all.
    #[error("directive path is empty")]
    EmptyPath,

    /// The path resolved a namespace but no directive name followed.
    #[error("directive path `{path}` is missing a directive name")]
    MissingDirectiveName {
        /// The offending path, dot-joined.
        path: String,
    },

    /// More than one token remained after the directive name.
    #[error("directive path `{path}` has unexpected tokens after `{name}`")]
    TrailingPathTokens {
        /// The offending path, dot-joined.
        path: String,
        /// The resolved directive name.
        name: String,
    },

    /// `as_decorator` was called on a directive without a trailing attribute.
    #[error("directive `{name}` carries no decorator attribute")]
    NotADecorator {
        /// The resolved directive name.
        name: String,
    },

    /// A decorator-form directive was queued or scoped directly.
    #[error(
        "directive `{name}` carries decorator attribute `{attribute}` and can only be applied to a decorated object"
    )]
    DecoratorPath {
        /// The resolved directive name.
        name: String,
        /// The trailing decorator attribute.
        attribute: String,
    },
}
