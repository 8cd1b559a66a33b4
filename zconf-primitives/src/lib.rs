//! Core shared types for the zconf declarative-configuration adapter.
//!
//! This crate holds the value objects that the rest of the workspace passes
//! around: directive names, normalized argument maps, module tokens, source
//! locations, and the [`RegistrationContext`] seam through which directives
//! are ultimately applied.

#![warn(missing_docs, clippy::pedantic)]

mod context;
mod error;
mod location;
mod module;
mod tables;
mod value;

/// Registration-context seam and the scanner handed to deferred callbacks.
pub use context::{RegistrationContext, Scanner};
/// Opaque error raised by registration-context implementations.
pub use error::{ContextError, ContextResult};
/// Call-site location with lazy diagnostic widening.
pub use location::SourceInfo;
/// Explicit module token passed by callers to every declaration entry point.
pub use module::Module;
/// Fixed namespace and argument alias tables.
pub use tables::{DEFAULT_NAMESPACE, canonical_argument, namespace_uri};
/// Caller-facing values, the identifier resolver, and normalized arguments.
pub use value::{Arguments, DirectiveName, Value, resolve_identifier};
