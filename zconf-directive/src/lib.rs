//! Deferred directive records.
//!
//! A declaration builds a [`DirectiveHandle`] that knows its resolved
//! namespace and name, its normalized arguments, and its call site. Queueing
//! the handle attaches a callback to the attachment registry under the
//! caller's module; nothing touches the registration context until that
//! module is scanned.

#![warn(missing_docs, clippy::pedantic)]

mod builder;
mod decorator;
mod error;
mod record;
mod scope;
mod shortcuts;

/// Directive declaration entry point and builder.
pub use builder::{DirectiveBuilder, configure};
/// Decorator-variant directive and the object it is applied to.
pub use decorator::{DecoratedTarget, DecoratorDirective};
/// Construction and usage errors.
pub use error::{DirectiveError, DirectiveResult};
/// A fully constructed directive awaiting queueing.
pub use record::DirectiveHandle;
/// Open block-scoped directive.
pub use scope::DirectiveScope;
/// Prebuilt decorator directives for common registrations.
pub use shortcuts::{adapter_config, directive_config, page_config, subscriber_config};
