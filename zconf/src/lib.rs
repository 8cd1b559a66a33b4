//! Declarative-configuration adapter facade.
//!
//! Component registrations that would normally be written as markup
//! directives are declared in code instead, queued against their owning
//! module, and replayed into a registration context by an explicit scan.
//! This crate bundles the workspace members behind feature flags so
//! embedders can pull in only what they wire up.

#![warn(missing_docs, clippy::pedantic)]

/// Re-export shared primitives for convenience.
pub use zconf_primitives as primitives;

/// Deferred-attachment registry (enabled by the `registry` feature).
#[cfg(feature = "registry")]
pub use zconf_registry as registry;

/// Directive builder and deferred records (enabled by the `directive`
/// feature).
#[cfg(feature = "directive")]
pub use zconf_directive as directive;

/// Scan driver (enabled by the `scan` feature).
#[cfg(feature = "scan")]
pub use zconf_scan as scan;

/// Host-engine integrations (enabled by the `integrations` feature).
#[cfg(feature = "integrations")]
pub use zconf_integrations as integrations;
