//! Block-scoped (nested) directives.
//!
//! Entering a scope queues the directive's `begin`; directives declared while
//! the scope is open become its children; closing the scope queues the
//! matching `end`. Attach order guarantees the engine sees
//! `begin(outer), begin(child)…, end(child)…, end(outer)`.
//!
//! The scope is closed explicitly and by value. An error path that drops the
//! scope without calling [`DirectiveScope::end`] queues no `end`; an aborted
//! block leaves its directive unclosed rather than half-applied.

use zconf_primitives::Module;
use zconf_registry::{Aspect, AttachmentRegistry};

use crate::builder::DirectiveBuilder;

/// An open block-scoped directive.
#[derive(Debug)]
pub struct DirectiveScope {
    namespace: String,
}

impl DirectiveScope {
    pub(crate) fn new(namespace: String) -> Self {
        Self { namespace }
    }

    /// Returns the namespace URI the scope was opened under.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Starts a child declaration sharing this scope's namespace.
    ///
    /// The scope's namespace URI is prepended as an explicit first token, so
    /// the child path needs only the directive name (and optional decorator
    /// attribute).
    #[must_use]
    #[track_caller]
    pub fn nested<I, S>(&self, path: I) -> DirectiveBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let full: Vec<String> = std::iter::once(self.namespace.clone())
            .chain(path.into_iter().map(Into::into))
            .collect();
        DirectiveBuilder::new(full)
    }

    /// Closes the scope, queueing the directive's `end` under `module`.
    pub fn end(self, registry: &AttachmentRegistry, module: &Module) {
        registry.attach(
            module.name(),
            Aspect::ModuleLevel,
            Box::new(move |scanner| scanner.context().end()),
        );
    }
}
