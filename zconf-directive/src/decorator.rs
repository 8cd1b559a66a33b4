//! Decorator-variant directives.
//!
//! A directive path ending in a callable attribute (e.g.
//! `zope.adapter.factory`) is not queued by itself; it is realized by
//! applying it to a decorated object. The deferred callback folds the
//! object's dotted identifier into the arguments under the trailing
//! attribute, then begins and ends the directive. Decorator directives are
//! never block-scoped.

use tracing::debug;
use zconf_primitives::{Arguments, DirectiveName, Module, SourceInfo};
use zconf_registry::{Aspect, AttachmentRegistry};

/// The object a decorator directive was applied to.
#[derive(Debug, Clone)]
pub struct DecoratedTarget {
    module: Module,
    name: String,
}

impl DecoratedTarget {
    /// Identifies a decorated object by its defining module and registered
    /// name.
    pub fn new(module: Module, name: impl Into<String>) -> Self {
        Self {
            module,
            name: name.into(),
        }
    }

    /// Returns the defining module.
    #[must_use]
    pub fn module(&self) -> &Module {
        &self.module
    }

    /// Returns the registered name of the object.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A directive awaiting application to decorated objects.
#[derive(Debug, Clone)]
pub struct DecoratorDirective {
    directive: DirectiveName,
    arguments: Arguments,
    condition: Option<String>,
    attribute: String,
    info: SourceInfo,
}

impl DecoratorDirective {
    pub(crate) fn from_parts(
        directive: DirectiveName,
        arguments: Arguments,
        condition: Option<String>,
        attribute: String,
        info: SourceInfo,
    ) -> Self {
        Self {
            directive,
            arguments,
            condition,
            attribute,
            info,
        }
    }

    /// Returns the resolved directive identity.
    #[must_use]
    pub fn directive(&self) -> &DirectiveName {
        &self.directive
    }

    /// Returns the attribute the target's identifier will be stored under.
    #[must_use]
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Queues this directive against `target`, deferred until the target's
    /// defining module is scanned.
    ///
    /// The callback evaluates the condition first; on false, the identifier
    /// computation is skipped along with `begin`/`end`.
    pub fn apply(&self, registry: &AttachmentRegistry, target: &DecoratedTarget) {
        let directive = self.directive.clone();
        let arguments = self.arguments.clone();
        let condition = self.condition.clone();
        let attribute = self.attribute.clone();
        let info = self.info.clone();
        let target = target.clone();
        let module_key = target.module().name().to_owned();

        registry.attach(
            &module_key,
            Aspect::Decorated,
            Box::new(move |scanner| {
                if let Some(expression) = &condition {
                    if !scanner.evaluate_condition(expression)? {
                        debug!(directive = %directive, expression, "condition false, decorator skipped");
                        return Ok(());
                    }
                }
                let identifier = target.module().member(target.name());
                let mut arguments = arguments;
                arguments.insert(attribute, identifier);
                scanner.context().begin(&directive, &arguments, &info)?;
                scanner.context().end()
            }),
        );
    }
}
