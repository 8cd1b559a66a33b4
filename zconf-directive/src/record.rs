//! The deferred directive record and its leaf queueing behavior.

use tracing::debug;
use zconf_primitives::{Arguments, DirectiveName, Module, SourceInfo};
use zconf_registry::{Aspect, AttachmentRegistry};

use crate::decorator::DecoratorDirective;
use crate::error::{DirectiveError, DirectiveResult};
use crate::scope::DirectiveScope;

/// A fully constructed directive: resolved identity, normalized arguments,
/// optional condition, optional decorator attribute, and its call site.
///
/// Immutable once built. Queueing moves the record into a callback on the
/// attachment registry; it is applied against a registration context exactly
/// once, when its owning module is scanned.
#[derive(Debug, Clone)]
pub struct DirectiveHandle {
    directive: DirectiveName,
    arguments: Arguments,
    condition: Option<String>,
    decorator_attribute: Option<String>,
    info: SourceInfo,
}

impl DirectiveHandle {
    pub(crate) fn from_parts(
        directive: DirectiveName,
        arguments: Arguments,
        condition: Option<String>,
        decorator_attribute: Option<String>,
        info: SourceInfo,
    ) -> Self {
        Self {
            directive,
            arguments,
            condition,
            decorator_attribute,
            info,
        }
    }

    /// Returns the resolved directive identity.
    #[must_use]
    pub fn directive(&self) -> &DirectiveName {
        &self.directive
    }

    /// Returns the normalized arguments.
    #[must_use]
    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    /// Returns the `condition` expression, if one was supplied.
    #[must_use]
    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }

    /// Returns the trailing decorator attribute, if the path carried one.
    #[must_use]
    pub fn decorator_attribute(&self) -> Option<&str> {
        self.decorator_attribute.as_deref()
    }

    /// Returns the captured call site.
    #[must_use]
    pub fn info(&self) -> &SourceInfo {
        &self.info
    }

    fn reject_decorator_form(&self) -> DirectiveResult<()> {
        if let Some(attribute) = &self.decorator_attribute {
            return Err(DirectiveError::DecoratorPath {
                name: self.directive.name().to_owned(),
                attribute: attribute.clone(),
            });
        }
        Ok(())
    }

    /// Queues this record as a leaf directive under `module`.
    ///
    /// The deferred callback evaluates the condition (skipping everything on
    /// false), seeds the context's diagnostic info if unset, then calls
    /// `begin` and `end` back to back.
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError::DecoratorPath`] when the path carried a
    /// decorator attribute.
    pub fn queue(self, registry: &AttachmentRegistry, module: &Module) -> DirectiveResult<()> {
        self.reject_decorator_form()?;
        self.attach(registry, module, true);
        Ok(())
    }

    /// Queues this record as the opening of a block scope under `module`.
    ///
    /// The deferred callback calls `begin` only; the matching `end` is queued
    /// by [`DirectiveScope::end`] at block exit, after any directives declared
    /// inside the scope.
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError::DecoratorPath`] when the path carried a
    /// decorator attribute.
    pub fn begin_scope(
        self,
        registry: &AttachmentRegistry,
        module: &Module,
    ) -> DirectiveResult<DirectiveScope> {
        self.reject_decorator_form()?;
        let namespace = self.directive.namespace().to_owned();
        self.attach(registry, module, false);
        Ok(DirectiveScope::new(namespace))
    }

    /// Converts this record into its decorator variant.
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError::NotADecorator`] when the path carried no
    /// trailing attribute.
    pub fn as_decorator(self) -> DirectiveResult<DecoratorDirective> {
        let Self {
            directive,
            arguments,
            condition,
            decorator_attribute,
            info,
        } = self;
        let Some(attribute) = decorator_attribute else {
            return Err(DirectiveError::NotADecorator {
                name: directive.name().to_owned(),
            });
        };
        Ok(DecoratorDirective::from_parts(
            directive, arguments, condition, attribute, info,
        ))
    }

    fn attach(self, registry: &AttachmentRegistry, module: &Module, end_after_begin: bool) {
        let Self {
            directive,
            arguments,
            condition,
            info,
            ..
        } = self;
        registry.attach(
            module.name(),
            Aspect::ModuleLevel,
            Box::new(move |scanner| {
                if let Some(expression) = &condition {
                    if !scanner.evaluate_condition(expression)? {
                        debug!(directive = %directive, expression, "condition false, directive skipped");
                        return Ok(());
                    }
                }
                if scanner.context().info().is_none() {
                    scanner.context().set_info(info.clone());
                }
                scanner.context().begin(&directive, &arguments, &info)?;
                if end_after_begin {
                    scanner.context().end()?;
                }
                Ok(())
            }),
        );
    }
}
