//! Explicit directive builder.
//!
//! The path works like its markup counterpart: an optional leading namespace
//! token (short alias or explicit `http…` URI), a mandatory directive name,
//! and an optional trailing attribute that turns the directive into a
//! decorator.

use zconf_primitives::{
    Arguments, DEFAULT_NAMESPACE, DirectiveName, Module, SourceInfo, Value, canonical_argument,
    namespace_uri,
};
use zconf_registry::AttachmentRegistry;

use crate::decorator::DecoratorDirective;
use crate::error::{DirectiveError, DirectiveResult};
use crate::record::DirectiveHandle;
use crate::scope::DirectiveScope;

/// Starts a directive declaration, capturing the caller's source location.
///
/// An empty path declares the root `zope:configure` grouping directive.
#[must_use]
#[track_caller]
pub fn configure<I, S>(path: I) -> DirectiveBuilder
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    DirectiveBuilder::new(path)
}

/// Collects a directive path and raw arguments before resolution.
#[derive(Debug)]
pub struct DirectiveBuilder {
    path: Vec<String>,
    arguments: Vec<(String, Value)>,
    info: SourceInfo,
}

impl DirectiveBuilder {
    /// Creates a builder for the given path, capturing the caller's location.
    #[must_use]
    #[track_caller]
    pub fn new<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut path: Vec<String> = path.into_iter().map(Into::into).collect();
        if path.is_empty() {
            // Bare `configure()` means the root grouping directive.
            path = vec!["zope".to_owned(), "configure".to_owned()];
        }
        Self {
            path,
            arguments: Vec::new(),
            info: SourceInfo::capture(),
        }
    }

    /// Adds a raw argument. Aliases and sequence values are normalized when
    /// the directive is built.
    #[must_use]
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.push((name.into(), value.into()));
        self
    }

    /// Overrides the captured source location.
    #[must_use]
    pub fn at(mut self, info: SourceInfo) -> Self {
        self.info = info;
        self
    }

    /// Resolves the path and arguments into a [`DirectiveHandle`].
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError::MissingDirectiveName`] when no name follows
    /// the namespace, and [`DirectiveError::TrailingPathTokens`] when more
    /// than one token trails it.
    pub fn build(self) -> DirectiveResult<DirectiveHandle> {
        let Self {
            mut path,
            arguments,
            info,
        } = self;
        if path.is_empty() {
            return Err(DirectiveError::EmptyPath);
        }
        let joined = path.join(".");

        // Collapse alias tokens in the path itself (e.g. a `klass` decorator
        // attribute becomes `class`).
        for token in &mut path {
            let canonical = canonical_argument(token);
            if canonical != token.as_str() {
                *token = canonical.to_owned();
            }
        }

        let namespace = if let Some(uri) = namespace_uri(&path[0]) {
            path.remove(0);
            uri.to_owned()
        } else if path[0].starts_with("http") {
            path.remove(0)
        } else {
            DEFAULT_NAMESPACE.to_owned()
        };

        if path.is_empty() {
            return Err(DirectiveError::MissingDirectiveName { path: joined });
        }
        let name = path.remove(0);

        let decorator_attribute = if path.is_empty() {
            None
        } else if path.len() == 1 {
            Some(path.remove(0))
        } else {
            return Err(DirectiveError::TrailingPathTokens { path: joined, name });
        };

        let mut arguments = Arguments::normalize(arguments);
        let condition = arguments.remove("condition");

        Ok(DirectiveHandle::from_parts(
            DirectiveName::new(namespace, name),
            arguments,
            condition,
            decorator_attribute,
            info,
        ))
    }

    /// Builds and queues a leaf directive under `module` in one step.
    ///
    /// # Errors
    ///
    /// Propagates construction errors and rejects decorator-form paths.
    pub fn queue(self, registry: &AttachmentRegistry, module: &Module) -> DirectiveResult<()> {
        self.build()?.queue(registry, module)
    }

    /// Builds the directive and opens it as a block scope under `module`.
    ///
    /// # Errors
    ///
    /// Propagates construction errors and rejects decorator-form paths.
    pub fn begin_scope(
        self,
        registry: &AttachmentRegistry,
        module: &Module,
    ) -> DirectiveResult<DirectiveScope> {
        self.build()?.begin_scope(registry, module)
    }

    /// Builds the directive as a decorator.
    ///
    /// # Errors
    ///
    /// Propagates construction errors; fails with
    /// [`DirectiveError::NotADecorator`] when the path has no trailing
    /// attribute.
    pub fn as_decorator(self) -> DirectiveResult<DecoratorDirective> {
        self.build()?.as_decorator()
    }
}
