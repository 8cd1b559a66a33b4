//! The registration-context seam.
//!
//! The context is the external configuration engine's mutable state. This
//! adapter only ever calls into it for the duration of a scan; it never owns
//! one.

use std::path::Path;

use crate::error::ContextResult;
use crate::location::SourceInfo;
use crate::module::Module;
use crate::value::{Arguments, DirectiveName};

/// Interface of the external directive-processing engine.
///
/// Implementations track the package being configured, the translation
/// domain, a file-processed-once guard, and the begin/end directive stack.
/// Errors raised here propagate unchanged to the caller of a scan.
pub trait RegistrationContext {
    /// Opens a directive with its arguments and source location.
    fn begin(
        &mut self,
        directive: &DirectiveName,
        arguments: &Arguments,
        info: &SourceInfo,
    ) -> ContextResult<()>;

    /// Closes the most recently opened directive.
    fn end(&mut self) -> ContextResult<()>;

    /// Guards against double processing; returns `true` when the file has not
    /// been seen before.
    fn process_file(&mut self, path: &Path) -> ContextResult<bool>;

    /// Evaluates a directive `condition` expression.
    fn evaluate_condition(&mut self, expression: &str, testing: bool) -> ContextResult<bool>;

    /// Returns the package under configuration, when one is set.
    fn package(&self) -> Option<&Module>;

    /// Returns the current translation domain, when one is set.
    fn i18n_domain(&self) -> Option<&str>;

    /// Sets the translation domain.
    fn set_i18n_domain(&mut self, domain: &str);

    /// Returns the diagnostic location of the directive being processed.
    fn info(&self) -> Option<&SourceInfo>;

    /// Seeds the diagnostic location for subsequent error messages.
    fn set_info(&mut self, info: SourceInfo);
}

/// Borrowed view handed to every deferred callback during a scan.
pub struct Scanner<'a> {
    context: &'a mut (dyn RegistrationContext + 'a),
    testing: bool,
}

impl<'a> Scanner<'a> {
    /// Wraps a registration context for one scan pass.
    pub fn new(context: &'a mut (dyn RegistrationContext + 'a), testing: bool) -> Self {
        Self { context, testing }
    }

    /// Returns the registration context being scanned into.
    pub fn context(&mut self) -> &mut (dyn RegistrationContext + 'a) {
        self.context
    }

    /// Returns whether this scan runs in testing mode.
    #[must_use]
    pub fn testing(&self) -> bool {
        self.testing
    }

    /// Evaluates a `condition` expression against the context, forwarding the
    /// scan's testing flag.
    pub fn evaluate_condition(&mut self, expression: &str) -> ContextResult<bool> {
        let testing = self.testing;
        self.context.evaluate_condition(expression, testing)
    }
}
