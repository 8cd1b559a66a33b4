//! Plugin auto-discovery shims.
//!
//! The host's plugin machinery aggregates configuration across independently
//! installed packages through two inclusion directives. The shims wrap those
//! directives so that, after their normal effect, the well-known markup file
//! names are retried with their annotation-source counterparts
//! (`meta.zcml → meta.py`, `configure.zcml → configure.py`,
//! `overrides.zcml → overrides.py`).

use std::sync::Arc;

use tracing::debug;
use zconf_primitives::{Module, RegistrationContext};
use zconf_scan::ScanResult;

use crate::processor::ANNOTATION_EXTENSION;

/// One of the plugin machinery's inclusion directives.
pub trait PluginInclude: Send + Sync {
    /// Includes the named file (or the directive's default) from every
    /// installed plugin of `package`.
    ///
    /// # Errors
    ///
    /// Implementation-defined; the shim propagates failures unchanged.
    fn include(
        &self,
        context: &mut dyn RegistrationContext,
        package: &Module,
        file: Option<&str>,
    ) -> ScanResult<()>;
}

/// Counterpart-aware wrapper around an inclusion directive.
pub struct PluginIncludeShim {
    inner: Arc<dyn PluginInclude>,
    known: &'static [&'static str],
    extension: String,
}

impl PluginIncludeShim {
    /// Shim for the regular inclusion directive (`meta.zcml`,
    /// `configure.zcml`).
    pub fn for_includes(inner: Arc<dyn PluginInclude>) -> Self {
        Self {
            inner,
            known: &["meta", "configure"],
            extension: ANNOTATION_EXTENSION.to_owned(),
        }
    }

    /// Shim for the overrides inclusion directive (`overrides.zcml`).
    pub fn for_overrides(inner: Arc<dyn PluginInclude>) -> Self {
        Self {
            inner,
            known: &["overrides"],
            extension: ANNOTATION_EXTENSION.to_owned(),
        }
    }

    /// Overrides the annotation-source extension.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    fn counterpart(&self, file: &str) -> Option<String> {
        let stem = file.strip_suffix(".zcml")?;
        self.known
            .contains(&stem)
            .then(|| format!("{stem}.{}", self.extension))
    }
}

impl PluginInclude for PluginIncludeShim {
    fn include(
        &self,
        context: &mut dyn RegistrationContext,
        package: &Module,
        file: Option<&str>,
    ) -> ScanResult<()> {
        self.inner.include(context, package, file)?;
        if let Some(counterpart) = file.and_then(|name| self.counterpart(name)) {
            debug!(package = %package, counterpart, "including annotation counterpart");
            self.inner.include(context, package, Some(&counterpart))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use zconf_primitives::{
        Arguments, ContextResult, DirectiveName, SourceInfo,
    };

    #[derive(Default)]
    struct RecordingInclude {
        files: Mutex<Vec<Option<String>>>,
    }

    impl PluginInclude for RecordingInclude {
        fn include(
            &self,
            _context: &mut dyn RegistrationContext,
            _package: &Module,
            file: Option<&str>,
        ) -> ScanResult<()> {
            self.files.lock().unwrap().push(file.map(str::to_owned));
            Ok(())
        }
    }

    #[derive(Default)]
    struct NullContext;

    impl RegistrationContext for NullContext {
        fn begin(
            &mut self,
            _directive: &DirectiveName,
            _arguments: &Arguments,
            _info: &SourceInfo,
        ) -> ContextResult<()> {
            Ok(())
        }

        fn end(&mut self) -> ContextResult<()> {
            Ok(())
        }

        fn process_file(&mut self, _path: &std::path::Path) -> ContextResult<bool> {
            Ok(true)
        }

        fn evaluate_condition(&mut self, _expression: &str, _testing: bool) -> ContextResult<bool> {
            Ok(true)
        }

        fn package(&self) -> Option<&Module> {
            None
        }

        fn i18n_domain(&self) -> Option<&str> {
            None
        }

        fn set_i18n_domain(&mut self, _domain: &str) {}

        fn info(&self) -> Option<&SourceInfo> {
            None
        }

        fn set_info(&mut self, _info: SourceInfo) {}
    }

    fn package() -> Module {
        Module::new("pkg", "/srv/pkg/__init__.py")
    }

    #[test]
    fn well_known_files_gain_a_counterpart() {
        let inner = Arc::new(RecordingInclude::default());
        let shim = PluginIncludeShim::for_includes(Arc::clone(&inner) as Arc<dyn PluginInclude>);
        let mut context = NullContext;

        shim.include(&mut context, &package(), Some("configure.zcml")).unwrap();
        shim.include(&mut context, &package(), Some("meta.zcml")).unwrap();

        let files = inner.files.lock().unwrap();
        assert_eq!(
            *files,
            vec![
                Some("configure.zcml".to_owned()),
                Some("configure.py".to_owned()),
                Some("meta.zcml".to_owned()),
                Some("meta.py".to_owned()),
            ]
        );
    }

    #[test]
    fn overrides_shim_only_knows_overrides() {
        let inner = Arc::new(RecordingInclude::default());
        let shim = PluginIncludeShim::for_overrides(Arc::clone(&inner) as Arc<dyn PluginInclude>);
        let mut context = NullContext;

        shim.include(&mut context, &package(), Some("overrides.zcml")).unwrap();
        shim.include(&mut context, &package(), Some("configure.zcml")).unwrap();

        let files = inner.files.lock().unwrap();
        assert_eq!(
            *files,
            vec![
                Some("overrides.zcml".to_owned()),
                Some("overrides.py".to_owned()),
                Some("configure.zcml".to_owned()),
            ]
        );
    }

    #[test]
    fn unnamed_and_unknown_files_pass_through_once() {
        let inner = Arc::new(RecordingInclude::default());
        let shim = PluginIncludeShim::for_includes(Arc::clone(&inner) as Arc<dyn PluginInclude>);
        let mut context = NullContext;

        shim.include(&mut context, &package(), None).unwrap();
        shim.include(&mut context, &package(), Some("custom.zcml")).unwrap();

        let files = inner.files.lock().unwrap();
        assert_eq!(*files, vec![None, Some("custom.zcml".to_owned())]);
    }

    #[test]
    fn custom_extension_is_honored() {
        let inner = Arc::new(RecordingInclude::default());
        let shim = PluginIncludeShim::for_includes(Arc::clone(&inner) as Arc<dyn PluginInclude>)
            .with_extension("rs");
        let mut context = NullContext;

        shim.include(&mut context, &package(), Some("configure.zcml")).unwrap();
        let files = inner.files.lock().unwrap();
        assert_eq!(files[1], Some("configure.rs".to_owned()));
    }
}
