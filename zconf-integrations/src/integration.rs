//! The composition root.
//!
//! Instead of patching the host in place, the root owns the host's original
//! entry points and hands out either the originals or the annotation-aware
//! wrappers depending on its enabled state. Intended for single-threaded
//! start-up wiring; concurrent toggling is not a supported scenario.

use std::sync::Arc;

use tracing::info;
use zconf_scan::ScanDriver;

use crate::plugins::{PluginInclude, PluginIncludeShim};
use crate::processor::{ANNOTATION_EXTENSION, AnnotationRouter, FileProcessor};

/// The plugin machinery's two inclusion directives, as wired in by the
/// embedder when the plugin package is installed.
#[derive(Clone)]
pub struct PluginDirectives {
    /// The regular inclusion directive.
    pub includes: Arc<dyn PluginInclude>,
    /// The overrides inclusion directive.
    pub overrides: Arc<dyn PluginInclude>,
}

/// Wires the host engine's entry points with or without annotation support.
pub struct Integration {
    markup: Arc<dyn FileProcessor>,
    driver: ScanDriver,
    plugins: Option<PluginDirectives>,
    extension: String,
    router: Option<Arc<AnnotationRouter>>,
    shimmed: Option<PluginDirectives>,
}

impl Integration {
    /// Creates a disabled root over the host's original file processor.
    pub fn new(markup: Arc<dyn FileProcessor>, driver: ScanDriver) -> Self {
        Self {
            markup,
            driver,
            plugins: None,
            extension: ANNOTATION_EXTENSION.to_owned(),
            router: None,
            shimmed: None,
        }
    }

    /// Wires in the plugin inclusion directives. Absent directives mean the
    /// plugin package is not installed and nothing will be shimmed.
    #[must_use]
    pub fn with_plugins(mut self, plugins: PluginDirectives) -> Self {
        self.plugins = Some(plugins);
        self
    }

    /// Overrides the annotation-source extension.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Returns whether annotation support is currently wired in.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.router.is_some()
    }

    /// Installs the annotation-aware wrappers. Idempotent.
    pub fn enable(&mut self) {
        if self.is_enabled() {
            return;
        }
        info!(extension = self.extension, "enabling annotation configuration");
        self.router = Some(Arc::new(
            AnnotationRouter::new(Arc::clone(&self.markup), self.driver.clone())
                .with_extension(self.extension.clone()),
        ));
        self.shimmed = self.plugins.as_ref().map(|plugins| PluginDirectives {
            includes: Arc::new(
                PluginIncludeShim::for_includes(Arc::clone(&plugins.includes))
                    .with_extension(self.extension.clone()),
            ),
            overrides: Arc::new(
                PluginIncludeShim::for_overrides(Arc::clone(&plugins.overrides))
                    .with_extension(self.extension.clone()),
            ),
        });
    }

    /// Restores the original entry points. Idempotent.
    pub fn disable(&mut self) {
        if !self.is_enabled() {
            return;
        }
        info!("disabling annotation configuration");
        self.router = None;
        self.shimmed = None;
    }

    /// Returns the file processor to use: the router when enabled, otherwise
    /// the original (identity-equal to the reference handed to [`new`]).
    ///
    /// [`new`]: Integration::new
    #[must_use]
    pub fn processor(&self) -> Arc<dyn FileProcessor> {
        match &self.router {
            Some(router) => Arc::clone(router) as Arc<dyn FileProcessor>,
            None => Arc::clone(&self.markup),
        }
    }

    /// Returns the regular inclusion directive to use, when wired in.
    #[must_use]
    pub fn plugin_includes(&self) -> Option<Arc<dyn PluginInclude>> {
        match (&self.shimmed, &self.plugins) {
            (Some(shimmed), _) => Some(Arc::clone(&shimmed.includes)),
            (None, Some(plugins)) => Some(Arc::clone(&plugins.includes)),
            (None, None) => None,
        }
    }

    /// Returns the overrides inclusion directive to use, when wired in.
    #[must_use]
    pub fn plugin_overrides(&self) -> Option<Arc<dyn PluginInclude>> {
        match (&self.shimmed, &self.plugins) {
            (Some(shimmed), _) => Some(Arc::clone(&shimmed.overrides)),
            (None, Some(plugins)) => Some(Arc::clone(&plugins.overrides)),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    use zconf_directive::configure;
    use zconf_primitives::{
        Arguments, ContextResult, DirectiveName, Module, RegistrationContext, SourceInfo,
    };
    use zconf_registry::AttachmentRegistry;
    use zconf_scan::{ScanResult, StaticResolver};

    struct MarkupRecorder {
        files: Mutex<Vec<PathBuf>>,
    }

    impl MarkupRecorder {
        fn new() -> Self {
            Self {
                files: Mutex::new(Vec::new()),
            }
        }
    }

    impl FileProcessor for MarkupRecorder {
        fn process_file(
            &self,
            path: &Path,
            _context: &mut dyn RegistrationContext,
            _testing: bool,
        ) -> ScanResult<()> {
            self.files.lock().unwrap().push(path.to_path_buf());
            Ok(())
        }
    }

    #[derive(Default)]
    struct EngineContext {
        begins: Vec<String>,
        package: Option<Module>,
        i18n_domain: Option<String>,
        info: Option<SourceInfo>,
        processed: HashSet<PathBuf>,
    }

    impl RegistrationContext for EngineContext {
        fn begin(
            &mut self,
            directive: &DirectiveName,
            _arguments: &Arguments,
            _info: &SourceInfo,
        ) -> ContextResult<()> {
            self.begins.push(directive.name().to_owned());
            Ok(())
        }

        fn end(&mut self) -> ContextResult<()> {
            Ok(())
        }

        fn process_file(&mut self, path: &Path) -> ContextResult<bool> {
            Ok(self.processed.insert(path.to_path_buf()))
        }

        fn evaluate_condition(&mut self, _expression: &str, _testing: bool) -> ContextResult<bool> {
            Ok(true)
        }

        fn package(&self) -> Option<&Module> {
            self.package.as_ref()
        }

        fn i18n_domain(&self) -> Option<&str> {
            self.i18n_domain.as_deref()
        }

        fn set_i18n_domain(&mut self, domain: &str) {
            self.i18n_domain = Some(domain.to_owned());
        }

        fn info(&self) -> Option<&SourceInfo> {
            self.info.as_ref()
        }

        fn set_info(&mut self, info: SourceInfo) {
            self.info = Some(info);
        }
    }

    fn driver() -> ScanDriver {
        let resolver = StaticResolver::new();
        resolver.insert(Module::new("pkg.configure", "/srv/pkg/configure.py"));
        ScanDriver::new(
            std::sync::Arc::new(AttachmentRegistry::new()),
            Arc::new(resolver),
        )
    }

    #[test]
    fn disable_restores_the_original_processor() {
        let markup: Arc<dyn FileProcessor> = Arc::new(MarkupRecorder::new());
        let mut integration = Integration::new(Arc::clone(&markup), driver());

        integration.enable();
        assert!(!Arc::ptr_eq(&integration.processor(), &markup));

        integration.disable();
        assert!(Arc::ptr_eq(&integration.processor(), &markup));
    }

    #[test]
    fn toggling_is_idempotent() {
        let markup: Arc<dyn FileProcessor> = Arc::new(MarkupRecorder::new());
        let mut integration = Integration::new(Arc::clone(&markup), driver());

        integration.enable();
        let router = integration.processor();
        integration.enable();
        assert!(Arc::ptr_eq(&integration.processor(), &router));

        integration.disable();
        integration.disable();
        assert!(Arc::ptr_eq(&integration.processor(), &markup));
    }

    #[test]
    fn router_scans_annotation_sources() {
        let markup = Arc::new(MarkupRecorder::new());
        let driver = driver();
        configure(["zope", "utility"])
            .queue(
                driver.registry(),
                &Module::new("pkg.configure", "/srv/pkg/configure.py"),
            )
            .unwrap();

        let mut integration =
            Integration::new(Arc::clone(&markup) as Arc<dyn FileProcessor>, driver);
        integration.enable();

        let mut context = EngineContext {
            package: Some(Module::new("pkg", "/srv/pkg/__init__.py")),
            ..EngineContext::default()
        };
        integration
            .processor()
            .process_file(Path::new("/srv/pkg/configure.py"), &mut context, false)
            .unwrap();

        assert_eq!(context.begins, ["utility"]);
        assert!(markup.files.lock().unwrap().is_empty());
    }

    #[test]
    fn router_delegates_markup_files() {
        let markup = Arc::new(MarkupRecorder::new());
        let mut integration =
            Integration::new(Arc::clone(&markup) as Arc<dyn FileProcessor>, driver());
        integration.enable();

        let mut context = EngineContext::default();
        integration
            .processor()
            .process_file(Path::new("/srv/pkg/configure.zcml"), &mut context, false)
            .unwrap();

        assert!(context.begins.is_empty());
        assert_eq!(
            *markup.files.lock().unwrap(),
            vec![PathBuf::from("/srv/pkg/configure.zcml")]
        );
    }

    #[test]
    fn plugins_are_shimmed_only_while_enabled() {
        struct NullInclude;
        impl PluginInclude for NullInclude {
            fn include(
                &self,
                _context: &mut dyn RegistrationContext,
                _package: &Module,
                _file: Option<&str>,
            ) -> ScanResult<()> {
                Ok(())
            }
        }

        let includes: Arc<dyn PluginInclude> = Arc::new(NullInclude);
        let overrides: Arc<dyn PluginInclude> = Arc::new(NullInclude);
        let mut integration = Integration::new(Arc::new(MarkupRecorder::new()), driver())
            .with_plugins(PluginDirectives {
                includes: Arc::clone(&includes),
                overrides: Arc::clone(&overrides),
            });

        assert!(Arc::ptr_eq(
            &integration.plugin_includes().unwrap(),
            &includes
        ));

        integration.enable();
        assert!(!Arc::ptr_eq(
            &integration.plugin_includes().unwrap(),
            &includes
        ));
        assert!(!Arc::ptr_eq(
            &integration.plugin_overrides().unwrap(),
            &overrides
        ));

        integration.disable();
        assert!(Arc::ptr_eq(
            &integration.plugin_overrides().unwrap(),
            &overrides
        ));
    }

    #[test]
    fn absent_plugins_stay_absent() {
        let mut integration = Integration::new(Arc::new(MarkupRecorder::new()), driver());
        integration.enable();
        assert!(integration.plugin_includes().is_none());
        assert!(integration.plugin_overrides().is_none());
    }
}
