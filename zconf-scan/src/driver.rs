//! The scan driver.

use std::ffi::OsStr;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;
use zconf_primitives::{ContextError, Module, RegistrationContext, Scanner};
use zconf_registry::{Aspect, AttachmentRegistry};

use crate::error::{ScanError, ScanResult};
use crate::resolver::ModuleResolver;

/// What a scan is asked to process.
#[derive(Debug, Clone)]
pub enum ScanTarget {
    /// A module token, used directly.
    Module(Module),
    /// A file belonging to the configured package; its stem is resolved as
    /// `<package>.<stem>`.
    File(PathBuf),
}

impl From<Module> for ScanTarget {
    fn from(module: Module) -> Self {
        Self::Module(module)
    }
}

impl From<PathBuf> for ScanTarget {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

/// Flags controlling a scan pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    /// Forwarded to condition evaluation on the context.
    pub testing: bool,
    /// Skips the processed-once guard when set.
    pub force: bool,
}

impl ScanOptions {
    /// Options with the processed-once guard disabled.
    #[must_use]
    pub fn forced() -> Self {
        Self {
            testing: false,
            force: true,
        }
    }
}

/// Drains deferred directive attachments for a module into a registration
/// context.
#[derive(Clone)]
pub struct ScanDriver {
    registry: Arc<AttachmentRegistry>,
    resolver: Arc<dyn ModuleResolver>,
}

impl std::fmt::Debug for ScanDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanDriver")
            .field("registry", &self.registry)
            .field("resolver", &"dyn ModuleResolver")
            .finish()
    }
}

impl ScanDriver {
    /// Creates a driver over the given registry and module resolver.
    pub fn new(registry: Arc<AttachmentRegistry>, resolver: Arc<dyn ModuleResolver>) -> Self {
        Self { registry, resolver }
    }

    /// Returns the attachment registry this driver drains.
    #[must_use]
    pub fn registry(&self) -> &Arc<AttachmentRegistry> {
        &self.registry
    }

    /// Scans a module (or a file of the configured package) into `context`.
    ///
    /// Defaults the context's i18n domain to the package name when unset,
    /// honors the processed-once guard unless `options.force`, rejects
    /// modules outside the package directory, then drains module-level and
    /// decorated attachments in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::PackageRequired`] or [`ScanError::ModuleNotFound`]
    /// for unresolvable file targets, [`ScanError::CrossPackage`] for a
    /// directory mismatch, and propagates context failures unchanged.
    pub fn scan(
        &self,
        target: ScanTarget,
        context: &mut dyn RegistrationContext,
        options: ScanOptions,
    ) -> ScanResult<()> {
        let module = match target {
            ScanTarget::Module(module) => module,
            ScanTarget::File(path) => {
                let Some(package) = context.package() else {
                    return Err(ScanError::PackageRequired { file: path });
                };
                let stem = path
                    .file_stem()
                    .and_then(OsStr::to_str)
                    .unwrap_or_default();
                let name = format!("{}.{stem}", package.name());
                self.resolver.resolve(&name)?
            }
        };

        let default_domain = match context.package() {
            Some(package) if context.i18n_domain().is_none() => Some(package.name().to_owned()),
            _ => None,
        };
        if let Some(domain) = default_domain {
            context.set_i18n_domain(&domain);
        }

        let mut scanner = Scanner::new(context, options.testing);
        self.scan_module(&module, &mut scanner, options.force)
    }

    /// Runs the guard checks and drains attachments for `module`.
    fn scan_module(&self, module: &Module, scanner: &mut Scanner<'_>, force: bool) -> ScanResult<()> {
        if !force && !scanner.context().process_file(module.file())? {
            debug!(module = %module, "already processed, scan skipped");
            return Ok(());
        }

        let mismatch = scanner.context().package().and_then(|package| {
            (package.dir() != module.dir())
                .then(|| (module.name().to_owned(), package.name().to_owned()))
        });
        if let Some((module_name, package_name)) = mismatch {
            return Err(ScanError::CrossPackage {
                module: module_name,
                package: package_name,
            });
        }

        debug!(module = %module, force, "scanning module");
        for callback in self.registry.consume(module.name(), Aspect::ModuleLevel) {
            callback(scanner)?;
        }
        for callback in self.registry.consume(module.name(), Aspect::Decorated) {
            callback(scanner)?;
        }
        Ok(())
    }

    /// Queues, under `caller`, a deferred scan of `package`.
    ///
    /// This is the declaration-surface `scan(target)` call: when the caller's
    /// module is scanned, the target package is scanned in turn (guard and
    /// cross-package checks included).
    pub fn defer_scan(&self, caller: &Module, package: Module) {
        let driver = self.clone();
        self.registry.attach(
            caller.name(),
            Aspect::ModuleLevel,
            Box::new(move |scanner| {
                driver
                    .scan_module(&package, scanner, false)
                    .map_err(ContextError::new)
            }),
        );
    }

    /// Queues, under `caller`, a deferred assignment of the context's i18n
    /// domain.
    pub fn defer_i18n_domain(&self, caller: &Module, domain: impl Into<String>) {
        let domain = domain.into();
        self.registry.attach(
            caller.name(),
            Aspect::ModuleLevel,
            Box::new(move |scanner| {
                scanner.context().set_i18n_domain(&domain);
                Ok(())
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;
    use std::path::Path;

    use zconf_directive::configure;
    use zconf_primitives::{Arguments, ContextResult, DirectiveName, SourceInfo};

    use crate::resolver::StaticResolver;

    #[derive(Default)]
    struct EngineContext {
        begins: Vec<String>,
        ends: usize,
        package: Option<Module>,
        i18n_domain: Option<String>,
        info: Option<SourceInfo>,
        processed: HashSet<PathBuf>,
    }

    impl EngineContext {
        fn for_package(package: Module) -> Self {
            Self {
                package: Some(package),
                ..Self::default()
            }
        }
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
            self.ends += 1;
            Ok(())
        }

        fn process_file(&mut self, path: &Path) -> ContextResult<bool> {
            Ok(self.processed.insert(path.to_path_buf()))
        }

        fn evaluate_condition(&mut self, expression: &str, _testing: bool) -> ContextResult<bool> {
            Ok(expression != "false")
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

    fn package() -> Module {
        Module::new("pkg", "/srv/pkg/__init__.py")
    }

    fn configure_module() -> Module {
        Module::new("pkg.configure", "/srv/pkg/configure.py")
    }

    fn driver() -> ScanDriver {
        let resolver = StaticResolver::new();
        resolver.insert(configure_module());
        ScanDriver::new(Arc::new(AttachmentRegistry::new()), Arc::new(resolver))
    }

    #[test]
    fn second_scan_is_a_no_op() {
        let driver = driver();
        let module = configure_module();
        configure(["zope", "utility"])
            .arg("component", "pkg.utilities.Clock")
            .queue(driver.registry(), &module)
            .unwrap();

        let mut context = EngineContext::for_package(package());
        driver
            .scan(module.clone().into(), &mut context, ScanOptions::default())
            .unwrap();
        driver
            .scan(module.into(), &mut context, ScanOptions::default())
            .unwrap();

        assert_eq!(context.begins, ["utility"]);
        assert_eq!(context.ends, 1);
    }

    #[test]
    fn forced_scan_skips_the_guard() {
        let driver = driver();
        let module = configure_module();
        let mut context = EngineContext::for_package(package());

        driver
            .scan(module.clone().into(), &mut context, ScanOptions::default())
            .unwrap();
        configure(["zope", "utility"])
            .queue(driver.registry(), &module)
            .unwrap();
        driver
            .scan(module.into(), &mut context, ScanOptions::forced())
            .unwrap();

        assert_eq!(context.begins, ["utility"]);
    }

    #[test]
    fn cross_package_scan_names_both_parties() {
        let driver = driver();
        let outside = Module::new("other.configure", "/srv/other/configure.py");
        let mut context = EngineContext::for_package(package());

        let err = driver
            .scan(outside.into(), &mut context, ScanOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ScanError::CrossPackage { ref module, ref package }
                if module == "other.configure" && package == "pkg"
        ));
    }

    #[test]
    fn file_targets_resolve_through_the_package() {
        let driver = driver();
        let module = configure_module();
        configure(["zope", "utility"])
            .queue(driver.registry(), &module)
            .unwrap();

        let mut context = EngineContext::for_package(package());
        driver
            .scan(
                PathBuf::from("/srv/pkg/configure.py").into(),
                &mut context,
                ScanOptions::forced(),
            )
            .unwrap();
        assert_eq!(context.begins, ["utility"]);
    }

    #[test]
    fn file_target_without_package_errors() {
        let driver = driver();
        let mut context = EngineContext::default();
        let err = driver
            .scan(
                PathBuf::from("/srv/pkg/configure.py").into(),
                &mut context,
                ScanOptions::default(),
            )
            .unwrap_err();
        assert!(matches!(err, ScanError::PackageRequired { .. }));
    }

    #[test]
    fn i18n_domain_defaults_to_the_package_name() {
        let driver = driver();
        let mut context = EngineContext::for_package(package());
        driver
            .scan(
                configure_module().into(),
                &mut context,
                ScanOptions::default(),
            )
            .unwrap();
        assert_eq!(context.i18n_domain.as_deref(), Some("pkg"));
    }

    #[test]
    fn explicit_i18n_domain_is_not_overwritten() {
        let driver = driver();
        let mut context = EngineContext::for_package(package());
        context.i18n_domain = Some("custom".to_owned());
        driver
            .scan(
                configure_module().into(),
                &mut context,
                ScanOptions::default(),
            )
            .unwrap();
        assert_eq!(context.i18n_domain.as_deref(), Some("custom"));
    }

    #[test]
    fn deferred_scan_drains_the_target_module() {
        let driver = driver();
        let init = package();
        let module = configure_module();
        configure(["zope", "utility"])
            .queue(driver.registry(), &module)
            .unwrap();
        driver.defer_scan(&init, module);

        let mut context = EngineContext::for_package(package());
        driver
            .scan(init.into(), &mut context, ScanOptions::default())
            .unwrap();
        assert_eq!(context.begins, ["utility"]);
    }

    #[test]
    fn deferred_i18n_domain_applies_on_scan() {
        let driver = driver();
        let module = configure_module();
        driver.defer_i18n_domain(&module, "pkg.custom");

        let mut context = EngineContext::default();
        driver
            .scan(module.into(), &mut context, ScanOptions::default())
            .unwrap();
        assert_eq!(context.i18n_domain.as_deref(), Some("pkg.custom"));
    }

    #[test]
    fn deferred_cross_package_scan_still_errors() {
        let driver = driver();
        let module = configure_module();
        let outside = Module::new("other.configure", "/srv/other/configure.py");
        driver.defer_scan(&module, outside);

        let mut context = EngineContext::for_package(package());
        let err = driver
            .scan(module.into(), &mut context, ScanOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("other.configure"));
        assert!(err.to_string().contains("pkg"));
    }
}
