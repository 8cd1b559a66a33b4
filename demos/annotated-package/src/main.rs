//! Walkthrough of declaring configuration in code and replaying it with a
//! scan.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use zconf::directive::{adapter_config, configure, DecoratedTarget};
use zconf::primitives::{
    Arguments, ContextResult, DirectiveName, Module, RegistrationContext, SourceInfo,
};
use zconf::registry::AttachmentRegistry;
use zconf::scan::{ScanDriver, ScanOptions, StaticResolver};

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    info!("=== zconf: annotated package walkthrough ===");

    let configure_module = Module::new("pkg.configure", "/srv/pkg/configure.py");
    let adapters_module = Module::new("pkg.adapters", "/srv/pkg/adapters.py");

    let resolver = StaticResolver::new();
    resolver.insert(configure_module.clone());
    resolver.insert(adapters_module.clone());
    let driver = ScanDriver::new(Arc::new(AttachmentRegistry::new()), Arc::new(resolver));
    let registry = driver.registry();

    // Declaration time: nothing below touches the engine yet. Each call just
    // queues a record under its module.
    configure(["zope", "utility"])
        .arg("component", "pkg.utilities.Clock")
        .arg("provides", "pkg.interfaces.IClock")
        .queue(registry, &configure_module)?;

    let scope = configure(["browser", "pages"])
        .arg("for", "pkg.interfaces.IFolder")
        .begin_scope(registry, &configure_module)?;
    scope
        .nested(["page"])
        .arg("name", "folder_view")
        .queue(registry, &configure_module)?;
    scope.end(registry, &configure_module);

    adapter_config()
        .arg("for_", "pkg.interfaces.IFolder")
        .as_decorator()?
        .apply(
            registry,
            &DecoratedTarget::new(adapters_module.clone(), "FolderAdapter"),
        );

    info!(
        pending = registry.pending(configure_module.name()),
        module = %configure_module,
        "declarations queued"
    );

    // Scan time: the queued records replay into the context in declaration
    // order.
    let mut context = PrintingContext::for_package(Module::new("pkg", "/srv/pkg/__init__.py"));
    driver.scan(
        configure_module.into(),
        &mut context,
        ScanOptions::default(),
    )?;
    driver.scan(adapters_module.into(), &mut context, ScanOptions::default())?;

    info!(depth = context.depth, "scan finished");
    Ok(())
}

/// Registration context that logs each directive instead of registering
/// components.
struct PrintingContext {
    package: Option<Module>,
    i18n_domain: Option<String>,
    info: Option<SourceInfo>,
    processed: HashSet<PathBuf>,
    depth: usize,
}

impl PrintingContext {
    fn for_package(package: Module) -> Self {
        Self {
            package: Some(package),
            i18n_domain: None,
            info: None,
            processed: HashSet::new(),
            depth: 0,
        }
    }
}

impl RegistrationContext for PrintingContext {
    fn begin(
        &mut self,
        directive: &DirectiveName,
        arguments: &Arguments,
        _info: &SourceInfo,
    ) -> ContextResult<()> {
        let indent = "  ".repeat(self.depth);
        info!("{indent}begin {directive}");
        for (name, value) in arguments.pairs() {
            info!("{indent}  {name} = {value}");
        }
        self.depth += 1;
        Ok(())
    }

    fn end(&mut self) -> ContextResult<()> {
        self.depth -= 1;
        let indent = "  ".repeat(self.depth);
        info!("{indent}end");
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
