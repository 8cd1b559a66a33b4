//! Module lookup.
//!
//! The resolver stands in for the host's import system: given a dotted name,
//! it hands back the module token whose declarations are already sitting in
//! the attachment registry.

use std::collections::HashMap;
use std::sync::RwLock;

use zconf_primitives::Module;

use crate::error::{ScanError, ScanResult};

/// Resolves dotted module names to module tokens.
pub trait ModuleResolver: Send + Sync {
    /// Looks up a module by dotted name.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::ModuleNotFound`] when the name is unknown.
    fn resolve(&self, name: &str) -> ScanResult<Module>;
}

/// Map-backed resolver for embedders that register modules up front.
#[derive(Debug, Default)]
pub struct StaticResolver {
    modules: RwLock<HashMap<String, Module>>,
}

impl StaticResolver {
    /// Creates an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a module under its own dotted name.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn insert(&self, module: Module) {
        let mut modules = self.modules.write().expect("module resolver poisoned");
        modules.insert(module.name().to_owned(), module);
    }
}

impl ModuleResolver for StaticResolver {
    fn resolve(&self, name: &str) -> ScanResult<Module> {
        let modules = self.modules.read().expect("module resolver poisoned");
        modules
            .get(name)
            .cloned()
            .ok_or_else(|| ScanError::ModuleNotFound {
                name: name.to_owned(),
            })
    }
}
