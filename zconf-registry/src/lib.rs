//! Deferred-attachment registry.
//!
//! The registry is the bus between declaration time and scan time: a
//! directive declaration appends a callback under its owning module, and a
//! later scan drains those callbacks in declaration order. Attachments whose
//! module is never scanned are simply never invoked.

#![warn(missing_docs, clippy::pedantic)]

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use tracing::debug;
use zconf_primitives::{ContextResult, Scanner};

/// Deferred callback invoked against a [`Scanner`] when its owning module is
/// scanned.
///
/// `Send + Sync` so the registry itself stays shareable behind an `Arc`.
pub type AttachmentCallback =
    Box<dyn FnOnce(&mut Scanner<'_>) -> ContextResult<()> + Send + Sync>;

/// Which declaration surface an attachment came from.
///
/// A scan drains module-level attachments before decorated ones, each group
/// in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aspect {
    /// Declarative calls made at module level.
    ModuleLevel,
    /// Directives applied to individual decorated objects in the module.
    Decorated,
}

#[derive(Default)]
struct ModuleAttachments {
    module_level: Vec<AttachmentCallback>,
    decorated: Vec<AttachmentCallback>,
}

impl ModuleAttachments {
    fn aspect_mut(&mut self, aspect: Aspect) -> &mut Vec<AttachmentCallback> {
        match aspect {
            Aspect::ModuleLevel => &mut self.module_level,
            Aspect::Decorated => &mut self.decorated,
        }
    }

    fn is_empty(&self) -> bool {
        self.module_level.is_empty() && self.decorated.is_empty()
    }
}

/// Ordered multimap of deferred callbacks keyed by owning module name.
#[derive(Default)]
pub struct AttachmentRegistry {
    inner: RwLock<HashMap<String, ModuleAttachments>>,
}

impl fmt::Debug for AttachmentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read().expect("attachment registry poisoned");
        let modules: Vec<_> = inner.keys().cloned().collect();
        f.debug_struct("AttachmentRegistry")
            .field("modules", &modules)
            .finish()
    }
}

impl AttachmentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a callback to the list owned by `module` under `aspect`.
    ///
    /// Ordering within an aspect equals attach order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn attach(&self, module: &str, aspect: Aspect, callback: AttachmentCallback) {
        let mut inner = self.inner.write().expect("attachment registry poisoned");
        let entry = inner.entry(module.to_owned()).or_default();
        entry.aspect_mut(aspect).push(callback);
        debug!(module, ?aspect, "attachment queued");
    }

    /// Returns and clears the callbacks owned by `module` under `aspect`.
    ///
    /// A second consume yields nothing until new callbacks are attached.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn consume(&self, module: &str, aspect: Aspect) -> Vec<AttachmentCallback> {
        let mut inner = self.inner.write().expect("attachment registry poisoned");
        let Some(entry) = inner.get_mut(module) else {
            return Vec::new();
        };
        let callbacks = std::mem::take(entry.aspect_mut(aspect));
        if entry.is_empty() {
            inner.remove(module);
        }
        debug!(module, ?aspect, count = callbacks.len(), "attachments consumed");
        callbacks
    }

    /// Returns how many callbacks are pending for `module` across both
    /// aspects. Diagnostic only.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn pending(&self, module: &str) -> usize {
        let inner = self.inner.read().expect("attachment registry poisoned");
        inner
            .get(module)
            .map_or(0, |entry| entry.module_level.len() + entry.decorated.len())
    }
}
