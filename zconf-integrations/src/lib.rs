//! Host-engine integrations.
//!
//! The adapter hooks into its host at three seams: the engine's
//! file-processing entry point (routed so annotation-source files reach the
//! scan driver), the plugin auto-discovery inclusion directives (taught to
//! look for annotation-source counterparts of the well-known markup files),
//! and a composition root that wires the patched or unpatched variants
//! without any global mutable state.

#![warn(missing_docs, clippy::pedantic)]

mod integration;
mod plugins;
mod processor;

/// Composition root owning the enable/disable wiring.
pub use integration::{Integration, PluginDirectives};
/// Plugin auto-include seam and its counterpart-aware shim.
pub use plugins::{PluginInclude, PluginIncludeShim};
/// File-processing seam and the annotation-aware router.
pub use processor::{ANNOTATION_EXTENSION, AnnotationRouter, FileProcessor};
