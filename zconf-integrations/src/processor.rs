//! File-processing seam and the annotation router.

use std::ffi::OsStr;
use std::path::Path;

use tracing::debug;
use zconf_primitives::RegistrationContext;
use zconf_scan::{ScanDriver, ScanOptions, ScanResult, ScanTarget};

/// Default extension of annotation-source modules.
pub const ANNOTATION_EXTENSION: &str = "py";

/// The host engine's file-processing entry point.
pub trait FileProcessor: Send + Sync {
    /// Processes one configuration file against the context.
    ///
    /// # Errors
    ///
    /// Implementation-defined; the adapter propagates failures unchanged.
    fn process_file(
        &self,
        path: &Path,
        context: &mut dyn RegistrationContext,
        testing: bool,
    ) -> ScanResult<()>;
}

/// Replacement file processor that recognizes annotation-source files.
///
/// Files carrying the annotation extension are routed to the scan driver with
/// the processed-once guard disabled (the host's own include machinery
/// already guards inclusion); everything else is delegated to the wrapped
/// processor unchanged.
pub struct AnnotationRouter {
    markup: std::sync::Arc<dyn FileProcessor>,
    driver: ScanDriver,
    extension: String,
}

impl AnnotationRouter {
    /// Wraps the host's markup processor with annotation routing.
    pub fn new(markup: std::sync::Arc<dyn FileProcessor>, driver: ScanDriver) -> Self {
        Self {
            markup,
            driver,
            extension: ANNOTATION_EXTENSION.to_owned(),
        }
    }

    /// Overrides the annotation-source extension.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Returns the annotation-source extension being routed.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }
}

impl FileProcessor for AnnotationRouter {
    fn process_file(
        &self,
        path: &Path,
        context: &mut dyn RegistrationContext,
        testing: bool,
    ) -> ScanResult<()> {
        if path.extension().and_then(OsStr::to_str) == Some(self.extension.as_str()) {
            debug!(path = %path.display(), "routing annotation source to scan driver");
            let options = ScanOptions {
                testing,
                force: true,
            };
            self.driver
                .scan(ScanTarget::File(path.to_path_buf()), context, options)
        } else {
            self.markup.process_file(path, context, testing)
        }
    }
}
