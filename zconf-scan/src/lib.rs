//! Scan driver: replays deferred directive attachments into a registration
//! context.
//!
//! A scan names a module (or a file belonging to the configured package),
//! checks the context's processed-once guard, and drains the attachment
//! registry for that module in declaration order.

#![warn(missing_docs, clippy::pedantic)]

mod driver;
mod error;
mod resolver;

/// The scan driver and its inputs.
pub use driver::{ScanDriver, ScanOptions, ScanTarget};
/// Scan error taxonomy.
pub use error::{ScanError, ScanResult};
/// Module lookup seam standing in for the host import system.
pub use resolver::{ModuleResolver, StaticResolver};
