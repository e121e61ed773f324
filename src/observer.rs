//! Scan progress observation.
//!
//! The crawler reports per-file events through an explicitly injected
//! [`ScanObserver`] instead of a process-wide logger, so embedders decide
//! where diagnostics go. The default observer drops everything;
//! [`TracingObserver`] forwards to `tracing` for the CLI.

/// Receives scan lifecycle events. All methods default to no-ops.
pub trait ScanObserver: Send + Sync {
    /// A file is about to be read and scanned.
    fn file_started(&self, _id: &str) {}

    /// A file failed to read or parse and was dropped from the graph.
    fn file_failed(&self, _id: &str, _reason: &str) {}

    /// An import specifier did not resolve to a project file. Expected for
    /// external packages; only interesting when debugging alias tables.
    fn import_unresolved(&self, _specifier: &str, _importer: &str) {}
}

impl<T: ScanObserver + ?Sized> ScanObserver for std::sync::Arc<T> {
    fn file_started(&self, id: &str) {
        (**self).file_started(id);
    }

    fn file_failed(&self, id: &str, reason: &str) {
        (**self).file_failed(id, reason);
    }

    fn import_unresolved(&self, specifier: &str, importer: &str) {
        (**self).import_unresolved(specifier, importer);
    }
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ScanObserver for NoopObserver {}

/// Observer that forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ScanObserver for TracingObserver {
    fn file_started(&self, id: &str) {
        tracing::debug!(file = id, "scanning");
    }

    fn file_failed(&self, id: &str, reason: &str) {
        tracing::warn!(file = id, reason, "skipping file");
    }

    fn import_unresolved(&self, specifier: &str, importer: &str) {
        tracing::debug!(specifier, importer, "import did not resolve");
    }
}
