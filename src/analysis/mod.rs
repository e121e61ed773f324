//! Per-file static analysis.
//!
//! The scanner turns one source text into a [`FileAnalysis`]: directive
//! status, resolved JSX component usages, and export records. It never
//! touches the filesystem; the crawler feeds it file contents through a
//! host.

pub mod scanner;
pub mod types;

// Re-export commonly used types for convenience
pub use scanner::{ScanError, ScanResult, Scanner, SourceLanguage};
pub use types::{
    ComponentFacts, ExportKind, ExportRecord, FileAnalysis, ImportKind, ImportedComponentUse,
    LocalComponentUse, ReExport,
};
