//! Data model for per-file analysis results.
//!
//! A [`FileAnalysis`] is the unit the scanner produces for one source file:
//! what the file exports, which components it renders, and whether it carries
//! the `"use client"` directive. Values are produced once per scan and are
//! read-only afterwards.

use serde::{Deserialize, Serialize};

/// How a component is exported from its defining file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    /// `export default ...`
    Default,
    /// `export const X = ...`, `export function X() {}`, `export { X }`
    Named,
    /// No export was identified for this file.
    #[default]
    None,
}

/// The shape of an import binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportKind {
    /// `import Foo from './foo'`
    Default,
    /// `import { Foo } from './foo'` or `import { Foo as Bar } from './foo'`
    Named,
    /// `import * as NS from './foo'`
    Namespace,
}

/// Identity facts about the component a file defines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ComponentFacts {
    /// Best-effort component name. `None` when the default export is an
    /// anonymous expression (e.g. `export default withAuth(Profile)`).
    pub name: Option<String>,
    /// How the component is exported.
    pub export_kind: ExportKind,
    /// Whether this file's directive prologue contains `"use client"`.
    /// Source-level only; reachability from a client boundary is computed
    /// later over the whole graph.
    pub is_client_directive: bool,
}

/// A JSX usage that resolved to an import binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedComponentUse {
    /// The tag name as written in JSX (e.g. `Button`, or `UI.Item` for
    /// namespace member access).
    pub local_name: String,
    /// The name on the exporting module: an identifier, `"default"`, or `"*"`.
    pub imported_name: String,
    /// The import specifier exactly as written (e.g. `"./button"`).
    pub import_specifier: String,
    /// The shape of the import binding.
    pub kind: ImportKind,
}

/// A JSX usage that resolved to an identifier defined in the same file.
pub type LocalComponentUse = String;

/// Pass-through information for `export ... from` records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReExport {
    /// The module the export is forwarded from.
    pub specifier: String,
    /// The name on the source module (`"*"` for `export * from`).
    pub imported_name: String,
}

/// One export declared by a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRecord {
    /// `"default"`, `"*"`, or the exported identifier.
    pub name: String,
    /// The export shape.
    pub kind: ImportKind,
    /// Present for pass-through exports (`export { X } from './y'`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub re_export: Option<ReExport>,
}

/// The full analysis of a single source file.
///
/// Lists preserve first-seen source order so repeated scans of identical
/// input produce identical values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FileAnalysis {
    /// Identity facts about the file's component.
    pub component: ComponentFacts,
    /// JSX usages backed by imports, one entry per distinct tag name.
    pub imported_components: Vec<ImportedComponentUse>,
    /// JSX usages backed by in-file declarations.
    pub local_components: Vec<LocalComponentUse>,
    /// Everything the file exports.
    pub exports: Vec<ExportRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_kind_default_is_none() {
        assert_eq!(ExportKind::default(), ExportKind::None);
    }

    #[test]
    fn test_serialization_round_trip() {
        let analysis = FileAnalysis {
            component: ComponentFacts {
                name: Some("Button".to_string()),
                export_kind: ExportKind::Default,
                is_client_directive: true,
            },
            imported_components: vec![ImportedComponentUse {
                local_name: "Icon".to_string(),
                imported_name: "Icon".to_string(),
                import_specifier: "./icon".to_string(),
                kind: ImportKind::Named,
            }],
            local_components: vec!["Spinner".to_string()],
            exports: vec![ExportRecord {
                name: "default".to_string(),
                kind: ImportKind::Default,
                re_export: None,
            }],
        };

        let json = serde_json::to_string(&analysis).unwrap();
        let back: FileAnalysis = serde_json::from_str(&json).unwrap();
        assert_eq!(back, analysis);
    }

    #[test]
    fn test_re_export_skipped_when_absent() {
        let record = ExportRecord {
            name: "Button".to_string(),
            kind: ImportKind::Named,
            re_export: None,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("re_export"));
    }
}
