//! Single-file source scanner built on tree-sitter.
//!
//! Parses one JavaScript/TypeScript source text and extracts the facts the
//! crawler needs: the `"use client"` directive, import bindings (including
//! `dynamic()`/`React.lazy()` loaders), local declarations, exports, and the
//! JSX tags the file actually renders. Usages are then resolved against the
//! collected bindings to produce a [`FileAnalysis`].
//!
//! The scanner never performs I/O and holds no state besides the reusable
//! tree-sitter parsers, so identical input always yields identical output.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use thiserror::Error;
use tree_sitter::{Node, Parser};

use super::types::{
    ComponentFacts, ExportKind, ExportRecord, FileAnalysis, ImportKind, ImportedComponentUse,
    ReExport,
};

/// Errors that can occur while scanning a file.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("syntax error at line {line}, column {column}")]
    Parse { line: usize, column: usize },

    #[error("tree-sitter language initialization failed")]
    LanguageInit,
}

/// Result type for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Language variant for file analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLanguage {
    JavaScript,
    Jsx,
    TypeScript,
    Tsx,
}

impl SourceLanguage {
    /// Determine language from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "js" | "mjs" | "cjs" => Some(SourceLanguage::JavaScript),
            "jsx" => Some(SourceLanguage::Jsx),
            "ts" | "mts" | "cts" => Some(SourceLanguage::TypeScript),
            "tsx" => Some(SourceLanguage::Tsx),
            _ => None,
        }
    }

    /// Determine language from a file path.
    pub fn from_path(path: &str) -> Option<Self> {
        let ext = Path::new(path).extension().and_then(|e| e.to_str())?;
        Self::from_extension(ext)
    }
}

/// An import binding in scope, keyed by its local identifier.
#[derive(Debug, Clone)]
struct ImportBinding {
    specifier: String,
    kind: ImportKind,
    imported_name: String,
}

/// Mutable accumulator threaded through the tree walk.
#[derive(Default)]
struct ScanContext {
    is_client_directive: bool,
    imports: HashMap<String, ImportBinding>,
    local_definitions: HashSet<String>,
    used_jsx_names: Vec<String>,
    seen_jsx_names: HashSet<String>,
    exports: Vec<ExportRecord>,
    exported_component: Option<(Option<String>, ExportKind)>,
}

impl ScanContext {
    fn bind_import(&mut self, local: &str, specifier: &str, kind: ImportKind, imported: &str) {
        self.imports.insert(
            local.to_string(),
            ImportBinding {
                specifier: specifier.to_string(),
                kind,
                imported_name: imported.to_string(),
            },
        );
    }

    fn record_jsx(&mut self, name: &str) {
        if self.seen_jsx_names.insert(name.to_string()) {
            self.used_jsx_names.push(name.to_string());
        }
    }

    /// First named export wins as the component candidate; a later default
    /// export always takes over. Heuristic: files exporting several named
    /// components get whichever is declared first.
    fn propose_named_candidate(&mut self, name: &str) {
        if self.exported_component.is_none() {
            self.exported_component = Some((Some(name.to_string()), ExportKind::Named));
        }
    }
}

/// Scanner for extracting component facts from source files.
pub struct Scanner {
    js_parser: Parser,
    ts_parser: Parser,
    tsx_parser: Parser,
}

impl Scanner {
    /// Create a new Scanner with JS, TS, and TSX grammars loaded.
    pub fn new() -> ScanResult<Self> {
        let mut js_parser = Parser::new();
        js_parser
            .set_language(&tree_sitter_javascript::LANGUAGE.into())
            .map_err(|_| ScanError::LanguageInit)?;

        let mut ts_parser = Parser::new();
        ts_parser
            .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
            .map_err(|_| ScanError::LanguageInit)?;

        let mut tsx_parser = Parser::new();
        tsx_parser
            .set_language(&tree_sitter_typescript::LANGUAGE_TSX.into())
            .map_err(|_| ScanError::LanguageInit)?;

        Ok(Self {
            js_parser,
            ts_parser,
            tsx_parser,
        })
    }

    /// Analyze one source text.
    ///
    /// Fails only when the parse tree contains a syntax error; the position
    /// of the first error node is reported so callers can log it against the
    /// file. The caller decides whether a failed file aborts anything — the
    /// crawler treats it as file-local.
    pub fn analyze(&mut self, source: &str, language: SourceLanguage) -> ScanResult<FileAnalysis> {
        let parser = match language {
            SourceLanguage::JavaScript | SourceLanguage::Jsx => &mut self.js_parser,
            SourceLanguage::TypeScript => &mut self.ts_parser,
            SourceLanguage::Tsx => &mut self.tsx_parser,
        };

        // parse() returns None only when no language is set or parsing was
        // cancelled, neither of which can happen here.
        let tree = parser.parse(source, None).ok_or(ScanError::LanguageInit)?;
        let root = tree.root_node();

        if root.has_error() {
            let position = first_error(root)
                .map(|n| n.start_position())
                .unwrap_or_else(|| root.start_position());
            return Err(ScanError::Parse {
                line: position.row + 1,
                column: position.column + 1,
            });
        }

        let mut ctx = ScanContext {
            is_client_directive: detect_client_directive(root, source),
            ..ScanContext::default()
        };
        walk(root, source, &mut ctx);

        Ok(resolve_usages(ctx))
    }
}

/// Find the first error or missing node in a tree known to contain one.
fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

/// Check the directive prologue for `"use client"`.
///
/// Only leading expression statements wrapping a bare string literal count as
/// directives; a `"use client"` string anywhere else in the file does not
/// mark it as a client component.
fn detect_client_directive(root: Node, source: &str) -> bool {
    let mut cursor = root.walk();
    for statement in root.named_children(&mut cursor) {
        match statement.kind() {
            "comment" | "hash_bang_line" => continue,
            "expression_statement" => {
                let Some(expression) = statement.named_child(0) else {
                    return false;
                };
                if expression.kind() != "string" {
                    return false;
                }
                if string_value(expression, source) == "use client" {
                    return true;
                }
                // Other directives ("use strict") keep the prologue open.
            }
            _ => return false,
        }
    }
    false
}

/// Single explicit walk over the tree, dispatching on node kind.
fn walk(node: Node, source: &str, ctx: &mut ScanContext) {
    match node.kind() {
        "import_statement" => collect_import(node, source, ctx),
        "export_statement" => collect_export(node, source, ctx),
        "variable_declarator" => collect_declarator(node, source, ctx),
        "function_declaration" | "generator_function_declaration" => {
            if let Some(name) = node.child_by_field_name("name") {
                ctx.local_definitions
                    .insert(node_text(name, source).to_string());
            }
        }
        "jsx_opening_element" | "jsx_self_closing_element" => collect_jsx(node, source, ctx),
        _ => {}
    }

    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    for child in children {
        walk(child, source, ctx);
    }
}

/// Register the bindings of a static `import` statement.
fn collect_import(node: Node, source: &str, ctx: &mut ScanContext) {
    let Some(source_node) = node.child_by_field_name("source") else {
        return;
    };
    let specifier = string_value(source_node, source);

    let mut cursor = node.walk();
    let clauses: Vec<Node> = node
        .children(&mut cursor)
        .filter(|c| c.kind() == "import_clause")
        .collect();

    for clause in clauses {
        let mut clause_cursor = clause.walk();
        let parts: Vec<Node> = clause.children(&mut clause_cursor).collect();
        for part in parts {
            match part.kind() {
                // import Foo from './foo'
                "identifier" => {
                    ctx.bind_import(
                        node_text(part, source),
                        &specifier,
                        ImportKind::Default,
                        "default",
                    );
                }
                // import * as NS from './foo'
                "namespace_import" => {
                    let mut ns_cursor = part.walk();
                    let ns_children: Vec<Node> = part.named_children(&mut ns_cursor).collect();
                    if let Some(local) = ns_children.into_iter().find(|n| n.kind() == "identifier")
                    {
                        ctx.bind_import(
                            node_text(local, source),
                            &specifier,
                            ImportKind::Namespace,
                            "*",
                        );
                    }
                }
                // import { Foo, Bar as Baz } from './foo'
                "named_imports" => {
                    let mut named_cursor = part.walk();
                    let specs: Vec<Node> = part
                        .named_children(&mut named_cursor)
                        .filter(|n| n.kind() == "import_specifier")
                        .collect();
                    for spec in specs {
                        let Some(name) = spec.child_by_field_name("name") else {
                            continue;
                        };
                        let imported = if name.kind() == "string" {
                            string_value(name, source)
                        } else {
                            node_text(name, source).to_string()
                        };
                        let local = match spec.child_by_field_name("alias") {
                            Some(alias) => node_text(alias, source).to_string(),
                            // A string name with no alias has no usable binding.
                            None if name.kind() == "string" => continue,
                            None => imported.clone(),
                        };
                        ctx.bind_import(&local, &specifier, ImportKind::Named, &imported);
                    }
                }
                _ => {}
            }
        }
    }
}

/// Register a variable declarator: either a disguised dynamic import or a
/// local definition.
fn collect_declarator(node: Node, source: &str, ctx: &mut ScanContext) {
    let Some(name) = node.child_by_field_name("name") else {
        return;
    };
    if name.kind() != "identifier" {
        return;
    }
    let ident = node_text(name, source);

    if let Some(specifier) = dynamic_import_specifier(node, source) {
        // const Lazy = dynamic(() => import('./x')) behaves like a default
        // import of './x'; it must not also count as a local definition.
        ctx.bind_import(ident, &specifier, ImportKind::Default, "default");
        return;
    }

    if is_top_level_declarator(node) {
        ctx.local_definitions.insert(ident.to_string());
    }
}

/// Extract the import specifier from `dynamic(() => import(S))` or
/// `React.lazy(() => import(S))` initializers, with either an expression
/// body or a block body containing a `return`.
fn dynamic_import_specifier(declarator: Node, source: &str) -> Option<String> {
    let value = declarator.child_by_field_name("value")?;
    if value.kind() != "call_expression" {
        return None;
    }

    let callee = value.child_by_field_name("function")?;
    let is_next_dynamic = callee.kind() == "identifier" && node_text(callee, source) == "dynamic";
    let is_react_lazy = callee.kind() == "member_expression"
        && callee
            .child_by_field_name("object")
            .is_some_and(|o| o.kind() == "identifier" && node_text(o, source) == "React")
        && callee
            .child_by_field_name("property")
            .is_some_and(|p| node_text(p, source) == "lazy");
    if !is_next_dynamic && !is_react_lazy {
        return None;
    }

    let args = value.child_by_field_name("arguments")?;
    let mut cursor = args.walk();
    let loader = args.named_children(&mut cursor).find(|n| {
        matches!(
            n.kind(),
            "arrow_function" | "function_expression" | "function"
        )
    })?;

    let body = loader.child_by_field_name("body")?;
    match body.kind() {
        "call_expression" => import_call_specifier(body, source),
        "statement_block" => {
            let mut body_cursor = body.walk();
            let ret = body
                .named_children(&mut body_cursor)
                .find(|n| n.kind() == "return_statement")?;
            import_call_specifier(ret.named_child(0)?, source)
        }
        _ => None,
    }
}

/// Extract the string argument of an `import('...')` call expression.
fn import_call_specifier(node: Node, source: &str) -> Option<String> {
    if node.kind() != "call_expression" {
        return None;
    }
    let callee = node.child_by_field_name("function")?;
    if callee.kind() != "import" {
        return None;
    }
    let args = node.child_by_field_name("arguments")?;
    let mut cursor = args.walk();
    let specifier = args
        .named_children(&mut cursor)
        .find(|n| n.kind() == "string")?;
    Some(string_value(specifier, source))
}

/// A declarator is top-level when its declaration hangs off the program,
/// directly or through an `export` statement.
fn is_top_level_declarator(declarator: Node) -> bool {
    let Some(declaration) = declarator.parent() else {
        return false;
    };
    match declaration.parent() {
        Some(p) if p.kind() == "export_statement" => {
            p.parent().is_some_and(|g| g.kind() == "program")
        }
        Some(p) => p.kind() == "program",
        None => false,
    }
}

/// Register the records of an `export` statement and update the
/// exported-component candidate.
fn collect_export(node: Node, source: &str, ctx: &mut ScanContext) {
    let source_specifier = node
        .child_by_field_name("source")
        .map(|n| string_value(n, source));
    let mut cursor = node.walk();
    let has_default = node.children(&mut cursor).any(|c| c.kind() == "default");

    if has_default {
        ctx.exports.push(ExportRecord {
            name: "default".to_string(),
            kind: ImportKind::Default,
            re_export: None,
        });

        if let Some(declaration) = node.child_by_field_name("declaration") {
            // export default function Page() {}
            if matches!(
                declaration.kind(),
                "function_declaration" | "generator_function_declaration"
            ) {
                let name = declaration
                    .child_by_field_name("name")
                    .map(|n| node_text(n, source).to_string());
                ctx.exported_component = Some((name, ExportKind::Default));
            }
        } else if let Some(value) = node.child_by_field_name("value") {
            match value.kind() {
                // export default Page
                "identifier" => {
                    ctx.exported_component =
                        Some((Some(node_text(value, source).to_string()), ExportKind::Default));
                }
                // export default withAuth(Profile) — wrapped, name unknown
                "call_expression" => {
                    ctx.exported_component = Some((None, ExportKind::Default));
                }
                _ => {}
            }
        }
        return;
    }

    if let Some(specifier) = source_specifier {
        // export * from './x'
        let mut star_cursor = node.walk();
        if node.children(&mut star_cursor).any(|c| c.kind() == "*") {
            ctx.exports.push(ExportRecord {
                name: "*".to_string(),
                kind: ImportKind::Namespace,
                re_export: Some(ReExport {
                    specifier,
                    imported_name: "*".to_string(),
                }),
            });
            return;
        }

        // export { A, B as C } from './x'
        for (exported, local) in export_clause_specifiers(node, source) {
            ctx.exports.push(ExportRecord {
                name: exported,
                kind: ImportKind::Named,
                re_export: Some(ReExport {
                    specifier: specifier.clone(),
                    imported_name: local,
                }),
            });
        }
        return;
    }

    if let Some(declaration) = node.child_by_field_name("declaration") {
        match declaration.kind() {
            // export const A = ...
            "lexical_declaration" | "variable_declaration" => {
                let mut decl_cursor = declaration.walk();
                let declarators: Vec<Node> = declaration
                    .named_children(&mut decl_cursor)
                    .filter(|n| n.kind() == "variable_declarator")
                    .collect();
                for declarator in declarators {
                    let Some(name) = declarator.child_by_field_name("name") else {
                        continue;
                    };
                    if name.kind() != "identifier" {
                        continue;
                    }
                    let ident = node_text(name, source);
                    ctx.exports.push(ExportRecord {
                        name: ident.to_string(),
                        kind: ImportKind::Named,
                        re_export: None,
                    });
                    ctx.propose_named_candidate(ident);
                }
            }
            // export function A() {}
            "function_declaration" | "generator_function_declaration" => {
                if let Some(name) = declaration.child_by_field_name("name") {
                    let ident = node_text(name, source);
                    ctx.exports.push(ExportRecord {
                        name: ident.to_string(),
                        kind: ImportKind::Named,
                        re_export: None,
                    });
                    ctx.propose_named_candidate(ident);
                }
            }
            _ => {}
        }
        return;
    }

    // export { A, B }
    for (exported, _) in export_clause_specifiers(node, source) {
        ctx.exports.push(ExportRecord {
            name: exported.clone(),
            kind: ImportKind::Named,
            re_export: None,
        });
        ctx.propose_named_candidate(&exported);
    }
}

/// Collect `(exported, local)` name pairs from an export clause.
fn export_clause_specifiers(node: Node, source: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    let mut cursor = node.walk();
    let clauses: Vec<Node> = node
        .children(&mut cursor)
        .filter(|c| c.kind() == "export_clause")
        .collect();

    for clause in clauses {
        let mut clause_cursor = clause.walk();
        let specs: Vec<Node> = clause
            .named_children(&mut clause_cursor)
            .filter(|n| n.kind() == "export_specifier")
            .collect();
        for spec in specs {
            let Some(name) = spec.child_by_field_name("name") else {
                continue;
            };
            let local = if name.kind() == "string" {
                string_value(name, source)
            } else {
                node_text(name, source).to_string()
            };
            let exported = match spec.child_by_field_name("alias") {
                Some(alias) if alias.kind() == "string" => string_value(alias, source),
                Some(alias) => node_text(alias, source).to_string(),
                None => local.clone(),
            };
            pairs.push((exported, local));
        }
    }
    pairs
}

/// Record an opening or self-closing JSX tag name.
fn collect_jsx(node: Node, source: &str, ctx: &mut ScanContext) {
    let Some(name) = node.child_by_field_name("name") else {
        return;
    };
    let text = node_text(name, source);
    // Member chains deeper than two segments are not supported; skip rather
    // than fabricate a name.
    if text.contains('.') && text.split('.').count() != 2 {
        return;
    }
    ctx.record_jsx(text);
}

/// Match used JSX names against the collected bindings.
fn resolve_usages(ctx: ScanContext) -> FileAnalysis {
    let mut imported_components = Vec::new();
    let mut local_components = Vec::new();

    for name in &ctx.used_jsx_names {
        if let Some((root, _)) = name.split_once('.') {
            // <UI.Item /> — only namespace imports are supported as roots;
            // locally defined objects used as namespaces are not tracked.
            if let Some(binding) = ctx.imports.get(root) {
                if binding.kind == ImportKind::Namespace {
                    imported_components.push(ImportedComponentUse {
                        local_name: name.clone(),
                        imported_name: "*".to_string(),
                        import_specifier: binding.specifier.clone(),
                        kind: ImportKind::Namespace,
                    });
                }
            }
        } else if let Some(binding) = ctx.imports.get(name) {
            imported_components.push(ImportedComponentUse {
                local_name: name.clone(),
                imported_name: binding.imported_name.clone(),
                import_specifier: binding.specifier.clone(),
                kind: binding.kind,
            });
        } else if ctx.local_definitions.contains(name) {
            local_components.push(name.clone());
        }
        // Anything else is a host element like <div>; dropped.
    }

    let (name, export_kind) = match ctx.exported_component {
        Some((name, kind)) => (name, kind),
        None => (None, ExportKind::None),
    };

    FileAnalysis {
        component: ComponentFacts {
            name,
            export_kind,
            is_client_directive: ctx.is_client_directive,
        },
        imported_components,
        local_components,
        exports: ctx.exports,
    }
}

/// Extract the text content of a node.
fn node_text<'a>(node: Node, source: &'a str) -> &'a str {
    source.get(node.start_byte()..node.end_byte()).unwrap_or("")
}

/// Extract the value of a string literal node, without quotes.
fn string_value(node: Node, source: &str) -> String {
    let mut value = String::new();
    let mut cursor = node.walk();
    for part in node.named_children(&mut cursor) {
        if matches!(part.kind(), "string_fragment" | "escape_sequence") {
            value.push_str(node_text(part, source));
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(source: &str) -> FileAnalysis {
        let mut scanner = Scanner::new().unwrap();
        scanner.analyze(source, SourceLanguage::Tsx).unwrap()
    }

    // ===== Directive Tests =====

    #[test]
    fn test_client_directive_detected() {
        let analysis = analyze("\"use client\";\nexport default function Page() { return <div />; }");
        assert!(analysis.component.is_client_directive);
    }

    #[test]
    fn test_single_quote_directive_detected() {
        let analysis = analyze("'use client'\nexport const Button = () => <button />;");
        assert!(analysis.component.is_client_directive);
    }

    #[test]
    fn test_directive_after_use_strict() {
        let analysis = analyze("'use strict';\n'use client';\nexport default function P() { return null; }");
        assert!(analysis.component.is_client_directive);
    }

    #[test]
    fn test_directive_after_comment() {
        let analysis = analyze("// banner\n'use client';\nexport default function P() { return null; }");
        assert!(analysis.component.is_client_directive);
    }

    #[test]
    fn test_no_directive_is_server() {
        let analysis = analyze("export default function Page() { return <div />; }");
        assert!(!analysis.component.is_client_directive);
    }

    #[test]
    fn test_string_in_body_is_not_directive() {
        let source = r#"
const label = "use client";
export default function Page() { return <span>{label}</span>; }
"#;
        assert!(!analyze(source).component.is_client_directive);
    }

    #[test]
    fn test_directive_after_statement_does_not_count() {
        let source = "const x = 1;\n\"use client\";\nexport default function P() { return null; }";
        assert!(!analyze(source).component.is_client_directive);
    }

    // ===== Import Resolution Tests =====

    #[test]
    fn test_default_import_usage() {
        let source = r#"
import Button from "./button";
export default function Page() { return <Button />; }
"#;
        let analysis = analyze(source);
        assert_eq!(analysis.imported_components.len(), 1);
        let usage = &analysis.imported_components[0];
        assert_eq!(usage.local_name, "Button");
        assert_eq!(usage.imported_name, "default");
        assert_eq!(usage.import_specifier, "./button");
        assert_eq!(usage.kind, ImportKind::Default);
    }

    #[test]
    fn test_named_import_usage() {
        let source = r#"
import { Card } from "./card";
export default function Page() { return <Card />; }
"#;
        let usage = &analyze(source).imported_components[0];
        assert_eq!(usage.local_name, "Card");
        assert_eq!(usage.imported_name, "Card");
        assert_eq!(usage.kind, ImportKind::Named);
    }

    #[test]
    fn test_aliased_named_import_usage() {
        let source = r#"
import { Card as Panel } from "./card";
export default function Page() { return <Panel />; }
"#;
        let usage = &analyze(source).imported_components[0];
        assert_eq!(usage.local_name, "Panel");
        assert_eq!(usage.imported_name, "Card");
        assert_eq!(usage.kind, ImportKind::Named);
    }

    #[test]
    fn test_namespace_member_usage() {
        let source = r#"
import * as UI from "./ui";
export default function Page() { return <UI.Item />; }
"#;
        let usage = &analyze(source).imported_components[0];
        assert_eq!(usage.local_name, "UI.Item");
        assert_eq!(usage.imported_name, "*");
        assert_eq!(usage.kind, ImportKind::Namespace);
    }

    #[test]
    fn test_deep_member_chain_is_skipped() {
        let source = r#"
import * as UI from "./ui";
export default function Page() { return <UI.Forms.Input />; }
"#;
        let analysis = analyze(source);
        assert!(analysis.imported_components.is_empty());
    }

    #[test]
    fn test_unused_import_produces_no_usage() {
        let source = r#"
import Button from "./button";
export default function Page() { return <div />; }
"#;
        assert!(analyze(source).imported_components.is_empty());
    }

    #[test]
    fn test_mixed_default_and_named_import() {
        let source = r#"
import Layout, { Sidebar } from "./layout";
export default function Page() { return <Layout><Sidebar /></Layout>; }
"#;
        let analysis = analyze(source);
        assert_eq!(analysis.imported_components.len(), 2);
        let names: Vec<_> = analysis
            .imported_components
            .iter()
            .map(|u| (u.local_name.as_str(), u.imported_name.as_str()))
            .collect();
        assert!(names.contains(&("Layout", "default")));
        assert!(names.contains(&("Sidebar", "Sidebar")));
    }

    #[test]
    fn test_type_only_import_is_harmless() {
        let source = r#"
import type { FC } from "react";
import { Card } from "./card";
const Page: FC = () => <Card />;
export default Page;
"#;
        let analysis = analyze(source);
        assert_eq!(analysis.imported_components.len(), 1);
        assert_eq!(analysis.imported_components[0].local_name, "Card");
    }

    // ===== Dynamic Import Tests =====

    #[test]
    fn test_next_dynamic_is_default_import() {
        let source = r#"
import dynamic from "next/dynamic";
const Chart = dynamic(() => import("./chart"));
export default function Page() { return <Chart />; }
"#;
        let analysis = analyze(source);
        let usage = analysis
            .imported_components
            .iter()
            .find(|u| u.local_name == "Chart")
            .unwrap();
        assert_eq!(usage.import_specifier, "./chart");
        assert_eq!(usage.imported_name, "default");
        assert_eq!(usage.kind, ImportKind::Default);
        // Not double-counted as a local definition.
        assert!(analysis.local_components.is_empty());
    }

    #[test]
    fn test_react_lazy_is_default_import() {
        let source = r#"
import React from "react";
const Widget = React.lazy(() => import("./widget"));
export default function Page() { return <Widget />; }
"#;
        let usage = &analyze(source).imported_components[0];
        assert_eq!(usage.local_name, "Widget");
        assert_eq!(usage.import_specifier, "./widget");
        assert_eq!(usage.kind, ImportKind::Default);
    }

    #[test]
    fn test_dynamic_with_block_body_return() {
        let source = r#"
import dynamic from "next/dynamic";
const Chart = dynamic(function () { return import("./chart"); });
export default function Page() { return <Chart />; }
"#;
        let usage = &analyze(source).imported_components[0];
        assert_eq!(usage.import_specifier, "./chart");
    }

    #[test]
    fn test_dynamic_with_options_argument() {
        let source = r#"
import dynamic from "next/dynamic";
const Map = dynamic(() => import("./map"), { ssr: false });
export default function Page() { return <Map />; }
"#;
        let usage = &analyze(source).imported_components[0];
        assert_eq!(usage.import_specifier, "./map");
    }

    // ===== Local Definition Tests =====

    #[test]
    fn test_local_function_component() {
        let source = r#"
function Greeting() { return <p>hi</p>; }
export default function Page() { return <Greeting />; }
"#;
        let analysis = analyze(source);
        assert_eq!(analysis.local_components, vec!["Greeting".to_string()]);
        assert!(analysis.imported_components.is_empty());
    }

    #[test]
    fn test_local_arrow_component() {
        let source = r#"
const Badge = () => <span />;
export default function Page() { return <Badge />; }
"#;
        assert_eq!(analyze(source).local_components, vec!["Badge".to_string()]);
    }

    #[test]
    fn test_host_elements_are_dropped() {
        let source = r#"
export default function Page() { return <div><span /></div>; }
"#;
        let analysis = analyze(source);
        assert!(analysis.imported_components.is_empty());
        assert!(analysis.local_components.is_empty());
    }

    #[test]
    fn test_import_shadows_nothing_import_wins() {
        // An import binding takes priority over a local with the same name.
        let source = r#"
import { Button } from "./button";
export default function Page() { return <Button />; }
function helper() { const Button = null; return Button; }
"#;
        let analysis = analyze(source);
        assert_eq!(analysis.imported_components.len(), 1);
    }

    // ===== Export Tests =====

    #[test]
    fn test_export_default_function_name() {
        let analysis = analyze("export default function DashboardPage() { return null; }");
        assert_eq!(analysis.component.name.as_deref(), Some("DashboardPage"));
        assert_eq!(analysis.component.export_kind, ExportKind::Default);
        assert_eq!(analysis.exports.len(), 1);
        assert_eq!(analysis.exports[0].name, "default");
    }

    #[test]
    fn test_export_default_identifier() {
        let source = "const Page = () => null;\nexport default Page;";
        let analysis = analyze(source);
        assert_eq!(analysis.component.name.as_deref(), Some("Page"));
        assert_eq!(analysis.component.export_kind, ExportKind::Default);
    }

    #[test]
    fn test_export_default_hoc_call_is_anonymous() {
        let source = "import { withAuth } from './auth';\nconst Profile = () => null;\nexport default withAuth(Profile);";
        let analysis = analyze(source);
        assert_eq!(analysis.component.name, None);
        assert_eq!(analysis.component.export_kind, ExportKind::Default);
    }

    #[test]
    fn test_first_named_export_heuristic() {
        let source = "export const First = () => null;\nexport const Second = () => null;";
        let analysis = analyze(source);
        assert_eq!(analysis.component.name.as_deref(), Some("First"));
        assert_eq!(analysis.component.export_kind, ExportKind::Named);
        assert_eq!(analysis.exports.len(), 2);
    }

    #[test]
    fn test_default_export_beats_named_candidate() {
        let source = "export const Helper = () => null;\nexport default function Page() { return null; }";
        let analysis = analyze(source);
        assert_eq!(analysis.component.name.as_deref(), Some("Page"));
        assert_eq!(analysis.component.export_kind, ExportKind::Default);
    }

    #[test]
    fn test_export_named_function() {
        let analysis = analyze("export function Widget() { return null; }");
        assert_eq!(analysis.component.name.as_deref(), Some("Widget"));
        assert_eq!(analysis.exports[0].name, "Widget");
        assert_eq!(analysis.exports[0].kind, ImportKind::Named);
    }

    #[test]
    fn test_export_clause() {
        let source = "const A = 1;\nconst B = 2;\nexport { A, B };";
        let analysis = analyze(source);
        let names: Vec<_> = analysis.exports.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(analysis.component.name.as_deref(), Some("A"));
    }

    #[test]
    fn test_export_star_re_export() {
        let analysis = analyze("export * from './components';");
        assert_eq!(analysis.exports.len(), 1);
        let record = &analysis.exports[0];
        assert_eq!(record.name, "*");
        assert_eq!(record.kind, ImportKind::Namespace);
        let re = record.re_export.as_ref().unwrap();
        assert_eq!(re.specifier, "./components");
        assert_eq!(re.imported_name, "*");
        // Re-exports never become the component candidate.
        assert_eq!(analysis.component.export_kind, ExportKind::None);
    }

    #[test]
    fn test_export_named_re_export() {
        let analysis = analyze("export { Button as Primary, Card } from './ui';");
        assert_eq!(analysis.exports.len(), 2);
        let first = &analysis.exports[0];
        assert_eq!(first.name, "Primary");
        assert_eq!(first.re_export.as_ref().unwrap().specifier, "./ui");
        assert_eq!(first.re_export.as_ref().unwrap().imported_name, "Button");
        let second = &analysis.exports[1];
        assert_eq!(second.name, "Card");
        assert_eq!(second.re_export.as_ref().unwrap().imported_name, "Card");
        // Pass-through exports never become the component candidate.
        assert_eq!(analysis.component.export_kind, ExportKind::None);
    }

    // ===== Error Tests =====

    #[test]
    fn test_parse_error_reports_position() {
        let err = Scanner::new()
            .unwrap()
            .analyze("export default function (((", SourceLanguage::Tsx)
            .unwrap_err();
        match err {
            ScanError::Parse { line, .. } => assert_eq!(line, 1),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    // ===== Purity =====

    #[test]
    fn test_analyze_is_pure() {
        let source = r#"
"use client";
import Button from "./button";
import * as UI from "./ui";
const Chart = dynamic(() => import("./chart"));
function Local() { return <div />; }
export default function Page() {
  return <main><Button /><UI.Item /><Chart /><Local /></main>;
}
"#;
        let mut scanner = Scanner::new().unwrap();
        let first = scanner.analyze(source, SourceLanguage::Tsx).unwrap();
        let second = scanner.analyze(source, SourceLanguage::Tsx).unwrap();
        assert_eq!(first, second);
    }

    // ===== Language Detection =====

    #[test]
    fn test_language_from_extension() {
        assert_eq!(
            SourceLanguage::from_extension("tsx"),
            Some(SourceLanguage::Tsx)
        );
        assert_eq!(
            SourceLanguage::from_extension("mjs"),
            Some(SourceLanguage::JavaScript)
        );
        assert_eq!(SourceLanguage::from_extension("css"), None);
    }

    #[test]
    fn test_plain_javascript_source() {
        let mut scanner = Scanner::new().unwrap();
        let analysis = scanner
            .analyze(
                "const util = require; module.exports = {};",
                SourceLanguage::JavaScript,
            )
            .unwrap();
        assert!(!analysis.component.is_client_directive);
    }
}
