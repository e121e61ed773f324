//! Host abstraction: file reads and import resolution.
//!
//! The crawler is host-agnostic. A [`Host`] supplies file contents and turns
//! import specifiers into canonical file ids; everything else (graph
//! building, classification, stats) is pure. [`FsHost`] is the native
//! filesystem backend; [`MemoryHost`] serves tests and embedders that
//! already hold sources in memory.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use path_clean::PathClean;
use thiserror::Error;

use crate::resolve::tsconfig::{self, Tsconfig};
use crate::resolve::AliasResolver;

/// Errors a host can report from `read_file`.
#[derive(Error, Debug)]
pub enum HostError {
    #[error("file not found: {id}")]
    NotFound { id: String },

    #[error("failed to read {id}: {source}")]
    Io {
        id: String,
        #[source]
        source: std::io::Error,
    },
}

/// Extensions probed when a specifier has none, in priority order.
pub const RESOLVE_EXTENSIONS: [&str; 4] = ["tsx", "ts", "jsx", "js"];

/// Supplies file contents and import resolution to the crawler.
///
/// `resolve` returns `None` for anything that is not a project file: bare
/// package names, dead aliases, and missing files all land there. Returning
/// `None` is a designed outcome, never an error.
pub trait Host {
    /// Read the content of a file by canonical id.
    fn read_file(&self, id: &str) -> Result<String, HostError>;

    /// Resolve an import specifier relative to the importing file.
    fn resolve(&self, specifier: &str, importer: &str) -> Option<String>;
}

impl<H: Host + ?Sized> Host for &H {
    fn read_file(&self, id: &str) -> Result<String, HostError> {
        (**self).read_file(id)
    }

    fn resolve(&self, specifier: &str, importer: &str) -> Option<String> {
        (**self).resolve(specifier, importer)
    }
}

/// Native filesystem host.
///
/// Canonical ids are cleaned absolute paths. File contents are cached for
/// the lifetime of the host; a host is meant to live for exactly one scan
/// and be dropped with it, so the cache needs no eviction.
pub struct FsHost {
    file_cache: Mutex<HashMap<String, String>>,
    alias_resolver: Option<AliasResolver>,
}

impl FsHost {
    /// Create a host rooted at the given directory.
    ///
    /// The nearest `tsconfig.json` at or above `root` is loaded (following
    /// file-relative `extends` chains) to configure path aliases. A missing
    /// or malformed tsconfig just disables alias resolution.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            file_cache: Mutex::new(HashMap::new()),
            alias_resolver: load_alias_resolver(root.as_ref()),
        }
    }

    fn probe(&self, candidate: &Path) -> Option<String> {
        if candidate.is_file() {
            return Some(candidate.to_string_lossy().into_owned());
        }
        for ext in RESOLVE_EXTENSIONS {
            let with_ext = PathBuf::from(format!("{}.{ext}", candidate.display()));
            if with_ext.is_file() {
                return Some(with_ext.to_string_lossy().into_owned());
            }
        }
        if candidate.is_dir() {
            for ext in RESOLVE_EXTENSIONS {
                let index = candidate.join(format!("index.{ext}"));
                if index.is_file() {
                    return Some(index.to_string_lossy().into_owned());
                }
            }
        }
        None
    }
}

impl Host for FsHost {
    fn read_file(&self, id: &str) -> Result<String, HostError> {
        if let Some(content) = self.file_cache.lock().get(id) {
            return Ok(content.clone());
        }

        let content = fs::read_to_string(id).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                HostError::NotFound { id: id.to_string() }
            } else {
                HostError::Io {
                    id: id.to_string(),
                    source: e,
                }
            }
        })?;

        self.file_cache
            .lock()
            .insert(id.to_string(), content.clone());
        Ok(content)
    }

    fn resolve(&self, specifier: &str, importer: &str) -> Option<String> {
        // Aliases first: "@/components/Button" style specifiers look like
        // bare packages but must win over the package check.
        if let Some(resolver) = &self.alias_resolver {
            if let Some(aliased) = resolver.resolve(specifier) {
                if let Some(found) = self.probe(&PathBuf::from(aliased).clean()) {
                    return Some(found);
                }
            }
        }

        // Bare package names are external; not resolving them is the
        // expected outcome, not a failure.
        if !specifier.starts_with('.') && !specifier.starts_with('/') {
            return None;
        }

        let importer_dir = Path::new(importer).parent()?;
        let candidate = importer_dir.join(specifier).clean();
        self.probe(&candidate)
    }
}

fn load_alias_resolver(root: &Path) -> Option<AliasResolver> {
    let config_path = root
        .ancestors()
        .map(|dir| dir.join("tsconfig.json"))
        .find(|p| p.is_file())?;
    let config = load_tsconfig_chain(&config_path, 0);

    let options = config.compiler_options?;
    let paths = options.paths?;
    let config_dir = config_path.parent()?;
    let base_url = match options.base_url {
        Some(base) => config_dir.join(base).clean(),
        None => config_dir.to_path_buf(),
    };

    Some(AliasResolver::compile(&base_url.to_string_lossy(), &paths))
}

const MAX_EXTENDS_DEPTH: usize = 8;

/// Load a tsconfig and fold in its `extends` chain. Only file-relative
/// parents are followed; package-style `extends` specifiers and over-deep
/// chains degrade to the child config alone.
fn load_tsconfig_chain(path: &Path, depth: usize) -> Tsconfig {
    let content = fs::read_to_string(path).unwrap_or_default();
    let child = tsconfig::parse(&content);

    let Some(extends) = child.extends.clone() else {
        return child;
    };
    if depth >= MAX_EXTENDS_DEPTH || !(extends.starts_with('.') || extends.starts_with('/')) {
        return tsconfig::merge(&Tsconfig::default(), &child);
    }

    let Some(parent_dir) = path.parent() else {
        return tsconfig::merge(&Tsconfig::default(), &child);
    };
    let mut parent_path = parent_dir.join(&extends).clean();
    if parent_path.extension().is_none() {
        parent_path.set_extension("json");
    }

    let parent = load_tsconfig_chain(&parent_path, depth + 1);
    tsconfig::merge(&parent, &child)
}

/// In-memory host for tests and embedders.
///
/// Resolution handles relative and absolute specifiers with the same
/// extension and index probing as [`FsHost`], but has no alias table.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    files: HashMap<String, String>,
}

impl MemoryHost {
    /// Creates an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file under the given id.
    pub fn insert(&mut self, id: impl Into<String>, content: impl Into<String>) {
        self.files.insert(id.into(), content.into());
    }

    fn probe(&self, candidate: &str) -> Option<String> {
        if self.files.contains_key(candidate) {
            return Some(candidate.to_string());
        }
        for ext in RESOLVE_EXTENSIONS {
            let with_ext = format!("{candidate}.{ext}");
            if self.files.contains_key(&with_ext) {
                return Some(with_ext);
            }
        }
        for ext in RESOLVE_EXTENSIONS {
            let index = format!("{candidate}/index.{ext}");
            if self.files.contains_key(&index) {
                return Some(index);
            }
        }
        None
    }
}

impl Host for MemoryHost {
    fn read_file(&self, id: &str) -> Result<String, HostError> {
        self.files
            .get(id)
            .cloned()
            .ok_or_else(|| HostError::NotFound { id: id.to_string() })
    }

    fn resolve(&self, specifier: &str, importer: &str) -> Option<String> {
        if !specifier.starts_with('.') && !specifier.starts_with('/') {
            return None;
        }
        let candidate = if specifier.starts_with('/') {
            PathBuf::from(specifier).clean()
        } else {
            Path::new(importer).parent()?.join(specifier).clean()
        };
        self.probe(&candidate.to_string_lossy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> MemoryHost {
        let mut host = MemoryHost::new();
        host.insert("/app/page.tsx", "export default function P() {}");
        host.insert("/components/button.tsx", "export const Button = 1;");
        host.insert("/components/card/index.ts", "export const Card = 1;");
        host
    }

    #[test]
    fn test_memory_read_file() {
        let host = host();
        assert!(host.read_file("/app/page.tsx").is_ok());
        assert!(matches!(
            host.read_file("/missing.tsx"),
            Err(HostError::NotFound { .. })
        ));
    }

    #[test]
    fn test_memory_resolve_exact() {
        let host = host();
        assert_eq!(
            host.resolve("./page.tsx", "/app/layout.tsx"),
            Some("/app/page.tsx".to_string())
        );
    }

    #[test]
    fn test_memory_resolve_with_extension_probe() {
        let host = host();
        assert_eq!(
            host.resolve("../components/button", "/app/page.tsx"),
            Some("/components/button.tsx".to_string())
        );
    }

    #[test]
    fn test_memory_resolve_index_file() {
        let host = host();
        assert_eq!(
            host.resolve("../components/card", "/app/page.tsx"),
            Some("/components/card/index.ts".to_string())
        );
    }

    #[test]
    fn test_memory_bare_package_is_unresolved() {
        let host = host();
        assert_eq!(host.resolve("react", "/app/page.tsx"), None);
        assert_eq!(host.resolve("@scope/pkg", "/app/page.tsx"), None);
    }

    #[test]
    fn test_memory_missing_file_is_unresolved() {
        let host = host();
        assert_eq!(host.resolve("./nothing", "/app/page.tsx"), None);
    }

    mod fs_host {
        use super::*;

        /// Builds a throwaway project tree with a tsconfig extends chain.
        fn project() -> PathBuf {
            let root = std::env::temp_dir().join(format!(
                "renderscope-host-{}-{}",
                std::process::id(),
                std::thread::current().name().unwrap_or("t").replace("::", "-"),
            ));
            let _ = fs::remove_dir_all(&root);
            fs::create_dir_all(root.join("src/app")).unwrap();
            fs::create_dir_all(root.join("src/components/card")).unwrap();

            fs::write(
                root.join("tsconfig.base.json"),
                r#"{ "compilerOptions": { "baseUrl": "." } }"#,
            )
            .unwrap();
            fs::write(
                root.join("tsconfig.json"),
                r#"{
  // aliases
  "extends": "./tsconfig.base.json",
  "compilerOptions": { "paths": { "@/*": ["./src/*"] } }
}"#,
            )
            .unwrap();

            fs::write(root.join("src/app/page.tsx"), "export default function P() {}").unwrap();
            fs::write(root.join("src/components/button.tsx"), "export const B = 1;").unwrap();
            fs::write(root.join("src/components/card/index.tsx"), "export const C = 1;").unwrap();

            root.canonicalize().unwrap()
        }

        #[test]
        fn test_fs_resolve_relative_with_extension_probe() {
            let root = project();
            let host = FsHost::new(&root);
            let importer = root.join("src/app/page.tsx");

            let resolved = host
                .resolve("../components/button", &importer.to_string_lossy())
                .unwrap();
            assert_eq!(resolved, root.join("src/components/button.tsx").to_string_lossy());

            fs::remove_dir_all(&root).unwrap();
        }

        #[test]
        fn test_fs_resolve_directory_index() {
            let root = project();
            let host = FsHost::new(&root);
            let importer = root.join("src/app/page.tsx");

            let resolved = host
                .resolve("../components/card", &importer.to_string_lossy())
                .unwrap();
            assert_eq!(
                resolved,
                root.join("src/components/card/index.tsx").to_string_lossy()
            );

            fs::remove_dir_all(&root).unwrap();
        }

        #[test]
        fn test_fs_alias_through_extends_chain() {
            let root = project();
            // baseUrl comes from the extended parent config, paths from the
            // child; the alias only works if the chain merged.
            let host = FsHost::new(&root);
            let importer = root.join("src/app/page.tsx");

            let resolved = host
                .resolve("@/components/button", &importer.to_string_lossy())
                .unwrap();
            assert_eq!(resolved, root.join("src/components/button.tsx").to_string_lossy());

            fs::remove_dir_all(&root).unwrap();
        }

        #[test]
        fn test_fs_bare_package_is_unresolved() {
            let root = project();
            let host = FsHost::new(&root);
            let importer = root.join("src/app/page.tsx");

            assert_eq!(host.resolve("react", &importer.to_string_lossy()), None);

            fs::remove_dir_all(&root).unwrap();
        }

        #[test]
        fn test_fs_read_file_not_found() {
            let root = project();
            let host = FsHost::new(&root);

            let missing = root.join("src/missing.tsx");
            assert!(matches!(
                host.read_file(&missing.to_string_lossy()),
                Err(HostError::NotFound { .. })
            ));

            fs::remove_dir_all(&root).unwrap();
        }
    }
}
