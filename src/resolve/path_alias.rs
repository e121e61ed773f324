//! Path alias resolution for tsconfig `paths` support.
//!
//! Pure logic, no I/O. A compiled [`AliasResolver`] maps import specifiers
//! like `"@/components/Button"` to base-relative paths according to the
//! project's `paths` table.

use std::collections::BTreeMap;

/// A single compiled `paths` pattern.
#[derive(Debug, Clone)]
struct CompiledPattern {
    /// Literal text before the wildcard (the whole pattern for exact keys).
    prefix: String,
    /// Literal text after the wildcard; `None` for exact-match patterns.
    suffix: Option<String>,
    /// Replacement targets. Only the first is ever used; tsconfig allows
    /// several candidates per pattern but fallback probing is a host concern.
    targets: Vec<String>,
}

impl CompiledPattern {
    /// Match a specifier, returning the captured wildcard text.
    /// Exact patterns capture the empty string.
    fn capture<'a>(&self, specifier: &'a str) -> Option<&'a str> {
        match &self.suffix {
            None => (specifier == self.prefix).then_some(""),
            Some(suffix) => {
                let rest = specifier.strip_prefix(self.prefix.as_str())?;
                rest.strip_suffix(suffix.as_str())
            }
        }
    }
}

/// Resolver compiled from a tsconfig-style alias table.
///
/// # Example
///
/// ```rust
/// use std::collections::BTreeMap;
/// use renderscope::resolve::AliasResolver;
///
/// let mut paths = BTreeMap::new();
/// paths.insert("@/*".to_string(), vec!["./src/*".to_string()]);
/// let resolver = AliasResolver::compile("/project", &paths);
///
/// assert_eq!(
///     resolver.resolve("@/utils"),
///     Some("/project/src/utils".to_string())
/// );
/// assert_eq!(resolver.resolve("react"), None);
/// ```
#[derive(Debug, Clone)]
pub struct AliasResolver {
    base_url: String,
    patterns: Vec<CompiledPattern>,
}

impl AliasResolver {
    /// Compile an alias table against a base URL.
    ///
    /// Patterns are ordered by the length of their literal prefix,
    /// descending, so `"@/components/*"` is tried before `"@/*"` no matter
    /// how the table is written. Ties keep their incoming order.
    pub fn compile(base_url: &str, paths: &BTreeMap<String, Vec<String>>) -> Self {
        let mut patterns: Vec<CompiledPattern> = paths
            .iter()
            .map(|(pattern, targets)| match pattern.split_once('*') {
                Some((prefix, suffix)) => CompiledPattern {
                    prefix: prefix.to_string(),
                    suffix: Some(suffix.to_string()),
                    targets: targets.clone(),
                },
                None => CompiledPattern {
                    prefix: pattern.to_string(),
                    suffix: None,
                    targets: targets.clone(),
                },
            })
            .collect();

        patterns.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            patterns,
        }
    }

    /// Resolve a specifier through the alias table.
    ///
    /// Returns `None` when no pattern matches, which signals "not an alias,
    /// try normal resolution" to the caller.
    pub fn resolve(&self, specifier: &str) -> Option<String> {
        for pattern in &self.patterns {
            let Some(wildcard) = pattern.capture(specifier) else {
                continue;
            };
            let target = pattern.targets.first()?;
            let substituted = if target.contains('*') {
                target.replacen('*', wildcard, 1)
            } else {
                target.clone()
            };
            return Some(self.join_base(&substituted));
        }
        None
    }

    /// Join a replacement target against the base URL, normalizing a
    /// leading `./`. Absolute targets pass through untouched.
    fn join_base(&self, target: &str) -> String {
        let normalized = target.strip_prefix("./").unwrap_or(target);
        if normalized.starts_with('/') {
            return normalized.to_string();
        }
        format!("{}/{}", self.base_url, normalized)
    }
}
