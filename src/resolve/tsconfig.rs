//! tsconfig.json parsing and `extends` merge semantics.
//!
//! Pure logic: the host reads files and walks the `extends` chain, this
//! module parses individual documents and merges parent/child pairs.
//! tsconfig files routinely contain `//` and `/* */` comments that strict
//! JSON rejects, so parsing strips them first — and on any remaining parse
//! failure degrades to an empty config instead of erroring.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The subset of `compilerOptions` this tool cares about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<BTreeMap<String, Vec<String>>>,
}

/// A parsed tsconfig document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tsconfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compiler_options: Option<CompilerOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
}

/// Parse tsconfig content. Never fails: malformed input yields the empty
/// config, since a broken tsconfig should degrade alias resolution, not
/// abort a scan.
pub fn parse(content: &str) -> Tsconfig {
    let stripped = strip_json_comments(content);
    serde_json::from_str(&stripped).unwrap_or_default()
}

/// Merge a parent config into a child, child taking precedence.
///
/// `compilerOptions` merges shallowly except `paths`, which is wholesale
/// replaced by the child's table when present. `extends` is consumed by the
/// chain walk and never propagated into the result.
pub fn merge(parent: &Tsconfig, child: &Tsconfig) -> Tsconfig {
    let compiler_options = match (&parent.compiler_options, &child.compiler_options) {
        (None, None) => None,
        (parent_opts, child_opts) => {
            let parent_opts = parent_opts.clone().unwrap_or_default();
            let child_opts = child_opts.clone().unwrap_or_default();
            Some(CompilerOptions {
                base_url: child_opts.base_url.or(parent_opts.base_url),
                paths: child_opts.paths.or(parent_opts.paths),
            })
        }
    };

    Tsconfig {
        compiler_options,
        extends: None,
    }
}

/// Strip `//` and `/* */` comments, tracking string literal boundaries and
/// escape sequences so a `//` inside a string survives.
fn strip_json_comments(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let chars: Vec<char> = content.chars().collect();
    let mut i = 0;
    let mut in_string = false;
    let mut string_delimiter = '"';

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        if in_string {
            result.push(c);
            if c == '\\' {
                if let Some(escaped) = next {
                    result.push(escaped);
                    i += 2;
                    continue;
                }
            } else if c == string_delimiter {
                in_string = false;
            }
            i += 1;
            continue;
        }

        match c {
            '"' | '\'' => {
                in_string = true;
                string_delimiter = c;
                result.push(c);
                i += 1;
            }
            '/' if next == Some('/') => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            '/' if next == Some('*') => {
                i += 2;
                while i + 1 < chars.len() && !(chars[i] == '*' && chars[i + 1] == '/') {
                    i += 1;
                }
                i += 2;
            }
            _ => {
                result.push(c);
                i += 1;
            }
        }
    }

    result
}
