//! Route shaping for Next.js app-directory entry files.
//!
//! Entry files map to URL routes by their directory path: parenthesized
//! route-group segments organize files without affecting the URL, so they
//! are stripped from the route and reported separately.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::{GraphNode, ProjectGraph};

/// Errors from aggregation.
#[derive(Error, Debug)]
pub enum AggregateError {
    /// An entry file has no node in the graph. The crawler records every
    /// entry it successfully scans, so this indicates a broken contract
    /// between crawl and aggregation, not bad input.
    #[error("no graph node recorded for entry file: {entry}")]
    MissingEntryNode { entry: String },
}

/// What kind of routing root an entry file is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Page,
    Layout,
}

/// Route information extracted from an entry file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteInfo {
    /// Leading-slash URL path, route groups removed.
    pub route: String,
    /// Concatenated route-group segments in path order, if any.
    pub route_group: Option<String>,
}

/// One routing root with its resolved component tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteEntry {
    pub route: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_group: Option<String>,
    pub entry_kind: EntryKind,
    pub entry_file: String,
    /// Root node for this entry. Children reference other nodes by id.
    pub tree: GraphNode,
}

/// Extract the route and route group from an entry file path.
///
/// `app/(marketing)/blog/[slug]/page.tsx` under app dir `app` yields
/// route `/blog/[slug]` and route group `(marketing)`.
pub fn extract_route_info(file_path: &str, app_dir: &str) -> RouteInfo {
    let normalized_file = file_path.replace('\\', "/");
    let normalized_app = app_dir.replace('\\', "/");
    let normalized_app = normalized_app.trim_end_matches('/');

    let relative = normalized_file
        .strip_prefix(normalized_app)
        .unwrap_or(&normalized_file);
    let relative = relative.trim_start_matches('/');

    let mut segments: Vec<&str> = relative.split('/').collect();
    // Drop the filename (page.tsx, layout.tsx, ...).
    segments.pop();

    let (groups, route_segments): (Vec<&str>, Vec<&str>) =
        segments.into_iter().partition(|s| is_route_group(s));

    let route = if route_segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", route_segments.join("/"))
    };

    RouteInfo {
        route,
        route_group: (!groups.is_empty()).then(|| groups.concat()),
    }
}

fn is_route_group(segment: &str) -> bool {
    segment.len() >= 2 && segment.starts_with('(') && segment.ends_with(')')
}

/// Classify an entry file by its filename prefix.
pub fn classify_entry(file_path: &str) -> EntryKind {
    let file_name = file_path
        .replace('\\', "/")
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string();
    if file_name.starts_with("layout.") {
        EntryKind::Layout
    } else {
        EntryKind::Page
    }
}

/// Build one [`RouteEntry`] per entry file, in input order.
pub fn aggregate(
    graph: &ProjectGraph,
    entries: &[String],
    app_dir: &str,
) -> Result<Vec<RouteEntry>, AggregateError> {
    entries
        .iter()
        .map(|entry| {
            let node = graph
                .get(entry)
                .ok_or_else(|| AggregateError::MissingEntryNode {
                    entry: entry.clone(),
                })?;
            let info = extract_route_info(entry, app_dir);
            Ok(RouteEntry {
                route: info.route,
                route_group: info.route_group,
                entry_kind: classify_entry(entry),
                entry_file: entry.clone(),
                tree: node.clone(),
            })
        })
        .collect()
}
