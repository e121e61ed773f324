//! Project-wide composition statistics.
//!
//! Counts client and server components at two levels: source-level (the
//! file carries `"use client"`) and effective (the file is reachable from a
//! source-level client component over the import graph, and therefore ends
//! up in the client bundle regardless of its own directive).

use std::collections::{BTreeSet, HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Bfs;
use serde::Serialize;

use crate::graph::ProjectGraph;

use super::routes::{classify_entry, EntryKind};

/// A component key imported by more than one file.
///
/// The key is `import_specifier + ":" + imported_name`, not the resolved
/// file id: two different relative specifiers reaching the same file are
/// counted separately. Known limitation, kept because consumers rely on the
/// specifier-level view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedComponentUsage {
    pub key: String,
    pub usage_count: usize,
    /// Ids of the importing files, sorted.
    pub used_by: Vec<String>,
}

/// Aggregate statistics over one scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectStats {
    pub total_files: usize,
    pub total_routes: usize,
    pub total_layouts: usize,

    /// Imported-component usages across all files, counted per usage.
    pub total_imported_components: usize,
    /// Locally defined component usages across all files.
    pub total_local_components: usize,
    /// Distinct `specifier:name` import keys.
    pub unique_imported_components: usize,
    /// Distinct `file:name` local components.
    pub unique_local_components: usize,

    /// Files carrying the `"use client"` directive.
    pub client_components: usize,
    /// Files without the directive.
    pub server_components: usize,
    /// Files that end up in the client bundle (directive or reachable from
    /// one).
    pub effective_client_components: usize,
    /// Files that stay on the server.
    pub effective_server_components: usize,
    /// Effective client share of all files, rounded to 3 decimals.
    pub ratio: f64,

    /// Import keys used by more than one file, by descending usage.
    pub shared_components: Vec<SharedComponentUsage>,
}

/// Compute statistics over a crawled graph and its entry files.
pub fn compute_stats(graph: &ProjectGraph, entries: &[String]) -> ProjectStats {
    let total_files = graph.len();

    let mut total_routes = 0;
    let mut total_layouts = 0;
    for entry in entries {
        match classify_entry(entry) {
            EntryKind::Layout => total_layouts += 1,
            EntryKind::Page => total_routes += 1,
        }
    }

    let mut client_components = 0;
    let mut server_components = 0;
    let mut total_imported_components = 0;
    let mut total_local_components = 0;
    let mut usage_order: Vec<String> = Vec::new();
    let mut usage_map: HashMap<String, BTreeSet<String>> = HashMap::new();
    let mut unique_locals: HashSet<String> = HashSet::new();

    for node in graph.iter() {
        if node.analysis.component.is_client_directive {
            client_components += 1;
        } else {
            server_components += 1;
        }

        for usage in &node.analysis.imported_components {
            total_imported_components += 1;
            let key = format!("{}:{}", usage.import_specifier, usage.imported_name);
            let users = usage_map.entry(key.clone()).or_insert_with(|| {
                usage_order.push(key);
                BTreeSet::new()
            });
            users.insert(node.id.clone());
        }

        for local in &node.analysis.local_components {
            total_local_components += 1;
            unique_locals.insert(format!("{}:{}", node.id, local));
        }
    }

    let effective_client_components = effective_client_count(graph);
    // Child edges can point at files that failed to scan; those ids count
    // as reached but have no node, so clamp instead of underflowing.
    let effective_server_components = total_files.saturating_sub(effective_client_components);

    let ratio = if total_files > 0 {
        let raw = effective_client_components as f64 / total_files as f64;
        (raw * 1000.0).round() / 1000.0
    } else {
        0.0
    };

    let mut shared_components: Vec<SharedComponentUsage> = usage_order
        .iter()
        .filter_map(|key| {
            let users = &usage_map[key];
            (users.len() > 1).then(|| SharedComponentUsage {
                key: key.clone(),
                usage_count: users.len(),
                used_by: users.iter().cloned().collect(),
            })
        })
        .collect();
    // Stable sort: ties keep first-seen order.
    shared_components.sort_by(|a, b| b.usage_count.cmp(&a.usage_count));

    ProjectStats {
        total_files,
        total_routes,
        total_layouts,
        total_imported_components,
        total_local_components,
        unique_imported_components: usage_map.len(),
        unique_local_components: unique_locals.len(),
        client_components,
        server_components,
        effective_client_components,
        effective_server_components,
        ratio,
        shared_components,
    }
}

/// Size of the effective client set: every source-level client file plus
/// everything reachable from one along child edges, regardless of the
/// reached file's own directive.
fn effective_client_count(graph: &ProjectGraph) -> usize {
    let mut reach: DiGraph<(), ()> = DiGraph::new();
    let mut indices: HashMap<&str, NodeIndex> = HashMap::new();

    for node in graph.iter() {
        indices.insert(node.id.as_str(), reach.add_node(()));
    }
    for node in graph.iter() {
        let parent = indices[node.id.as_str()];
        for link in &node.children {
            let child = *indices
                .entry(link.child_id.as_str())
                .or_insert_with(|| reach.add_node(()));
            reach.add_edge(parent, child, ());
        }
    }

    // One virtual root fanning out to every client-directive file lets a
    // single traversal cover all seeds while shared subgraphs and cycles
    // are visited once.
    let root = reach.add_node(());
    for node in graph.iter() {
        if node.analysis.component.is_client_directive {
            reach.add_edge(root, indices[node.id.as_str()], ());
        }
    }

    let mut reached = 0usize;
    let mut bfs = Bfs::new(&reach, root);
    while let Some(ix) = bfs.next(&reach) {
        if ix != root {
            reached += 1;
        }
    }
    reached
}
