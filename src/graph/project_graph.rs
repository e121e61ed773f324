//! Project graph built from per-file analyses.
//!
//! Nodes are keyed by the canonical file id the host assigns (for the
//! filesystem host, the cleaned absolute path). The crawler appends nodes as
//! files finish scanning; nodes are write-once and re-imports of the same
//! file collapse onto one node.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

use crate::analysis::FileAnalysis;

/// A resolved edge from a file to one of the components it renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, serde::Deserialize)]
pub struct ChildLink {
    /// The JSX tag as used in the parent (e.g. `Button`, `UI.Item`).
    pub as_used_name: String,
    /// The import specifier as written in the parent.
    pub import_specifier: String,
    /// The canonical id of the resolved child file.
    pub child_id: String,
}

/// One scanned file in the project graph.
///
/// `children` only contains imports that resolved to a real file; external
/// packages and dead aliases are dropped during the crawl, so there are no
/// placeholder entries.
#[derive(Debug, Clone, PartialEq, Serialize, serde::Deserialize)]
pub struct GraphNode {
    /// Canonical file id assigned by the host.
    pub id: String,
    /// The scanner's output for this file.
    pub analysis: FileAnalysis,
    /// Resolved component edges, in resolution order.
    pub children: Vec<ChildLink>,
}

/// Append-only, insertion-ordered map from file id to [`GraphNode`].
///
/// # Example
///
/// ```rust
/// use renderscope::graph::{GraphNode, ProjectGraph};
/// use renderscope::analysis::FileAnalysis;
///
/// let mut graph = ProjectGraph::new();
/// graph.insert(GraphNode {
///     id: "/app/page.tsx".to_string(),
///     analysis: FileAnalysis::default(),
///     children: vec![],
/// });
/// assert_eq!(graph.len(), 1);
/// assert!(graph.get("/app/page.tsx").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProjectGraph {
    nodes: Vec<GraphNode>,
    /// Maps file ids to positions in `nodes` for O(1) lookup.
    index: HashMap<String, usize>,
}

impl ProjectGraph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node. The first write for an id wins; a second insert for
    /// the same id is ignored and returns `false`.
    pub fn insert(&mut self, node: GraphNode) -> bool {
        if self.index.contains_key(&node.id) {
            return false;
        }
        self.index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        true
    }

    /// Look up a node by file id.
    pub fn get(&self, id: &str) -> Option<&GraphNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Whether a node exists for the given id.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of scanned files.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter()
    }

    /// Iterate file ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }
}

impl Serialize for ProjectGraph {
    /// Serializes as a JSON object keyed by file id, in insertion order.
    /// Shared nodes are referenced from elsewhere by id, never embedded, so
    /// the output is plain acyclic JSON.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.nodes.len()))?;
        for node in &self.nodes {
            map.serialize_entry(&node.id, node)?;
        }
        map.end()
    }
}
