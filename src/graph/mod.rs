//! Project graph data structures.
//!
//! The crawler produces a [`ProjectGraph`]: one [`GraphNode`] per scanned
//! file, keyed by canonical id, with resolved component edges between them.

pub mod project_graph;

pub use project_graph::{ChildLink, GraphNode, ProjectGraph};
