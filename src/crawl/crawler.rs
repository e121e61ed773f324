//! Recursive depth-first crawler.
//!
//! Starting from an entry file, the crawler reads, scans, and resolves files
//! through a [`Host`] until the reachable project subgraph is mapped. A
//! visited set breaks import cycles and deduplicates shared files; one
//! crawler instance can serve many entry points so the whole session shares
//! a single cache of scanned files.

use std::collections::HashSet;

use crate::analysis::{ScanResult, Scanner, SourceLanguage};
use crate::graph::{ChildLink, GraphNode, ProjectGraph};
use crate::observer::{NoopObserver, ScanObserver};

use super::host::Host;

/// Depth-first project crawler over a [`Host`].
///
/// Per-file failures (unreadable or unparseable files) never abort a crawl:
/// the file is reported to the observer, recorded as degraded, and its
/// subtree is simply absent from the graph.
pub struct Crawler<'h, H: Host> {
    host: &'h H,
    observer: Box<dyn ScanObserver>,
    scanner: Scanner,
    visited: HashSet<String>,
    graph: ProjectGraph,
    degraded: Vec<String>,
}

impl<'h, H: Host> Crawler<'h, H> {
    /// Create a crawler with the silent observer.
    pub fn new(host: &'h H) -> ScanResult<Self> {
        Self::with_observer(host, Box::new(NoopObserver))
    }

    /// Create a crawler that reports progress to the given observer.
    pub fn with_observer(host: &'h H, observer: Box<dyn ScanObserver>) -> ScanResult<Self> {
        Ok(Self {
            host,
            observer,
            scanner: Scanner::new()?,
            visited: HashSet::new(),
            graph: ProjectGraph::new(),
            degraded: Vec::new(),
        })
    }

    /// Crawl from an entry file, adding everything reachable to the shared
    /// graph. Files already visited in this session — by an earlier entry
    /// point or through a cycle — are not re-scanned.
    pub fn crawl(&mut self, entry: &str) {
        if !self.visited.insert(entry.to_string()) {
            return;
        }
        self.observer.file_started(entry);

        let source = match self.host.read_file(entry) {
            Ok(source) => source,
            Err(e) => {
                self.observer.file_failed(entry, &e.to_string());
                self.degraded.push(entry.to_string());
                return;
            }
        };

        let language = SourceLanguage::from_path(entry).unwrap_or(SourceLanguage::Tsx);
        let analysis = match self.scanner.analyze(&source, language) {
            Ok(analysis) => analysis,
            Err(e) => {
                self.observer.file_failed(entry, &e.to_string());
                self.degraded.push(entry.to_string());
                return;
            }
        };

        let mut children = Vec::new();
        for usage in &analysis.imported_components {
            match self.host.resolve(&usage.import_specifier, entry) {
                Some(child_id) => children.push(ChildLink {
                    as_used_name: usage.local_name.clone(),
                    import_specifier: usage.import_specifier.clone(),
                    child_id,
                }),
                None => {
                    self.observer
                        .import_unresolved(&usage.import_specifier, entry);
                }
            }
        }

        for link in &children {
            let child_id = link.child_id.clone();
            self.crawl(&child_id);
        }

        self.graph.insert(GraphNode {
            id: entry.to_string(),
            analysis,
            children,
        });
    }

    /// The graph built so far.
    pub fn graph(&self) -> &ProjectGraph {
        &self.graph
    }

    /// Files that failed to read or parse during this session.
    pub fn degraded_files(&self) -> &[String] {
        &self.degraded
    }

    /// Consume the crawler, returning the graph and the degraded-file list.
    pub fn into_parts(self) -> (ProjectGraph, Vec<String>) {
        (self.graph, self.degraded)
    }
}
