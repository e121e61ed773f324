//! Bounded worker-pool crawler.
//!
//! Same contract as the sequential [`Crawler`](super::Crawler), but file
//! reads and scans run on a fixed number of worker threads. The single
//! coordination point is a lock-protected claim map: a worker claims a file
//! before scanning it, and a file already claimed — queued, in progress, or
//! done — is never scanned again. Nodes are write-once; nothing mutates a
//! recorded node after insertion.
//!
//! Cancellation is cooperative: workers check the flag between files, so a
//! cancelled crawl returns a valid partially populated graph.

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

use crate::analysis::{Scanner, SourceLanguage};
use crate::graph::{ChildLink, GraphNode, ProjectGraph};
use crate::observer::{NoopObserver, ScanObserver};

use super::host::Host;

struct CrawlState {
    queue: VecDeque<String>,
    /// Every id ever queued. Claiming at enqueue time is what guarantees
    /// each file is scanned at most once across all workers.
    claimed: HashSet<String>,
    in_flight: usize,
    nodes: Vec<GraphNode>,
    degraded: Vec<String>,
}

/// Crawler that fans file scans out over a worker pool.
pub struct ParallelCrawler<'h, H: Host + Sync> {
    host: &'h H,
    workers: usize,
    observer: Arc<dyn ScanObserver>,
    cancel: Arc<AtomicBool>,
}

impl<'h, H: Host + Sync> ParallelCrawler<'h, H> {
    /// Create a crawler with `workers` threads (at least one).
    pub fn new(host: &'h H, workers: usize) -> Self {
        Self::with_observer(host, workers, Arc::new(NoopObserver))
    }

    /// Create a crawler that reports progress to the given observer.
    pub fn with_observer(host: &'h H, workers: usize, observer: Arc<dyn ScanObserver>) -> Self {
        Self {
            host,
            workers: workers.max(1),
            observer,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that abandons the crawl when set. Workers finish their current
    /// file and exit; the graph built so far is returned as-is.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Crawl from the given entry files and return the graph plus the ids
    /// that failed to read or parse.
    ///
    /// Node insertion order under parallelism is scheduling-dependent, so
    /// nodes are recorded in sorted id order to keep output deterministic.
    /// Child order inside each node is still that file's resolution order.
    pub fn crawl(&self, entries: &[String]) -> (ProjectGraph, Vec<String>) {
        let state = Mutex::new(CrawlState {
            queue: VecDeque::new(),
            claimed: HashSet::new(),
            in_flight: 0,
            nodes: Vec::new(),
            degraded: Vec::new(),
        });
        let work_ready = Condvar::new();

        {
            let mut shared = state.lock();
            for entry in entries {
                if shared.claimed.insert(entry.clone()) {
                    shared.queue.push_back(entry.clone());
                }
            }
        }

        std::thread::scope(|scope| {
            for _ in 0..self.workers {
                scope.spawn(|| self.worker(&state, &work_ready));
            }
        });

        let shared = state.into_inner();
        let mut nodes = shared.nodes;
        nodes.sort_by(|a, b| a.id.cmp(&b.id));
        let mut graph = ProjectGraph::new();
        for node in nodes {
            graph.insert(node);
        }
        let mut degraded = shared.degraded;
        degraded.sort();
        (graph, degraded)
    }

    fn worker(&self, state: &Mutex<CrawlState>, work_ready: &Condvar) {
        let Ok(mut scanner) = Scanner::new() else {
            return;
        };

        loop {
            let id = {
                let mut shared = state.lock();
                loop {
                    if self.cancel.load(Ordering::Relaxed) {
                        work_ready.notify_all();
                        return;
                    }
                    if let Some(id) = shared.queue.pop_front() {
                        shared.in_flight += 1;
                        break id;
                    }
                    if shared.in_flight == 0 {
                        // Nothing queued and nobody producing: done.
                        work_ready.notify_all();
                        return;
                    }
                    work_ready.wait(&mut shared);
                }
            };

            let outcome = self.process(&mut scanner, &id);

            let mut shared = state.lock();
            match outcome {
                Ok(node) => {
                    for link in &node.children {
                        if shared.claimed.insert(link.child_id.clone()) {
                            shared.queue.push_back(link.child_id.clone());
                        }
                    }
                    shared.nodes.push(node);
                }
                Err(()) => shared.degraded.push(id),
            }
            shared.in_flight -= 1;
            work_ready.notify_all();
        }
    }

    /// Read, scan, and resolve one file. Lock-free: only the claim/record
    /// steps around this touch shared state.
    fn process(&self, scanner: &mut Scanner, id: &str) -> Result<GraphNode, ()> {
        self.observer.file_started(id);

        let source = self.host.read_file(id).map_err(|e| {
            self.observer.file_failed(id, &e.to_string());
        })?;

        let language = SourceLanguage::from_path(id).unwrap_or(SourceLanguage::Tsx);
        let analysis = scanner.analyze(&source, language).map_err(|e| {
            self.observer.file_failed(id, &e.to_string());
        })?;

        let mut children = Vec::new();
        for usage in &analysis.imported_components {
            match self.host.resolve(&usage.import_specifier, id) {
                Some(child_id) => children.push(ChildLink {
                    as_used_name: usage.local_name.clone(),
                    import_specifier: usage.import_specifier.clone(),
                    child_id,
                }),
                None => {
                    self.observer.import_unresolved(&usage.import_specifier, id);
                }
            }
        }

        Ok(GraphNode {
            id: id.to_string(),
            analysis,
            children,
        })
    }
}
