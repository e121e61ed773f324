//! One-call project scan: crawl, aggregate, and report.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::analysis::ScanError;
use crate::crawl::{Crawler, Host, ParallelCrawler};
use crate::graph::ProjectGraph;
use crate::observer::{NoopObserver, ScanObserver};

use super::routes::{aggregate, AggregateError, RouteEntry};
use super::stats::{compute_stats, ProjectStats};

/// Errors from a full project scan.
#[derive(Error, Debug)]
pub enum ProjectScanError {
    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error(transparent)]
    Scanner(#[from] ScanError),
}

/// The serializable scan artifact: routes with their trees, project
/// statistics, and the full graph keyed by file id.
///
/// Plain acyclic JSON — shared nodes are referenced by id, never embedded
/// twice.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectScanReport {
    pub routes: Vec<RouteEntry>,
    pub stats: ProjectStats,
    pub graph: ProjectGraph,
    /// Files that failed to read or parse. Non-empty means the report
    /// covers the successfully scanned subset, not the whole project.
    pub degraded_files: Vec<String>,
}

impl ProjectScanReport {
    /// Whether any file was dropped from the scan.
    pub fn is_degraded(&self) -> bool {
        !self.degraded_files.is_empty()
    }
}

/// Scans a project from its entry files.
///
/// One scanner owns one host for one scan; the host's caches live and die
/// with it.
///
/// # Example
///
/// ```rust
/// use renderscope::aggregate::ProjectScanner;
/// use renderscope::crawl::MemoryHost;
///
/// let mut host = MemoryHost::new();
/// host.insert("/app/page.tsx", "export default function Page() { return null; }");
///
/// let scanner = ProjectScanner::new(host);
/// let report = scanner.scan(&["/app/page.tsx".to_string()], "/app").unwrap();
/// assert_eq!(report.stats.total_files, 1);
/// assert_eq!(report.routes[0].route, "/");
/// ```
pub struct ProjectScanner<H: Host + Sync> {
    host: H,
    observer: Arc<dyn ScanObserver>,
    workers: usize,
}

impl<H: Host + Sync> ProjectScanner<H> {
    /// Create a scanner with the silent observer and sequential crawling.
    pub fn new(host: H) -> Self {
        Self {
            host,
            observer: Arc::new(NoopObserver),
            workers: 1,
        }
    }

    /// Report scan progress to the given observer.
    pub fn with_observer(mut self, observer: Arc<dyn ScanObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Crawl with a worker pool of the given size. One worker means the
    /// plain sequential crawler.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Scan from the given entry files.
    ///
    /// All entries share one crawl session, so files imported by several
    /// routes are scanned once. Entry files that themselves fail to read or
    /// parse are dropped from the route list and reported in
    /// `degraded_files`; an entry missing from the graph for any other
    /// reason is a [`AggregateError::MissingEntryNode`].
    pub fn scan(
        &self,
        entries: &[String],
        app_dir: &str,
    ) -> Result<ProjectScanReport, ProjectScanError> {
        let (graph, degraded) = self.crawl(entries)?;

        let live_entries: Vec<String> = entries
            .iter()
            .filter(|e| !degraded.contains(e))
            .cloned()
            .collect();

        let routes = aggregate(&graph, &live_entries, app_dir)?;
        let stats = compute_stats(&graph, &live_entries);

        Ok(ProjectScanReport {
            routes,
            stats,
            graph,
            degraded_files: degraded,
        })
    }

    fn crawl(&self, entries: &[String]) -> Result<(ProjectGraph, Vec<String>), ProjectScanError> {
        if self.workers > 1 {
            let crawler =
                ParallelCrawler::with_observer(&self.host, self.workers, Arc::clone(&self.observer));
            return Ok(crawler.crawl(entries));
        }

        let mut crawler =
            Crawler::with_observer(&self.host, Box::new(Arc::clone(&self.observer)))?;
        for entry in entries {
            crawler.crawl(entry);
        }
        Ok(crawler.into_parts())
    }
}
