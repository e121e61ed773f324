//! Aggregation: routes, statistics, and the one-call project scan.
//!
//! Consumes the crawler's [`ProjectGraph`](crate::graph::ProjectGraph) plus
//! the entry-file list and produces the final report: per-route component
//! trees and project-wide client/server composition statistics.

pub mod project;
pub mod routes;
pub mod stats;

pub use project::{ProjectScanError, ProjectScanReport, ProjectScanner};
pub use routes::{
    aggregate, classify_entry, extract_route_info, AggregateError, EntryKind, RouteEntry, RouteInfo,
};
pub use stats::{compute_stats, ProjectStats, SharedComponentUsage};
