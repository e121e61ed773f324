//! Project crawling: hosts plus the sequential and parallel crawlers.
//!
//! A crawl starts from entry files, repeatedly scans and resolves imports
//! through a [`Host`], and produces a deduplicated
//! [`ProjectGraph`](crate::graph::ProjectGraph). Each file is scanned at
//! most once per session no matter how many entry points share it.

pub mod crawler;
pub mod host;
pub mod parallel;

pub use crawler::Crawler;
pub use host::{FsHost, Host, HostError, MemoryHost, RESOLVE_EXTENSIONS};
pub use parallel::ParallelCrawler;
