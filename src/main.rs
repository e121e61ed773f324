use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;

use renderscope::aggregate::ProjectScanner;
use renderscope::crawl::{Crawler, FsHost};
use renderscope::discovery::discover_entry_files;
use renderscope::observer::TracingObserver;

#[derive(Parser)]
#[command(name = "renderscope")]
#[command(version)]
#[command(
    about = "Map client/server component boundaries in a React or Next.js project",
    long_about = None
)]
struct Cli {
    /// Source file to crawl, or Next.js app directory to scan
    path: std::path::PathBuf,

    /// Number of crawl workers (1 = sequential)
    #[arg(long, default_value_t = 1)]
    workers: usize,

    /// Log scan progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let path = cli
        .path
        .canonicalize()
        .with_context(|| format!("cannot access {}", cli.path.display()))?;

    if path.is_dir() {
        run_directory_mode(&path, cli.workers)
    } else {
        run_file_mode(&path)
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "renderscope=debug"
    } else {
        "renderscope=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Crawl a single file and print its resolved component tree.
fn run_file_mode(path: &Path) -> anyhow::Result<()> {
    let root = path.parent().unwrap_or(Path::new("/"));
    let host = FsHost::new(root);
    let mut crawler = Crawler::with_observer(&host, Box::new(TracingObserver))?;
    crawler.crawl(&path.to_string_lossy());
    let (graph, degraded) = crawler.into_parts();

    println!("Scanned {} files", graph.len());

    let mut nodes: Vec<_> = graph.iter().collect();
    nodes.sort_by(|a, b| a.id.cmp(&b.id));
    for node in nodes {
        println!("\n{}", node.id);
        println!(
            "  client component: {}",
            node.analysis.component.is_client_directive
        );
        if node.children.is_empty() {
            println!("  children: (none)");
        } else {
            println!("  children:");
            for child in &node.children {
                println!("    <{} /> -> {}", child.as_used_name, child.child_id);
            }
        }
    }

    if !degraded.is_empty() {
        eprintln!("warning: {} file(s) failed to scan", degraded.len());
    }
    Ok(())
}

/// Scan a whole app directory and emit the JSON report on stdout.
fn run_directory_mode(app_dir: &Path, workers: usize) -> anyhow::Result<()> {
    eprintln!("Discovering entry points in: {}", app_dir.display());

    let entries = discover_entry_files(app_dir);
    if entries.is_empty() {
        bail!(
            "no page or layout entry files found in {}",
            app_dir.display()
        );
    }
    eprintln!("Found {} entry points", entries.len());

    let scanner = ProjectScanner::new(FsHost::new(app_dir))
        .with_observer(Arc::new(TracingObserver))
        .with_workers(workers);
    let report = scanner.scan(&entries, &app_dir.to_string_lossy())?;

    eprintln!(
        "Scanned {} files ({} routes, {} layouts)",
        report.stats.total_files, report.stats.total_routes, report.stats.total_layouts
    );
    if report.is_degraded() {
        eprintln!(
            "warning: partial results, {} file(s) failed to scan",
            report.degraded_files.len()
        );
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
