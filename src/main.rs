use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

mod core;
mod extractors;
mod formatters;

use crate::core::{ScanConfig, SiteAnalyzer};
use crate::formatters::{GraphPageFormatter, JsonReportFormatter};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "sitegraph",
    version = "0.1.0",
    author = "sitegraph developers",
    about = "Static dependency-graph analyzer for HTML/JS/CSS codebases"
)]
struct Cli {
    /// Project root to scan
    #[arg(value_name = "ROOT", default_value = ".")]
    root: PathBuf,

    /// Comma-separated directory basenames to prune entirely
    #[arg(
        short,
        long,
        value_name = "DIRS",
        value_delimiter = ',',
        default_value = "node_modules,.git,dist,build,vendor"
    )]
    ignore_dirs: Vec<String>,

    /// JSON report destination
    #[arg(long, value_name = "FILE", default_value = "dependency-report.json")]
    output_json: PathBuf,

    /// Graph visualization destination
    #[arg(long, value_name = "FILE", default_value = "dependency-graph.html")]
    output_graph: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        root,
        ignore_dirs,
        output_json,
        output_graph,
    } = cli;

    let start_time = Instant::now();

    let config = ScanConfig {
        ignore_dirs: ignore_dirs
            .into_iter()
            .map(|dir| dir.trim().to_string())
            .filter(|dir| !dir.is_empty())
            .collect(),
    };

    println!("SITEGRAPH - Static Dependency Analysis");
    println!("Root: {}", root.display());

    let analyzer = SiteAnalyzer::new(config)?;
    let report = analyzer.analyze(&root)?;

    println!(
        "Scanned {} files, {} dependencies in {:.2}s",
        report.stats.files_scanned,
        report.stats.dependencies_found,
        start_time.elapsed().as_secs_f64()
    );

    for warning in &report.warnings {
        eprintln!("Warning: {}: {}", warning.path, warning.message);
    }

    // Console lists are truncated; the JSON artifact always carries the
    // complete lists.
    print_truncated("Orphaned files", &report.orphans);
    let missing: Vec<String> = report
        .missing
        .iter()
        .map(|r| format!("{} -> {}", r.from, r.missing))
        .collect();
    print_truncated("Missing references", &missing);
    let cycles: Vec<String> = report.cycles.iter().map(|c| c.join(" -> ")).collect();
    print_truncated("Circular dependencies", &cycles);

    JsonReportFormatter::new().format_to_file(&report, &output_json)?;
    println!("JSON report: {}", output_json.display());

    GraphPageFormatter::new().format_to_file(&report, &output_graph)?;
    println!("Graph page: {}", output_graph.display());

    println!(
        "Total execution time: {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

fn print_truncated(label: &str, items: &[String]) {
    println!("{}: {}", label, items.len());
    for item in items.iter().take(10) {
        println!("  {}", item);
    }
    if items.len() > 10 {
        println!("  ... and {} more", items.len() - 10);
    }
}
