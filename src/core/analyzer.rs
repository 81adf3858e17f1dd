use anyhow::{ensure, Context, Result};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use super::graph::{DependencyGraph, GraphBuilder};
use super::resolver;
use super::scanner::{FileScanner, FileType, ScanWarning, WarningKind};
use crate::extractors::ExtractorSet;

/// Pages reachable by server routing or direct navigation rather than
/// static linkage. Match order: root index, cart page, product pages,
/// dashboard paths, calculator pages, quote-builder pages.
const ENTRY_POINT_PATTERNS: &[&str] = &[
    r"^/index\.html?$",
    r"^/cart\.html?$",
    r"^/product[\w-]*\.html?$",
    r"^/dashboards?(?:/|\.html?$)",
    r"[\w-]*calculator[\w-]*\.html?$",
    r"quote[-_]?builder[\w-]*\.html?$",
];

#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directory basenames pruned from the walk, whole subtree.
    pub ignore_dirs: HashSet<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ignore_dirs: ["node_modules", ".git", "dist", "build", "vendor"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// A forward edge whose target does not exist on disk under the root.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MissingReference {
    pub from: String,
    pub missing: String,
}

/// Aggregate counts; the report carries the complete lists alongside.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStats {
    pub files_scanned: usize,
    pub dependencies_found: usize,
    pub orphaned_files: usize,
    pub missing_references: usize,
    pub circular_dependencies: usize,
    pub warnings: usize,
}

/// Complete result of one scan. Rebuilt from scratch every invocation;
/// nothing survives between runs.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub generated_at: DateTime<Utc>,
    pub root: String,
    pub stats: ScanStats,
    #[serde(flatten)]
    pub graph: DependencyGraph,
    pub file_types: BTreeMap<String, FileType>,
    pub entry_points: Vec<String>,
    pub orphans: Vec<String>,
    pub missing: Vec<MissingReference>,
    pub cycles: Vec<Vec<String>>,
    pub warnings: Vec<ScanWarning>,
}

struct EntryPointMatcher {
    patterns: Vec<Regex>,
}

impl EntryPointMatcher {
    fn new() -> Result<Self> {
        let patterns = ENTRY_POINT_PATTERNS
            .iter()
            .map(|pattern| {
                Regex::new(pattern)
                    .with_context(|| format!("invalid entry-point pattern '{pattern}'"))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    fn is_entry_point(&self, path: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(path))
    }
}

/// Per-file fan-out result, merged single-threaded into the graph.
struct FileExtraction {
    rel_path: String,
    deps: BTreeSet<String>,
    warning: Option<ScanWarning>,
}

pub struct SiteAnalyzer {
    scanner: FileScanner,
    extractors: ExtractorSet,
    entry_points: EntryPointMatcher,
}

impl SiteAnalyzer {
    /// Compiles all pattern sets up front; the analyzer itself is
    /// immutable afterwards, so repeated `analyze` calls cannot observe
    /// each other.
    pub fn new(config: ScanConfig) -> Result<Self> {
        Ok(Self {
            scanner: FileScanner::new(config.ignore_dirs),
            extractors: ExtractorSet::new()?,
            entry_points: EntryPointMatcher::new()?,
        })
    }

    pub fn analyze(&self, root_path: &Path) -> Result<ScanReport> {
        ensure!(
            root_path.is_dir(),
            "scan root is not a directory: {}",
            root_path.display()
        );

        let (files, mut warnings) = self.scanner.scan_directory(root_path);

        // Fan-out: read + extract + normalize per file, no shared state.
        // Fan-in below is the sole writer into the graph.
        let extractions: Vec<FileExtraction> = files
            .par_iter()
            .map(|file| match fs::read_to_string(&file.path) {
                Ok(source) => {
                    let deps = self
                        .extractors
                        .get(file.file_type)
                        .extract(&source)
                        .iter()
                        .filter_map(|raw| resolver::normalize(raw, &file.rel_path))
                        .collect();
                    FileExtraction {
                        rel_path: file.rel_path.clone(),
                        deps,
                        warning: None,
                    }
                }
                Err(err) => FileExtraction {
                    rel_path: file.rel_path.clone(),
                    deps: BTreeSet::new(),
                    warning: Some(ScanWarning {
                        kind: WarningKind::FileRead,
                        path: file.rel_path.clone(),
                        message: err.to_string(),
                    }),
                },
            })
            .collect();

        let mut builder = GraphBuilder::new();
        for extraction in extractions {
            if let Some(warning) = extraction.warning {
                warnings.push(warning);
            }
            builder.add_dependencies(&extraction.rel_path, extraction.deps);
        }
        let graph = builder.build();

        let file_types: BTreeMap<String, FileType> = files
            .iter()
            .map(|file| (file.rel_path.clone(), file.file_type))
            .collect();

        let entry_points: Vec<String> = file_types
            .keys()
            .filter(|path| self.entry_points.is_entry_point(path.as_str()))
            .cloned()
            .collect();

        let orphans = self.detect_orphans(&file_types, &graph);
        let missing = detect_missing(root_path, &graph);
        let cycles = detect_cycles(&graph);

        let stats = ScanStats {
            files_scanned: file_types.len(),
            dependencies_found: graph.edge_count(),
            orphaned_files: orphans.len(),
            missing_references: missing.len(),
            circular_dependencies: cycles.len(),
            warnings: warnings.len(),
        };

        Ok(ScanReport {
            generated_at: Utc::now(),
            root: root_path.display().to_string(),
            stats,
            graph,
            file_types,
            entry_points,
            orphans,
            missing,
            cycles,
            warnings,
        })
    }

    /// A file is orphaned when it has no edge in either direction and no
    /// entry-point pattern claims it. Entry-point status always wins.
    fn detect_orphans(
        &self,
        file_types: &BTreeMap<String, FileType>,
        graph: &DependencyGraph,
    ) -> Vec<String> {
        file_types
            .keys()
            .filter(|path| {
                let path = path.as_str();
                !graph.has_edges(path) && !self.entry_points.is_entry_point(path)
            })
            .cloned()
            .collect()
    }
}

/// One-shot scan of `root_path`. All configuration is explicit; no state
/// survives the call.
pub fn scan(root_path: &Path, config: ScanConfig) -> Result<ScanReport> {
    SiteAnalyzer::new(config)?.analyze(root_path)
}

/// Checks every forward edge exactly once against disk existence.
fn detect_missing(root_path: &Path, graph: &DependencyGraph) -> Vec<MissingReference> {
    let mut missing = Vec::new();
    for (from, deps) in graph.sorted_forward() {
        for to in deps {
            if !rel_to_disk(root_path, to).is_file() {
                missing.push(MissingReference {
                    from: from.to_string(),
                    missing: to.to_string(),
                });
            }
        }
    }
    missing
}

fn rel_to_disk(root_path: &Path, canonical: &str) -> PathBuf {
    let mut out = root_path.to_path_buf();
    for segment in canonical.split('/').filter(|s| !s.is_empty()) {
        out.push(segment);
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

/// Depth-first cycle detection with three-state marking.
///
/// Every unvisited node becomes a DFS root; hitting an on-stack neighbor
/// emits the current path from that neighbor's first occurrence, closed
/// by repeating the neighbor. Distinct roots can rediscover the same
/// physical cycle, so the returned list is not deduplicated. Roots and
/// neighbors are visited in sorted order to keep output deterministic.
fn detect_cycles(graph: &DependencyGraph) -> Vec<Vec<String>> {
    let forward = graph.sorted_forward();
    let mut marks: HashMap<&str, Mark> = HashMap::new();
    let mut path: Vec<&str> = Vec::new();
    let mut cycles = Vec::new();

    for &root in forward.keys() {
        if mark_of(&marks, root) == Mark::Unvisited {
            visit(root, &forward, &mut marks, &mut path, &mut cycles);
        }
    }
    cycles
}

fn mark_of(marks: &HashMap<&str, Mark>, node: &str) -> Mark {
    marks.get(node).copied().unwrap_or(Mark::Unvisited)
}

fn visit<'a>(
    node: &'a str,
    forward: &BTreeMap<&'a str, BTreeSet<&'a str>>,
    marks: &mut HashMap<&'a str, Mark>,
    path: &mut Vec<&'a str>,
    cycles: &mut Vec<Vec<String>>,
) {
    marks.insert(node, Mark::OnStack);
    path.push(node);

    if let Some(neighbors) = forward.get(node) {
        for &next in neighbors {
            match mark_of(marks, next) {
                Mark::Unvisited => visit(next, forward, marks, path, cycles),
                Mark::OnStack => {
                    if let Some(start) = path.iter().position(|&p| p == next) {
                        let mut cycle: Vec<String> =
                            path[start..].iter().map(|p| p.to_string()).collect();
                        cycle.push(next.to_string());
                        cycles.push(cycle);
                    }
                }
                Mark::Done => {}
            }
        }
    }

    path.pop();
    marks.insert(node, Mark::Done);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graph::GraphBuilder;

    fn graph_of(edges: &[(&str, &str)]) -> DependencyGraph {
        let mut builder = GraphBuilder::new();
        for (from, to) in edges {
            builder.add_dependencies(from, vec![to.to_string()]);
        }
        builder.build()
    }

    #[test]
    fn three_node_cycle_closes_on_its_start() {
        let graph = graph_of(&[("/a.js", "/b.js"), ("/b.js", "/c.js"), ("/c.js", "/a.js")]);
        let cycles = detect_cycles(&graph);
        assert_eq!(cycles.len(), 1);
        let cycle = &cycles[0];
        assert_eq!(cycle.first(), cycle.last());
        let nodes: BTreeSet<&str> = cycle.iter().map(String::as_str).collect();
        assert_eq!(nodes, BTreeSet::from(["/a.js", "/b.js", "/c.js"]));
    }

    #[test]
    fn acyclic_chain_reports_no_cycles() {
        let graph = graph_of(&[("/a.js", "/b.js"), ("/b.js", "/c.js")]);
        assert!(detect_cycles(&graph).is_empty());
    }

    #[test]
    fn done_nodes_are_not_reentered_as_roots() {
        // diamond: two routes into /d.js, but no cycle
        let graph = graph_of(&[
            ("/a.js", "/b.js"),
            ("/a.js", "/c.js"),
            ("/b.js", "/d.js"),
            ("/c.js", "/d.js"),
        ]);
        assert!(detect_cycles(&graph).is_empty());
    }

    #[test]
    fn entry_point_patterns_cover_routed_pages() {
        let matcher = EntryPointMatcher::new().unwrap();
        assert!(matcher.is_entry_point("/index.html"));
        assert!(matcher.is_entry_point("/cart.html"));
        assert!(matcher.is_entry_point("/product-builder.html"));
        assert!(matcher.is_entry_point("/dashboards/sales.html"));
        assert!(matcher.is_entry_point("/pricing-calculator.html"));
        assert!(matcher.is_entry_point("/quote-builder.html"));
        assert!(!matcher.is_entry_point("/js/util.js"));
        assert!(!matcher.is_entry_point("/about.html"));
    }
}
