pub mod analyzer;
pub mod graph;
pub mod resolver;
pub mod scanner;

pub use analyzer::{scan, MissingReference, ScanConfig, ScanReport, ScanStats, SiteAnalyzer};
pub use graph::{DependencyGraph, GraphBuilder};
pub use scanner::{FileInfo, FileScanner, FileType, ScanWarning, WarningKind};
