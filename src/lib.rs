//! # SITEGRAPH
//!
//! Static dependency-graph analyzer for HTML/JS/CSS codebases.
//!
//! SITEGRAPH scans a web project tree, extracts statically visible textual
//! references between files, and builds a forward/reverse dependency graph
//! used to detect orphaned files, broken references, and circular
//! dependency chains.
//!
//! ## Output Artifacts
//!
//! - **JSON report**: scan timestamp, stats, full forward/reverse maps, findings
//! - **Graph page**: self-contained HTML with a force-directed renderer
//!
//! ## Supported File Types
//!
//! HTML (`html`, `htm`), JavaScript (`js`, `mjs`), CSS (`css`, `scss`, `sass`)

pub mod core;
pub mod extractors;
pub mod formatters;
