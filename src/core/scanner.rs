use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Closed set of file types the scanner recognizes. Every pattern-set
/// selection downstream is an exhaustive match on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Html,
    Js,
    Css,
}

impl FileType {
    /// Explicit extension-to-variant mapping. Unknown extensions are not
    /// candidates and never enter the pipeline.
    pub fn from_extension(ext: &str) -> Option<FileType> {
        match ext.to_ascii_lowercase().as_str() {
            "html" | "htm" => Some(FileType::Html),
            "js" | "mjs" => Some(FileType::Js),
            "css" | "scss" | "sass" => Some(FileType::Css),
            _ => None,
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::Html => write!(f, "html"),
            FileType::Js => write!(f, "js"),
            FileType::Css => write!(f, "css"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileInfo {
    /// On-disk path, used for reading content.
    pub path: PathBuf,
    /// Canonical root-relative path: `/`-prefixed, forward slashes.
    pub rel_path: String,
    pub file_type: FileType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WarningKind {
    DirectoryRead,
    FileRead,
}

/// Non-fatal failure recorded during a scan. Warnings never abort the run;
/// they are carried into the JSON report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanWarning {
    pub kind: WarningKind,
    pub path: String,
    pub message: String,
}

pub struct FileScanner {
    ignore_dirs: HashSet<String>,
}

impl FileScanner {
    pub fn new(ignore_dirs: HashSet<String>) -> Self {
        Self { ignore_dirs }
    }

    /// Enumerates every candidate file under `root_path`. Directories whose
    /// basename is in the ignore set are pruned with their entire subtree.
    /// A directory that cannot be listed becomes a `DirectoryRead` warning
    /// and traversal continues with its siblings.
    pub fn scan_directory(&self, root_path: &Path) -> (Vec<FileInfo>, Vec<ScanWarning>) {
        let mut entries = Vec::new();
        let mut warnings = Vec::new();

        let walker = WalkDir::new(root_path)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| {
                // depth 0 is the root itself; never prune it
                if entry.depth() == 0 || !entry.file_type().is_dir() {
                    return true;
                }
                entry
                    .file_name()
                    .to_str()
                    .map(|name| !self.ignore_dirs.contains(name))
                    .unwrap_or(true)
            });

        for entry in walker {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() {
                        entries.push(entry.into_path());
                    }
                }
                Err(err) => {
                    let path = err
                        .path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| root_path.display().to_string());
                    warnings.push(ScanWarning {
                        kind: WarningKind::DirectoryRead,
                        path,
                        message: err.to_string(),
                    });
                }
            }
        }

        // Extension filtering has no shared state, so classify in parallel
        let files: Vec<FileInfo> = entries
            .par_iter()
            .filter_map(|path| {
                let file_type = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .and_then(FileType::from_extension)?;
                Some(FileInfo {
                    path: path.clone(),
                    rel_path: canonical_rel_path(root_path, path),
                    file_type,
                })
            })
            .collect();

        (files, warnings)
    }
}

/// Converts an on-disk path under `root` to its canonical root-relative
/// form: `/`-prefixed with forward slashes.
fn canonical_rel_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let mut out = String::with_capacity(rel.as_os_str().len() + 1);
    for component in rel.components() {
        out.push('/');
        out.push_str(&component.as_os_str().to_string_lossy());
    }
    out
}
