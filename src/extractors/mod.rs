pub mod css;
pub mod html;
pub mod javascript;

use anyhow::{Context, Result};
use regex::Regex;
use std::collections::BTreeSet;

use crate::core::FileType;

/// Extracts raw dependency strings from one file's text content.
///
/// Implementations are stateless between calls: every `extract` runs fresh
/// match iterators, so nothing leaks from one file to the next.
pub trait ReferenceExtractor {
    fn extract(&self, source: &str) -> BTreeSet<String>;
    fn file_type(&self) -> FileType;
}

/// One compiled extractor per file type, built once per scan.
pub struct ExtractorSet {
    html: html::HtmlExtractor,
    js: javascript::JavaScriptExtractor,
    css: css::CssExtractor,
}

impl ExtractorSet {
    pub fn new() -> Result<Self> {
        Ok(Self {
            html: html::HtmlExtractor::new()?,
            js: javascript::JavaScriptExtractor::new()?,
            css: css::CssExtractor::new()?,
        })
    }

    pub fn get(&self, file_type: FileType) -> &(dyn ReferenceExtractor + Send + Sync) {
        let extractor: &(dyn ReferenceExtractor + Send + Sync) = match file_type {
            FileType::Html => &self.html,
            FileType::Js => &self.js,
            FileType::Css => &self.css,
        };
        debug_assert_eq!(extractor.file_type(), file_type);
        extractor
    }
}

/// A named pattern in an extractor's ordered set. The captured group 1 is
/// the raw reference string.
pub(crate) struct NamedPattern {
    pub name: &'static str,
    regex: Regex,
}

impl NamedPattern {
    pub(crate) fn new(name: &'static str, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .with_context(|| format!("invalid extraction pattern '{name}'"))?;
        Ok(Self { name, regex })
    }

    /// Runs the pattern exhaustively over `source`, inserting every
    /// non-empty capture into `out`.
    pub(crate) fn capture_all(&self, source: &str, out: &mut BTreeSet<String>) {
        for caps in self.regex.captures_iter(source) {
            if let Some(matched) = caps.get(1) {
                let reference = matched.as_str().trim();
                if !reference.is_empty() {
                    out.insert(reference.to_string());
                }
            }
        }
    }
}

pub(crate) fn run_patterns(patterns: &[NamedPattern], source: &str) -> BTreeSet<String> {
    let mut out = BTreeSet::new();
    for pattern in patterns {
        pattern.capture_all(source, &mut out);
    }
    out
}
