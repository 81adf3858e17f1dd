//! HTML reference extraction.
//!
//! Matches the externally loading attributes of `<script>`, `<link>`,
//! `<iframe>` and `<img>` tags, plus internal page navigation via
//! `<a href>` when the target is an `.htm`/`.html` file. Anchors to
//! other resource kinds are navigation chrome, not dependencies.

use anyhow::Result;
use std::collections::BTreeSet;

use super::{run_patterns, NamedPattern, ReferenceExtractor};
use crate::core::FileType;

pub struct HtmlExtractor {
    patterns: Vec<NamedPattern>,
}

impl HtmlExtractor {
    pub fn new() -> Result<Self> {
        let patterns = vec![
            NamedPattern::new(
                "script_src",
                r#"(?i)<script[^>]*\ssrc\s*=\s*["']([^"']+)["']"#,
            )?,
            // Only stylesheet/script link targets; ignores favicons,
            // manifests, preconnect hints and the like
            NamedPattern::new(
                "link_href",
                r#"(?i)<link[^>]*\shref\s*=\s*["']([^"']+\.(?:css|js)(?:[?#][^"']*)?)["']"#,
            )?,
            NamedPattern::new(
                "iframe_src",
                r#"(?i)<iframe[^>]*\ssrc\s*=\s*["']([^"']+)["']"#,
            )?,
            NamedPattern::new("img_src", r#"(?i)<img[^>]*\ssrc\s*=\s*["']([^"']+)["']"#)?,
            NamedPattern::new(
                "anchor_href",
                r#"(?i)<a[^>]*\shref\s*=\s*["']([^"']+\.html?(?:[?#][^"']*)?)["']"#,
            )?,
        ];
        Ok(Self { patterns })
    }

    pub fn pattern_names(&self) -> Vec<&'static str> {
        self.patterns.iter().map(|p| p.name).collect()
    }
}

impl ReferenceExtractor for HtmlExtractor {
    fn extract(&self, source: &str) -> BTreeSet<String> {
        run_patterns(&self.patterns, source)
    }

    fn file_type(&self) -> FileType {
        FileType::Html
    }
}
