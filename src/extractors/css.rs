use anyhow::Result;
use std::collections::BTreeSet;

use super::{run_patterns, NamedPattern, ReferenceExtractor};
use crate::core::FileType;

/// CSS reference extraction: `@import` (string or `url()` form) and
/// `url(...)` values. Both forms of the same import dedupe to one string.
pub struct CssExtractor {
    patterns: Vec<NamedPattern>,
}

impl CssExtractor {
    pub fn new() -> Result<Self> {
        let patterns = vec![
            NamedPattern::new(
                "import",
                r#"@import\s+(?:url\s*\(\s*)?["']?([^"'()\s;]+)["']?"#,
            )?,
            NamedPattern::new("url", r#"url\s*\(\s*["']?([^"'()]+?)["']?\s*\)"#)?,
        ];
        Ok(Self { patterns })
    }

    pub fn pattern_names(&self) -> Vec<&'static str> {
        self.patterns.iter().map(|p| p.name).collect()
    }
}

impl ReferenceExtractor for CssExtractor {
    fn extract(&self, source: &str) -> BTreeSet<String> {
        run_patterns(&self.patterns, source)
    }

    fn file_type(&self) -> FileType {
        FileType::Css
    }
}
