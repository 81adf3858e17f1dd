//! JavaScript reference extraction.
//!
//! Covers the module syntaxes (`import ... from`, `require`, dynamic
//! `import()`) and the DOM/networking idioms that show up in pre-bundler
//! codebases: `.src`/`.href` assignment, `fetch`, the jQuery ajax
//! helpers, and raw `XMLHttpRequest.open`.

use anyhow::Result;
use std::collections::BTreeSet;

use super::{run_patterns, NamedPattern, ReferenceExtractor};
use crate::core::FileType;

pub struct JavaScriptExtractor {
    patterns: Vec<NamedPattern>,
}

impl JavaScriptExtractor {
    pub fn new() -> Result<Self> {
        let patterns = vec![
            // Side-effect imports have no binding list, so the clause
            // before `from` is optional
            NamedPattern::new(
                "import_from",
                r#"import\s+(?:[\w$*{}\s,]+?\s+from\s+)?["']([^"']+)["']"#,
            )?,
            NamedPattern::new("require", r#"require\s*\(\s*["']([^"']+)["']\s*\)"#)?,
            NamedPattern::new("dynamic_import", r#"import\s*\(\s*["']([^"']+)["']\s*\)"#)?,
            NamedPattern::new(
                "src_href_assign",
                r#"\.(?:src|href)\s*=\s*["']([^"']+\.(?:js|css)(?:[?#][^"']*)?)["']"#,
            )?,
            NamedPattern::new(
                "fetch",
                r#"fetch\s*\(\s*["']([^"']+\.(?:js|json|html?)(?:[?#][^"']*)?)["']"#,
            )?,
            NamedPattern::new(
                "jquery_short",
                r#"\$\.(?:get|post|getJSON)\s*\(\s*["']([^"']+)["']"#,
            )?,
            NamedPattern::new(
                "jquery_ajax",
                r#"(?s)\$\.ajax\s*\(\s*\{.*?url\s*:\s*["']([^"']+)["']"#,
            )?,
            NamedPattern::new(
                "xhr_open",
                r#"\.open\s*\(\s*["'](?i:GET|POST|PUT|DELETE|PATCH|HEAD)["']\s*,\s*["']([^"']+)["']"#,
            )?,
        ];
        Ok(Self { patterns })
    }

    pub fn pattern_names(&self) -> Vec<&'static str> {
        self.patterns.iter().map(|p| p.name).collect()
    }
}

impl ReferenceExtractor for JavaScriptExtractor {
    fn extract(&self, source: &str) -> BTreeSet<String> {
        run_patterns(&self.patterns, source)
    }

    fn file_type(&self) -> FileType {
        FileType::Js
    }
}
