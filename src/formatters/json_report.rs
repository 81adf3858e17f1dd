use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::ScanReport;

/// Serializes the full scan report to the JSON artifact. The report's own
/// `Serialize` impl keeps map keys sorted, so unchanged trees produce
/// identical output apart from the timestamp.
pub struct JsonReportFormatter {
    pretty: bool,
}

impl JsonReportFormatter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }

    pub fn format_report(&self, report: &ScanReport) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }

    pub fn format_to_file(&self, report: &ScanReport, output_path: &Path) -> Result<()> {
        let json = self.format_report(report)?;
        fs::write(output_path, json)
            .with_context(|| format!("failed to write JSON report to {}", output_path.display()))?;
        Ok(())
    }
}

impl Default for JsonReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}
