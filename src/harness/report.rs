//! Result sink: plain-text report with a fenced CSV-like table
//!
//! Known limitation: fields are wrapped in double quotes without escaping
//! embedded quote characters. Existing consumers parse this format as is.

use super::BatchReport;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub const DEFAULT_REPORT_PATH: &str = "results/part_2/example.txt";

const PREAMBLE: &str = "\
# LLM Chat Tool Test Results

## Usage Examples

```bash
# Run the one-off chat
hf-chat chat

# Run the contextual chat
hf-chat converse
```

## Test Results

";

/// Collapse newlines to spaces and trim; quotes are left alone
fn table_field(text: &str) -> String {
    text.replace('\n', " ").trim().to_string()
}

/// Render the full report text
pub fn render(report: &BatchReport) -> String {
    let mut out = String::from(PREAMBLE);
    out.push_str("```csv\n");
    out.push_str("question,response\n");
    for entry in report.entries() {
        out.push_str(&format!(
            "\"{}\",\"{}\"\n",
            table_field(&entry.question),
            table_field(&entry.response)
        ));
    }
    out.push_str("```\n");
    out
}

/// Overwrite `path` with the rendered report, creating parent directories
pub fn write(report: &BatchReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create report directory {}", parent.display()))?;
    }
    fs::write(path, render(report))
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    tracing::info!(path = %path.display(), entries = report.len(), "Report written");
    Ok(())
}

/// Read a saved report back byte for byte for display
///
/// Returns raw bytes so files edited by other tools, or not UTF-8 at all,
/// still pass through unchanged.
pub fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read report {}", path.display()))
}
