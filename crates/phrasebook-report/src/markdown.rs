//! Markdown report generator.

use anyhow::{Context, Result};
use std::path::Path;

use phrasebook_core::report::SessionReport;

/// Markdown tables break on pipes and newlines.
fn cell(s: &str) -> String {
    s.replace('|', "\\|").replace(['\r', '\n'], " ")
}

/// Generate a Markdown report for a quiz session.
pub fn generate_markdown(report: &SessionReport) -> String {
    let mut md = String::new();
    let s = &report.summary;

    md.push_str("# phrasebook quiz\n\n");
    md.push_str(&format!(
        "- **Date:** {}\n",
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    md.push_str(&format!("- **Library:** `{}`\n", report.library));
    md.push_str(&format!(
        "- **Direction:** {} | **Sampling:** {} | **Metric:** {}\n",
        report.direction, report.config.sampling, report.config.metric
    ));
    if !report.tags.is_empty() {
        md.push_str(&format!("- **Tags:** {}\n", report.tags.join(", ")));
    }
    md.push_str(&format!(
        "- **Questions:** {} of {} snippets\n\n",
        s.count, report.corpus_size
    ));

    md.push_str("## Summary\n\n");
    md.push_str("| Mean | Median | Min | Max | Perfect | Duration |\n");
    md.push_str("|------|--------|-----|-----|---------|----------|\n");
    md.push_str(&format!(
        "| {:.1} | {:.1} | {} | {} | {}/{} | {:.1}s |\n\n",
        s.mean,
        s.median,
        s.min,
        s.max,
        s.perfect,
        s.count,
        report.duration_ms as f64 / 1000.0
    ));

    md.push_str("## Answers\n\n");
    md.push_str("| # | Prompt | Your answer | Expected | Score |\n");
    md.push_str("|---|--------|-------------|----------|-------|\n");
    for (i, a) in report.result.answers.iter().enumerate() {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            i + 1,
            cell(&a.item.front),
            cell(&a.candidate),
            cell(&a.item.back),
            a.score
        ));
    }

    md
}

/// Write a Markdown report to a file.
pub fn write_markdown_report(report: &SessionReport, path: &Path) -> Result<()> {
    let md = generate_markdown(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, md)
        .with_context(|| format!("failed to write Markdown report to {}", path.display()))?;
    Ok(())
}
