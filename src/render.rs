//! Text and JSON rendering of an analysis report.

use std::fmt::Write;

use crate::report::Report;

/// Human-readable report.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();

    if let Some(notice) = report.header_error() {
        let _ = writeln!(out, "{}", notice);
    }
    let Some(header) = &report.header else {
        let _ = writeln!(out, "No performance issues detected.");
        return out;
    };

    if report.findings.is_empty() {
        let _ = writeln!(out, "No performance issues detected.");
        return out;
    }

    let _ = writeln!(out, "Performance Issues Report:");
    for finding in &report.findings {
        let _ = writeln!(out);
        let _ = writeln!(out, "Analyzing issue in line:");
        let _ = writeln!(out, "{}", header.line());
        let _ = writeln!(out, "{}", finding.line);
        let _ = writeln!(out);
        let _ = writeln!(out, "Detailed Analysis: {}", finding.diagnosis);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "End of report.");
    out
}

pub fn render_json(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
