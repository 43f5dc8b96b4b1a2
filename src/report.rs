//! Report assembly: header location, per-line extraction and diagnosis.

use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::analysis::{Diagnosis, diagnose};
use crate::error::AnalyzeError;
use crate::family::MetricFamily;
use crate::header::{Header, is_aggregate_row, locate_header};
use crate::sample::extract_sample;
use crate::thresholds::ThresholdSet;

/// A data line together with its non-empty diagnosis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub line: String,
    pub diagnosis: Diagnosis,
}

/// Line accounting for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    /// Lines that produced a sample.
    pub samples: usize,
    /// Lines shorter than the header.
    pub skipped: usize,
    /// Lines whose columns could not be resolved or parsed.
    pub failed: usize,
    /// Summary rows.
    pub aggregate: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub family: MetricFamily,
    pub header: Option<Header>,
    pub findings: Vec<Finding>,
    pub stats: ScanStats,
}

impl Report {
    fn empty(family: MetricFamily) -> Self {
        Self {
            family,
            header: None,
            findings: Vec::new(),
            stats: ScanStats::default(),
        }
    }

    pub fn header_found(&self) -> bool {
        self.header.is_some()
    }

    /// The header-not-found notice, when applicable.
    pub fn header_error(&self) -> Option<AnalyzeError> {
        match self.header {
            Some(_) => None,
            None => Some(AnalyzeError::HeaderNotFound {
                family: self.family,
            }),
        }
    }

    pub fn has_issues(&self) -> bool {
        !self.findings.is_empty()
    }
}

/// Analyzes a raw feed for one family.
///
/// A feed without a matching header yields an empty report. Lines that are
/// too short or fail to parse are skipped. Only an incomplete threshold set
/// aborts the run.
pub fn analyze(
    feed: &str,
    family: MetricFamily,
    thresholds: &ThresholdSet,
) -> Result<Report, AnalyzeError> {
    let mut report = Report::empty(family);

    let Some(header) = locate_header(feed, family) else {
        warn!("Header for '{}' not found", family);
        return Ok(report);
    };
    debug!("Using {} header: {}", family, header.line().trim());

    for line in feed.lines() {
        if is_aggregate_row(line) {
            report.stats.aggregate += 1;
            continue;
        }

        let sample = match extract_sample(line, &header, family) {
            Ok(Some(sample)) => sample,
            Ok(None) => {
                report.stats.skipped += 1;
                continue;
            }
            Err(e) => {
                debug!("Skipping line {:?}: {}", line, e);
                report.stats.failed += 1;
                continue;
            }
        };
        report.stats.samples += 1;
        trace!(
            "Metrics analyzed: {:?}",
            sample.values().collect::<Vec<_>>()
        );

        let diagnosis = diagnose(&sample, family, thresholds)?;
        if !diagnosis.is_empty() {
            report.findings.push(Finding {
                line: sample.line,
                diagnosis,
            });
        }
    }

    info!(
        "Analyzed {} {} samples: {} with issues ({} skipped, {} unparsable)",
        report.stats.samples,
        family,
        report.findings.len(),
        report.stats.skipped,
        report.stats.failed
    );

    report.header = Some(header);
    Ok(report)
}
