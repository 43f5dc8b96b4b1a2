//! Error types shared across the analyzer.
//!
//! Line-local failures (`ExtractError`) are swallowed by the report loop;
//! everything else aborts the run.

use std::io;
use std::process::ExitStatus;

use crate::family::MetricFamily;

/// Failure to turn one data line into a sample.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractError {
    /// The schema field is not an exact token of the header.
    UnknownColumn { field: String },
    /// The column exists but its value is not numeric.
    ParseFailure { field: String, value: String },
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractError::UnknownColumn { field } => {
                write!(f, "column '{}' not present in header", field)
            }
            ExtractError::ParseFailure { field, value } => {
                write!(f, "invalid value '{}' for {}", value, field)
            }
        }
    }
}

impl std::error::Error for ExtractError {}

/// Run-level analysis failure.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzeError {
    /// A rule referenced a threshold the effective set does not define.
    MissingThreshold {
        family: MetricFamily,
        field: String,
    },
    /// No header line matched the family schema.
    HeaderNotFound { family: MetricFamily },
}

impl std::fmt::Display for AnalyzeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalyzeError::MissingThreshold { family, field } => write!(
                f,
                "threshold '{}' is not defined for {} (override sets must be complete)",
                field, family
            ),
            AnalyzeError::HeaderNotFound { family } => {
                write!(f, "Header for '{}' not found.", family)
            }
        }
    }
}

impl std::error::Error for AnalyzeError {}

/// Failure to obtain the raw text feed.
#[derive(Debug)]
pub enum CaptureError {
    /// The metrics-source binary could not be started.
    Spawn { program: String, source: io::Error },
    /// The metrics-source binary exited unsuccessfully.
    Failed { status: ExitStatus, stderr: String },
    /// A pre-captured feed could not be read.
    Io(io::Error),
}

impl std::fmt::Display for CaptureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaptureError::Spawn { program, source } => {
                write!(f, "failed to run '{}': {}", program, source)
            }
            CaptureError::Failed { status, stderr } => {
                write!(f, "metrics source exited with {}", status)?;
                let stderr = stderr.trim();
                if !stderr.is_empty() {
                    write!(f, ": {}", stderr)?;
                }
                Ok(())
            }
            CaptureError::Io(e) => write!(f, "failed to read feed: {}", e),
        }
    }
}

impl std::error::Error for CaptureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CaptureError::Spawn { source, .. } => Some(source),
            CaptureError::Io(e) => Some(e),
            CaptureError::Failed { .. } => None,
        }
    }
}

impl From<io::Error> for CaptureError {
    fn from(e: io::Error) -> Self {
        CaptureError::Io(e)
    }
}

/// Failure to load a threshold override file.
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read thresholds: {}", e),
            ConfigError::Parse(e) => write!(f, "invalid thresholds file: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}
