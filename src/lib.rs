//! sarhint - offline analyzer for `sar` activity reports.
//!
//! Locates the column header of one metric family inside a `sar` text feed,
//! parses every data row and runs the family's diagnosis rules, collecting
//! the rows that breach their thresholds.
//!
//! - `family` - metric families and their column schemas
//! - `thresholds` - built-in limits and caller overrides
//! - `header` - header discovery
//! - `sample` - per-line extraction
//! - `analysis` - diagnosis rules
//! - `report` - the `analyze` entry point and report types
//! - `render` - text/JSON output
//! - `capture` - running `sar` or reading a captured feed

pub mod analysis;
pub mod capture;
pub mod error;
pub mod family;
pub mod header;
pub mod render;
pub mod report;
pub mod sample;
pub mod thresholds;

pub use error::{AnalyzeError, CaptureError, ConfigError, ExtractError};
pub use family::MetricFamily;
pub use report::{Finding, Report, analyze};
pub use thresholds::{DefaultThresholds, ThresholdOverrides, ThresholdSet};
