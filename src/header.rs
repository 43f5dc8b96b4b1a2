//! Header discovery inside a raw `sar` text feed.
//!
//! A feed may hold several metric blocks, each preceded by its own column
//! header. The header for a family is the first non-aggregate line that
//! contains at least one of the family's field names, compared
//! case-insensitively as substrings. Column resolution afterwards uses exact
//! tokens (see [`Header::column`]).

use serde::Serialize;

use crate::family::MetricFamily;

/// Prefixes `sar` uses for summary rows, in English and Spanish/Italian locales.
pub const AGGREGATE_MARKERS: &[&str] = &["Average", "Media"];

/// True for summary rows that never take part in the analysis.
pub fn is_aggregate_row(line: &str) -> bool {
    AGGREGATE_MARKERS.iter().any(|m| line.contains(m))
}

/// A located column header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    line: String,
    #[serde(skip)]
    tokens: Vec<String>,
}

impl Header {
    pub fn new(line: &str) -> Self {
        Self {
            line: line.to_string(),
            tokens: line.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Number of columns a data line must have to be considered.
    pub fn width(&self) -> usize {
        self.tokens.len()
    }

    /// Index of the column whose token is exactly `name`.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.tokens.iter().position(|t| t == name)
    }
}

fn declares_family(line: &str, family: MetricFamily) -> bool {
    let lower = line.to_lowercase();
    family
        .fields()
        .iter()
        .any(|name| lower.contains(&name.to_lowercase()))
}

/// Finds the header for `family`, or `None` when the feed has none.
pub fn locate_header(feed: &str, family: MetricFamily) -> Option<Header> {
    feed.lines()
        .filter(|line| !is_aggregate_row(line))
        .find(|line| declares_family(line, family))
        .map(Header::new)
}
