//! Per-line sample extraction.

use std::collections::BTreeMap;

use crate::error::ExtractError;
use crate::family::MetricFamily;
use crate::header::Header;

/// Header token naming the interface column in `sar -n DEV` output.
const INTERFACE_COLUMN: &str = "IFACE";

/// Parsed values of one data line.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub line: String,
    pub interface: Option<String>,
    values: BTreeMap<&'static str, f64>,
}

impl Sample {
    pub fn new(line: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            interface: None,
            values: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, field: &'static str, value: f64) -> Self {
        self.values.insert(field, value);
        self
    }

    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interface = Some(interface.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<f64> {
        self.values.get(field).copied()
    }

    /// Value of `field`, zero when the sample has no such column.
    pub fn value(&self, field: &str) -> f64 {
        self.get(field).unwrap_or(0.0)
    }

    pub fn values(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }
}

fn parse_column(parts: &[&str], index: usize, field: &str) -> Result<f64, ExtractError> {
    let raw = parts.get(index).copied().unwrap_or_default();
    raw.parse::<f64>().map_err(|_| ExtractError::ParseFailure {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

/// Parses `line` against `header`.
///
/// The network interface comes from the header's `IFACE` column when there is
/// one, otherwise from the first token of the line.
///
/// Returns `Ok(None)` for lines with fewer tokens than the header; those are
/// not data rows and are skipped silently.
pub fn extract_sample(
    line: &str,
    header: &Header,
    family: MetricFamily,
) -> Result<Option<Sample>, ExtractError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < header.width() {
        return Ok(None);
    }

    let mut sample = Sample::new(line);

    for &field in family.fields() {
        let index = header
            .column(field)
            .ok_or_else(|| ExtractError::UnknownColumn {
                field: field.to_string(),
            })?;
        sample.values.insert(field, parse_column(&parts, index, field)?);
    }

    for &(field, spellings) in family.auxiliary_fields() {
        let value = match spellings.iter().find_map(|s| header.column(s)) {
            Some(index) => parse_column(&parts, index, field)?,
            None => 0.0,
        };
        sample.values.insert(field, value);
    }

    if family.has_interface() {
        let index = header.column(INTERFACE_COLUMN).unwrap_or(0);
        sample.interface = parts.get(index).map(|s| s.to_string());
    }

    Ok(Some(sample))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DISK_HEADER: &str =
        "12:00:01 DEV tps rkB/s wkB/s areq-sz aqu-sz await %util";
    const NET_HEADER: &str =
        "12:00:01 IFACE rxpck/s txpck/s rxkB/s txkB/s rxcmp/s txcmp/s rxmcst/s %ifutil";

    #[test]
    fn extracts_schema_fields() {
        let header = Header::new(DISK_HEADER);
        let line = "12:10:01 sda 12.5 100 200 16 0.5 2.25 40";
        let sample = extract_sample(line, &header, MetricFamily::Disk)
            .unwrap()
            .unwrap();

        assert_eq!(sample.line, line);
        assert_eq!(sample.get("tps"), Some(12.5));
        assert_eq!(sample.get("await"), Some(2.25));
        assert_eq!(sample.get("%util"), Some(40.0));
        assert_eq!(sample.values().count(), 7);
        assert_eq!(sample.interface, None);
    }

    #[test]
    fn short_line_is_skipped() {
        let header = Header::new(DISK_HEADER);
        let result = extract_sample("12:10:01 sda 12.5", &header, MetricFamily::Disk);
        assert_eq!(result, Ok(None));
        assert_eq!(extract_sample("", &header, MetricFamily::Disk), Ok(None));
    }

    #[test]
    fn non_numeric_value_fails() {
        let header = Header::new(DISK_HEADER);
        let err = extract_sample(DISK_HEADER, &header, MetricFamily::Disk).unwrap_err();
        assert_eq!(
            err,
            ExtractError::ParseFailure {
                field: "tps".to_string(),
                value: "tps".to_string(),
            }
        );
    }

    #[test]
    fn substring_column_is_unknown() {
        // Locates by substring but lacks the exact "%util" token.
        let header = Header::new("12:00:01 DEV tps rkB/s wkB/s areq-sz aqu-sz await util%");
        let err = extract_sample("12:10:01 sda 1 1 1 1 1 1 1", &header, MetricFamily::Disk)
            .unwrap_err();
        assert_eq!(
            err,
            ExtractError::UnknownColumn {
                field: "%util".to_string()
            }
        );
    }

    #[test]
    fn network_interface_from_iface_column() {
        let header = Header::new(NET_HEADER);
        let sample = extract_sample(
            "12:10:01 eth0 10 10 5 5 0 0 0 0.01",
            &header,
            MetricFamily::Network,
        )
        .unwrap()
        .unwrap();
        assert_eq!(sample.interface.as_deref(), Some("eth0"));
        assert_eq!(sample.get("rxkB/s"), Some(5.0));
        // No drop/error columns in the header.
        assert_eq!(sample.get("rxdrop"), Some(0.0));
        assert_eq!(sample.get("txerrs"), Some(0.0));
    }

    #[test]
    fn network_interface_falls_back_to_first_token() {
        let header = Header::new(
            "IFACE_NAME rxpck/s txpck/s rxkB/s txkB/s rxcmp/s txcmp/s rxmcst/s %ifutil",
        );
        let sample = extract_sample("lo 1 1 1 1 0 0 0 0", &header, MetricFamily::Network)
            .unwrap()
            .unwrap();
        assert_eq!(sample.interface.as_deref(), Some("lo"));
    }

    #[test]
    fn network_reads_drop_and_error_columns() {
        let header = Header::new(
            "IFACE rxpck/s txpck/s rxkB/s txkB/s rxcmp/s txcmp/s rxmcst/s %ifutil rxerr/s txerr/s rxdrop/s txdrop/s",
        );
        let sample = extract_sample(
            "eth1 1 1 1 1 0 0 0 0 0.5 0 3 0",
            &header,
            MetricFamily::Network,
        )
        .unwrap()
        .unwrap();
        assert_eq!(sample.get("rxerrs"), Some(0.5));
        assert_eq!(sample.get("rxdrop"), Some(3.0));
        assert_eq!(sample.get("txdrop"), Some(0.0));
    }
}
