//! Metric families and their column schemas.

use serde::{Deserialize, Serialize};

/// One of the telemetry domains `sar` reports on.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum MetricFamily {
    Disk,
    Cpu,
    Memory,
    Network,
}

const DISK_FIELDS: &[&str] = &["tps", "rkB/s", "wkB/s", "areq-sz", "aqu-sz", "await", "%util"];
const CPU_FIELDS: &[&str] = &["%idle", "%user", "%system"];
const MEMORY_FIELDS: &[&str] = &["kbmemfree", "kbmemused", "kbactive", "kbinact"];
const NETWORK_FIELDS: &[&str] = &[
    "rxpck/s", "txpck/s", "rxkB/s", "txkB/s", "rxcmp/s", "txcmp/s", "rxmcst/s", "%ifutil",
];

/// Optional network columns: canonical name and the header spellings accepted for it.
const NETWORK_AUX_FIELDS: &[(&str, &[&str])] = &[
    ("rxdrop", &["rxdrop", "rxdrop/s"]),
    ("txdrop", &["txdrop", "txdrop/s"]),
    ("rxerrs", &["rxerrs", "rxerr/s"]),
    ("txerrs", &["txerrs", "txerr/s"]),
];

impl MetricFamily {
    pub const ALL: [MetricFamily; 4] = [
        MetricFamily::Disk,
        MetricFamily::Cpu,
        MetricFamily::Memory,
        MetricFamily::Network,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MetricFamily::Disk => "disk",
            MetricFamily::Cpu => "cpu",
            MetricFamily::Memory => "memory",
            MetricFamily::Network => "network",
        }
    }

    /// Ordered column names every header of this family must declare.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            MetricFamily::Disk => DISK_FIELDS,
            MetricFamily::Cpu => CPU_FIELDS,
            MetricFamily::Memory => MEMORY_FIELDS,
            MetricFamily::Network => NETWORK_FIELDS,
        }
    }

    /// Columns read when present, defaulting to zero otherwise.
    pub fn auxiliary_fields(self) -> &'static [(&'static str, &'static [&'static str])] {
        match self {
            MetricFamily::Network => NETWORK_AUX_FIELDS,
            _ => &[],
        }
    }

    /// Whether samples carry an interface identifier.
    pub fn has_interface(self) -> bool {
        self == MetricFamily::Network
    }

    /// `sar` report selection arguments for this family.
    pub fn sar_args(self) -> &'static [&'static str] {
        match self {
            MetricFamily::Disk => &["-d"],
            MetricFamily::Cpu => &["-u"],
            MetricFamily::Memory => &["-r"],
            MetricFamily::Network => &["-n", "DEV"],
        }
    }
}

impl std::fmt::Display for MetricFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for MetricFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricFamily::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown metric family '{}'", s))
    }
}
