//! Per-family threshold sets.
//!
//! Built-in defaults are constructed once and passed explicitly. A
//! caller-supplied override for a family replaces the defaults wholesale;
//! fields are never merged between the two.
//!
//! Keys are normalized so that `-` and `_` are interchangeable, which lets
//! `aqu-sz` (the column name) and `aqu_sz` (the configuration name) refer to
//! the same limit.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;

use crate::error::{AnalyzeError, ConfigError};
use crate::family::MetricFamily;

fn normalize_key(key: &str) -> String {
    key.trim().replace('-', "_")
}

/// Field name → numeric limit.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "BTreeMap<String, f64>")]
pub struct ThresholdSet {
    limits: BTreeMap<String, f64>,
}

impl From<BTreeMap<String, f64>> for ThresholdSet {
    fn from(map: BTreeMap<String, f64>) -> Self {
        map.into_iter().collect()
    }
}

impl<K: AsRef<str>> FromIterator<(K, f64)> for ThresholdSet {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut set = ThresholdSet::default();
        for (k, v) in iter {
            set.insert(k.as_ref(), v);
        }
        set
    }
}

impl ThresholdSet {
    pub fn insert(&mut self, field: &str, limit: f64) {
        self.limits.insert(normalize_key(field), limit);
    }

    pub fn get(&self, field: &str) -> Option<f64> {
        self.limits.get(&normalize_key(field)).copied()
    }

    /// Looks up a limit a rule depends on.
    pub fn require(&self, family: MetricFamily, field: &str) -> Result<f64, AnalyzeError> {
        self.get(field).ok_or_else(|| AnalyzeError::MissingThreshold {
            family,
            field: field.to_string(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.limits.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.limits.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Effective set for a run: the override when present and non-empty,
    /// otherwise the built-in defaults for `family`.
    pub fn resolve(
        family: MetricFamily,
        defaults: &DefaultThresholds,
        override_set: Option<&ThresholdSet>,
    ) -> ThresholdSet {
        match override_set {
            Some(set) if !set.is_empty() => set.clone(),
            _ => defaults.get(family).clone(),
        }
    }
}

/// Built-in default table for every family.
#[derive(Debug, Clone)]
pub struct DefaultThresholds {
    sets: HashMap<MetricFamily, ThresholdSet>,
}

impl DefaultThresholds {
    pub fn builtin() -> Self {
        let mut sets = HashMap::new();
        sets.insert(
            MetricFamily::Disk,
            ThresholdSet::from_iter([
                ("tps", 1000.0),
                ("rkB/s", 500_000.0),
                ("wkB/s", 500_000.0),
                ("areq_sz", 512.0),
                ("aqu_sz", 1.0),
                ("await", 10.0),
                ("%util", 80.0),
            ]),
        );
        // %user and %system are not consulted by any rule yet.
        sets.insert(
            MetricFamily::Cpu,
            ThresholdSet::from_iter([("%user", 70.0), ("%system", 30.0), ("%idle", 20.0)]),
        );
        sets.insert(
            MetricFamily::Memory,
            ThresholdSet::from_iter([
                ("kbmemfree", 50_000.0),
                ("kbmemused", 90.0),
                ("kbactive", 80.0),
                ("kbinact", 20.0),
            ]),
        );
        sets.insert(
            MetricFamily::Network,
            ThresholdSet::from_iter([
                ("rxkB/s", 100_000.0),
                ("txkB/s", 100_000.0),
                ("rxdrop", 0.0),
                ("txdrop", 0.0),
                ("rxerrs", 0.0),
                ("txerrs", 0.0),
            ]),
        );
        Self { sets }
    }

    pub fn get(&self, family: MetricFamily) -> &ThresholdSet {
        // builtin() populates every family
        &self.sets[&family]
    }
}

impl Default for DefaultThresholds {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Caller-supplied overrides, keyed by family.
///
/// JSON shape: `{ "disk": { "await": 25, ... }, "cpu": { ... } }`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ThresholdOverrides {
    families: BTreeMap<MetricFamily, ThresholdSet>,
}

impl ThresholdOverrides {
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn for_family(&self, family: MetricFamily) -> Option<&ThresholdSet> {
        self.families.get(&family)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_defaults_match_table() {
        let defaults = DefaultThresholds::builtin();
        let disk = defaults.get(MetricFamily::Disk);
        assert_eq!(disk.len(), 7);
        assert_eq!(disk.get("%util"), Some(80.0));
        assert_eq!(disk.get("areq_sz"), Some(512.0));
        assert_eq!(defaults.get(MetricFamily::Cpu).get("%idle"), Some(20.0));
        assert_eq!(
            defaults.get(MetricFamily::Memory).get("kbmemfree"),
            Some(50_000.0)
        );
        assert_eq!(
            defaults.get(MetricFamily::Network).get("rxkB/s"),
            Some(100_000.0)
        );
    }

    #[test]
    fn dash_and_underscore_keys_are_equivalent() {
        let defaults = DefaultThresholds::builtin();
        let disk = defaults.get(MetricFamily::Disk);
        assert_eq!(disk.get("aqu-sz"), disk.get("aqu_sz"));
        assert_eq!(disk.get("areq-sz"), Some(512.0));
    }

    #[test]
    fn resolve_without_override_uses_defaults() {
        let defaults = DefaultThresholds::builtin();
        let set = ThresholdSet::resolve(MetricFamily::Cpu, &defaults, None);
        assert_eq!(&set, defaults.get(MetricFamily::Cpu));

        let empty = ThresholdSet::default();
        let set = ThresholdSet::resolve(MetricFamily::Cpu, &defaults, Some(&empty));
        assert_eq!(&set, defaults.get(MetricFamily::Cpu));
    }

    #[test]
    fn override_replaces_defaults_without_merging() {
        let defaults = DefaultThresholds::builtin();
        let partial = ThresholdSet::from_iter([("await", 999.0)]);
        let set = ThresholdSet::resolve(MetricFamily::Disk, &defaults, Some(&partial));

        assert_eq!(set.get("await"), Some(999.0));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("%util"), None);
        assert_eq!(
            set.require(MetricFamily::Disk, "%util"),
            Err(AnalyzeError::MissingThreshold {
                family: MetricFamily::Disk,
                field: "%util".to_string(),
            })
        );
    }

    #[test]
    fn overrides_parse_from_json() {
        let overrides = ThresholdOverrides::from_json_str(
            r#"{"disk": {"await": 25, "aqu-sz": 4}, "cpu": {"%idle": 5}}"#,
        )
        .unwrap();
        let disk = overrides.for_family(MetricFamily::Disk).unwrap();
        assert_eq!(disk.get("await"), Some(25.0));
        assert_eq!(disk.get("aqu_sz"), Some(4.0));
        assert_eq!(
            overrides.for_family(MetricFamily::Cpu).unwrap().get("%idle"),
            Some(5.0)
        );
        assert!(overrides.for_family(MetricFamily::Memory).is_none());
    }

    #[test]
    fn overrides_reject_unknown_family() {
        let err = ThresholdOverrides::from_json_str(r#"{"swap": {"x": 1}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn overrides_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"memory": {{"kbmemfree": 1024}}}}"#).unwrap();

        let overrides = ThresholdOverrides::load(file.path()).unwrap();
        assert_eq!(
            overrides
                .for_family(MetricFamily::Memory)
                .and_then(|s| s.get("kbmemfree")),
            Some(1024.0)
        );
    }

    #[test]
    fn overrides_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ThresholdOverrides::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
