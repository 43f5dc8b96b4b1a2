pub mod rules;

use serde::Serialize;

use crate::error::AnalyzeError;
use crate::family::MetricFamily;
use crate::sample::Sample;
use crate::thresholds::ThresholdSet;

// ============================================================
// Core types
// ============================================================

/// One diagnostic message produced by a rule.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Hint {
    pub rule_id: &'static str,
    pub message: String,
}

impl Hint {
    pub fn new(rule_id: &'static str, message: impl Into<String>) -> Self {
        Self {
            rule_id,
            message: message.into(),
        }
    }
}

/// Outcome of evaluating a single rule against a sample.
#[derive(Clone, Debug, PartialEq)]
pub enum RuleResult {
    Fired(Hint),
    NotFired,
}

impl RuleResult {
    pub fn fired(rule_id: &'static str, message: impl Into<String>) -> Self {
        RuleResult::Fired(Hint::new(rule_id, message))
    }

    pub fn is_fired(&self) -> bool {
        matches!(self, RuleResult::Fired(_))
    }

    pub fn into_hint(self) -> Option<Hint> {
        match self {
            RuleResult::Fired(h) => Some(h),
            RuleResult::NotFired => None,
        }
    }
}

/// Ordered hints for one sample. Empty means no issue.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Diagnosis {
    hints: Vec<Hint>,
}

impl Diagnosis {
    pub fn hints(&self) -> &[Hint] {
        &self.hints
    }

    pub fn is_empty(&self) -> bool {
        self.hints.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hints.len()
    }

    pub fn has_rule(&self, rule_id: &str) -> bool {
        self.hints.iter().any(|h| h.rule_id == rule_id)
    }
}

impl std::fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.hints.is_empty() {
            return f.write_str("no diagnosis");
        }
        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(&hint.message)?;
        }
        Ok(())
    }
}

// ============================================================
// Context passed to each rule
// ============================================================

pub struct RuleContext<'a> {
    pub family: MetricFamily,
    pub sample: &'a Sample,
    pub thresholds: &'a ThresholdSet,
}

impl RuleContext<'_> {
    pub fn threshold(&self, field: &str) -> Result<f64, AnalyzeError> {
        self.thresholds.require(self.family, field)
    }

    pub fn value(&self, field: &str) -> f64 {
        self.sample.value(field)
    }

    pub fn interface(&self) -> &str {
        self.sample.interface.as_deref().unwrap_or("unknown")
    }
}

// ============================================================
// Entry point
// ============================================================

/// Runs every rule of `family` over `sample`, in order.
pub fn diagnose(
    sample: &Sample,
    family: MetricFamily,
    thresholds: &ThresholdSet,
) -> Result<Diagnosis, AnalyzeError> {
    let ctx = RuleContext {
        family,
        sample,
        thresholds,
    };

    let mut hints = Vec::new();
    for rule in rules::rules_for(family) {
        if let Some(hint) = rule.evaluate(&ctx)?.into_hint() {
            hints.push(hint);
        }
    }
    Ok(Diagnosis { hints })
}
