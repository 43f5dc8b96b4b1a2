use crate::analysis::{RuleContext, RuleResult};
use crate::error::AnalyzeError;

use super::DiagnosisRule;

// ============================================================
// CpuIdleLowRule
// ============================================================

pub struct CpuIdleLowRule;

impl DiagnosisRule for CpuIdleLowRule {
    fn id(&self) -> &'static str {
        "cpu_idle_low"
    }

    fn evaluate(&self, ctx: &RuleContext) -> Result<RuleResult, AnalyzeError> {
        let idle_limit = ctx.threshold("%idle")?;
        if ctx.value("%idle") < idle_limit {
            return Ok(RuleResult::fired(
                "cpu_idle_low",
                "High CPU usage detected (low %idle). \
                 Investigate processes consuming high CPU resources.",
            ));
        }
        Ok(RuleResult::NotFired)
    }
}
