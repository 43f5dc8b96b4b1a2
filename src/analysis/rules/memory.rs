use crate::analysis::{RuleContext, RuleResult};
use crate::error::AnalyzeError;

use super::DiagnosisRule;

// ============================================================
// MemoryFreeLowRule
// ============================================================

/// kbmemused, kbactive and kbinact limits exist in the configuration but no
/// rule consults them.
pub struct MemoryFreeLowRule;

impl DiagnosisRule for MemoryFreeLowRule {
    fn id(&self) -> &'static str {
        "memory_free_low"
    }

    fn evaluate(&self, ctx: &RuleContext) -> Result<RuleResult, AnalyzeError> {
        let free_limit = ctx.threshold("kbmemfree")?;
        if ctx.value("kbmemfree") < free_limit {
            return Ok(RuleResult::fired(
                "memory_free_low",
                "Low free memory detected. Investigate processes consuming excessive memory.",
            ));
        }
        Ok(RuleResult::NotFired)
    }
}
