use crate::analysis::{RuleContext, RuleResult};
use crate::error::AnalyzeError;

use super::DiagnosisRule;

// ============================================================
// PacketDropsRule
// ============================================================

pub struct PacketDropsRule;

impl DiagnosisRule for PacketDropsRule {
    fn id(&self) -> &'static str {
        "net_packet_drops"
    }

    fn evaluate(&self, ctx: &RuleContext) -> Result<RuleResult, AnalyzeError> {
        let rx_limit = ctx.threshold("rxdrop")?;
        let tx_limit = ctx.threshold("txdrop")?;
        if ctx.value("rxdrop") > rx_limit || ctx.value("txdrop") > tx_limit {
            return Ok(RuleResult::fired(
                "net_packet_drops",
                format!(
                    "Packet drops detected on {}. Investigate network hardware or configuration.",
                    ctx.interface()
                ),
            ));
        }
        Ok(RuleResult::NotFired)
    }
}

// ============================================================
// PacketErrorsRule
// ============================================================

pub struct PacketErrorsRule;

impl DiagnosisRule for PacketErrorsRule {
    fn id(&self) -> &'static str {
        "net_packet_errors"
    }

    fn evaluate(&self, ctx: &RuleContext) -> Result<RuleResult, AnalyzeError> {
        let rx_limit = ctx.threshold("rxerrs")?;
        let tx_limit = ctx.threshold("txerrs")?;
        if ctx.value("rxerrs") > rx_limit || ctx.value("txerrs") > tx_limit {
            return Ok(RuleResult::fired(
                "net_packet_errors",
                format!(
                    "Packet errors detected on {}. \
                     Check for issues with network interface or driver.",
                    ctx.interface()
                ),
            ));
        }
        Ok(RuleResult::NotFired)
    }
}

// ============================================================
// RxThroughputRule / TxThroughputRule
// ============================================================

pub struct RxThroughputRule;

impl DiagnosisRule for RxThroughputRule {
    fn id(&self) -> &'static str {
        "net_rx_throughput"
    }

    fn evaluate(&self, ctx: &RuleContext) -> Result<RuleResult, AnalyzeError> {
        let limit = ctx.threshold("rxkB/s")?;
        let rx = ctx.value("rxkB/s");
        if rx > limit {
            return Ok(RuleResult::fired(
                "net_rx_throughput",
                format!(
                    "High receive throughput detected on {}: {rx} kB/s. \
                     Ensure network bandwidth is sufficient.",
                    ctx.interface()
                ),
            ));
        }
        Ok(RuleResult::NotFired)
    }
}

pub struct TxThroughputRule;

impl DiagnosisRule for TxThroughputRule {
    fn id(&self) -> &'static str {
        "net_tx_throughput"
    }

    fn evaluate(&self, ctx: &RuleContext) -> Result<RuleResult, AnalyzeError> {
        let limit = ctx.threshold("txkB/s")?;
        let tx = ctx.value("txkB/s");
        if tx > limit {
            return Ok(RuleResult::fired(
                "net_tx_throughput",
                format!(
                    "High transmit throughput detected on {}: {tx} kB/s. \
                     Ensure network bandwidth is sufficient.",
                    ctx.interface()
                ),
            ));
        }
        Ok(RuleResult::NotFired)
    }
}

// ============================================================
// Tests
// ============================================================
