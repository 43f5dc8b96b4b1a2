use crate::analysis::{RuleContext, RuleResult};
use crate::error::AnalyzeError;

use super::DiagnosisRule;

/// Requests above this size (kB) are reported as unusually large.
const LARGE_REQUEST_KB: f64 = 1024.0;
/// Small requests only matter when the device is this busy...
const SMALL_REQUEST_UTIL_PCT: f64 = 70.0;
/// ...or serving this many transfers per second.
const SMALL_REQUEST_TPS: f64 = 500.0;

// ============================================================
// DiskUtilizationRule
// ============================================================

/// High %util, classified by the strongest accompanying signal.
pub struct DiskUtilizationRule;

impl DiagnosisRule for DiskUtilizationRule {
    fn id(&self) -> &'static str {
        "disk_util"
    }

    fn evaluate(&self, ctx: &RuleContext) -> Result<RuleResult, AnalyzeError> {
        let util_limit = ctx.threshold("%util")?;
        let await_limit = ctx.threshold("await")?;
        let aqu_limit = ctx.threshold("aqu_sz")?;
        let tps_limit = ctx.threshold("tps")?;

        if ctx.value("%util") >= util_limit {
            let result = if ctx.value("await") > await_limit && ctx.value("aqu-sz") > aqu_limit {
                RuleResult::fired(
                    "disk_io_contention",
                    "I/O contention detected (high %util, await, and aqu-sz). \
                     Consider optimizing workloads or checking queue depths.",
                )
            } else if ctx.value("tps") > tps_limit {
                RuleResult::fired(
                    "disk_util_high_tps",
                    "High %util with high TPS suggests efficient disk handling. \
                     Check for burst workloads.",
                )
            } else {
                RuleResult::fired(
                    "disk_util_high",
                    "High %util detected. Monitor I/O patterns and workload intensity.",
                )
            };
            return Ok(result);
        }
        Ok(RuleResult::NotFired)
    }
}

// ============================================================
// DiskQueueRule
// ============================================================

/// Fires on queue depth alone, even when contention was already reported.
pub struct DiskQueueRule;

impl DiagnosisRule for DiskQueueRule {
    fn id(&self) -> &'static str {
        "disk_queue"
    }

    fn evaluate(&self, ctx: &RuleContext) -> Result<RuleResult, AnalyzeError> {
        let aqu_limit = ctx.threshold("aqu_sz")?;
        if ctx.value("aqu-sz") > aqu_limit {
            return Ok(RuleResult::fired(
                "disk_queue",
                "High aqu-sz indicates queued I/O operations. \
                 Check if workloads can be optimized or parallelized.",
            ));
        }
        Ok(RuleResult::NotFired)
    }
}

// ============================================================
// DiskLatencyRule
// ============================================================

pub struct DiskLatencyRule;

impl DiagnosisRule for DiskLatencyRule {
    fn id(&self) -> &'static str {
        "disk_latency"
    }

    fn evaluate(&self, ctx: &RuleContext) -> Result<RuleResult, AnalyzeError> {
        let await_limit = ctx.threshold("await")?;

        // Idle devices can report a large await from a handful of requests.
        if ctx.value("await") > await_limit && ctx.value("%util") > 1.0 && ctx.value("tps") > 1.0
        {
            return Ok(RuleResult::fired(
                "disk_latency",
                "High await time suggests possible disk latency. \
                 Investigate storage backend or disk health.",
            ));
        }
        Ok(RuleResult::NotFired)
    }
}

// ============================================================
// DiskBlockSizeRule
// ============================================================

/// Small requests on a busy device, or very large requests. Never both.
pub struct DiskBlockSizeRule;

impl DiagnosisRule for DiskBlockSizeRule {
    fn id(&self) -> &'static str {
        "disk_block_size"
    }

    fn evaluate(&self, ctx: &RuleContext) -> Result<RuleResult, AnalyzeError> {
        let areq_limit = ctx.threshold("areq_sz")?;
        let areq = ctx.value("areq-sz");

        if areq < areq_limit {
            if ctx.value("%util") > SMALL_REQUEST_UTIL_PCT || ctx.value("tps") > SMALL_REQUEST_TPS
            {
                return Ok(RuleResult::fired(
                    "disk_small_blocks",
                    "Low areq-sz detected along with high %util and TPS. \
                     This might indicate inefficiency in handling small block sizes. \
                     Consider workload optimization.",
                ));
            }
        } else if areq > LARGE_REQUEST_KB {
            return Ok(RuleResult::fired(
                "disk_large_blocks",
                "Large areq-sz detected. Verify if this aligns with workload expectations, \
                 as large I/O sizes may amplify latency in some cases.",
            ));
        }
        Ok(RuleResult::NotFired)
    }
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::diagnose;
    use crate::family::MetricFamily;
    use crate::sample::Sample;
    use crate::thresholds::{DefaultThresholds, ThresholdSet};

    fn make_sample(tps: f64, areq: f64, aqu: f64, await_ms: f64, util: f64) -> Sample {
        Sample::new("12:10:01 AM sda")
            .with_value("tps", tps)
            .with_value("rkB/s", 0.0)
            .with_value("wkB/s", 0.0)
            .with_value("areq-sz", areq)
            .with_value("aqu-sz", aqu)
            .with_value("await", await_ms)
            .with_value("%util", util)
    }

    fn defaults() -> ThresholdSet {
        DefaultThresholds::builtin().get(MetricFamily::Disk).clone()
    }

    fn make_ctx<'a>(sample: &'a Sample, thresholds: &'a ThresholdSet) -> RuleContext<'a> {
        RuleContext {
            family: MetricFamily::Disk,
            sample,
            thresholds,
        }
    }

    fn fired_id(result: RuleResult) -> Option<&'static str> {
        result.into_hint().map(|h| h.rule_id)
    }

    #[test]
    fn contention_supersedes_generic_utilization() {
        let sample = make_sample(100.0, 600.0, 2.0, 15.0, 85.0);
        let diagnosis = diagnose(&sample, MetricFamily::Disk, &defaults()).unwrap();

        assert!(diagnosis.has_rule("disk_io_contention"));
        assert!(!diagnosis.has_rule("disk_util_high"));
        assert!(!diagnosis.has_rule("disk_util_high_tps"));
        // Queue rule still fires independently.
        assert!(diagnosis.has_rule("disk_queue"));
    }

    #[test]
    fn utilization_branch_priority() {
        let thresholds = defaults();

        let busy_tps = make_sample(1500.0, 600.0, 0.5, 15.0, 90.0);
        let r = DiskUtilizationRule
            .evaluate(&make_ctx(&busy_tps, &thresholds))
            .unwrap();
        assert_eq!(fired_id(r), Some("disk_util_high_tps"));

        let plain = make_sample(100.0, 600.0, 0.5, 2.0, 80.0);
        let r = DiskUtilizationRule
            .evaluate(&make_ctx(&plain, &thresholds))
            .unwrap();
        assert_eq!(fired_id(r), Some("disk_util_high"));

        let idle = make_sample(100.0, 600.0, 5.0, 50.0, 79.9);
        let r = DiskUtilizationRule
            .evaluate(&make_ctx(&idle, &thresholds))
            .unwrap();
        assert_eq!(r, RuleResult::NotFired);
    }

    #[test]
    fn latency_requires_activity() {
        let thresholds = defaults();

        let active = make_sample(5.0, 600.0, 0.1, 25.0, 3.0);
        assert!(
            DiskLatencyRule
                .evaluate(&make_ctx(&active, &thresholds))
                .unwrap()
                .is_fired()
        );

        let no_tps = make_sample(0.5, 600.0, 0.1, 25.0, 3.0);
        assert!(
            !DiskLatencyRule
                .evaluate(&make_ctx(&no_tps, &thresholds))
                .unwrap()
                .is_fired()
        );
    }

    #[test]
    fn large_blocks_exclude_small_blocks() {
        let thresholds = defaults();
        for (tps, util) in [(0.0, 0.0), (800.0, 95.0), (100.0, 75.0)] {
            let sample = make_sample(tps, 2000.0, 0.1, 1.0, util);
            let diagnosis = diagnose(&sample, MetricFamily::Disk, &thresholds).unwrap();
            assert!(diagnosis.has_rule("disk_large_blocks"));
            assert!(!diagnosis.has_rule("disk_small_blocks"));
        }
    }

    #[test]
    fn small_blocks_need_busy_device() {
        let thresholds = defaults();

        let busy = make_sample(600.0, 8.0, 0.1, 1.0, 10.0);
        let r = DiskBlockSizeRule
            .evaluate(&make_ctx(&busy, &thresholds))
            .unwrap();
        assert_eq!(fired_id(r), Some("disk_small_blocks"));

        let quiet = make_sample(10.0, 8.0, 0.1, 1.0, 10.0);
        let r = DiskBlockSizeRule
            .evaluate(&make_ctx(&quiet, &thresholds))
            .unwrap();
        assert_eq!(r, RuleResult::NotFired);

        // Between the two bounds nothing fires.
        let mid = make_sample(600.0, 800.0, 0.1, 1.0, 90.0);
        let r = DiskBlockSizeRule.evaluate(&make_ctx(&mid, &thresholds)).unwrap();
        assert_eq!(r, RuleResult::NotFired);
    }

    #[test]
    fn override_await_is_used_for_latency() {
        let mut thresholds = defaults();
        thresholds.insert("await", 999.0);

        let sample = make_sample(50.0, 600.0, 0.1, 500.0, 50.0);
        let diagnosis = diagnose(&sample, MetricFamily::Disk, &thresholds).unwrap();
        assert!(!diagnosis.has_rule("disk_latency"));

        let diagnosis = diagnose(&sample, MetricFamily::Disk, &defaults()).unwrap();
        assert!(diagnosis.has_rule("disk_latency"));
    }
}
