pub mod cpu;
pub mod disk;
pub mod memory;
pub mod network;

use super::{RuleContext, RuleResult};
use crate::error::AnalyzeError;
use crate::family::MetricFamily;

pub trait DiagnosisRule: Send + Sync {
    fn id(&self) -> &'static str;
    fn evaluate(&self, ctx: &RuleContext) -> Result<RuleResult, AnalyzeError>;
}

/// Rules of a family in evaluation order. The order is also the order of
/// hints in the resulting diagnosis.
pub fn rules_for(family: MetricFamily) -> Vec<Box<dyn DiagnosisRule>> {
    match family {
        MetricFamily::Disk => vec![
            Box::new(disk::DiskUtilizationRule),
            Box::new(disk::DiskQueueRule),
            Box::new(disk::DiskLatencyRule),
            Box::new(disk::DiskBlockSizeRule),
        ],
        MetricFamily::Cpu => vec![Box::new(cpu::CpuIdleLowRule)],
        MetricFamily::Memory => vec![Box::new(memory::MemoryFreeLowRule)],
        MetricFamily::Network => vec![
            Box::new(network::PacketDropsRule),
            Box::new(network::PacketErrorsRule),
            Box::new(network::RxThroughputRule),
            Box::new(network::TxThroughputRule),
        ],
    }
}
