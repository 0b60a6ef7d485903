//! Cost engine - token, latency, and quality estimates per topology
pub mod engine;

pub use self::engine::{CostEngine, CostOverrides};

use crewcost_common::{
    BudgetProfile, BudgetTier, EvaluationParams, ProtocolProfile, WorkloadProfile,
};

/// Batch shape plus the profiles selected for one evaluation
#[derive(Debug, Clone, Copy)]
pub struct Scenario<'a> {
    pub tasks: u32,
    pub avg_task_tokens: u32,
    pub rounds: u32,
    pub budget: &'a BudgetProfile,
    pub workload: &'a WorkloadProfile,
    pub protocol: &'a ProtocolProfile,
}

impl Scenario<'static> {
    /// Bind the run parameters to one budget tier
    pub fn for_budget(params: &EvaluationParams, tier: BudgetTier) -> Self {
        Self {
            tasks: params.tasks,
            avg_task_tokens: params.avg_task_tokens,
            rounds: params.coordination_rounds,
            budget: tier.profile(),
            workload: params.workload.profile(),
            protocol: params.protocol.profile(),
        }
    }
}
