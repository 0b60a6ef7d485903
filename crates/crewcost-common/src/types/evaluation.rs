//! Evaluation records - one per (topology, budget, workload, protocol)
//!
//! An [`EvaluationResult`] is produced by the cost engine and never mutated.
//! Gating wraps it in a [`GatedResult`] that adds the per-gate map and the
//! aggregate verdict. Ratios and rates carry 4 decimals; tokens-per-worker,
//! latency and throughput carry 2.

use serde::{Deserialize, Serialize};

use super::modes::ModelTier;
use super::profiles::{ProtocolMode, WorkloadKind};
use super::topology::Topology;

/// Estimated metrics for one topology
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub topology: Topology,
    pub participants: u32,
    /// Workers executing concurrently
    pub parallelism: u32,
    pub model_tier: ModelTier,
    pub tasks: u32,
    pub tasks_per_worker: f64,
    pub workload_profile: WorkloadKind,
    pub protocol_mode: ProtocolMode,
    pub degradation_applied: bool,
    /// Audit trail of degradation steps, empty unless degraded
    pub degradation_actions: Vec<String>,
    pub execution_tokens: u64,
    pub coordination_tokens: u64,
    pub cache_savings_tokens: u64,
    /// Never below 1
    pub total_tokens: u64,
    pub coordination_ratio: f64,
    /// Clamped to [0, 0.99]
    pub estimated_pass_rate: f64,
    pub estimated_defect_escape: f64,
    pub estimated_p95_latency_s: f64,
    /// Tasks per day
    pub estimated_throughput_tpd: f64,
    pub budget_limit_tokens: u64,
    /// Ceiling minus total; negative when over budget
    pub budget_headroom_tokens: i64,
    pub budget_ok: bool,
}

/// Per-gate verdicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateOutcome {
    pub coordination_ratio_ok: bool,
    pub quality_ok: bool,
    pub latency_ok: bool,
    pub budget_ok: bool,
}

impl GateOutcome {
    /// Logical AND of all four gates
    pub fn pass(&self) -> bool {
        self.coordination_ratio_ok && self.quality_ok && self.latency_ok && self.budget_ok
    }
}

/// An evaluation tagged with its gate verdicts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatedResult {
    #[serde(flatten)]
    pub result: EvaluationResult,
    pub gates: GateOutcome,
    pub gate_pass: bool,
}

impl GatedResult {
    pub fn new(result: EvaluationResult, gates: GateOutcome) -> Self {
        Self {
            result,
            gate_pass: gates.pass(),
            gates,
        }
    }

    pub fn topology(&self) -> Topology {
        self.result.topology
    }
}
