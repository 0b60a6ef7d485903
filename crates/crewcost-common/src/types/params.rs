//! Validated evaluation inputs
//!
//! Everything here is checked before the engine runs. Out-of-range scalars
//! are rejected with the field name and value, never defaulted.

use serde::{Deserialize, Serialize};

use super::modes::{DegradationPolicy, RecommendationMode};
use super::profiles::{BudgetTier, ProtocolMode, WorkloadKind};
use super::topology::Topology;
use crate::error::{CrewCostError, Result};

/// Caller-supplied gate thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GateThresholds {
    /// In (0, 1)
    pub max_coordination_ratio: f64,
    /// In (0, 1]
    pub min_pass_rate: f64,
    /// Seconds, > 0
    pub max_p95_latency: f64,
}

impl Default for GateThresholds {
    fn default() -> Self {
        Self {
            max_coordination_ratio: 0.20,
            min_pass_rate: 0.80,
            max_p95_latency: 180.0,
        }
    }
}

impl GateThresholds {
    pub fn validate(&self) -> Result<()> {
        let ratio = self.max_coordination_ratio;
        if !(ratio > 0.0 && ratio < 1.0) {
            return Err(CrewCostError::invalid(
                "max_coordination_ratio",
                ratio,
                "must be in (0, 1)",
            ));
        }
        let pass = self.min_pass_rate;
        if !(pass > 0.0 && pass <= 1.0) {
            return Err(CrewCostError::invalid("min_pass_rate", pass, "must be in (0, 1]"));
        }
        let latency = self.max_p95_latency;
        if !(latency > 0.0 && latency.is_finite()) {
            return Err(CrewCostError::invalid("max_p95_latency", latency, "must be > 0"));
        }
        Ok(())
    }
}

/// Which budget profiles to evaluate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetScope {
    One(BudgetTier),
    All,
}

impl BudgetScope {
    /// Tiers in declared order
    pub fn tiers(&self) -> Vec<BudgetTier> {
        match self {
            BudgetScope::One(tier) => vec![*tier],
            BudgetScope::All => BudgetTier::ALL.to_vec(),
        }
    }
}

/// Full set of evaluation inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationParams {
    pub tasks: u32,
    pub avg_task_tokens: u32,
    pub coordination_rounds: u32,
    pub topologies: Vec<Topology>,
    pub workload: WorkloadKind,
    pub protocol: ProtocolMode,
    pub degradation_policy: DegradationPolicy,
    pub recommendation_mode: RecommendationMode,
    pub gates: GateThresholds,
}

impl Default for EvaluationParams {
    fn default() -> Self {
        Self {
            tasks: 24,
            avg_task_tokens: 1400,
            coordination_rounds: 4,
            topologies: Topology::ALL.to_vec(),
            workload: WorkloadKind::Mixed,
            protocol: ProtocolMode::A2aLite,
            degradation_policy: DegradationPolicy::None,
            recommendation_mode: RecommendationMode::Balanced,
            gates: GateThresholds::default(),
        }
    }
}

impl EvaluationParams {
    /// Reject zero task counts, zero token sizes, and an empty topology list
    pub fn validate(&self) -> Result<()> {
        if self.tasks == 0 {
            return Err(CrewCostError::invalid("tasks", self.tasks, "must be > 0"));
        }
        if self.avg_task_tokens == 0 {
            return Err(CrewCostError::invalid(
                "avg_task_tokens",
                self.avg_task_tokens,
                "must be > 0",
            ));
        }
        if self.topologies.is_empty() {
            return Err(CrewCostError::invalid("topologies", "", "topology list is empty"));
        }
        self.gates.validate()
    }

    pub fn with_topologies(mut self, topologies: impl Into<Vec<Topology>>) -> Self {
        self.topologies = topologies.into();
        self
    }

    pub fn with_degradation(mut self, policy: DegradationPolicy) -> Self {
        self.degradation_policy = policy;
        self
    }

    pub fn with_protocol(mut self, protocol: ProtocolMode) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn with_gates(mut self, gates: GateThresholds) -> Self {
        self.gates = gates;
        self
    }
}
