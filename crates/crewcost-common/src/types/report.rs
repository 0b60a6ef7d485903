//! Budget reports, rankings, recommendations, and gate violations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::evaluation::GatedResult;
use super::modes::RecommendationMode;
use super::profiles::BudgetTier;
use super::topology::Topology;

/// Topology orderings over one report's result set
///
/// Every list is a stable sort of the input order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rankings {
    pub cost_asc: Vec<Topology>,
    pub coordination_ratio_asc: Vec<Topology>,
    pub latency_asc: Vec<Topology>,
    pub pass_rate_desc: Vec<Topology>,
}

/// Weighted score for one topology
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyScore {
    pub topology: Topology,
    pub score: f64,
    pub gate_pass: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationReason {
    WeightedScore,
    NoResults,
}

/// Recommended topology with its provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub mode: RecommendationMode,
    /// `None` when the scored pool was empty
    pub recommended_topology: Option<Topology>,
    pub reason: RecommendationReason,
    /// Descending by score
    pub scores: Vec<TopologyScore>,
    /// True when only gate-passing results were scored
    pub used_gate_filtered_pool: bool,
}

impl Recommendation {
    /// Sentinel for an empty pool
    pub fn empty(mode: RecommendationMode) -> Self {
        Self {
            mode,
            recommended_topology: None,
            reason: RecommendationReason::NoResults,
            scores: Vec::new(),
            used_gate_filtered_pool: false,
        }
    }
}

/// All results for one budget profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetReport {
    pub budget_profile: BudgetTier,
    pub results: Vec<GatedResult>,
    pub rankings: Rankings,
    pub recommendation: Recommendation,
}

impl BudgetReport {
    pub fn all_gates_pass(&self) -> bool {
        self.results.iter().all(|r| r.gate_pass)
    }

    pub fn result_for(&self, topology: Topology) -> Option<&GatedResult> {
        self.results.iter().find(|r| r.topology() == topology)
    }
}

/// Gate that rejected a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateKind {
    CoordinationRatio,
    Quality,
    Latency,
    Budget,
}

/// One failed gate for one topology under one budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateViolation {
    pub budget_profile: BudgetTier,
    pub topology: Topology,
    pub gate: GateKind,
    /// Offending metric value; for the budget gate, the total tokens
    pub value: f64,
}

impl fmt::Display for GateViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: ", self.budget_profile, self.topology)?;
        match self.gate {
            GateKind::CoordinationRatio => write!(f, "coordination_ratio={:?}", self.value),
            GateKind::Quality => write!(f, "pass_rate={:?}", self.value),
            GateKind::Latency => write!(f, "p95_latency_s={:?}", self.value),
            GateKind::Budget => f.write_str("exceeded budget_limit_tokens"),
        }
    }
}
