//! Profile tables - budget, workload, and protocol multipliers
//!
//! Each table is a closed set keyed by an enum. Profiles are constant data
//! and are selected once per evaluation run.
//!
//! Every multiplier is strictly positive; only the quality modifiers and the
//! protocol cache bonus may be negative.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CrewCostError, Result};

/// Token and team-size ceilings for one budget tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetTier {
    Low,
    Medium,
    High,
}

impl BudgetTier {
    /// All tiers in declared sweep order
    pub const ALL: [BudgetTier; 3] = [BudgetTier::Low, BudgetTier::Medium, BudgetTier::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetTier::Low => "low",
            BudgetTier::Medium => "medium",
            BudgetTier::High => "high",
        }
    }

    /// Look up the constant profile for this tier
    pub fn profile(&self) -> &'static BudgetProfile {
        match self {
            BudgetTier::Low => &BUDGET_PROFILES[0],
            BudgetTier::Medium => &BUDGET_PROFILES[1],
            BudgetTier::High => &BUDGET_PROFILES[2],
        }
    }
}

/// Budget profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetProfile {
    /// Tier this profile belongs to
    pub tier: BudgetTier,
    /// Upper bound on a single coordination summary
    pub summary_cap_tokens: u64,
    /// Team-size ceiling for star/mesh topologies
    pub max_workers: u32,
    /// One compaction event every N rounds
    pub compaction_interval_rounds: u32,
    /// Coordination allowance added to the ceiling per task
    pub message_budget_per_task: u64,
    /// Additive pass-rate offset (may be negative)
    pub quality_modifier: f64,
}

pub const BUDGET_PROFILES: [BudgetProfile; 3] = [
    BudgetProfile {
        tier: BudgetTier::Low,
        summary_cap_tokens: 80,
        max_workers: 3,
        compaction_interval_rounds: 3,
        message_budget_per_task: 10,
        quality_modifier: -0.03,
    },
    BudgetProfile {
        tier: BudgetTier::Medium,
        summary_cap_tokens: 120,
        max_workers: 5,
        compaction_interval_rounds: 5,
        message_budget_per_task: 20,
        quality_modifier: 0.0,
    },
    BudgetProfile {
        tier: BudgetTier::High,
        summary_cap_tokens: 180,
        max_workers: 8,
        compaction_interval_rounds: 8,
        message_budget_per_task: 32,
        quality_modifier: 0.02,
    },
];

/// Kind of work in the batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkloadKind {
    Implementation,
    Debugging,
    Research,
    Mixed,
}

impl WorkloadKind {
    pub const ALL: [WorkloadKind; 4] = [
        WorkloadKind::Implementation,
        WorkloadKind::Debugging,
        WorkloadKind::Research,
        WorkloadKind::Mixed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkloadKind::Implementation => "implementation",
            WorkloadKind::Debugging => "debugging",
            WorkloadKind::Research => "research",
            WorkloadKind::Mixed => "mixed",
        }
    }

    pub fn profile(&self) -> &'static WorkloadProfile {
        match self {
            WorkloadKind::Implementation => &WORKLOAD_PROFILES[0],
            WorkloadKind::Debugging => &WORKLOAD_PROFILES[1],
            WorkloadKind::Research => &WORKLOAD_PROFILES[2],
            WorkloadKind::Mixed => &WORKLOAD_PROFILES[3],
        }
    }
}

/// Workload profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkloadProfile {
    pub kind: WorkloadKind,
    /// Scales execution tokens
    pub execution_multiplier: f64,
    /// Scales coordination message volume
    pub sync_multiplier: f64,
    /// Scales per-message summary size
    pub summary_multiplier: f64,
    /// Scales base latency
    pub latency_multiplier: f64,
    /// Additive pass-rate offset (may be negative)
    pub quality_modifier: f64,
}

pub const WORKLOAD_PROFILES: [WorkloadProfile; 4] = [
    WorkloadProfile {
        kind: WorkloadKind::Implementation,
        execution_multiplier: 1.00,
        sync_multiplier: 1.00,
        summary_multiplier: 1.00,
        latency_multiplier: 1.00,
        quality_modifier: 0.00,
    },
    WorkloadProfile {
        kind: WorkloadKind::Debugging,
        execution_multiplier: 1.12,
        sync_multiplier: 1.25,
        summary_multiplier: 1.12,
        latency_multiplier: 1.18,
        quality_modifier: -0.02,
    },
    WorkloadProfile {
        kind: WorkloadKind::Research,
        execution_multiplier: 0.95,
        sync_multiplier: 0.90,
        summary_multiplier: 0.95,
        latency_multiplier: 0.92,
        quality_modifier: 0.01,
    },
    WorkloadProfile {
        kind: WorkloadKind::Mixed,
        execution_multiplier: 1.03,
        sync_multiplier: 1.08,
        summary_multiplier: 1.05,
        latency_multiplier: 1.06,
        quality_modifier: 0.00,
    },
];

/// Inter-agent handoff protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProtocolMode {
    /// Structured low-overhead handoffs with artifact reuse
    #[serde(rename = "a2a_lite")]
    A2aLite,
    /// Verbose full-transcript handoffs
    #[serde(rename = "transcript")]
    Transcript,
}

impl ProtocolMode {
    pub const ALL: [ProtocolMode; 2] = [ProtocolMode::A2aLite, ProtocolMode::Transcript];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolMode::A2aLite => "a2a_lite",
            ProtocolMode::Transcript => "transcript",
        }
    }

    pub fn profile(&self) -> &'static ProtocolProfile {
        match self {
            ProtocolMode::A2aLite => &PROTOCOL_PROFILES[0],
            ProtocolMode::Transcript => &PROTOCOL_PROFILES[1],
        }
    }
}

/// Protocol profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProtocolProfile {
    pub mode: ProtocolMode,
    /// Scales per-message summary size
    pub summary_multiplier: f64,
    /// Fraction of coordination tokens saved by artifact reuse
    pub artifact_discount: f64,
    /// Extra seconds per coordination message
    pub latency_penalty_per_message_s: f64,
    /// Added to the topology cache factor (may be negative)
    pub cache_bonus: f64,
    /// Additive pass-rate offset (may be negative)
    pub quality_modifier: f64,
}

pub const PROTOCOL_PROFILES: [ProtocolProfile; 2] = [
    ProtocolProfile {
        mode: ProtocolMode::A2aLite,
        summary_multiplier: 1.00,
        artifact_discount: 0.18,
        latency_penalty_per_message_s: 0.00,
        cache_bonus: 0.02,
        quality_modifier: 0.01,
    },
    ProtocolProfile {
        mode: ProtocolMode::Transcript,
        summary_multiplier: 2.20,
        artifact_discount: 0.00,
        latency_penalty_per_message_s: 0.012,
        cache_bonus: -0.01,
        quality_modifier: -0.02,
    },
];

/// Resolve `raw` against a closed set of names, reporting `field` on failure
pub(crate) fn parse_named<T: Copy>(
    field: &'static str,
    raw: &str,
    candidates: &[T],
    name: impl Fn(&T) -> &'static str,
) -> Result<T> {
    let needle = raw.trim();
    candidates
        .iter()
        .find(|c| name(c) == needle)
        .copied()
        .ok_or_else(|| {
            let expected: Vec<&str> = candidates.iter().map(&name).collect();
            CrewCostError::invalid(field, raw, format!("expected one of: {}", expected.join(", ")))
        })
}

impl FromStr for BudgetTier {
    type Err = CrewCostError;

    fn from_str(s: &str) -> Result<Self> {
        parse_named("budget", s, &BudgetTier::ALL, BudgetTier::as_str)
    }
}

impl FromStr for WorkloadKind {
    type Err = CrewCostError;

    fn from_str(s: &str) -> Result<Self> {
        parse_named("workload_profile", s, &WorkloadKind::ALL, WorkloadKind::as_str)
    }
}

impl FromStr for ProtocolMode {
    type Err = CrewCostError;

    fn from_str(s: &str) -> Result<Self> {
        parse_named("protocol_mode", s, &ProtocolMode::ALL, ProtocolMode::as_str)
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ProtocolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
