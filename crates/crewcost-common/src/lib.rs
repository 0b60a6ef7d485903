//! # CrewCost Common
//!
//! Shared profile tables, topology model, value records, and errors for the
//! CrewCost agent-team estimator.
//!
//! ## Core Types
//!
//! - [`BudgetProfile`]/[`WorkloadProfile`]/[`ProtocolProfile`]: constant multiplier tables
//! - [`Topology`]: structural constants and the coordination message model
//! - [`EvaluationResult`]: metrics for one topology under one set of profiles
//! - [`BudgetReport`]: gated results, rankings, and a [`Recommendation`]
//! - [`EvaluationParams`]: validated run inputs

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{CrewCostError, Result};
pub use types::{
    evaluation::{EvaluationResult, GateOutcome, GatedResult},
    modes::{DegradationPolicy, ModelTier, RecommendationMode},
    params::{BudgetScope, EvaluationParams, GateThresholds},
    profiles::{
        BudgetProfile, BudgetTier, ProtocolMode, ProtocolProfile, WorkloadKind, WorkloadProfile,
    },
    report::{
        BudgetReport, GateKind, GateViolation, Rankings, Recommendation, RecommendationReason,
        TopologyScore,
    },
    topology::{parse_topologies, Topology},
};

/// Team-size ceiling for star and mesh topologies
pub const MAX_TEAM_SIZE: u32 = 5;

/// Nominal execution seconds per task slot
pub const NOMINAL_TASK_SECONDS: f64 = 6.0;

/// Base latency per coordination message in seconds
pub const MESSAGE_LATENCY_S: f64 = 0.02;

/// Share of the average task size carried in one summary
pub const SUMMARY_FRACTION: f64 = 0.08;

/// Smallest summary before the budget cap applies
pub const MIN_SUMMARY_TOKENS: u64 = 24;

/// Floor for a summary after all scaling
pub const SUMMARY_FLOOR_TOKENS: u64 = 16;

/// Coordination discount per compaction event (10%)
pub const COMPACTION_DISCOUNT_PER_EVENT: f64 = 0.10;

/// Compaction discount ceiling (35%)
pub const MAX_COMPACTION_DISCOUNT: f64 = 0.35;

/// Cache factor ceiling (30%)
pub const MAX_CACHE_FACTOR: f64 = 0.30;

/// Pass-rate ceiling
pub const MAX_PASS_RATE: f64 = 0.99;

/// Smallest team a degraded run may shrink to
pub const MIN_DEGRADED_PARTICIPANTS: u32 = 2;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Round to `places` decimals for reporting; exact ties go to the even neighbour
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}
