//! # CrewCost Engine
//!
//! Token-cost, latency, and quality estimates for multi-agent team
//! topologies, with degradation, gating, and a weighted recommendation.
//!
//! ## Pipeline
//!
//! ```text
//! params ─► Scenario(budget) ─► CostEngine ─► DegradationController ─► GateEvaluator
//!                                                                        │
//!                      BudgetReport ◄─ Rankings + RecommendationScorer ◄─┘
//! ```
//!
//! ## Coordination Ratio
//!
//! ```text
//! ρ = coordination_tokens / max(1, execution + coordination - cache)
//! ```
//!
//! Where:
//! - ρ: share of the token bill spent on synchronization
//! - coordination: messages · summary size, after compaction and artifact reuse
//! - cache: execution tokens saved by prompt caching
//!
//! ## Degradation
//!
//! Team topologies whose base run is over budget, or whose ρ exceeds the
//! coordination-ratio gate, are re-run smaller under `auto` or `aggressive`.

pub mod cost;
pub mod degradation;
pub mod gating;
pub mod report;
pub mod scoring;

pub use cost::{CostEngine, CostOverrides, Scenario};
pub use degradation::{evaluate, DegradationController, DegradationStep};
pub use gating::GateEvaluator;
pub use report::{any_gate_violated, evaluate_budget, evaluate_scope, gate_violations, rank};
pub use scoring::{RecommendationScorer, ScoreWeights};
