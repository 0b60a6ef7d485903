//! Report aggregation - per-budget reports, sweeps, and violation listing
pub mod aggregator;

pub use self::aggregator::{
    any_gate_violated, evaluate_budget, evaluate_scope, gate_violations, rank,
};
