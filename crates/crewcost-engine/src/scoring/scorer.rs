//! Weighted recommendation over a pool of gated results
//!
//! ```text
//! cost_norm    = 1 - total_tokens / max(1, max_total_tokens)
//! latency_norm = 1 - p95_latency / max(1.0, max_p95_latency)
//! score        = quality·w_q + cost_norm·w_c + latency_norm·w_l
//! ```
//!
//! Normalization is relative to the pool, so the same topology can score
//! differently depending on what it is compared against.

use std::cmp::Reverse;

use crewcost_common::{
    round_to, GatedResult, Recommendation, RecommendationMode, RecommendationReason,
    TopologyScore,
};
use ordered_float::OrderedFloat;

use super::weights::ScoreWeights;

pub struct RecommendationScorer;

impl RecommendationScorer {
    /// Score the pool and pick the best; ties keep pool order
    pub fn score(pool: &[&GatedResult], mode: RecommendationMode) -> Recommendation {
        if pool.is_empty() {
            return Recommendation::empty(mode);
        }

        let weights = ScoreWeights::for_mode(mode);
        let max_tokens = pool
            .iter()
            .map(|r| r.result.total_tokens)
            .max()
            .unwrap_or(1)
            .max(1);
        let max_latency = pool
            .iter()
            .map(|r| r.result.estimated_p95_latency_s)
            .fold(f64::MIN, f64::max)
            .max(1.0);

        let mut scores: Vec<TopologyScore> = pool
            .iter()
            .map(|gated| {
                let result = &gated.result;
                let cost_norm = 1.0 - result.total_tokens as f64 / max_tokens as f64;
                let latency_norm = 1.0 - result.estimated_p95_latency_s / max_latency;
                let score = result.estimated_pass_rate * weights.quality
                    + cost_norm * weights.cost
                    + latency_norm * weights.latency;
                TopologyScore {
                    topology: result.topology,
                    score: round_to(score, 5),
                    gate_pass: gated.gate_pass,
                }
            })
            .collect();
        scores.sort_by_key(|s| Reverse(OrderedFloat(s.score)));

        Recommendation {
            mode,
            recommended_topology: scores.first().map(|s| s.topology),
            reason: RecommendationReason::WeightedScore,
            scores,
            used_gate_filtered_pool: false,
        }
    }
}
