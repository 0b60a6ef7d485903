//! Objective weights per recommendation mode

use crewcost_common::RecommendationMode;

/// Weights applied to quality, normalized cost, and normalized latency
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub quality: f64,
    pub cost: f64,
    pub latency: f64,
}

impl ScoreWeights {
    pub const fn for_mode(mode: RecommendationMode) -> Self {
        match mode {
            RecommendationMode::Balanced => Self {
                quality: 0.45,
                cost: 0.35,
                latency: 0.20,
            },
            RecommendationMode::Cost => Self {
                quality: 0.25,
                cost: 0.55,
                latency: 0.20,
            },
            RecommendationMode::Quality => Self {
                quality: 0.65,
                cost: 0.20,
                latency: 0.15,
            },
        }
    }
}
