//! Degradation steps per policy

use crewcost_common::{DegradationPolicy, ModelTier};

/// What a policy changes when pressure is detected
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DegradationStep {
    pub participant_delta: u32,
    pub summary_scale: f64,
    pub quality_penalty: f64,
    pub model_tier: ModelTier,
}

impl DegradationStep {
    /// `None` for the `none` policy
    pub fn for_policy(policy: DegradationPolicy) -> Option<Self> {
        match policy {
            DegradationPolicy::None => None,
            DegradationPolicy::Auto => Some(Self {
                participant_delta: 1,
                summary_scale: 0.82,
                quality_penalty: -0.01,
                model_tier: ModelTier::Economy,
            }),
            DegradationPolicy::Aggressive => Some(Self {
                participant_delta: 2,
                summary_scale: 0.65,
                quality_penalty: -0.03,
                model_tier: ModelTier::Economy,
            }),
        }
    }
}
