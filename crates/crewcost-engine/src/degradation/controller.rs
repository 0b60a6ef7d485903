//! Degradation controller: shrink the team under budget or coordination pressure
//!
//! Pressure means the base run is over its token ceiling, or its coordination
//! ratio exceeds the hint. The hint is the caller's coordination-ratio gate
//! threshold. Under pressure the engine is re-run with fewer participants,
//! smaller summaries, a quality penalty, and the economy model tier.

use crewcost_common::{
    DegradationPolicy, EvaluationResult, Topology, MIN_DEGRADED_PARTICIPANTS,
};
use tracing::{info, instrument};

use super::policy::DegradationStep;
use crate::cost::{CostEngine, CostOverrides, Scenario};

pub struct DegradationController {
    policy: DegradationPolicy,
    coordination_ratio_hint: f64,
}

impl DegradationController {
    pub fn new(policy: DegradationPolicy, coordination_ratio_hint: f64) -> Self {
        Self {
            policy,
            coordination_ratio_hint,
        }
    }

    pub fn under_pressure(&self, base: &EvaluationResult) -> bool {
        !base.budget_ok || base.coordination_ratio > self.coordination_ratio_hint
    }

    /// Return `base` unchanged, or a fresh degraded result
    pub fn apply(&self, scenario: &Scenario<'_>, base: EvaluationResult) -> EvaluationResult {
        if base.topology == Topology::Single || !self.under_pressure(&base) {
            return base;
        }
        let Some(step) = DegradationStep::for_policy(self.policy) else {
            return base;
        };

        let reduced = base
            .participants
            .saturating_sub(step.participant_delta)
            .max(MIN_DEGRADED_PARTICIPANTS);

        // Always three entries, even when the team is already at the floor
        let actions = vec![
            format!("reduce_participants:{}->{}", base.participants, reduced),
            format!("tighten_summary_scale:{}", step.summary_scale),
            format!("switch_model_tier:{}", step.model_tier),
        ];

        let overrides = CostOverrides {
            participants: Some(reduced),
            summary_scale: step.summary_scale,
            extra_quality_modifier: step.quality_penalty,
            model_tier: step.model_tier,
            degradation_actions: Some(actions),
        };
        let degraded = CostEngine::compute(base.topology, scenario, &overrides);
        debug_assert!(degraded.coordination_tokens <= base.coordination_tokens);

        info!(
            topology = %base.topology,
            policy = %self.policy,
            coordination_tokens_before = base.coordination_tokens,
            coordination_tokens_after = degraded.coordination_tokens,
            actions = ?degraded.degradation_actions,
            "degradation applied"
        );
        degraded
    }
}

/// Evaluate one topology, degrading under pressure when the policy allows
#[instrument(skip(scenario), fields(budget = %scenario.budget.tier))]
pub fn evaluate(
    topology: Topology,
    scenario: &Scenario<'_>,
    policy: DegradationPolicy,
    coordination_ratio_hint: f64,
) -> EvaluationResult {
    let base = CostEngine::compute(topology, scenario, &CostOverrides::default());
    if policy == DegradationPolicy::None {
        return base;
    }
    DegradationController::new(policy, coordination_ratio_hint).apply(scenario, base)
}
