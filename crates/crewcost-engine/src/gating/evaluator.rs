//! Gate evaluation
//!
//! Gates compare the rounded record values against caller thresholds. Each
//! gate is independent; `gate_pass` is their conjunction.

use crewcost_common::{
    BudgetTier, EvaluationResult, GateKind, GateOutcome, GateThresholds, GateViolation,
    GatedResult,
};

pub struct GateEvaluator {
    thresholds: GateThresholds,
}

impl GateEvaluator {
    pub fn new(thresholds: GateThresholds) -> Self {
        Self { thresholds }
    }

    pub fn check(&self, result: &EvaluationResult) -> GateOutcome {
        GateOutcome {
            coordination_ratio_ok: result.coordination_ratio
                <= self.thresholds.max_coordination_ratio,
            quality_ok: result.estimated_pass_rate >= self.thresholds.min_pass_rate,
            latency_ok: result.estimated_p95_latency_s <= self.thresholds.max_p95_latency,
            budget_ok: result.budget_ok,
        }
    }

    pub fn tag(&self, result: EvaluationResult) -> GatedResult {
        let gates = self.check(&result);
        GatedResult::new(result, gates)
    }

    /// Failed gates of one tagged result, in gate declaration order
    pub fn violations(budget: BudgetTier, gated: &GatedResult) -> Vec<GateViolation> {
        if gated.gate_pass {
            return Vec::new();
        }
        let result = &gated.result;
        let failed = [
            (!gated.gates.coordination_ratio_ok)
                .then_some((GateKind::CoordinationRatio, result.coordination_ratio)),
            (!gated.gates.quality_ok).then_some((GateKind::Quality, result.estimated_pass_rate)),
            (!gated.gates.latency_ok)
                .then_some((GateKind::Latency, result.estimated_p95_latency_s)),
            (!gated.gates.budget_ok).then_some((GateKind::Budget, result.total_tokens as f64)),
        ];
        failed
            .into_iter()
            .flatten()
            .map(|(gate, value)| GateViolation {
                budget_profile: budget,
                topology: result.topology,
                gate,
                value,
            })
            .collect()
    }
}

impl Default for GateEvaluator {
    fn default() -> Self {
        Self::new(GateThresholds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::{CostEngine, CostOverrides, Scenario};
    use crewcost_common::{EvaluationParams, Topology};

    fn result(topology: Topology) -> EvaluationResult {
        let scenario = Scenario::for_budget(&EvaluationParams::default(), BudgetTier::Medium);
        CostEngine::compute(topology, &scenario, &CostOverrides::default())
    }

    #[test]
    fn test_star_passes_defaults() {
        let gated = GateEvaluator::default().tag(result(Topology::StarTeam));
        assert!(gated.gate_pass);
        assert!(GateEvaluator::violations(BudgetTier::Medium, &gated).is_empty());
    }

    #[test]
    fn test_single_fails_quality_only() {
        let gated = GateEvaluator::default().tag(result(Topology::Single));
        assert!(!gated.gate_pass);
        assert!(!gated.gates.quality_ok);
        assert!(gated.gates.coordination_ratio_ok);
        assert!(gated.gates.latency_ok);
        assert!(gated.gates.budget_ok);

        let violations = GateEvaluator::violations(BudgetTier::Medium, &gated);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].to_string(), "medium:single: pass_rate=0.79");
    }

    #[test]
    fn test_mesh_fails_coordination_and_budget() {
        let gated = GateEvaluator::default().tag(result(Topology::MeshTeam));
        let kinds: Vec<_> = GateEvaluator::violations(BudgetTier::Medium, &gated)
            .into_iter()
            .map(|v| v.gate)
            .collect();
        assert_eq!(kinds, vec![GateKind::CoordinationRatio, GateKind::Budget]);
    }

    #[test]
    fn test_threshold_boundaries_are_inclusive() {
        let star = result(Topology::StarTeam);
        let evaluator = GateEvaluator::new(GateThresholds {
            max_coordination_ratio: star.coordination_ratio,
            min_pass_rate: star.estimated_pass_rate,
            max_p95_latency: star.estimated_p95_latency_s,
        });
        assert!(evaluator.check(&star).pass());
    }

    #[test]
    fn test_gates_are_independent() {
        let star = result(Topology::StarTeam);
        let evaluator = GateEvaluator::new(GateThresholds {
            max_p95_latency: 10.0,
            ..GateThresholds::default()
        });
        let gates = evaluator.check(&star);
        assert!(!gates.latency_ok);
        assert!(gates.coordination_ratio_ok && gates.quality_ok && gates.budget_ok);
    }
}
