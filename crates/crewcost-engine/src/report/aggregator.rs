//! Budget reports and sweeps
//!
//! One report per budget tier: evaluate every requested topology, gate each
//! result, rank the set four ways, then score a recommendation pool. The pool
//! is the gate-passing subset, or the whole set when nothing passes.

use std::cmp::Reverse;

use crewcost_common::{
    BudgetReport, BudgetScope, BudgetTier, EvaluationParams, GateViolation, GatedResult,
    Rankings, Result, Topology,
};
use ordered_float::OrderedFloat;
use tracing::{instrument, warn};

use crate::cost::Scenario;
use crate::degradation;
use crate::gating::GateEvaluator;
use crate::scoring::RecommendationScorer;

/// Evaluate all requested topologies under one budget tier
///
/// `params` is assumed valid; [`evaluate_scope`] validates before calling.
#[instrument(skip(params), fields(topologies = params.topologies.len()))]
pub fn evaluate_budget(tier: BudgetTier, params: &EvaluationParams) -> BudgetReport {
    let scenario = Scenario::for_budget(params, tier);
    let gates = GateEvaluator::new(params.gates);

    let results: Vec<GatedResult> = params
        .topologies
        .iter()
        .map(|topology| {
            let result = degradation::evaluate(
                *topology,
                &scenario,
                params.degradation_policy,
                params.gates.max_coordination_ratio,
            );
            gates.tag(result)
        })
        .collect();

    let passing: Vec<&GatedResult> = results.iter().filter(|r| r.gate_pass).collect();
    let used_gate_filtered_pool = !passing.is_empty();
    let pool = if used_gate_filtered_pool {
        passing
    } else {
        warn!(
            budget = %tier,
            "no topology passed every gate; scoring the full result set"
        );
        results.iter().collect()
    };

    let mut recommendation = RecommendationScorer::score(&pool, params.recommendation_mode);
    recommendation.used_gate_filtered_pool = used_gate_filtered_pool;

    BudgetReport {
        budget_profile: tier,
        rankings: rank(&results),
        results,
        recommendation,
    }
}

/// Four stable orderings over one result set
pub fn rank(results: &[GatedResult]) -> Rankings {
    fn order_by<K: Ord>(results: &[GatedResult], key: impl Fn(&GatedResult) -> K) -> Vec<Topology> {
        let mut sorted: Vec<&GatedResult> = results.iter().collect();
        sorted.sort_by_key(|r| key(*r));
        sorted.into_iter().map(GatedResult::topology).collect()
    }

    Rankings {
        cost_asc: order_by(results, |r| r.result.total_tokens),
        coordination_ratio_asc: order_by(results, |r| OrderedFloat(r.result.coordination_ratio)),
        latency_asc: order_by(results, |r| OrderedFloat(r.result.estimated_p95_latency_s)),
        pass_rate_desc: order_by(results, |r| Reverse(OrderedFloat(r.result.estimated_pass_rate))),
    }
}

/// Validate `params`, then build one report per tier in declared order
#[instrument(skip(params))]
pub fn evaluate_scope(scope: BudgetScope, params: &EvaluationParams) -> Result<Vec<BudgetReport>> {
    params.validate()?;
    Ok(scope
        .tiers()
        .into_iter()
        .map(|tier| evaluate_budget(tier, params))
        .collect())
}

/// Every failed gate across `reports`, in report then result order
pub fn gate_violations(reports: &[BudgetReport]) -> Vec<GateViolation> {
    reports
        .iter()
        .flat_map(|report| {
            report
                .results
                .iter()
                .flat_map(move |r| GateEvaluator::violations(report.budget_profile, r))
        })
        .collect()
}

pub fn any_gate_violated(reports: &[BudgetReport]) -> bool {
    !reports.iter().all(BudgetReport::all_gates_pass)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crewcost_common::{GateKind, RecommendationMode};

    #[test]
    fn test_medium_rankings() {
        let report = evaluate_budget(BudgetTier::Medium, &EvaluationParams::default());
        use Topology::*;
        assert_eq!(
            report.rankings.cost_asc,
            vec![LeadSubagent, Single, StarTeam, MeshTeam]
        );
        assert_eq!(
            report.rankings.coordination_ratio_asc,
            vec![Single, LeadSubagent, StarTeam, MeshTeam]
        );
        assert_eq!(
            report.rankings.latency_asc,
            vec![StarTeam, MeshTeam, Single, LeadSubagent]
        );
        assert_eq!(
            report.rankings.pass_rate_desc,
            vec![StarTeam, LeadSubagent, MeshTeam, Single]
        );
    }

    #[test]
    fn test_rank_ties_keep_input_order() {
        let report = evaluate_budget(
            BudgetTier::Medium,
            &EvaluationParams::default().with_topologies(vec![Topology::StarTeam]),
        );
        let mut results = report.results.clone();
        let mut twin = results[0].clone();
        twin.result.topology = Topology::MeshTeam;
        results.insert(0, twin);

        let rankings = rank(&results);
        assert_eq!(rankings.cost_asc, vec![Topology::MeshTeam, Topology::StarTeam]);
        assert_eq!(
            rankings.pass_rate_desc,
            vec![Topology::MeshTeam, Topology::StarTeam]
        );
    }

    #[test]
    fn test_gate_filtered_pool() {
        let report = evaluate_budget(BudgetTier::Medium, &EvaluationParams::default());
        let rec = &report.recommendation;
        assert!(rec.used_gate_filtered_pool);
        assert_eq!(rec.recommended_topology, Some(Topology::StarTeam));
        assert_eq!(rec.scores.len(), 2);
        assert!(rec.scores.iter().all(|s| s.gate_pass));
    }

    #[test]
    fn test_falls_back_to_full_pool_when_nothing_passes() {
        let params = EvaluationParams::default()
            .with_topologies(vec![Topology::Single, Topology::MeshTeam]);
        let report = evaluate_budget(BudgetTier::Medium, &params);
        assert!(!report.recommendation.used_gate_filtered_pool);
        assert_eq!(report.recommendation.scores.len(), 2);
        assert!(report.recommendation.recommended_topology.is_some());
    }

    #[test]
    fn test_scope_validates_first() {
        let params = EvaluationParams {
            avg_task_tokens: 0,
            ..EvaluationParams::default()
        };
        let err = evaluate_scope(BudgetScope::All, &params).unwrap_err();
        assert_eq!(err.field(), Some("avg_task_tokens"));
    }

    #[test]
    fn test_violation_listing() {
        let reports = evaluate_scope(
            BudgetScope::One(BudgetTier::Medium),
            &EvaluationParams::default(),
        )
        .unwrap();
        assert!(any_gate_violated(&reports));

        let listed: Vec<String> = gate_violations(&reports)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            listed,
            vec![
                "medium:single: pass_rate=0.79",
                "medium:mesh_team: coordination_ratio=0.2183",
                "medium:mesh_team: exceeded budget_limit_tokens",
            ]
        );
    }

    #[test]
    fn test_quality_mode_still_recommends_from_gated_pool() {
        let params = EvaluationParams {
            recommendation_mode: RecommendationMode::Quality,
            ..EvaluationParams::default()
        };
        let reports = evaluate_scope(BudgetScope::One(BudgetTier::Medium), &params).unwrap();
        let rec = &reports[0].recommendation;
        assert_eq!(rec.mode, RecommendationMode::Quality);
        assert!(gate_violations(&reports)
            .iter()
            .any(|v| v.gate == GateKind::CoordinationRatio));
        assert!(rec.scores.iter().all(|s| s.gate_pass));
    }
}
