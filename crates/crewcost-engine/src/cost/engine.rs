//! Closed-form cost model
//!
//! ```text
//! execution    = tasks · avg_tokens · topology.execution_factor · workload.execution
//! summary      = clamp(avg_tokens · 0.08, 24, budget.cap) · workload.summary · protocol.summary · scale
//! coordination = messages · summary · (1 - compaction) · (1 - protocol.artifact_discount)
//! cache        = execution · clamp(topology.cache + protocol.cache_bonus, 0, 0.30)
//! total        = max(1, execution + coordination - cache)
//! ```
//!
//! Token stages are truncated to integers as they are produced. Ratios and
//! latencies are rounded only when written into the result.

use crewcost_common::{
    round_to, BudgetProfile, EvaluationResult, ModelTier, ProtocolProfile, Topology,
    WorkloadProfile, COMPACTION_DISCOUNT_PER_EVENT, MAX_CACHE_FACTOR, MAX_COMPACTION_DISCOUNT,
    MAX_PASS_RATE, MESSAGE_LATENCY_S, MIN_SUMMARY_TOKENS, NOMINAL_TASK_SECONDS,
    SECONDS_PER_DAY, SUMMARY_FLOOR_TOKENS, SUMMARY_FRACTION,
};
use tracing::debug;

use super::Scenario;

/// Adjustments applied when the degradation controller re-runs the engine
#[derive(Debug, Clone, PartialEq)]
pub struct CostOverrides {
    /// Replaces the topology's participant ceiling
    pub participants: Option<u32>,
    /// Multiplies the per-message summary size
    pub summary_scale: f64,
    /// Added to the pass rate
    pub extra_quality_modifier: f64,
    pub model_tier: ModelTier,
    /// Marks the result as degraded and records the steps taken
    pub degradation_actions: Option<Vec<String>>,
}

impl Default for CostOverrides {
    fn default() -> Self {
        Self {
            participants: None,
            summary_scale: 1.0,
            extra_quality_modifier: 0.0,
            model_tier: ModelTier::Primary,
            degradation_actions: None,
        }
    }
}

pub struct CostEngine;

impl CostEngine {
    /// Compose topology, budget, workload, and protocol into one result
    pub fn compute(
        topology: Topology,
        scenario: &Scenario<'_>,
        overrides: &CostOverrides,
    ) -> EvaluationResult {
        let Scenario {
            tasks,
            avg_task_tokens,
            rounds,
            budget,
            workload,
            protocol,
        } = *scenario;

        let participants = overrides
            .participants
            .unwrap_or_else(|| topology.participants(budget))
            .max(1);
        let parallelism = topology.parallelism(participants);

        let execution_tokens = (f64::from(tasks)
            * f64::from(avg_task_tokens)
            * topology.execution_factor()
            * workload.execution_multiplier) as u64;

        let summary_tokens =
            Self::summary_tokens(avg_task_tokens, budget, workload, protocol, overrides.summary_scale);
        let messages = topology.coordination_messages(rounds, participants, workload);
        let coordination_tokens = Self::coordination_tokens(
            messages.saturating_mul(summary_tokens),
            rounds,
            budget,
            protocol,
        );

        let cache_factor =
            (topology.cache_factor() + protocol.cache_bonus).clamp(0.0, MAX_CACHE_FACTOR);
        let cache_savings_tokens = (execution_tokens as f64 * cache_factor) as u64;

        let total_tokens = execution_tokens
            .saturating_add(coordination_tokens)
            .saturating_sub(cache_savings_tokens)
            .max(1);
        let coordination_ratio = coordination_tokens as f64 / total_tokens as f64;

        let pass_rate = (topology.baseline_pass_rate()
            + budget.quality_modifier
            + workload.quality_modifier
            + protocol.quality_modifier
            + overrides.extra_quality_modifier)
            .clamp(0.0, MAX_PASS_RATE);
        let defect_escape = (1.0 - pass_rate).max(0.0);

        let tasks_per_worker = f64::from(tasks) / f64::from(parallelism);
        let base_latency_s = tasks_per_worker * NOMINAL_TASK_SECONDS * workload.latency_multiplier;
        let sync_penalty_s =
            messages as f64 * (MESSAGE_LATENCY_S + protocol.latency_penalty_per_message_s);
        let p95_latency_s = round_to(base_latency_s + sync_penalty_s, 2);
        let throughput_tpd = f64::from(tasks) / p95_latency_s.max(1.0) * SECONDS_PER_DAY;

        // Token counts saturate at u64::MAX for extreme batch shapes
        let budget_limit_tokens = u64::from(tasks)
            .saturating_mul(u64::from(avg_task_tokens))
            .saturating_add(u64::from(tasks).saturating_mul(budget.message_budget_per_task));
        let budget_ok = total_tokens <= budget_limit_tokens;
        let budget_headroom_tokens = (i128::from(budget_limit_tokens) - i128::from(total_tokens))
            .clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64;

        debug!(
            topology = %topology,
            budget = %budget.tier,
            participants,
            messages,
            summary_tokens,
            total_tokens,
            "computed topology cost"
        );

        EvaluationResult {
            topology,
            participants,
            parallelism,
            model_tier: overrides.model_tier,
            tasks,
            tasks_per_worker: round_to(tasks_per_worker, 2),
            workload_profile: workload.kind,
            protocol_mode: protocol.mode,
            degradation_applied: overrides.degradation_actions.is_some(),
            degradation_actions: overrides.degradation_actions.clone().unwrap_or_default(),
            execution_tokens,
            coordination_tokens,
            cache_savings_tokens,
            total_tokens,
            coordination_ratio: round_to(coordination_ratio, 4),
            estimated_pass_rate: round_to(pass_rate, 4),
            estimated_defect_escape: round_to(defect_escape, 4),
            estimated_p95_latency_s: p95_latency_s,
            estimated_throughput_tpd: round_to(throughput_tpd, 2),
            budget_limit_tokens,
            budget_headroom_tokens,
            budget_ok,
        }
    }

    /// Tokens carried by one coordination message
    fn summary_tokens(
        avg_task_tokens: u32,
        budget: &BudgetProfile,
        workload: &WorkloadProfile,
        protocol: &ProtocolProfile,
        summary_scale: f64,
    ) -> u64 {
        let raw = (f64::from(avg_task_tokens) * SUMMARY_FRACTION) as u64;
        let capped = raw.max(MIN_SUMMARY_TOKENS).min(budget.summary_cap_tokens);
        let profiled =
            (capped as f64 * workload.summary_multiplier * protocol.summary_multiplier) as u64;
        ((profiled as f64 * summary_scale) as u64).max(SUMMARY_FLOOR_TOKENS)
    }

    /// Apply compaction, then artifact reuse, to raw coordination tokens
    fn coordination_tokens(
        raw_tokens: u64,
        rounds: u32,
        budget: &BudgetProfile,
        protocol: &ProtocolProfile,
    ) -> u64 {
        let compaction_events = rounds / budget.compaction_interval_rounds.max(1);
        let compaction_discount = (f64::from(compaction_events) * COMPACTION_DISCOUNT_PER_EVENT)
            .min(MAX_COMPACTION_DISCOUNT);
        let compacted = (raw_tokens as f64 * (1.0 - compaction_discount)) as u64;
        (compacted as f64 * (1.0 - protocol.artifact_discount)) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crewcost_common::{BudgetTier, EvaluationParams, ProtocolMode, WorkloadKind};
    use proptest::prelude::*;

    fn medium() -> Scenario<'static> {
        Scenario::for_budget(&EvaluationParams::default(), BudgetTier::Medium)
    }

    fn compute(topology: Topology, scenario: &Scenario<'_>) -> EvaluationResult {
        CostEngine::compute(topology, scenario, &CostOverrides::default())
    }

    #[test]
    fn test_single_has_no_coordination() {
        let result = compute(Topology::Single, &medium());
        assert_eq!(result.participants, 1);
        assert_eq!(result.parallelism, 1);
        assert_eq!(result.coordination_tokens, 0);
        assert_eq!(result.coordination_ratio, 0.0);
        assert_eq!(result.execution_tokens, 34608);
        assert_eq!(result.cache_savings_tokens, 2422);
        assert_eq!(result.total_tokens, 32186);
        assert!(!result.degradation_applied);
    }

    #[test]
    fn test_star_team_reference_numbers() {
        let result = compute(Topology::StarTeam, &medium());
        assert_eq!(result.participants, 5);
        assert_eq!(result.parallelism, 4);
        assert_eq!(result.execution_tokens, 31839);
        assert_eq!(result.coordination_tokens, 4988);
        assert_eq!(result.cache_savings_tokens, 3820);
        assert_eq!(result.total_tokens, 33007);
        assert_eq!(result.coordination_ratio, 0.1511);
        assert_eq!(result.estimated_pass_rate, 0.89);
        assert_eq!(result.estimated_defect_escape, 0.11);
        assert_eq!(result.estimated_p95_latency_s, 39.2);
        assert_eq!(result.estimated_throughput_tpd, 52897.96);
        assert_eq!(result.tasks_per_worker, 6.0);
        assert_eq!(result.budget_limit_tokens, 34080);
        assert_eq!(result.budget_headroom_tokens, 1073);
        assert!(result.budget_ok);
    }

    #[test]
    fn test_mesh_team_exceeds_medium_budget() {
        let result = compute(Topology::MeshTeam, &medium());
        assert_eq!(result.coordination_tokens, 8250);
        assert_eq!(result.total_tokens, 37791);
        assert_eq!(result.coordination_ratio, 0.2183);
        assert_eq!(result.budget_headroom_tokens, -3711);
        assert!(!result.budget_ok);
    }

    #[test]
    fn test_compaction_discount_is_capped() {
        // low budget compacts every 3 rounds; 12 rounds would be 40% uncapped
        let params = EvaluationParams {
            coordination_rounds: 12,
            ..EvaluationParams::default()
        };
        let scenario = Scenario::for_budget(&params, BudgetTier::Low);
        let budget = scenario.budget;
        let protocol = ProtocolMode::Transcript.profile();
        let tokens = CostEngine::coordination_tokens(1000, 12, budget, protocol);
        assert_eq!(tokens, 650);

        let tokens = CostEngine::coordination_tokens(1000, 3, budget, protocol);
        assert_eq!(tokens, 900);
    }

    #[test]
    fn test_summary_respects_cap_and_floor() {
        let low = BudgetTier::Low.profile();
        let implementation = WorkloadKind::Implementation.profile();
        let lite = ProtocolMode::A2aLite.profile();

        // 5000 * 0.08 = 400, capped at 80
        assert_eq!(CostEngine::summary_tokens(5000, low, implementation, lite, 1.0), 80);
        // tiny tasks lift to the 24-token minimum
        assert_eq!(CostEngine::summary_tokens(10, low, implementation, lite, 1.0), 24);
        // heavy scaling bottoms out at 16
        assert_eq!(CostEngine::summary_tokens(10, low, implementation, lite, 0.1), 16);
    }

    #[test]
    fn test_transcript_costs_more_coordination() {
        let lite = medium();
        let transcript = Scenario {
            protocol: ProtocolMode::Transcript.profile(),
            ..lite
        };
        for topology in [Topology::LeadSubagent, Topology::StarTeam, Topology::MeshTeam] {
            let a = compute(topology, &lite);
            let b = compute(topology, &transcript);
            assert!(
                b.coordination_tokens > a.coordination_tokens,
                "{topology}: {} <= {}",
                b.coordination_tokens,
                a.coordination_tokens
            );
        }
    }

    #[test]
    fn test_overrides_mark_degradation() {
        let overrides = CostOverrides {
            participants: Some(4),
            summary_scale: 0.82,
            extra_quality_modifier: -0.01,
            model_tier: ModelTier::Economy,
            degradation_actions: Some(vec!["reduce_participants:5->4".to_string()]),
        };
        let result = CostEngine::compute(Topology::MeshTeam, &medium(), &overrides);
        assert!(result.degradation_applied);
        assert_eq!(result.participants, 4);
        assert_eq!(result.model_tier, ModelTier::Economy);
        assert_eq!(result.coordination_tokens, 4050);
        assert_eq!(result.estimated_pass_rate, 0.82);
        assert_eq!(result.degradation_actions.len(), 1);
    }

    #[test]
    fn test_extreme_batch_saturates_instead_of_overflowing() {
        for (tasks, avg) in [(3_100_000_000, 3_100_000_000), (u32::MAX, u32::MAX)] {
            for tier in BudgetTier::ALL {
                let scenario = Scenario {
                    tasks,
                    avg_task_tokens: avg,
                    ..Scenario::for_budget(&EvaluationParams::default(), tier)
                };
                for topology in Topology::ALL {
                    let result = compute(topology, &scenario);
                    assert!(result.total_tokens >= 1);
                    assert_eq!(result.budget_ok, result.budget_headroom_tokens >= 0);
                    if tasks == u32::MAX {
                        assert_eq!(result.budget_limit_tokens, u64::MAX);
                        assert!(result.budget_ok);
                    } else {
                        // ceiling is above i64::MAX but still exact
                        assert_eq!(
                            result.budget_limit_tokens,
                            9_610_000_000_000_000_000
                                + 3_100_000_000 * tier.profile().message_budget_per_task
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_headroom_is_signed_difference() {
        let params = EvaluationParams {
            tasks: 1_000_000,
            avg_task_tokens: 1_000_000,
            ..EvaluationParams::default()
        };
        let scenario = Scenario::for_budget(&params, BudgetTier::High);
        let result = compute(Topology::StarTeam, &scenario);
        let expected = i128::from(result.budget_limit_tokens) - i128::from(result.total_tokens);
        assert_eq!(i128::from(result.budget_headroom_tokens), expected);
    }

    #[test]
    fn test_exact_ratio_tie_rounds_to_even() {
        // 0.78125 coordination share sits exactly between 0.7812 and 0.7813
        let params = EvaluationParams {
            tasks: 1,
            avg_task_tokens: 300,
            coordination_rounds: 1,
            workload: WorkloadKind::Research,
            protocol: ProtocolMode::Transcript,
            ..EvaluationParams::default()
        };
        let scenario = Scenario::for_budget(&params, BudgetTier::Medium);
        let result = compute(Topology::MeshTeam, &scenario);
        assert_eq!(
            result.coordination_tokens as f64 / result.total_tokens as f64,
            0.78125
        );
        assert_eq!(result.coordination_ratio, 0.7812);
    }

    proptest! {
        #[test]
        fn totals_and_rates_stay_in_bounds(
            tasks in 1u32..500,
            avg in 1u32..20_000,
            rounds in 0u32..40,
            topo in 0usize..4,
            tier in 0usize..3,
            kind in 0usize..4,
            mode in 0usize..2,
            extra_quality in -1.0f64..1.0,
        ) {
            let scenario = Scenario {
                tasks,
                avg_task_tokens: avg,
                rounds,
                budget: BudgetTier::ALL[tier].profile(),
                workload: WorkloadKind::ALL[kind].profile(),
                protocol: ProtocolMode::ALL[mode].profile(),
            };
            let overrides = CostOverrides {
                extra_quality_modifier: extra_quality,
                ..CostOverrides::default()
            };
            let result = CostEngine::compute(Topology::ALL[topo], &scenario, &overrides);
            prop_assert!(result.total_tokens >= 1);
            prop_assert!(result.coordination_ratio >= 0.0);
            prop_assert!((0.0..=MAX_PASS_RATE).contains(&result.estimated_pass_rate));
            prop_assert!(result.estimated_defect_escape >= 0.0);
            prop_assert!(result.estimated_throughput_tpd.is_finite());
            if rounds == 0 {
                prop_assert_eq!(result.coordination_tokens, 0);
            }
        }
    }
}
