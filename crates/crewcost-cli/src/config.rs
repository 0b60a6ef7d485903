//! CrewCost configuration
//!
//! Sources, lowest precedence first: built-in defaults, the `--config` file,
//! `.env` plus `CREWCOST_*` environment variables, then command-line flags.
//! Scalars are read as signed values so that negative input reaches
//! validation and is reported by field name.

use std::str::FromStr;

use config::{Config, ConfigError, Environment, File};
use crewcost_common::{
    parse_topologies, BudgetScope, BudgetTier, CrewCostError, DegradationPolicy,
    EvaluationParams, GateThresholds, ProtocolMode, RecommendationMode, Result, WorkloadKind,
};
use serde::{Deserialize, Serialize};

use crate::cli::Args;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "CREWCOST";

/// Report destination meaning stdout
pub const STDOUT_SINK: &str = "-";

/// Merged, unvalidated settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSettings {
    pub budget: String,
    pub all_budgets: bool,
    pub tasks: i64,
    pub avg_task_tokens: i64,
    pub coordination_rounds: i64,
    pub topologies: String,
    pub workload_profile: String,
    pub protocol_mode: String,
    pub degradation_policy: String,
    pub recommendation_mode: String,
    pub max_coordination_ratio: f64,
    pub min_pass_rate: f64,
    pub max_p95_latency: f64,
    pub json_output: String,
    pub enforce_gates: bool,
}

/// Validated settings ready for the engine
#[derive(Debug, Clone)]
pub struct Settings {
    pub params: EvaluationParams,
    pub scope: BudgetScope,
    pub enforce_gates: bool,
    pub json_output: String,
}

impl RawSettings {
    /// Layer every source and deserialize the result
    pub fn load(args: &Args) -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        Self::layered(args).map_err(|e| CrewCostError::Config(e.to_string()))
    }

    fn layered(args: &Args) -> std::result::Result<Self, ConfigError> {
        let defaults = EvaluationParams::default();
        let all_topologies = defaults
            .topologies
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(",");

        let mut builder = Config::builder()
            .set_default("budget", BudgetTier::Medium.as_str())?
            .set_default("all_budgets", false)?
            .set_default("tasks", i64::from(defaults.tasks))?
            .set_default("avg_task_tokens", i64::from(defaults.avg_task_tokens))?
            .set_default("coordination_rounds", i64::from(defaults.coordination_rounds))?
            .set_default("topologies", all_topologies)?
            .set_default("workload_profile", defaults.workload.as_str())?
            .set_default("protocol_mode", defaults.protocol.as_str())?
            .set_default("degradation_policy", defaults.degradation_policy.as_str())?
            .set_default("recommendation_mode", defaults.recommendation_mode.as_str())?
            .set_default("max_coordination_ratio", defaults.gates.max_coordination_ratio)?
            .set_default("min_pass_rate", defaults.gates.min_pass_rate)?
            .set_default("max_p95_latency", defaults.gates.max_p95_latency)?
            .set_default("json_output", STDOUT_SINK)?
            .set_default("enforce_gates", false)?;

        if let Some(path) = &args.config {
            builder = builder.add_source(File::from(path.as_path()).required(true));
        }

        builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .set_override_option("budget", args.budget.clone())?
            .set_override_option("all_budgets", args.all_budgets.then_some(true))?
            .set_override_option("tasks", args.tasks)?
            .set_override_option("avg_task_tokens", args.avg_task_tokens)?
            .set_override_option("coordination_rounds", args.coordination_rounds)?
            .set_override_option("topologies", args.topologies.clone())?
            .set_override_option("workload_profile", args.workload_profile.clone())?
            .set_override_option("protocol_mode", args.protocol_mode.clone())?
            .set_override_option("degradation_policy", args.degradation_policy.clone())?
            .set_override_option("recommendation_mode", args.recommendation_mode.clone())?
            .set_override_option("max_coordination_ratio", args.max_coordination_ratio)?
            .set_override_option("min_pass_rate", args.min_pass_rate)?
            .set_override_option("max_p95_latency", args.max_p95_latency)?
            .set_override_option("json_output", args.json_output.clone())?
            .set_override_option("enforce_gates", args.enforce_gates.then_some(true))?
            .build()?
            .try_deserialize()
    }

    /// Check every field and build the engine inputs
    pub fn validate(&self) -> Result<Settings> {
        let tier = BudgetTier::from_str(&self.budget)?;
        let scope = if self.all_budgets {
            BudgetScope::All
        } else {
            BudgetScope::One(tier)
        };

        let params = EvaluationParams {
            tasks: positive("tasks", self.tasks)?,
            avg_task_tokens: positive("avg_task_tokens", self.avg_task_tokens)?,
            coordination_rounds: non_negative("coordination_rounds", self.coordination_rounds)?,
            topologies: parse_topologies(&self.topologies)?,
            workload: WorkloadKind::from_str(&self.workload_profile)?,
            protocol: ProtocolMode::from_str(&self.protocol_mode)?,
            degradation_policy: DegradationPolicy::from_str(&self.degradation_policy)?,
            recommendation_mode: RecommendationMode::from_str(&self.recommendation_mode)?,
            gates: GateThresholds {
                max_coordination_ratio: self.max_coordination_ratio,
                min_pass_rate: self.min_pass_rate,
                max_p95_latency: self.max_p95_latency,
            },
        };
        params.validate()?;

        Ok(Settings {
            params,
            scope,
            enforce_gates: self.enforce_gates,
            json_output: self.json_output.clone(),
        })
    }
}

impl Settings {
    pub fn load(args: &Args) -> Result<Self> {
        RawSettings::load(args)?.validate()
    }
}

fn positive(field: &'static str, value: i64) -> Result<u32> {
    if value <= 0 {
        return Err(CrewCostError::invalid(field, value, "must be > 0"));
    }
    u32::try_from(value).map_err(|_| CrewCostError::invalid(field, value, "is too large"))
}

fn non_negative(field: &'static str, value: i64) -> Result<u32> {
    if value < 0 {
        return Err(CrewCostError::invalid(field, value, "must be >= 0"));
    }
    u32::try_from(value).map_err(|_| CrewCostError::invalid(field, value, "is too large"))
}
