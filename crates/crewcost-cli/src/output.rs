//! Report envelope and sink

use std::fs;
use std::io::{self, Write};

use chrono::{SecondsFormat, Utc};
use crewcost_common::{
    BudgetReport, BudgetTier, CrewCostError, DegradationPolicy, EvaluationParams, GateViolation,
    GatedResult, ProtocolMode, Rankings, Recommendation, RecommendationMode, Result, Topology,
    WorkloadKind,
};
use serde::Serialize;

use crate::config::STDOUT_SINK;

pub const SCHEMA_VERSION: &str = "crewcost.agent-team-eval.v1";

/// Echo of the validated inputs
#[derive(Debug, Clone, Serialize)]
pub struct InputsEcho {
    pub tasks: u32,
    pub avg_task_tokens: u32,
    pub coordination_rounds: u32,
    pub topologies: Vec<Topology>,
    pub workload_profile: WorkloadKind,
    pub protocol_mode: ProtocolMode,
    pub degradation_policy: DegradationPolicy,
    pub recommendation_mode: RecommendationMode,
    pub max_coordination_ratio: f64,
    pub min_pass_rate: f64,
    pub max_p95_latency: f64,
}

impl From<&EvaluationParams> for InputsEcho {
    fn from(params: &EvaluationParams) -> Self {
        Self {
            tasks: params.tasks,
            avg_task_tokens: params.avg_task_tokens,
            coordination_rounds: params.coordination_rounds,
            topologies: params.topologies.clone(),
            workload_profile: params.workload,
            protocol_mode: params.protocol,
            degradation_policy: params.degradation_policy,
            recommendation_mode: params.recommendation_mode,
            max_coordination_ratio: params.gates.max_coordination_ratio,
            min_pass_rate: params.gates.min_pass_rate,
            max_p95_latency: params.gates.max_p95_latency,
        }
    }
}

/// Top-level JSON document
///
/// `results`, `rankings` and `recommendation` come from the first report.
/// `budget_sweep` is only present for all-budget runs.
#[derive(Debug, Serialize)]
pub struct ReportEnvelope<'a> {
    pub schema_version: &'static str,
    pub generated_at: String,
    pub budget_profile: BudgetTier,
    pub inputs: InputsEcho,
    pub results: &'a [GatedResult],
    pub rankings: &'a Rankings,
    pub recommendation: &'a Recommendation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_sweep: Option<&'a [BudgetReport]>,
}

impl<'a> ReportEnvelope<'a> {
    pub fn new(
        params: &EvaluationParams,
        reports: &'a [BudgetReport],
        sweep: bool,
        generated_at: Option<String>,
    ) -> Result<Self> {
        let primary = reports
            .first()
            .ok_or_else(|| CrewCostError::Serialization("no budget reports to emit".into()))?;

        Ok(Self {
            schema_version: SCHEMA_VERSION,
            generated_at: generated_at
                .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
            budget_profile: primary.budget_profile,
            inputs: InputsEcho::from(params),
            results: &primary.results,
            rankings: &primary.rankings,
            recommendation: &primary.recommendation,
            budget_sweep: sweep.then_some(reports),
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Write the envelope to stdout for `-`, otherwise to `path`
pub fn emit(path: &str, envelope: &ReportEnvelope<'_>) -> Result<()> {
    let content = envelope.to_json()?;
    if path == STDOUT_SINK {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{content}")?;
        stdout.flush()?;
        return Ok(());
    }
    fs::write(path, format!("{content}\n"))?;
    Ok(())
}

/// Gate violation listing for diagnostics
pub fn write_violations(out: &mut impl Write, violations: &[GateViolation]) -> io::Result<()> {
    writeln!(out, "gate violations detected:")?;
    for violation in violations {
        writeln!(out, "- {violation}")?;
    }
    Ok(())
}

/// Plain error line, written regardless of the log filter
pub fn write_error(out: &mut impl Write, err: &anyhow::Error) -> io::Result<()> {
    writeln!(out, "error: {err:#}")?;
    out.flush()
}
