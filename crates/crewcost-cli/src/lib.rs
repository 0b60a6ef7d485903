//! # CrewCost CLI
//!
//! CI gate around the CrewCost engine: layered configuration, one JSON
//! report envelope, and an exit status derived from the gate verdicts.
//!
//! ## Exit Status
//!
//! - `0`: report written; gates passed or not enforced
//! - `1`: gate violations under `--enforce-gates`
//! - `2`: invalid configuration or unwritable report

pub mod cli;
pub mod config;
pub mod output;

pub use cli::Args;
pub use config::{RawSettings, Settings};
pub use output::ReportEnvelope;

use crewcost_common::{BudgetReport, BudgetScope, GateViolation, Result};
use crewcost_engine::{evaluate_scope, gate_violations};
use tracing::{info, instrument};

pub const EXIT_OK: u8 = 0;
pub const EXIT_GATE_VIOLATIONS: u8 = 1;
pub const EXIT_INVALID_CONFIG: u8 = 2;

/// What one run produced
#[derive(Debug)]
pub struct RunOutcome {
    pub reports: Vec<BudgetReport>,
    pub violations: Vec<GateViolation>,
    pub enforce_gates: bool,
}

impl RunOutcome {
    /// True when enforcement is on and anything failed
    pub fn gates_failed(&self) -> bool {
        self.enforce_gates && !self.violations.is_empty()
    }

    pub fn exit_code(&self) -> u8 {
        if self.gates_failed() {
            EXIT_GATE_VIOLATIONS
        } else {
            EXIT_OK
        }
    }
}

/// Load settings, evaluate, and write the report
#[instrument(skip(args))]
pub fn run(args: &Args) -> Result<RunOutcome> {
    let settings = Settings::load(args)?;
    let reports = evaluate_scope(settings.scope, &settings.params)?;

    for report in &reports {
        info!(
            budget = %report.budget_profile,
            recommended = ?report.recommendation.recommended_topology.map(|t| t.as_str()),
            gated_pool = report.recommendation.used_gate_filtered_pool,
            "budget evaluated"
        );
    }

    let envelope = ReportEnvelope::new(
        &settings.params,
        &reports,
        settings.scope == BudgetScope::All,
        args.timestamp.clone(),
    )?;
    output::emit(&settings.json_output, &envelope)?;

    let violations = if settings.enforce_gates {
        gate_violations(&reports)
    } else {
        Vec::new()
    };

    Ok(RunOutcome {
        reports,
        violations,
        enforce_gates: settings.enforce_gates,
    })
}
