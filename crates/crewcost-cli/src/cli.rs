//! Command-line arguments
//!
//! Every evaluation flag is optional so that an absent flag falls through to
//! the config file, environment, and built-in defaults in that order.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "crewcost")]
#[command(about = "Estimate token cost, latency, and quality of agent-team topologies")]
#[command(version)]
pub struct Args {
    /// Configuration file (TOML, JSON, or YAML)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Budget profile: low, medium, high
    #[arg(long)]
    pub budget: Option<String>,

    /// Evaluate every budget profile and emit a sweep
    #[arg(long)]
    pub all_budgets: bool,

    #[arg(long, allow_negative_numbers = true)]
    pub tasks: Option<i64>,

    #[arg(long, allow_negative_numbers = true)]
    pub avg_task_tokens: Option<i64>,

    #[arg(long, allow_negative_numbers = true)]
    pub coordination_rounds: Option<i64>,

    /// Comma-separated list: single,lead_subagent,star_team,mesh_team
    #[arg(long)]
    pub topologies: Option<String>,

    /// implementation, debugging, research, mixed
    #[arg(long)]
    pub workload_profile: Option<String>,

    /// a2a_lite, transcript
    #[arg(long)]
    pub protocol_mode: Option<String>,

    /// none, auto, aggressive
    #[arg(long)]
    pub degradation_policy: Option<String>,

    /// balanced, cost, quality
    #[arg(long)]
    pub recommendation_mode: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    pub max_coordination_ratio: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub min_pass_rate: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub max_p95_latency: Option<f64>,

    /// Report destination; "-" writes to stdout
    #[arg(long, value_name = "PATH")]
    pub json_output: Option<String>,

    /// Exit non-zero when any gate fails
    #[arg(long)]
    pub enforce_gates: bool,

    /// Fixed `generated_at` value for reproducible reports
    #[arg(long)]
    pub timestamp: Option<String>,

    /// Log filter, overrides RUST_LOG
    #[arg(long)]
    pub log_level: Option<String>,
}
