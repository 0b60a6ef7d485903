//! Team topology - structural constants and the coordination scaling law
//!
//! Topologies are pure keys into constant tables. The message-count model
//! is what separates them:
//!
//! ```text
//! workers      = max(1, participants - 1)
//! lead_subagent = 2·w·r
//! star_team     = 2·w·r + w·r
//! mesh_team     = 2·w·r + w·(w-1)·r
//! messages      = round(base · workload.sync_multiplier)
//! ```
//!
//! Mesh traffic grows quadratically in worker count, star linearly, and
//! lead-subagent is the floor. `single` never coordinates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::profiles::{parse_named, BudgetProfile, WorkloadProfile};
use crate::error::{CrewCostError, Result};
use crate::MAX_TEAM_SIZE;

/// Communication/organization structure of an agent team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    /// One worker, no coordination
    Single,
    /// One lead plus one subagent
    LeadSubagent,
    /// Lead with broadcast to a worker team
    StarTeam,
    /// Full peer-to-peer worker team
    MeshTeam,
}

impl Topology {
    pub const ALL: [Topology; 4] = [
        Topology::Single,
        Topology::LeadSubagent,
        Topology::StarTeam,
        Topology::MeshTeam,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topology::Single => "single",
            Topology::LeadSubagent => "lead_subagent",
            Topology::StarTeam => "star_team",
            Topology::MeshTeam => "mesh_team",
        }
    }

    /// Participant count ceiling under a budget
    pub fn participants(&self, budget: &BudgetProfile) -> u32 {
        match self {
            Topology::Single => 1,
            Topology::LeadSubagent => 2,
            Topology::StarTeam | Topology::MeshTeam => budget.max_workers.min(MAX_TEAM_SIZE),
        }
    }

    /// Workers executing tasks concurrently for a participant count
    pub fn parallelism(&self, participants: u32) -> u32 {
        match self {
            Topology::Single => 1,
            _ => participants.saturating_sub(1).max(1),
        }
    }

    /// Execution token factor relative to the `single` baseline
    pub fn execution_factor(&self) -> f64 {
        match self {
            Topology::Single => 1.00,
            Topology::LeadSubagent => 0.95,
            Topology::StarTeam => 0.92,
            Topology::MeshTeam => 0.97,
        }
    }

    /// Baseline task pass rate before profile modifiers
    pub fn baseline_pass_rate(&self) -> f64 {
        match self {
            Topology::Single => 0.78,
            Topology::LeadSubagent => 0.84,
            Topology::StarTeam => 0.88,
            Topology::MeshTeam => 0.82,
        }
    }

    /// Fraction of execution tokens recovered through shared cache
    pub fn cache_factor(&self) -> f64 {
        match self {
            Topology::Single => 0.05,
            Topology::LeadSubagent => 0.08,
            Topology::StarTeam | Topology::MeshTeam => 0.10,
        }
    }

    /// Coordination message count for `rounds` rounds
    pub fn coordination_messages(
        &self,
        rounds: u32,
        participants: u32,
        workload: &WorkloadProfile,
    ) -> u64 {
        if *self == Topology::Single {
            return 0;
        }

        let workers = u64::from(participants.saturating_sub(1).max(1));
        let rounds = u64::from(rounds);
        let lead_messages = 2 * workers * rounds;

        let base_messages = match self {
            Topology::Single => 0,
            Topology::LeadSubagent => lead_messages,
            Topology::StarTeam => lead_messages + workers * rounds,
            Topology::MeshTeam => lead_messages + workers * workers.saturating_sub(1) * rounds,
        };

        // Ties go to the even neighbour
        (base_messages as f64 * workload.sync_multiplier)
            .round_ties_even()
            .max(0.0) as u64
    }
}

/// Parse a comma-separated topology list, preserving order
///
/// Unknown names are reported together, sorted. An empty list is rejected.
pub fn parse_topologies(raw: &str) -> Result<Vec<Topology>> {
    let items: Vec<&str> = raw.split(',').map(str::trim).filter(|s| !s.is_empty()).collect();

    let mut invalid: Vec<&str> = items
        .iter()
        .copied()
        .filter(|item| item.parse::<Topology>().is_err())
        .collect();
    invalid.sort_unstable();
    invalid.dedup();
    if !invalid.is_empty() {
        return Err(CrewCostError::invalid(
            "topologies",
            invalid.join(", "),
            "unknown topology",
        ));
    }
    if items.is_empty() {
        return Err(CrewCostError::invalid("topologies", raw, "topology list is empty"));
    }

    items.into_iter().map(str::parse).collect()
}

impl FromStr for Topology {
    type Err = CrewCostError;

    fn from_str(s: &str) -> Result<Self> {
        parse_named("topology", s, &Topology::ALL, Topology::as_str)
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
