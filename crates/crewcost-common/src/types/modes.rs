//! Run-level selections: degradation policy, recommendation weighting, model tier

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::profiles::parse_named;
use crate::error::{CrewCostError, Result};

/// Response to budget or coordination pressure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradationPolicy {
    /// Never degrade
    None,
    /// Drop one participant, trim summaries to 82%
    Auto,
    /// Drop two participants, trim summaries to 65%
    Aggressive,
}

impl DegradationPolicy {
    pub const ALL: [DegradationPolicy; 3] = [
        DegradationPolicy::None,
        DegradationPolicy::Auto,
        DegradationPolicy::Aggressive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DegradationPolicy::None => "none",
            DegradationPolicy::Auto => "auto",
            DegradationPolicy::Aggressive => "aggressive",
        }
    }
}

/// Weighting profile for the recommendation score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationMode {
    Balanced,
    Cost,
    Quality,
}

impl RecommendationMode {
    pub const ALL: [RecommendationMode; 3] = [
        RecommendationMode::Balanced,
        RecommendationMode::Cost,
        RecommendationMode::Quality,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationMode::Balanced => "balanced",
            RecommendationMode::Cost => "cost",
            RecommendationMode::Quality => "quality",
        }
    }
}

/// Model class the team runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelTier {
    #[default]
    Primary,
    Economy,
}

impl ModelTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelTier::Primary => "primary",
            ModelTier::Economy => "economy",
        }
    }
}

impl FromStr for DegradationPolicy {
    type Err = CrewCostError;

    fn from_str(s: &str) -> Result<Self> {
        parse_named("degradation_policy", s, &DegradationPolicy::ALL, DegradationPolicy::as_str)
    }
}

impl FromStr for RecommendationMode {
    type Err = CrewCostError;

    fn from_str(s: &str) -> Result<Self> {
        parse_named(
            "recommendation_mode",
            s,
            &RecommendationMode::ALL,
            RecommendationMode::as_str,
        )
    }
}

impl fmt::Display for DegradationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for RecommendationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ModelTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
