//! Recommendation scoring
pub mod scorer;
pub mod weights;

pub use self::scorer::RecommendationScorer;
pub use self::weights::ScoreWeights;
