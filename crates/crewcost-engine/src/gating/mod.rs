//! Quality gates
pub mod evaluator;

pub use self::evaluator::GateEvaluator;
