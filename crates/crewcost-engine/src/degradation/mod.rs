//! Degradation - shrink teams that overrun their budget or coordinate too much
pub mod controller;
pub mod policy;

pub use self::controller::{evaluate, DegradationController};
pub use self::policy::DegradationStep;
