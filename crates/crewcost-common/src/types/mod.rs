//! Core data types for CrewCost

pub mod evaluation;
pub mod modes;
pub mod params;
pub mod profiles;
pub mod report;
pub mod topology;
