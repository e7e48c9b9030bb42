//! Structural checks on scenarios before computation.

pub mod scenario;

pub use scenario::{validate_scenario, ScenarioValidator};
