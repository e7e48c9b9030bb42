//! PyO3 function bindings for CapSim.
//!
//! Scenarios and states cross the boundary as JSON so the Python side can
//! persist them unchanged.

use pyo3::prelude::*;

use crate::cap_table::CapTableEngine;
use crate::core::config::EngineConfig;
use crate::core::state::OwnershipState;
use crate::core::types::Scenario;
use crate::exit::simulator;
use crate::validation::ScenarioValidator;

// ============================================================================
// Configuration Classes
// ============================================================================

/// Python-exposed engine configuration.
#[pyclass]
#[derive(Debug, Clone)]
pub struct PyEngineConfig {
    #[pyo3(get, set)]
    pub share_base: f64,
    #[pyo3(get, set)]
    pub equity_tolerance: f64,
}

#[pymethods]
impl PyEngineConfig {
    #[new]
    #[pyo3(signature = (share_base=10_000_000.0, equity_tolerance=0.01))]
    fn new(share_base: f64, equity_tolerance: f64) -> Self {
        Self {
            share_base,
            equity_tolerance,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "EngineConfig(share_base={}, equity_tolerance={})",
            self.share_base, self.equity_tolerance
        )
    }
}

impl From<&PyEngineConfig> for EngineConfig {
    fn from(py_config: &PyEngineConfig) -> Self {
        EngineConfig {
            share_base: py_config.share_base,
            equity_tolerance: py_config.equity_tolerance,
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> PyResult<String> {
    serde_json::to_string(value)
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
}

// ============================================================================
// Engine Functions
// ============================================================================

/// Compute the ownership history of a JSON scenario.
///
/// Returns a JSON array of states: founding first, then one per event.
#[pyfunction]
#[pyo3(signature = (scenario_json, config=None))]
pub fn calculate_cap_table(scenario_json: &str, config: Option<&PyEngineConfig>) -> PyResult<String> {
    let scenario = Scenario::from_json(scenario_json)?;
    let rust_config = config.map(EngineConfig::from).unwrap_or_default();
    let states = CapTableEngine::new(rust_config).calculate(&scenario)?;
    to_json(&states)
}

/// Project exit proceeds for a JSON ownership state.
#[pyfunction]
pub fn simulate_exit(state_json: &str, exit_valuation: f64) -> PyResult<String> {
    let state: OwnershipState = serde_json::from_str(state_json)
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))?;
    let simulation = simulator::simulate_exit(&state, exit_valuation)?;
    to_json(&simulation)
}

/// Structural diagnostics for a JSON scenario; an empty list means valid.
///
/// A payload that does not parse is reported as a single diagnostic.
#[pyfunction]
#[pyo3(signature = (scenario_json, config=None))]
pub fn validate_scenario(scenario_json: &str, config: Option<&PyEngineConfig>) -> Vec<String> {
    let rust_config = config.map(EngineConfig::from).unwrap_or_default();
    ScenarioValidator::new(&rust_config).validate_json(scenario_json)
}
