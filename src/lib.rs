// Suppress warning from PyO3 macro expansion (fixed in newer PyO3 versions)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

//! CapSim - cap-table evolution engine.
//!
//! This crate provides:
//! - Founding cap tables from a founder split and option pools
//! - Priced rounds (pre- or post-money) and capped/discounted convertibles
//! - Pre- and post-money option-pool top-ups
//! - Exit projections with per-holder proceeds and return multiples
//! - Scenario validation returning displayable diagnostics

pub mod cap_table;
pub mod core;
pub mod exit;
#[cfg(feature = "python")]
pub mod python;
pub mod validation;

pub use cap_table::{calculate_cap_table, CapTableEngine};
pub use crate::core::{CapSimError, EngineConfig, OwnershipState, Result, Scenario};
pub use exit::{simulate_exit, ExitSimulation};
pub use validation::validate_scenario;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module entry point
#[cfg(feature = "python")]
#[pymodule]
fn _capsim(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_class::<python::bindings::PyEngineConfig>()?;

    m.add_function(wrap_pyfunction!(python::bindings::calculate_cap_table, m)?)?;
    m.add_function(wrap_pyfunction!(python::bindings::simulate_exit, m)?)?;
    m.add_function(wrap_pyfunction!(python::bindings::validate_scenario, m)?)?;

    Ok(())
}
