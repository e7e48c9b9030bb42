//! Scenario-level cap-table computation.

use std::collections::HashSet;

use rayon::prelude::*;
use tracing::{info, warn};

use crate::cap_table::builder::build_initial_state;
use crate::cap_table::round::process_round;
use crate::core::config::EngineConfig;
use crate::core::error::{CapSimError, Result};
use crate::core::state::OwnershipState;
use crate::core::types::{Percent, Scenario};
use crate::exit::simulator::{self, ExitSimulation};
use crate::validation::ScenarioValidator;

/// Cap-table engine.
///
/// Stateless apart from its configuration; every call is a pure function of
/// its inputs.
#[derive(Debug, Clone, Default)]
pub struct CapTableEngine {
    /// Configuration.
    pub config: EngineConfig,
}

impl CapTableEngine {
    /// Create a new engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Structural diagnostics for a scenario; empty when valid.
    pub fn validate(&self, scenario: &Scenario) -> Vec<String> {
        ScenarioValidator::new(&self.config).validate(scenario)
    }

    /// Compute the founding state followed by one state per event.
    ///
    /// Any failing event aborts the whole computation. Event ids must be
    /// unique, since each one names the investor it admits.
    pub fn calculate(&self, scenario: &Scenario) -> Result<Vec<OwnershipState>> {
        let mut event_ids = HashSet::new();
        if let Some(dup) = scenario.events.iter().find(|e| !event_ids.insert(e.id())) {
            return Err(CapSimError::invalid_parameter(format!(
                "duplicate event id '{}'",
                dup.id()
            )));
        }

        let initial =
            build_initial_state(&scenario.founders, &scenario.option_pools, &self.config)?;
        initial.verify(self.config.equity_tolerance)?;

        let mut states = Vec::with_capacity(scenario.events.len() + 1);
        let mut current = initial;

        for event in &scenario.events {
            let outcome = process_round(&current, event)?;
            outcome.state.verify(self.config.equity_tolerance)?;
            states.push(std::mem::replace(&mut current, outcome.state));
        }
        states.push(current);

        info!(
            founders = scenario.founders.len(),
            events = scenario.events.len(),
            "cap table computed"
        );

        Ok(states)
    }

    /// Compute several independent scenarios in parallel.
    ///
    /// Results are returned in input order.
    pub fn calculate_many(&self, scenarios: &[Scenario]) -> Vec<Result<Vec<OwnershipState>>> {
        scenarios
            .par_iter()
            .enumerate()
            .map(|(idx, scenario)| {
                let result = self.calculate(scenario);
                if let Err(err) = &result {
                    warn!(scenario = idx, error = %err, "scenario failed");
                }
                result
            })
            .collect()
    }

    /// Project exit proceeds for a state.
    pub fn simulate_exit(
        &self,
        state: &OwnershipState,
        exit_valuation: f64,
    ) -> Result<ExitSimulation> {
        simulator::simulate_exit(state, exit_valuation)
    }
}

/// Percentage held by `holder_id` in each state, `None` before it holds anything.
///
/// Pass "pool" for the option pool.
pub fn dilution_path(states: &[OwnershipState], holder_id: &str) -> Vec<Option<Percent>> {
    states
        .iter()
        .map(|state| state.holder_percentage(holder_id))
        .collect()
}

/// Compute a scenario with the default configuration.
pub fn calculate_cap_table(scenario: &Scenario) -> Result<Vec<OwnershipState>> {
    CapTableEngine::default().calculate(scenario)
}
