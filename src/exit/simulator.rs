//! Exit simulation.
//!
//! Single-class common equity: every holder receives its ownership share of
//! the exit value. No preferences or waterfalls.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::{CapSimError, Result};
use crate::core::state::OwnershipState;
use crate::core::types::{Money, Percent};

/// Proceeds for a founder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolderReturn {
    pub id: String,
    pub name: String,
    pub percentage: Percent,
    pub cash_return: Money,
}

/// Proceeds for an investor, with its return multiple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestorReturn {
    pub id: String,
    pub name: String,
    pub percentage: Percent,
    pub capital_invested: Money,
    pub cash_return: Money,
    /// `cash_return / capital_invested`; non-finite when nothing was invested.
    pub multiple: f64,
}

/// Per-holder proceeds at one exit valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitSimulation {
    pub exit_valuation: Money,
    pub founders: Vec<HolderReturn>,
    pub investors: Vec<InvestorReturn>,
    /// Value attributable to the option pool.
    pub esop_value: Money,
}

impl ExitSimulation {
    /// Sum of all cash returns including the pool.
    pub fn total_distributed(&self) -> Money {
        let founders: Money = self.founders.iter().map(|f| f.cash_return).sum();
        let investors: Money = self.investors.iter().map(|i| i.cash_return).sum();
        founders + investors + self.esop_value
    }
}

#[inline]
fn proceeds(percentage: Percent, exit_valuation: Money) -> Money {
    percentage / 100.0 * exit_valuation
}

/// Project exit proceeds for a state.
///
/// # Arguments
/// * `state` - Ownership state at exit
/// * `exit_valuation` - Exit value; must be finite and non-negative
pub fn simulate_exit(state: &OwnershipState, exit_valuation: Money) -> Result<ExitSimulation> {
    if !(exit_valuation.is_finite() && exit_valuation >= 0.0) {
        return Err(CapSimError::invalid_parameter(format!(
            "exit valuation must be finite and non-negative, got {exit_valuation}"
        )));
    }

    let founders = state
        .founders
        .iter()
        .map(|f| HolderReturn {
            id: f.id.clone(),
            name: f.name.clone(),
            percentage: f.percentage,
            cash_return: proceeds(f.percentage, exit_valuation),
        })
        .collect();

    let investors = state
        .investors
        .iter()
        .map(|i| {
            let cash_return = proceeds(i.percentage, exit_valuation);
            InvestorReturn {
                id: i.id.clone(),
                name: i.name.clone(),
                percentage: i.percentage,
                capital_invested: i.capital_invested,
                cash_return,
                multiple: cash_return / i.capital_invested,
            }
        })
        .collect();

    debug!(state = %state.label, exit_valuation, "exit simulated");

    Ok(ExitSimulation {
        exit_valuation,
        founders,
        investors,
        esop_value: proceeds(state.pool.percentage, exit_valuation),
    })
}

/// Simulate several exit valuations against one state, in parallel.
///
/// Results follow the order of `exit_valuations`.
pub fn exit_sweep(state: &OwnershipState, exit_valuations: &[Money]) -> Result<Vec<ExitSimulation>> {
    exit_valuations
        .par_iter()
        .map(|&valuation| simulate_exit(state, valuation))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::{FounderHolding, Investor, PoolHolding};

    fn final_state() -> OwnershipState {
        OwnershipState {
            label: "Series A".to_string(),
            total_shares: 1_000.0,
            founders: vec![FounderHolding {
                id: "f".to_string(),
                name: "Ada".to_string(),
                shares: 600.0,
                percentage: 60.0,
            }],
            pool: PoolHolding {
                shares: 100.0,
                percentage: 10.0,
            },
            investors: vec![Investor {
                id: "investor-a".to_string(),
                name: "Series A".to_string(),
                round_id: "a".to_string(),
                shares: 300.0,
                percentage: 30.0,
                capital_invested: 3_000_000.0,
            }],
            round: None,
        }
    }

    #[test]
    fn test_proceeds_and_multiple() {
        let sim = simulate_exit(&final_state(), 100_000_000.0).unwrap();

        assert!((sim.founders[0].cash_return - 60_000_000.0).abs() < 1e-6);
        assert!((sim.investors[0].cash_return - 30_000_000.0).abs() < 1e-6);
        assert!((sim.investors[0].multiple - 10.0).abs() < 1e-12);
        assert!((sim.esop_value - 10_000_000.0).abs() < 1e-6);
        assert!((sim.total_distributed() - 100_000_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_capital_multiple_is_not_finite() {
        let mut state = final_state();
        state.investors[0].capital_invested = 0.0;
        let sim = simulate_exit(&state, 1_000.0).unwrap();
        assert!(!sim.investors[0].multiple.is_finite());
    }

    #[test]
    fn test_rejects_invalid_valuation() {
        assert!(simulate_exit(&final_state(), -1.0).is_err());
        assert!(simulate_exit(&final_state(), f64::NAN).is_err());
        assert!(simulate_exit(&final_state(), 0.0).is_ok());
    }

    #[test]
    fn test_sweep_preserves_order() {
        let valuations = [10.0, 1_000.0, 100.0];
        let sims = exit_sweep(&final_state(), &valuations).unwrap();
        let seen: Vec<f64> = sims.iter().map(|s| s.exit_valuation).collect();
        assert_eq!(seen, valuations.to_vec());

        assert!(exit_sweep(&final_state(), &[1.0, -1.0]).is_err());
    }
}
