//! Liquidation proceeds at an exit valuation.

pub mod simulator;

pub use simulator::{exit_sweep, simulate_exit, ExitSimulation, HolderReturn, InvestorReturn};
