//! Core types and utilities for CapSim.

pub mod config;
pub mod error;
pub mod state;
pub mod types;

pub use config::EngineConfig;
pub use error::{CapSimError, Result};
pub use state::{FounderHolding, Investor, OwnershipState, PoolHolding, RoundKind, RoundMetrics};
pub use types::*;
