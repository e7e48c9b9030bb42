//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::core::types::Shares;

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Synthetic share count issued at founding. Anchors every later share count.
    pub share_base: Shares,
    /// Absolute tolerance, in percentage points, for 100% sum checks.
    pub equity_tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            share_base: 10_000_000.0,
            equity_tolerance: 0.01,
        }
    }
}

impl EngineConfig {
    /// Load overrides from `CAPSIM_SHARE_BASE` and `CAPSIM_EQUITY_TOLERANCE`.
    ///
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            share_base: std::env::var("CAPSIM_SHARE_BASE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v: &Shares| *v > 0.0)
                .unwrap_or(defaults.share_base),
            equity_tolerance: std::env::var("CAPSIM_EQUITY_TOLERANCE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v: &f64| *v >= 0.0)
                .unwrap_or(defaults.equity_tolerance),
        }
    }

    /// Set the founding share base.
    pub fn with_share_base(mut self, share_base: Shares) -> Self {
        self.share_base = share_base;
        self
    }

    /// Set the 100% sum tolerance.
    pub fn with_equity_tolerance(mut self, tolerance: f64) -> Self {
        self.equity_tolerance = tolerance;
        self
    }
}
