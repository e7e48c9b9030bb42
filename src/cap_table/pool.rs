//! Option-pool top-ups applied alongside a financing event.
//!
//! Two sizing conventions are supported:
//!
//! - **Pre-money**: the new pool shares come out of the founders before the
//!   investor is admitted. The pre-money share count is unchanged, so the
//!   round's price and the investor's stake are unaffected. The pool is sized
//!   so it holds the target share of the post-round table. Prior investors
//!   and the existing pool keep their shares.
//! - **Post-money**: `target% x (current_total + new_shares) - current_pool`
//!   new pool shares are issued, diluting every holder including the
//!   incoming investor.
//!
//! Pools only grow: a target at or below the current percentage is a no-op.

use tracing::{debug, warn};

use crate::core::error::{CapSimError, Result};
use crate::core::state::OwnershipState;
use crate::core::types::{PoolAdjustment, PoolSizing, Shares};

/// Share counts after a pool top-up, before the investor is admitted.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolResize {
    /// Founder shares in the same order as the input state.
    pub founder_shares: Vec<Shares>,
    /// Pool shares after the top-up.
    pub pool_shares: Shares,
    /// Shares added to the pool.
    pub added_shares: Shares,
}

impl PoolResize {
    /// Resize that leaves the state untouched.
    pub fn unchanged(state: &OwnershipState) -> Self {
        Self {
            founder_shares: state.founders.iter().map(|f| f.shares).collect(),
            pool_shares: state.pool.shares,
            added_shares: 0.0,
        }
    }
}

/// Compute a pool top-up.
///
/// # Arguments
/// * `state` - State before the event
/// * `adjustment` - Target pool percentage and sizing convention
/// * `new_shares` - Shares the event will issue to its investor
pub fn adjust_pool(
    state: &OwnershipState,
    adjustment: &PoolAdjustment,
    new_shares: Shares,
) -> Result<PoolResize> {
    let target = adjustment.target_percentage;
    if !(target.is_finite() && (0.0..100.0).contains(&target)) {
        return Err(CapSimError::invalid_parameter(format!(
            "pool target must be in [0, 100), got {target}"
        )));
    }

    if target <= state.pool.percentage {
        warn!(
            target,
            current = state.pool.percentage,
            "pool top-up skipped: target does not exceed current pool"
        );
        return Ok(PoolResize::unchanged(state));
    }

    let current_total = state.total_shares;
    let future_total = current_total + new_shares;
    let added_shares = target / 100.0 * future_total - state.pool.shares;
    if added_shares <= 0.0 {
        return Ok(PoolResize::unchanged(state));
    }

    let resize = match adjustment.sizing {
        PoolSizing::PreMoney => {
            let founder_total = state.founder_shares();
            if founder_total <= 0.0 || added_shares >= founder_total {
                return Err(CapSimError::invalid_parameter(format!(
                    "pre-money pool top-up of {added_shares:.0} shares exceeds founder holdings of {founder_total:.0}"
                )));
            }
            let scale = (founder_total - added_shares) / founder_total;
            PoolResize {
                founder_shares: state.founders.iter().map(|f| f.shares * scale).collect(),
                pool_shares: state.pool.shares + added_shares,
                added_shares,
            }
        }
        PoolSizing::PostMoney => PoolResize {
            founder_shares: state.founders.iter().map(|f| f.shares).collect(),
            pool_shares: state.pool.shares + added_shares,
            added_shares,
        },
    };

    debug!(
        sizing = ?adjustment.sizing,
        target,
        added_shares,
        pool_shares = resize.pool_shares,
        "pool topped up"
    );

    Ok(resize)
}
