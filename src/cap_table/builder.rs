//! Founding state construction.

use tracing::debug;

use crate::core::config::EngineConfig;
use crate::core::error::{CapSimError, Result};
use crate::core::state::{percent_of, FounderHolding, OwnershipState, PoolHolding};
use crate::core::types::{Founder, OptionPool, Percent, Shares};

/// Build the founding ownership state.
///
/// Founders and pools are issued `round(pct / 100 * share_base)` shares each.
/// Fails when the inputs do not sum to 100% within the configured tolerance,
/// or when a founder uses the id reserved for the pool.
pub fn build_initial_state(
    founders: &[Founder],
    pools: &[OptionPool],
    config: &EngineConfig,
) -> Result<OwnershipState> {
    let founder_pct: Percent = founders.iter().map(|f| f.initial_equity).sum();
    let pool_pct: Percent = pools.iter().map(|p| p.percentage).sum();
    let total_pct = founder_pct + pool_pct;
    if (total_pct - 100.0).abs() > config.equity_tolerance {
        return Err(CapSimError::equity_mismatch(total_pct));
    }
    if !(config.share_base.is_finite() && config.share_base > 0.0) {
        return Err(CapSimError::invalid_parameter("share base must be positive"));
    }
    if founders.iter().any(|f| f.id == OwnershipState::POOL_HOLDER_ID) {
        return Err(CapSimError::invalid_parameter(format!(
            "founder id '{}' is reserved for the option pool",
            OwnershipState::POOL_HOLDER_ID
        )));
    }

    let issue = |pct: Percent| -> Shares { (pct / 100.0 * config.share_base).round() };

    let founder_shares: Vec<Shares> = founders.iter().map(|f| issue(f.initial_equity)).collect();
    let pool_shares: Shares = pools.iter().map(|p| issue(p.percentage)).sum();
    let total_shares: Shares = founder_shares.iter().sum::<Shares>() + pool_shares;

    let founders = founders
        .iter()
        .zip(founder_shares)
        .map(|(founder, shares)| FounderHolding {
            id: founder.id.clone(),
            name: founder.name.clone(),
            shares,
            percentage: percent_of(shares, total_shares),
        })
        .collect();

    debug!(
        total_shares,
        pool_shares,
        pools = pools.len(),
        "built founding cap table"
    );

    Ok(OwnershipState {
        label: OwnershipState::FOUNDING_LABEL.to_string(),
        total_shares,
        founders,
        pool: PoolHolding {
            shares: pool_shares,
            percentage: percent_of(pool_shares, total_shares),
        },
        investors: Vec::new(),
        round: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::PoolSizing;

    #[test]
    fn test_two_founders_no_pool() {
        let founders = vec![Founder::new("a", "Ada", 60.0), Founder::new("b", "Bob", 40.0)];
        let state = build_initial_state(&founders, &[], &EngineConfig::default()).unwrap();

        assert_eq!(state.total_shares, 10_000_000.0);
        assert_eq!(state.founders[0].shares, 6_000_000.0);
        assert_eq!(state.founders[1].shares, 4_000_000.0);
        assert_eq!(state.pool.shares, 0.0);
        assert!(state.investors.is_empty());
        assert!(state.round.is_none());
    }

    #[test]
    fn test_multiple_pools_aggregate() {
        let founders = vec![Founder::new("a", "Ada", 80.0)];
        let pools = vec![
            OptionPool::new("esop", 15.0, PoolSizing::PreMoney),
            OptionPool::new("advisors", 5.0, PoolSizing::PreMoney),
        ];
        let state = build_initial_state(&founders, &pools, &EngineConfig::default()).unwrap();

        assert_eq!(state.pool.shares, 2_000_000.0);
        assert!((state.pool.percentage - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_custom_share_base() {
        let founders = vec![Founder::new("a", "Ada", 100.0)];
        let config = EngineConfig::default().with_share_base(1_000.0);
        let state = build_initial_state(&founders, &[], &config).unwrap();
        assert_eq!(state.total_shares, 1_000.0);
    }

    #[test]
    fn test_rejects_reserved_pool_id() {
        let founders = vec![Founder::new("pool", "Pat", 100.0)];
        let err = build_initial_state(&founders, &[], &EngineConfig::default()).unwrap_err();
        assert!(matches!(err, CapSimError::InvalidParameter { .. }));
    }

    #[test]
    fn test_rejects_mismatched_equity() {
        let founders = vec![Founder::new("a", "Ada", 60.0), Founder::new("b", "Bob", 30.0)];
        let err = build_initial_state(&founders, &[], &EngineConfig::default()).unwrap_err();
        assert!(matches!(err, CapSimError::EquityMismatch { total } if (total - 90.0).abs() < 1e-9));
    }
}
