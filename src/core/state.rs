//! Ownership snapshots produced by the engine.

use serde::{Deserialize, Serialize};

use crate::core::error::{CapSimError, Result};
use crate::core::types::{Money, Percent, Shares};

/// A founder's position in one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FounderHolding {
    pub id: String,
    pub name: String,
    pub shares: Shares,
    pub percentage: Percent,
}

/// The aggregated option pool in one snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PoolHolding {
    pub shares: Shares,
    pub percentage: Percent,
}

/// An investor admitted by a financing event.
///
/// Each event creates its own record, even when names repeat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investor {
    pub id: String,
    pub name: String,
    /// Event that admitted this investor.
    pub round_id: String,
    pub shares: Shares,
    pub percentage: Percent,
    pub capital_invested: Money,
}

/// Kind of event that produced a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundKind {
    Priced,
    Convertible,
}

/// Pricing and issuance figures for one financing event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundMetrics {
    pub event_id: String,
    pub event_name: String,
    pub kind: RoundKind,
    pub capital_raised: Money,
    pub share_price: Money,
    pub pre_money_valuation: Money,
    pub post_money_valuation: Money,
    /// Shares issued to the incoming investor.
    pub new_shares: Shares,
    /// Shares added to the option pool by a top-up (0 when none).
    pub pool_shares_added: Shares,
}

/// Who owns what at one point in the scenario.
///
/// Snapshots are values: the engine builds a fresh one per event and never
/// edits an existing snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnershipState {
    /// "Founding" for the initial state, otherwise the event name.
    pub label: String,
    pub total_shares: Shares,
    pub founders: Vec<FounderHolding>,
    pub pool: PoolHolding,
    pub investors: Vec<Investor>,
    /// Metrics of the event that produced this state; `None` at founding.
    #[serde(default)]
    pub round: Option<RoundMetrics>,
}

impl OwnershipState {
    /// Label used for the founding snapshot.
    pub const FOUNDING_LABEL: &'static str = "Founding";

    /// Holder id reserved for the aggregated option pool.
    pub const POOL_HOLDER_ID: &'static str = "pool";

    /// Sum of all holders' shares.
    pub fn share_sum(&self) -> Shares {
        self.founder_shares() + self.pool.shares + self.investor_shares()
    }

    /// Sum of all holders' percentages.
    pub fn percentage_sum(&self) -> Percent {
        let founders: Percent = self.founders.iter().map(|f| f.percentage).sum();
        let investors: Percent = self.investors.iter().map(|i| i.percentage).sum();
        founders + self.pool.percentage + investors
    }

    /// Total shares held by founders.
    pub fn founder_shares(&self) -> Shares {
        self.founders.iter().map(|f| f.shares).sum()
    }

    /// Total shares held by investors.
    pub fn investor_shares(&self) -> Shares {
        self.investors.iter().map(|i| i.shares).sum()
    }

    /// Look up a founder by id.
    pub fn founder(&self, id: &str) -> Option<&FounderHolding> {
        self.founders.iter().find(|f| f.id == id)
    }

    /// Look up an investor by id.
    pub fn investor(&self, id: &str) -> Option<&Investor> {
        self.investors.iter().find(|i| i.id == id)
    }

    /// Percentage held by a founder or investor, or by the pool when `id` is
    /// [`Self::POOL_HOLDER_ID`].
    pub fn holder_percentage(&self, id: &str) -> Option<Percent> {
        if id == Self::POOL_HOLDER_ID {
            return Some(self.pool.percentage);
        }
        self.founder(id)
            .map(|f| f.percentage)
            .or_else(|| self.investor(id).map(|i| i.percentage))
    }

    /// Check the share-sum and percentage-sum invariants.
    pub fn verify(&self, percentage_tolerance: f64) -> Result<()> {
        let share_sum = self.share_sum();
        let share_drift = (share_sum - self.total_shares).abs();
        if share_drift > self.total_shares.abs() * 1e-9 {
            return Err(CapSimError::invariant_violation(
                &self.label,
                format!("holder shares sum to {share_sum}, total is {}", self.total_shares),
            ));
        }

        let pct_sum = self.percentage_sum();
        if (pct_sum - 100.0).abs() > percentage_tolerance {
            return Err(CapSimError::invariant_violation(
                &self.label,
                format!("percentages sum to {pct_sum:.6}"),
            ));
        }

        Ok(())
    }
}

/// Percentage of `shares` in `total`, guarding an empty table.
#[inline]
pub(crate) fn percent_of(shares: Shares, total: Shares) -> Percent {
    if total > 0.0 {
        shares / total * 100.0
    } else {
        0.0
    }
}
