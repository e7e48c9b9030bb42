//! Scenario input types for CapSim.

use serde::{Deserialize, Serialize};

use crate::core::error::{CapSimError, Result};

/// Type alias for share counts. Fractional shares are kept as-is.
pub type Shares = f64;

/// Type alias for currency amounts.
pub type Money = f64;

/// Type alias for percentages in the 0..=100 range.
pub type Percent = f64;

/// A founder and their ownership at incorporation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Founder {
    pub id: String,
    pub name: String,
    /// Ownership at founding, in percent.
    pub initial_equity: Percent,
}

impl Founder {
    /// Create a new founder.
    pub fn new(id: impl Into<String>, name: impl Into<String>, initial_equity: Percent) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            initial_equity,
        }
    }
}

/// Whether an option pool is sized before or after the round's money comes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolSizing {
    /// Pool is carved out of the pre-money cap table; only founders are diluted.
    PreMoney,
    /// Pool is sized against the post-round share count; everyone is diluted.
    PostMoney,
}

impl Default for PoolSizing {
    fn default() -> Self {
        PoolSizing::PreMoney
    }
}

/// Option pool present at founding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionPool {
    pub id: String,
    /// Target ownership of the pool, in percent.
    pub percentage: Percent,
    #[serde(default)]
    pub sizing: PoolSizing,
}

impl OptionPool {
    /// Create a new option pool.
    pub fn new(id: impl Into<String>, percentage: Percent, sizing: PoolSizing) -> Self {
        Self {
            id: id.into(),
            percentage,
            sizing,
        }
    }
}

/// Pool top-up attached to a financing event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoolAdjustment {
    /// Pool size to reach, in percent.
    pub target_percentage: Percent,
    #[serde(default)]
    pub sizing: PoolSizing,
}

impl PoolAdjustment {
    /// Pre-money top-up to the given percentage.
    pub fn pre_money(target_percentage: Percent) -> Self {
        Self {
            target_percentage,
            sizing: PoolSizing::PreMoney,
        }
    }

    /// Post-money top-up to the given percentage.
    pub fn post_money(target_percentage: Percent) -> Self {
        Self {
            target_percentage,
            sizing: PoolSizing::PostMoney,
        }
    }
}

/// The agreed valuation of a priced round.
///
/// Serialized through the flat [`PricedRoundRecord`] fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Valuation {
    /// Company value before the round's capital.
    PreMoney(Money),
    /// Company value including the round's capital.
    PostMoney(Money),
}

/// A financing event that sells shares at an explicit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PricedRoundRecord", into = "PricedRoundRecord")]
pub struct PricedRound {
    pub id: String,
    pub name: String,
    pub capital_raised: Money,
    pub valuation: Valuation,
    pub pool_adjustment: Option<PoolAdjustment>,
}

impl PricedRound {
    /// Create a round priced off a pre-money valuation.
    pub fn pre_money(
        id: impl Into<String>,
        name: impl Into<String>,
        capital_raised: Money,
        pre_money_valuation: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            capital_raised,
            valuation: Valuation::PreMoney(pre_money_valuation),
            pool_adjustment: None,
        }
    }

    /// Create a round priced off a post-money valuation.
    pub fn post_money(
        id: impl Into<String>,
        name: impl Into<String>,
        capital_raised: Money,
        post_money_valuation: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            capital_raised,
            valuation: Valuation::PostMoney(post_money_valuation),
            pool_adjustment: None,
        }
    }

    /// Build a round from loose optional valuation fields.
    ///
    /// Exactly one of the two valuations must be present.
    pub fn from_valuations(
        id: impl Into<String>,
        name: impl Into<String>,
        capital_raised: Money,
        pre_money_valuation: Option<Money>,
        post_money_valuation: Option<Money>,
    ) -> Result<Self> {
        let name = name.into();
        let valuation = match (pre_money_valuation, post_money_valuation) {
            (Some(pre), None) => Valuation::PreMoney(pre),
            (None, Some(post)) => Valuation::PostMoney(post),
            (None, None) => return Err(CapSimError::missing_valuation(name)),
            (Some(_), Some(_)) => return Err(CapSimError::conflicting_valuation(name)),
        };
        Ok(Self {
            id: id.into(),
            name,
            capital_raised,
            valuation,
            pool_adjustment: None,
        })
    }

    /// Attach a pool top-up.
    pub fn with_pool_adjustment(mut self, adjustment: PoolAdjustment) -> Self {
        self.pool_adjustment = Some(adjustment);
        self
    }
}

/// Flat wire form of [`PricedRound`], as callers usually persist it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricedRoundRecord {
    pub id: String,
    pub name: String,
    pub capital_raised: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_money_valuation: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_money_valuation: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool_adjustment: Option<PoolAdjustment>,
}

impl TryFrom<PricedRoundRecord> for PricedRound {
    type Error = CapSimError;

    fn try_from(record: PricedRoundRecord) -> Result<Self> {
        let round = PricedRound::from_valuations(
            record.id,
            record.name,
            record.capital_raised,
            record.pre_money_valuation,
            record.post_money_valuation,
        )?;
        Ok(PricedRound {
            pool_adjustment: record.pool_adjustment,
            ..round
        })
    }
}

impl From<PricedRound> for PricedRoundRecord {
    fn from(round: PricedRound) -> Self {
        let (pre_money_valuation, post_money_valuation) = match round.valuation {
            Valuation::PreMoney(pre) => (Some(pre), None),
            Valuation::PostMoney(post) => (None, Some(post)),
        };
        Self {
            id: round.id,
            name: round.name,
            capital_raised: round.capital_raised,
            pre_money_valuation,
            post_money_valuation,
            pool_adjustment: round.pool_adjustment,
        }
    }
}

/// A SAFE-like instrument that converts immediately on entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertibleInstrument {
    pub id: String,
    pub name: String,
    pub capital_raised: Money,
    /// Conversion is rejected without a cap.
    #[serde(default)]
    pub valuation_cap: Option<Money>,
    /// Discount off the cap price, in percent.
    #[serde(default)]
    pub discount_percentage: Option<Percent>,
    #[serde(default)]
    pub pool_adjustment: Option<PoolAdjustment>,
}

impl ConvertibleInstrument {
    /// Create a capped convertible without a discount.
    pub fn capped(
        id: impl Into<String>,
        name: impl Into<String>,
        capital_raised: Money,
        valuation_cap: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            capital_raised,
            valuation_cap: Some(valuation_cap),
            discount_percentage: None,
            pool_adjustment: None,
        }
    }

    /// Set the discount percentage.
    pub fn with_discount(mut self, discount_percentage: Percent) -> Self {
        self.discount_percentage = Some(discount_percentage);
        self
    }

    /// Attach a pool top-up.
    pub fn with_pool_adjustment(mut self, adjustment: PoolAdjustment) -> Self {
        self.pool_adjustment = Some(adjustment);
        self
    }
}

/// A financing event, applied in scenario order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FinancingEvent {
    Priced(PricedRound),
    Convertible(ConvertibleInstrument),
}

impl FinancingEvent {
    /// Event identifier.
    pub fn id(&self) -> &str {
        match self {
            FinancingEvent::Priced(round) => &round.id,
            FinancingEvent::Convertible(note) => &note.id,
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        match self {
            FinancingEvent::Priced(round) => &round.name,
            FinancingEvent::Convertible(note) => &note.name,
        }
    }

    /// Capital contributed by the new investor.
    pub fn capital_raised(&self) -> Money {
        match self {
            FinancingEvent::Priced(round) => round.capital_raised,
            FinancingEvent::Convertible(note) => note.capital_raised,
        }
    }

    /// Optional pool top-up applied with this event.
    pub fn pool_adjustment(&self) -> Option<&PoolAdjustment> {
        match self {
            FinancingEvent::Priced(round) => round.pool_adjustment.as_ref(),
            FinancingEvent::Convertible(note) => note.pool_adjustment.as_ref(),
        }
    }
}

impl From<PricedRound> for FinancingEvent {
    fn from(round: PricedRound) -> Self {
        FinancingEvent::Priced(round)
    }
}

impl From<ConvertibleInstrument> for FinancingEvent {
    fn from(note: ConvertibleInstrument) -> Self {
        FinancingEvent::Convertible(note)
    }
}

/// Full engine input: founders, option pools at founding, and events in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub founders: Vec<Founder>,
    #[serde(default)]
    pub events: Vec<FinancingEvent>,
    #[serde(default)]
    pub option_pools: Vec<OptionPool>,
}

impl Scenario {
    /// Create a scenario with founders only.
    pub fn new(founders: Vec<Founder>) -> Self {
        Self {
            founders,
            events: Vec::new(),
            option_pools: Vec::new(),
        }
    }

    /// Add an option pool present at founding.
    pub fn with_pool(mut self, pool: OptionPool) -> Self {
        self.option_pools.push(pool);
        self
    }

    /// Append a financing event.
    pub fn with_event(mut self, event: impl Into<FinancingEvent>) -> Self {
        self.events.push(event.into());
        self
    }

    /// Sum of founder and pool percentages at founding.
    pub fn founding_equity_total(&self) -> Percent {
        let founders: Percent = self.founders.iter().map(|f| f.initial_equity).sum();
        let pools: Percent = self.option_pools.iter().map(|p| p.percentage).sum();
        founders + pools
    }

    /// Parse a scenario from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode the scenario as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
