//! Applying one financing event to an ownership state.

use tracing::debug;

use crate::cap_table::pool::{adjust_pool, PoolResize};
use crate::core::error::{CapSimError, Result};
use crate::core::state::{
    percent_of, FounderHolding, Investor, OwnershipState, PoolHolding, RoundKind, RoundMetrics,
};
use crate::core::types::{
    ConvertibleInstrument, FinancingEvent, Money, PricedRound, Shares, Valuation,
};

/// Price and issuance for one event, before any pool top-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundPricing {
    pub kind: RoundKind,
    pub share_price: Money,
    pub pre_money_valuation: Money,
    pub post_money_valuation: Money,
    pub new_shares: Shares,
}

/// The state produced by an event, with the event's metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundOutcome {
    pub state: OwnershipState,
    pub metrics: RoundMetrics,
}

/// Price an event against the share count outstanding before it.
pub fn price_event(previous_total: Shares, event: &FinancingEvent) -> Result<RoundPricing> {
    if !(previous_total.is_finite() && previous_total > 0.0) {
        return Err(CapSimError::invalid_parameter(format!(
            "cannot price '{}' against {previous_total} outstanding shares",
            event.name()
        )));
    }
    let capital = event.capital_raised();
    if !(capital.is_finite() && capital > 0.0) {
        return Err(CapSimError::invalid_parameter(format!(
            "'{}' must raise a positive amount, got {capital}",
            event.name()
        )));
    }

    match event {
        FinancingEvent::Priced(round) => price_priced_round(previous_total, round),
        FinancingEvent::Convertible(note) => price_convertible(previous_total, note),
    }
}

fn price_priced_round(previous_total: Shares, round: &PricedRound) -> Result<RoundPricing> {
    let capital = round.capital_raised;
    let (pre_money, post_money) = match round.valuation {
        Valuation::PreMoney(pre) => (pre, pre + capital),
        Valuation::PostMoney(post) => (post - capital, post),
    };
    if !(pre_money.is_finite() && pre_money > 0.0) {
        return Err(CapSimError::invalid_parameter(format!(
            "'{}' implies a non-positive pre-money valuation ({pre_money})",
            round.name
        )));
    }

    let share_price = pre_money / previous_total;
    Ok(RoundPricing {
        kind: RoundKind::Priced,
        share_price,
        pre_money_valuation: pre_money,
        post_money_valuation: post_money,
        new_shares: capital / share_price,
    })
}

fn price_convertible(previous_total: Shares, note: &ConvertibleInstrument) -> Result<RoundPricing> {
    let cap = note
        .valuation_cap
        .ok_or_else(|| CapSimError::uncapped_convertible(&note.name))?;
    if !(cap.is_finite() && cap > 0.0) {
        return Err(CapSimError::invalid_parameter(format!(
            "'{}' valuation cap must be positive, got {cap}",
            note.name
        )));
    }

    let cap_price = cap / previous_total;
    let share_price = match note.discount_percentage {
        Some(discount) => {
            if !(discount.is_finite() && (0.0..100.0).contains(&discount)) {
                return Err(CapSimError::invalid_parameter(format!(
                    "'{}' discount must be in [0, 100), got {discount}",
                    note.name
                )));
            }
            // The investor converts at whichever price is cheaper.
            cap_price.min(cap_price * (1.0 - discount / 100.0))
        }
        None => cap_price,
    };

    let pre_money = share_price * previous_total;
    Ok(RoundPricing {
        kind: RoundKind::Convertible,
        share_price,
        pre_money_valuation: pre_money,
        post_money_valuation: pre_money + note.capital_raised,
        new_shares: note.capital_raised / share_price,
    })
}

/// Apply one event: price it, top up the pool, then admit the new investor.
///
/// The previous state is left untouched. On error no state is produced.
pub fn process_round(previous: &OwnershipState, event: &FinancingEvent) -> Result<RoundOutcome> {
    let pricing = price_event(previous.total_shares, event)?;

    let resize = match event.pool_adjustment() {
        Some(adjustment) => adjust_pool(previous, adjustment, pricing.new_shares)?,
        None => PoolResize::unchanged(previous),
    };

    let prior_investor_shares = previous.investor_shares();
    let founder_shares: Shares = resize.founder_shares.iter().sum();
    let total_shares =
        founder_shares + resize.pool_shares + prior_investor_shares + pricing.new_shares;

    let founders = previous
        .founders
        .iter()
        .zip(&resize.founder_shares)
        .map(|(holding, &shares)| FounderHolding {
            id: holding.id.clone(),
            name: holding.name.clone(),
            shares,
            percentage: percent_of(shares, total_shares),
        })
        .collect();

    let mut investors: Vec<Investor> = previous
        .investors
        .iter()
        .map(|investor| Investor {
            percentage: percent_of(investor.shares, total_shares),
            ..investor.clone()
        })
        .collect();
    investors.push(Investor {
        id: investor_id(event.id()),
        name: event.name().to_string(),
        round_id: event.id().to_string(),
        shares: pricing.new_shares,
        percentage: percent_of(pricing.new_shares, total_shares),
        capital_invested: event.capital_raised(),
    });

    let metrics = RoundMetrics {
        event_id: event.id().to_string(),
        event_name: event.name().to_string(),
        kind: pricing.kind,
        capital_raised: event.capital_raised(),
        share_price: pricing.share_price,
        pre_money_valuation: pricing.pre_money_valuation,
        post_money_valuation: pricing.post_money_valuation,
        new_shares: pricing.new_shares,
        pool_shares_added: resize.added_shares,
    };

    debug!(
        event = event.id(),
        kind = ?pricing.kind,
        share_price = pricing.share_price,
        new_shares = pricing.new_shares,
        total_shares,
        "round applied"
    );

    let state = OwnershipState {
        label: event.name().to_string(),
        total_shares,
        founders,
        pool: PoolHolding {
            shares: resize.pool_shares,
            percentage: percent_of(resize.pool_shares, total_shares),
        },
        investors,
        round: Some(metrics.clone()),
    };

    Ok(RoundOutcome { state, metrics })
}

/// Investor id for the holder admitted by `event_id`.
pub fn investor_id(event_id: &str) -> String {
    format!("investor-{event_id}")
}
