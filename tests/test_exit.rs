//! Integration tests for exit simulation.

use capsim::cap_table::{calculate_cap_table, CapTableEngine};
use capsim::core::types::{
    ConvertibleInstrument, Founder, OptionPool, PoolSizing, PricedRound, Scenario,
};
use capsim::exit::{exit_sweep, simulate_exit};

fn funded_scenario() -> Scenario {
    Scenario::new(vec![
        Founder::new("a", "Ada", 60.0),
        Founder::new("b", "Bob", 30.0),
    ])
    .with_pool(OptionPool::new("esop", 10.0, PoolSizing::PreMoney))
    .with_event(ConvertibleInstrument::capped("safe", "SAFE", 500_000.0, 5_000_000.0))
    .with_event(PricedRound::pre_money("seed", "Seed", 2_000_000.0, 10_000_000.0))
}

#[test]
fn test_cash_returns_follow_percentages() {
    let states = calculate_cap_table(&funded_scenario()).unwrap();
    let last = states.last().unwrap();
    let exit_valuation = 75_000_000.0;

    let sim = simulate_exit(last, exit_valuation).unwrap();

    for (holding, ret) in last.founders.iter().zip(&sim.founders) {
        assert_eq!(ret.cash_return, holding.percentage / 100.0 * exit_valuation);
    }
    for (investor, ret) in last.investors.iter().zip(&sim.investors) {
        assert_eq!(ret.cash_return, investor.percentage / 100.0 * exit_valuation);
        assert_eq!(ret.multiple, ret.cash_return / investor.capital_invested);
    }
    assert_eq!(sim.esop_value, last.pool.percentage / 100.0 * exit_valuation);
    assert!((sim.total_distributed() - exit_valuation).abs() < 1e-3);
}

#[test]
fn test_seed_multiple_at_post_money_is_one() {
    let scenario = Scenario::new(vec![Founder::new("a", "Ada", 100.0)])
        .with_event(PricedRound::pre_money("seed", "Seed", 1_000_000.0, 4_000_000.0));
    let states = calculate_cap_table(&scenario).unwrap();

    // Exiting at exactly the post-money valuation returns the capital.
    let sim = simulate_exit(states.last().unwrap(), 5_000_000.0).unwrap();
    assert!((sim.investors[0].multiple - 1.0).abs() < 1e-9);
    assert!((sim.founders[0].cash_return - 4_000_000.0).abs() < 1e-6);
}

#[test]
fn test_engine_exit_and_sweep_agree() {
    let engine = CapTableEngine::default();
    let states = engine.calculate(&funded_scenario()).unwrap();
    let last = states.last().unwrap();

    let valuations = [1_000_000.0, 20_000_000.0, 300_000_000.0];
    let sweep = exit_sweep(last, &valuations).unwrap();
    assert_eq!(sweep.len(), valuations.len());

    for (valuation, swept) in valuations.iter().zip(&sweep) {
        let single = engine.simulate_exit(last, *valuation).unwrap();
        assert_eq!(&single, swept);
    }
}
