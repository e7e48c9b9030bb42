//! Scenario validation.
//!
//! Diagnostics are returned as data so callers can show them before running
//! the engine; nothing here fails.

use std::collections::HashSet;

use crate::core::config::EngineConfig;
use crate::core::state::OwnershipState;
use crate::core::types::{FinancingEvent, PoolAdjustment, Scenario, Valuation};

/// Message emitted when the scenario has no founders.
pub const MISSING_FOUNDERS: &str = "At least one founder is required";

/// Message emitted when founders plus pools do not sum to 100%.
pub const EQUITY_NOT_100: &str = "Total equity must sum to 100%";

/// Validates scenario structure.
#[derive(Debug, Clone)]
pub struct ScenarioValidator {
    /// Absolute tolerance on the founding 100% sum.
    pub equity_tolerance: f64,
}

impl Default for ScenarioValidator {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl ScenarioValidator {
    /// Create a validator using the engine's tolerance.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            equity_tolerance: config.equity_tolerance,
        }
    }

    /// Return every problem found; an empty list means the scenario is valid.
    pub fn validate(&self, scenario: &Scenario) -> Vec<String> {
        let mut errors = Vec::new();

        if scenario.founders.is_empty() {
            errors.push(MISSING_FOUNDERS.to_string());
        } else if (scenario.founding_equity_total() - 100.0).abs() > self.equity_tolerance {
            errors.push(EQUITY_NOT_100.to_string());
        }

        self.check_founding(scenario, &mut errors);

        let mut event_ids = HashSet::new();
        for event in &scenario.events {
            if !event_ids.insert(event.id()) {
                errors.push(format!("Duplicate event id '{}'", event.id()));
            }
            self.check_event(event, &mut errors);
        }

        errors
    }

    /// Validate a JSON scenario. A payload that does not parse yields a single
    /// diagnostic carrying the parse error.
    pub fn validate_json(&self, json: &str) -> Vec<String> {
        match Scenario::from_json(json) {
            Ok(scenario) => self.validate(&scenario),
            Err(err) => vec![err.to_string()],
        }
    }

    fn check_founding(&self, scenario: &Scenario, errors: &mut Vec<String>) {
        let mut founder_ids = HashSet::new();
        for founder in &scenario.founders {
            if !founder_ids.insert(founder.id.as_str()) {
                errors.push(format!("Duplicate founder id '{}'", founder.id));
            }
            if founder.id == OwnershipState::POOL_HOLDER_ID {
                errors.push(format!(
                    "Founder '{}' cannot use the reserved id '{}'",
                    founder.name, founder.id
                ));
            }
            if !is_percentage(founder.initial_equity) {
                errors.push(format!(
                    "Founder '{}' equity must be between 0 and 100",
                    founder.name
                ));
            }
        }

        for pool in &scenario.option_pools {
            if !is_percentage(pool.percentage) {
                errors.push(format!(
                    "Option pool '{}' percentage must be between 0 and 100",
                    pool.id
                ));
            }
        }
    }

    fn check_event(&self, event: &FinancingEvent, errors: &mut Vec<String>) {
        let name = event.name();

        if !is_positive(event.capital_raised()) {
            errors.push(format!("{name}: capital raised must be positive"));
        }

        match event {
            FinancingEvent::Priced(round) => match round.valuation {
                Valuation::PreMoney(pre) if !is_positive(pre) => {
                    errors.push(format!("{name}: pre-money valuation must be positive"));
                }
                Valuation::PostMoney(post) if !(post.is_finite() && post > round.capital_raised) => {
                    errors.push(format!(
                        "{name}: post-money valuation must exceed capital raised"
                    ));
                }
                _ => {}
            },
            FinancingEvent::Convertible(note) => {
                match note.valuation_cap {
                    None => errors.push(format!("{name}: convertible requires a valuation cap")),
                    Some(cap) if !is_positive(cap) => {
                        errors.push(format!("{name}: valuation cap must be positive"));
                    }
                    Some(_) => {}
                }
                if let Some(discount) = note.discount_percentage {
                    if !(discount.is_finite() && (0.0..100.0).contains(&discount)) {
                        errors.push(format!("{name}: discount must be between 0 and 100"));
                    }
                }
            }
        }

        if let Some(adjustment) = event.pool_adjustment() {
            check_pool_target(name, adjustment, errors);
        }
    }
}

fn check_pool_target(name: &str, adjustment: &PoolAdjustment, errors: &mut Vec<String>) {
    let target = adjustment.target_percentage;
    if !(target.is_finite() && (0.0..100.0).contains(&target)) {
        errors.push(format!("{name}: pool target must be between 0 and 100"));
    }
}

#[inline]
fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[inline]
fn is_percentage(value: f64) -> bool {
    value.is_finite() && (0.0..=100.0).contains(&value)
}

/// Validate a scenario with the default tolerance.
pub fn validate_scenario(scenario: &Scenario) -> Vec<String> {
    ScenarioValidator::default().validate(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ConvertibleInstrument, Founder, OptionPool, PoolSizing, PricedRound};

    fn founders(split: &[f64]) -> Vec<Founder> {
        split
            .iter()
            .enumerate()
            .map(|(i, pct)| Founder::new(format!("f{i}"), format!("Founder {i}"), *pct))
            .collect()
    }

    #[test]
    fn test_valid_scenario_has_no_errors() {
        let scenario = Scenario::new(founders(&[70.0, 20.0]))
            .with_pool(OptionPool::new("esop", 10.0, PoolSizing::PreMoney))
            .with_event(PricedRound::pre_money("seed", "Seed", 1e6, 4e6));
        assert!(validate_scenario(&scenario).is_empty());
    }

    #[test]
    fn test_empty_founders() {
        let errors = validate_scenario(&Scenario::default());
        assert_eq!(errors, vec![MISSING_FOUNDERS.to_string()]);
    }

    #[test]
    fn test_equity_over_100() {
        let errors = validate_scenario(&Scenario::new(founders(&[60.0, 50.0])));
        assert_eq!(errors, vec![EQUITY_NOT_100.to_string()]);
    }

    #[test]
    fn test_equity_within_tolerance() {
        let scenario = Scenario::new(founders(&[33.333, 33.333, 33.333]));
        assert!(validate_scenario(&scenario).is_empty());
    }

    #[test]
    fn test_event_diagnostics() {
        let mut uncapped = ConvertibleInstrument::capped("safe", "SAFE", 100.0, 1.0);
        uncapped.valuation_cap = None;

        let scenario = Scenario::new(founders(&[100.0]))
            .with_event(PricedRound::post_money("a", "Series A", 5.0, 4.0))
            .with_event(uncapped.with_discount(120.0));

        let errors = validate_scenario(&scenario);
        assert_eq!(errors.len(), 3);
        assert!(errors[0].starts_with("Series A"));
        assert!(errors[1].contains("valuation cap"));
        assert!(errors[2].contains("discount"));
    }

    #[test]
    fn test_duplicate_ids() {
        let scenario = Scenario::new(vec![
            Founder::new("f", "Ada", 50.0),
            Founder::new("f", "Bob", 50.0),
        ])
        .with_event(PricedRound::pre_money("seed", "Seed", 1.0, 4.0))
        .with_event(PricedRound::pre_money("seed", "Seed 2", 1.0, 4.0));

        let errors = validate_scenario(&scenario);
        assert!(errors.iter().any(|e| e.contains("Duplicate founder id")));
        assert!(errors.iter().any(|e| e.contains("Duplicate event id")));
    }

    #[test]
    fn test_validate_json_reports_parse_errors() {
        let validator = ScenarioValidator::default();
        let missing = r#"{
            "founders": [{"id": "a", "name": "Ada", "initial_equity": 100.0}],
            "events": [{"type": "priced", "id": "seed", "name": "Seed", "capital_raised": 1.0}]
        }"#;
        let errors = validator.validate_json(missing);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("requires a pre-money or post-money valuation"));

        let ok = r#"{"founders": [{"id": "a", "name": "Ada", "initial_equity": 100.0}]}"#;
        assert!(validator.validate_json(ok).is_empty());
        assert_eq!(validator.validate_json("not json").len(), 1);
    }

    #[test]
    fn test_reserved_pool_id() {
        let scenario = Scenario::new(vec![
            Founder::new("pool", "Pat", 50.0),
            Founder::new("b", "Bob", 50.0),
        ]);
        assert_eq!(
            validate_scenario(&scenario),
            vec!["Founder 'Pat' cannot use the reserved id 'pool'"]
        );
    }
}
