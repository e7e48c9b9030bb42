//! Cap-table evolution: founding state, rounds, pool top-ups.

pub mod builder;
pub mod engine;
pub mod pool;
pub mod round;

pub use builder::build_initial_state;
pub use engine::{calculate_cap_table, dilution_path, CapTableEngine};
pub use pool::{adjust_pool, PoolResize};
pub use round::{price_event, process_round, RoundOutcome, RoundPricing};
