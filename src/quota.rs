//! Per-address order quota simulation.
//!
//! This module drives a [`Dictionary`](crate::Dictionary) keyed by [`StreetAddress`] through a
//! stream of test-kit orders, accepting each order only while the running total for its address
//! stays within the configured limit:
//! - [`address`]: the composite address key and its hash
//! - [`order`]: order records, CSV-style parsing and synthetic generation
//! - [`simulator`]: the find-then-insert quota loop
//! - [`timer`]: a start/stop wall-clock timer for the driver

pub mod address;
pub mod order;
pub mod simulator;
pub mod timer;

pub use address::StreetAddress;
pub use order::{generate_orders, load_orders, load_orders_from_path, Order};
pub use simulator::{
    run_simulator, DictionaryKind, OrderOutcome, SimulationReport, SimulatorConfig,
    MAX_KITS_PER_ADDRESS,
};
pub use timer::Timer;
