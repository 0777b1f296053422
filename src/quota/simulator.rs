//! The quota loop: look up the running total for an address, then accept and write back, or
//! reject.

use std::fmt;

use log::{info, trace};

use crate::cs::hashing::{ArrayDictionary, ChainedTable, Dictionary, LinearProbingTable};
use crate::error::{Error, Result};
use crate::quota::address::StreetAddress;
use crate::quota::order::Order;

/// Kits a single address may receive across all its orders.
pub const MAX_KITS_PER_ADDRESS: u32 = 4;

/// Knobs for [`run_simulator`].
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    pub max_kits_per_address: u32,
    /// Record an [`OrderOutcome`] for every order.
    pub analyze: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_kits_per_address: MAX_KITS_PER_ADDRESS,
            analyze: false,
        }
    }
}

/// What happened to one order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderOutcome {
    /// 1-based position in the order stream.
    pub sequence: usize,
    pub order: Order,
    pub accepted: bool,
    /// Kits the address holds after this order.
    pub total: u32,
}

impl fmt::Display for OrderOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.accepted {
            write!(
                f,
                "#{} accepted: {} kits to {} ({} total)",
                self.sequence, self.order.kits, self.order.address, self.total
            )
        } else {
            write!(
                f,
                "#{} rejected: {} kits to {} ({} already)",
                self.sequence, self.order.kits, self.order.address, self.total
            )
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationReport {
    pub accepted: usize,
    pub rejected: usize,
    pub kits_shipped: u64,
    /// Per-order outcomes, filled only in analyze mode.
    pub outcomes: Vec<OrderOutcome>,
}

/// Runs `orders` through `dict`, which maps each address to the kits it has been granted.
///
/// A first order for an address shows up as [`Error::NotFound`] from `find` and is handled as
/// the normal path. Any other dictionary error, such as [`Error::Full`], aborts the run.
pub fn run_simulator<D>(
    orders: &[Order],
    dict: &mut D,
    config: &SimulatorConfig,
) -> Result<SimulationReport>
where
    D: Dictionary<StreetAddress, u32> + ?Sized,
{
    let max = config.max_kits_per_address;
    let mut report = SimulationReport::default();

    for (idx, order) in orders.iter().enumerate() {
        let (accepted, total) = match dict.find(&order.address).copied() {
            Ok(previous) => {
                let total = previous.saturating_add(order.kits);
                if total <= max {
                    dict.insert(order.address.clone(), total)?;
                    (true, total)
                } else {
                    (false, previous)
                }
            }
            Err(Error::NotFound) => {
                if order.kits <= max {
                    dict.insert(order.address.clone(), order.kits)?;
                    (true, order.kits)
                } else {
                    (false, 0)
                }
            }
            Err(e) => return Err(e),
        };

        trace!(
            "order #{} for {}: {} kits, {} (total {})",
            idx + 1,
            order.address,
            order.kits,
            if accepted { "accepted" } else { "rejected" },
            total
        );

        if accepted {
            report.accepted += 1;
            report.kits_shipped += order.kits as u64;
        } else {
            report.rejected += 1;
        }
        if config.analyze {
            report.outcomes.push(OrderOutcome {
                sequence: idx + 1,
                order: order.clone(),
                accepted,
                total,
            });
        }
    }

    info!(
        "simulated {} orders: {} accepted, {} rejected, {} kits shipped to {} addresses",
        orders.len(),
        report.accepted,
        report.rejected,
        report.kits_shipped,
        dict.size()
    );
    Ok(report)
}

/// The dictionaries the simulator can be run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DictionaryKind {
    /// Unordered array, linear scans.
    Array,
    /// Linear probing with tombstones.
    Closed,
    /// Separate chaining.
    Chained,
}

impl DictionaryKind {
    pub const ALL: [DictionaryKind; 3] = [
        DictionaryKind::Array,
        DictionaryKind::Closed,
        DictionaryKind::Chained,
    ];

    /// Maps the interactive menu numbers 1, 2 and 3.
    pub fn from_choice(choice: u32) -> Option<Self> {
        match choice {
            1 => Some(DictionaryKind::Array),
            2 => Some(DictionaryKind::Closed),
            3 => Some(DictionaryKind::Chained),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DictionaryKind::Array => "ArrayDictionary",
            DictionaryKind::Closed => "LinearProbingTable",
            DictionaryKind::Chained => "ChainedTable",
        }
    }

    /// A fresh, empty dictionary with `capacity` slots, buckets or records.
    pub fn build(self, capacity: usize) -> Box<dyn Dictionary<StreetAddress, u32>> {
        match self {
            DictionaryKind::Array => Box::new(ArrayDictionary::new(capacity)),
            DictionaryKind::Closed => Box::new(LinearProbingTable::new(capacity)),
            DictionaryKind::Chained => Box::new(ChainedTable::new(capacity)),
        }
    }
}

impl fmt::Display for DictionaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
