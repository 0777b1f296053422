//! Order records and where they come from.
//!
//! An order file holds one order per line as `number,street,city,zip,kits`, for example
//! `742,Evergreen Terrace,Springfield,49007,2`. Blank lines are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{Error, Result};
use crate::quota::address::StreetAddress;

const FIELDS_PER_LINE: usize = 5;

const STREETS: &[&str] = &[
    "Main St",
    "Oak Ave",
    "Maple Dr",
    "Cedar Ln",
    "Elm St",
    "Pine Rd",
    "Lakeview Blvd",
    "Hillcrest Way",
];

const CITIES: &[&str] = &[
    "Springfield",
    "Riverside",
    "Fairview",
    "Franklin",
    "Greenville",
    "Madison",
];

/// A request for `kits` test kits to be shipped to `address`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub address: StreetAddress,
    pub kits: u32,
}

impl Order {
    pub fn new(address: StreetAddress, kits: u32) -> Self {
        Self { address, kits }
    }

    /// Parses one `number,street,city,zip,kits` line. `line` is only used in error reports.
    pub fn parse_line(text: &str, line: usize) -> Result<Order> {
        let fields: Vec<&str> = text.split(',').map(str::trim).collect();
        if fields.len() != FIELDS_PER_LINE {
            return Err(Error::ParseOrder {
                line,
                reason: format!(
                    "expected {} fields, got {}",
                    FIELDS_PER_LINE,
                    fields.len()
                ),
            });
        }

        let number = parse_field::<i32>(fields[0], "street number", line)?;
        let zip = parse_field::<i32>(fields[3], "zip", line)?;
        let kits = parse_field::<u32>(fields[4], "kit count", line)?;

        Ok(Order {
            address: StreetAddress::new(number, fields[1], fields[2], zip),
            kits,
        })
    }
}

impl FromStr for Order {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Order::parse_line(s, 1)
    }
}

fn parse_field<T: FromStr>(raw: &str, what: &str, line: usize) -> Result<T> {
    raw.parse().map_err(|_| Error::ParseOrder {
        line,
        reason: format!("invalid {} {:?}", what, raw),
    })
}

/// Reads every order from `reader`, reporting 1-based line numbers on failure.
pub fn load_orders<R: BufRead>(reader: R) -> Result<Vec<Order>> {
    let mut orders = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        orders.push(Order::parse_line(&line, idx + 1)?);
    }
    Ok(orders)
}

pub fn load_orders_from_path(path: impl AsRef<Path>) -> Result<Vec<Order>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let orders = load_orders(BufReader::new(file))?;
    info!("loaded {} orders from {}", orders.len(), path.display());
    Ok(orders)
}

/// Deterministic synthetic orders for runs without a data file.
///
/// Addresses come from a pool about a third the size of `count`, so most addresses order more
/// than once and the quota actually bites.
pub fn generate_orders(count: usize, seed: u64) -> Vec<Order> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let pool: Vec<StreetAddress> = (0..(count / 3).max(1))
        .map(|_| {
            StreetAddress::new(
                rng.gen_range(1..10_000),
                STREETS[rng.gen_range(0..STREETS.len())],
                CITIES[rng.gen_range(0..CITIES.len())],
                rng.gen_range(10_000..100_000),
            )
        })
        .collect();

    (0..count)
        .map(|_| Order {
            address: pool[rng.gen_range(0..pool.len())].clone(),
            kits: rng.gen_range(1..=4),
        })
        .collect()
}
