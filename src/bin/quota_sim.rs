use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{error, info};

use addrquota::logger::initialize_logger;
use addrquota::quota::{
    generate_orders, load_orders_from_path, run_simulator, DictionaryKind, Order,
    SimulatorConfig, Timer, MAX_KITS_PER_ADDRESS,
};
use addrquota::{Dictionary, Error, LinearProbingTable, Result};

/// Slots, buckets or records allocated per processed order.
const CAPACITY_PER_ORDER: usize = 4;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Exercise a 10-slot linear probing table step by step and dump it.
    Demo,
    /// Run the per-address order quota simulator.
    Run(RunArgs),
}

#[derive(clap::Args, Debug)]
struct RunArgs {
    /// Order file, one `number,street,city,zip,kits` line per order.
    #[arg(short, long, default_value = "data/orders100k.csv")]
    data: PathBuf,

    /// Generate this many synthetic orders instead of reading the order file.
    #[arg(short, long)]
    generate: Option<usize>,

    /// Seed for generated orders.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Print the outcome of every order.
    #[arg(short, long)]
    analyze: bool,

    /// Number of orders to process. With --dict, runs once instead of prompting.
    #[arg(short, long)]
    orders: Option<usize>,

    #[arg(long, value_enum)]
    dict: Option<DictionaryKind>,

    #[arg(long, default_value_t = MAX_KITS_PER_ADDRESS)]
    max_kits: u32,
}

fn main() -> ExitCode {
    initialize_logger();
    let args = Args::parse();

    let result = match args.command {
        Command::Demo => demo(),
        Command::Run(run) => simulate(run),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn demo() -> Result<()> {
    let mut table = LinearProbingTable::new(10);

    for (k, v) in [(1, "One"), (2, "Two"), (3, "Three")] {
        table.insert(k, v.to_string())?;
    }
    println!("inserted 1, 2, 3 ({} records)", table.size());

    println!("find(2) -> {}", table.find(&2)?);

    table.remove(&2)?;
    match table.find(&2) {
        Err(Error::NotFound) => println!("remove(2) -> find(2) is not found"),
        Ok(v) => println!("remove(2) did not take effect, find(2) -> {}", v),
        Err(e) => return Err(e),
    }

    table.insert(1, "Uno".to_string())?;
    println!("update 1 -> find(1) -> {}", table.find(&1)?);

    let rest = [
        (4, "Four"),
        (5, "Five"),
        (6, "Six"),
        (7, "Seven"),
        (8, "Eight"),
        (9, "Nine"),
        (10, "Ten"),
        (11, "Eleven"),
    ];
    for (k, v) in rest {
        if let Err(e) = table.insert(k, v.to_string()) {
            println!("insert({}) -> {}", k, e);
            break;
        }
    }

    println!("\ncurrent table contents:");
    print!("{}", table);
    Ok(())
}

fn simulate(args: RunArgs) -> Result<()> {
    let mut timer = Timer::new();
    timer.start();
    let orders = match args.generate {
        Some(count) => generate_orders(count, args.seed),
        None => {
            println!("Loading orders from {}...", args.data.display());
            load_orders_from_path(&args.data)?
        }
    };
    timer.stop()?;
    println!(
        "Finished loading orders. Total orders read: {} in {} ms.\n",
        orders.len(),
        timer.read_millis()?
    );

    let config = SimulatorConfig {
        max_kits_per_address: args.max_kits,
        analyze: args.analyze,
    };

    match (args.orders, args.dict) {
        (Some(count), Some(kind)) => run_once(&orders, count, kind, &config),
        _ => interactive(&orders, &config),
    }
}

/// Runs the first `count` orders against a fresh dictionary of the given kind.
fn run_once(
    orders: &[Order],
    count: usize,
    kind: DictionaryKind,
    config: &SimulatorConfig,
) -> Result<()> {
    if count == 0 {
        return Err(Error::InvalidArgument(
            "number of orders must be positive".to_string(),
        ));
    }
    if count > orders.len() {
        return Err(Error::InvalidArgument(format!(
            "number of orders requested exceeds total orders available ({})",
            orders.len()
        )));
    }

    println!("Running with {}...", kind);
    let mut dict = kind.build(CAPACITY_PER_ORDER * count);
    let mut timer = Timer::new();
    timer.start();
    let report = run_simulator(&orders[..count], &mut *dict, config)?;
    timer.stop()?;

    for outcome in &report.outcomes {
        println!("{}", outcome);
    }
    info!(
        "{}: {} accepted, {} rejected",
        kind, report.accepted, report.rejected
    );
    println!(
        "{} with {} orders took {} ms\n",
        kind,
        count,
        timer.read_millis()?
    );
    Ok(())
}

fn interactive(orders: &[Order], config: &SimulatorConfig) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let Some(input) = prompt(
            &mut lines,
            "Enter number of orders to process (or 'x' to exit): ",
        )?
        else {
            break;
        };
        if input.eq_ignore_ascii_case("x") {
            break;
        }
        let count = match input.parse::<usize>() {
            Ok(n) if n > 0 => n,
            _ => {
                eprintln!("Invalid input. Please enter a positive integer or 'x' to exit.");
                continue;
            }
        };
        if count > orders.len() {
            eprintln!(
                "Number of orders requested exceeds total orders available ({}).",
                orders.len()
            );
            continue;
        }

        let Some(choice) = prompt(
            &mut lines,
            "Choose data structure (1 for ArrayDictionary, 2 for LinearProbingTable, 3 for ChainedTable): ",
        )?
        else {
            break;
        };
        let Some(kind) = choice.parse().ok().and_then(DictionaryKind::from_choice) else {
            eprintln!("Invalid choice. Please enter 1, 2, or 3.");
            continue;
        };

        if let Err(e) = run_once(orders, count, kind, config) {
            eprintln!("An error occurred during simulation: {}", e);
        }
    }

    println!("Program exited.");
    Ok(())
}

/// Prints `message` and reads one trimmed line; `None` at end of input.
fn prompt<B: BufRead>(lines: &mut io::Lines<B>, message: &str) -> Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_string())),
        None => Ok(None),
    }
}
