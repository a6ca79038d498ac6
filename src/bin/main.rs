// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use clap::Parser;
use crossbeam::queue::SegQueue;
use csv::{ReaderBuilder, Trim, Writer};
use gas_station_rs::{DEFAULT_PRICE, FuelType, GasPump, GasStation, StationConfig, StationError};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;
use std::process;
use std::thread;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Gas Station - Simulate customers buying fuel concurrently
///
/// Sets up a station from the given pumps and prices, replays an orders CSV
/// with several concurrent customers, and writes the final pump states to stdout.
#[derive(Parser, Debug)]
#[command(name = "gas-station-rs")]
#[command(about = "A gas station simulation that replays purchase orders", long_about = None)]
struct Args {
    /// Path to CSV file with purchase orders
    ///
    /// Expected format: fuel,volume,max_price
    /// Example: cargo run -- --pump regular=100 orders.csv > pumps.csv
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Pump to install, as FUEL=VOLUME (repeatable)
    #[arg(long = "pump", value_name = "FUEL=VOLUME", value_parser = parse_assignment)]
    pumps: Vec<(FuelType, Decimal)>,

    /// Price per unit, as FUEL=PRICE (repeatable)
    #[arg(long = "price", value_name = "FUEL=PRICE", value_parser = parse_assignment)]
    prices: Vec<(FuelType, Decimal)>,

    /// Number of customers buying concurrently
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u16).range(1..))]
    workers: u16,

    /// Milliseconds a pump needs per unit dispensed
    #[arg(long, default_value_t = 100)]
    pace_ms: u64,

    /// Price seeded for fuels without an explicit --price
    #[arg(long, default_value_t = DEFAULT_PRICE, value_parser = parse_positive_price)]
    default_price: Decimal,
}

impl Args {
    fn config(&self) -> Result<StationConfig, StationError> {
        Ok(StationConfig::default()
            .with_default_price(self.default_price)?
            .with_dispense_pace(Duration::from_millis(self.pace_ms)))
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let station = match build_station(&args) {
        Ok(station) => station,
        Err(e) => {
            eprintln!("Error setting up station: {}", e);
            process::exit(1);
        }
    };

    let file = match File::open(&args.input) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error opening file '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    };

    let orders = match read_orders(BufReader::new(file)) {
        Ok(orders) => orders,
        Err(e) => {
            eprintln!("Error reading orders: {}", e);
            process::exit(1);
        }
    };

    run_orders(&station, orders, args.workers as usize);

    let stats = station.statistics();
    info!(
        revenue = %stats.revenue,
        sales = stats.sales,
        cancellations_no_gas = stats.cancellations_no_gas,
        cancellations_too_expensive = stats.cancellations_too_expensive,
        "simulation finished"
    );

    if let Err(e) = write_pumps(&station, std::io::stdout()) {
        eprintln!("Error writing output: {}", e);
        process::exit(1);
    }
}

/// Parses `FUEL=AMOUNT`, e.g. `diesel=250.5`.
fn parse_assignment(s: &str) -> Result<(FuelType, Decimal), String> {
    let (fuel, amount) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FUEL=AMOUNT, got '{s}'"))?;
    let fuel = fuel.parse::<FuelType>()?;
    let amount = amount
        .trim()
        .parse::<Decimal>()
        .map_err(|e| format!("invalid amount '{}': {e}", amount.trim()))?;
    Ok((fuel, amount))
}

fn parse_positive_price(s: &str) -> Result<Decimal, String> {
    let price = s
        .trim()
        .parse::<Decimal>()
        .map_err(|e| format!("invalid price '{}': {e}", s.trim()))?;
    if price <= Decimal::ZERO {
        return Err(format!("price must be positive, got {price}"));
    }
    Ok(price)
}

fn build_station(args: &Args) -> Result<GasStation, StationError> {
    let station = GasStation::with_config(args.config()?);
    for &(fuel_type, price) in &args.prices {
        station.set_price(fuel_type, price)?;
    }
    for &(fuel_type, volume) in &args.pumps {
        station.add_pump(GasPump::new(fuel_type, volume));
    }
    Ok(station)
}

/// Raw CSV record matching the input format.
///
/// Fields: `fuel, volume, max_price`
#[derive(Debug, Deserialize)]
struct CsvOrder {
    fuel: String,
    volume: Decimal,
    max_price: Decimal,
}

/// A single customer's request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Order {
    line: usize,
    fuel_type: FuelType,
    volume: Decimal,
    max_price: Decimal,
}

/// Reads purchase orders from a CSV reader.
///
/// Malformed rows and unknown fuels are skipped with a warning.
///
/// # CSV Format
///
/// ```csv
/// fuel,volume,max_price
/// regular,10,1.6
/// diesel,45.5,1.2
/// ```
///
/// # Errors
///
/// Returns a CSV error if the reader fails or the header cannot be read.
fn read_orders<R: Read>(reader: R) -> Result<Vec<Order>, csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .has_headers(true)
        .from_reader(reader);
    rdr.headers()?;

    let mut orders = Vec::new();
    for (index, result) in rdr.deserialize::<CsvOrder>().enumerate() {
        // Header is line 1.
        let line = index + 2;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!(line, "skipping malformed row: {e}");
                continue;
            }
        };
        match record.fuel.parse::<FuelType>() {
            Ok(fuel_type) => orders.push(Order {
                line,
                fuel_type,
                volume: record.volume,
                max_price: record.max_price,
            }),
            Err(e) => warn!(line, "skipping order: {e}"),
        }
    }
    Ok(orders)
}

/// Serves all orders with `workers` concurrent customers.
///
/// Orders are taken from a shared queue, so completion order is unspecified.
fn run_orders(station: &GasStation, orders: Vec<Order>, workers: usize) {
    let queue = SegQueue::new();
    for order in orders {
        queue.push(order);
    }

    thread::scope(|scope| {
        for _ in 0..workers.max(1) {
            scope.spawn(|| {
                while let Some(order) = queue.pop() {
                    match station.buy_gas(order.fuel_type, order.volume, order.max_price) {
                        Ok(charged) => info!(line = order.line, %charged, "order served"),
                        Err(e) => warn!(line = order.line, "order cancelled: {e}"),
                    }
                }
            });
        }
    });
}

/// Writes pump states as CSV.
///
/// # CSV Format
///
/// Columns: `pump, fuel_type, remaining, reserved`
///
/// # Errors
///
/// Returns a CSV error if writing fails.
fn write_pumps<W: Write>(station: &GasStation, writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);
    for pump in station.pumps() {
        wtr.serialize(&pump)?;
    }
    wtr.flush()?;
    Ok(())
}
