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

//! Benchmarks for the gas station.
//!
//! Run with: cargo bench
//!
//! Benchmarks include:
//! - Single-threaded purchases and cancellations
//! - Multi-threaded purchases contending for pumps
//! - Scaling with number of pumps

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use gas_station_rs::{FuelType, GasPump, GasStation, StationConfig};
use rayon::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::time::Duration;

// =============================================================================
// Helper Functions
// =============================================================================

/// Instant-dispensing station with `pumps` pumps per fuel type.
fn make_station(pumps: usize) -> GasStation {
    let station =
        GasStation::with_config(StationConfig::default().with_dispense_pace(Duration::ZERO));
    for fuel_type in FuelType::ALL {
        for _ in 0..pumps {
            station.add_pump(GasPump::new(fuel_type, Decimal::from(1_000_000_000u64)));
        }
    }
    station
}

// =============================================================================
// Single-Threaded Benchmarks
// =============================================================================

fn bench_single_purchase(c: &mut Criterion) {
    let station = make_station(1);
    c.bench_function("single_purchase", |b| {
        b.iter(|| {
            station
                .buy_gas(black_box(FuelType::Regular), dec!(1), dec!(2))
                .unwrap();
        })
    });
}

fn bench_cancellations(c: &mut Criterion) {
    let station = make_station(4);
    let mut group = c.benchmark_group("cancellation");

    group.bench_function("too_expensive", |b| {
        b.iter(|| {
            let _ = station.buy_gas(black_box(FuelType::Diesel), dec!(1), dec!(0.5));
        })
    });

    group.bench_function("no_gas", |b| {
        b.iter(|| {
            let _ = station.buy_gas(black_box(FuelType::Super), dec!(2000000000), dec!(2));
        })
    });

    group.finish();
}

fn bench_price_updates(c: &mut Criterion) {
    let station = make_station(1);
    c.bench_function("set_price", |b| {
        b.iter(|| {
            station
                .set_price(black_box(FuelType::Super), dec!(1.75))
                .unwrap();
        })
    });
}

// =============================================================================
// Multi-Threaded Benchmarks
// =============================================================================

fn bench_parallel_purchases(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_purchases");
    let count = 10_000usize;
    group.throughput(Throughput::Elements(count as u64));

    for pumps in [1usize, 4, 16].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(pumps), pumps, |b, &pumps| {
            let station = make_station(pumps);
            b.iter(|| {
                (0..count).into_par_iter().for_each(|i| {
                    let fuel_type = FuelType::ALL[i % 3];
                    let _ = station.buy_gas(fuel_type, dec!(1), dec!(2));
                });
            })
        });
    }

    group.finish();
}

fn bench_snapshot_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("pump_snapshot");

    for pumps in [10usize, 100, 1_000].iter() {
        let station = make_station(*pumps);
        group.throughput(Throughput::Elements((*pumps * 3) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(pumps), pumps, |b, _| {
            b.iter(|| black_box(station.pumps()))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_purchase,
    bench_cancellations,
    bench_price_updates,
    bench_parallel_purchases,
    bench_snapshot_scaling,
);
criterion_main!(benches);
