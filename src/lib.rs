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

//! # Gas Station
//!
//! This library simulates a gas station: a set of fuel pumps, each holding a
//! finite volume of one fuel, serving concurrent customers against a
//! per-fuel price list while keeping running sales statistics.
//!
//! ## Core Components
//!
//! - [`GasStation`]: Sale coordinator owning pumps, prices, and statistics
//! - [`GasPump`]: A single pump with its fuel type and remaining volume
//! - [`FuelType`]: Supported fuels (regular, super, diesel)
//! - [`StationError`]: Error types for purchase and pricing failures
//!
//! ## Example
//!
//! ```
//! use gas_station_rs::{FuelType, GasPump, GasStation, StationConfig};
//! use rust_decimal_macros::dec;
//! use std::time::Duration;
//!
//! let config = StationConfig::default().with_dispense_pace(Duration::ZERO);
//! let station = GasStation::with_config(config);
//!
//! station.add_pump(GasPump::new(FuelType::Regular, dec!(100)));
//! station.set_price(FuelType::Regular, dec!(1.0)).unwrap();
//!
//! let charged = station.buy_gas(FuelType::Regular, dec!(10), dec!(1.0)).unwrap();
//! assert_eq!(charged, dec!(10.0));
//! assert_eq!(station.number_of_sales(), 1);
//! ```
//!
//! ## Thread Safety
//!
//! Purchases can run in parallel from many threads. Each pump is reserved
//! individually while it dispenses, so other pumps stay available.

mod base;
pub mod config;
pub mod error;
mod price_list;
pub mod pump;
mod registry;
mod station;
mod statistics;

pub use base::{FuelType, PumpId};
pub use config::{DEFAULT_PRICE, StationConfig};
pub use error::StationError;
pub use pump::{GasPump, PumpStatus};
pub use station::GasStation;
pub use statistics::Statistics;
