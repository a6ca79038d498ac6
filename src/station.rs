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

//! Gas station sale coordinator.
//!
//! The [`GasStation`] owns the pumps, the price list and the statistics, and
//! serves purchases concurrently from any number of threads.
//!
//! # Purchase Processing
//!
//! For a purchase of `volume` units of a fuel at no more than `max_price`:
//!
//! 1. The current price is read. An unpriced fuel cannot be served.
//! 2. Pumps of that fuel are visited in registration order. Pumps reserved
//!    by another purchase are skipped, never waited on.
//! 3. The first free pump is checked against the price. A ceiling below the
//!    price cancels the purchase outright since every pump of a fuel shares
//!    its price.
//! 4. A pump without enough fuel is passed over and the next one tried.
//! 5. Only a pump that passed both checks is reserved. Its volume is checked
//!    again under the reservation; if another sale drained it in between,
//!    the pump is released and the next one tried.
//! 6. The reserved pump dispenses, is released, and the sale is booked.
//!
//! A purchase that is cancelled never reserves a pump, so it cannot make a
//! pump look busy to a buyer the pump could have served.
//!
//! # Thread Safety
//!
//! Pumps are reserved individually with an atomic flag, so a slow dispense
//! only blocks the pump doing it. Prices live in a [`DashMap`](dashmap::DashMap)
//! and counters behind a single [`Mutex`](parking_lot::Mutex).

use crate::base::{FuelType, PumpId};
use crate::config::StationConfig;
use crate::price_list::PriceList;
use crate::pump::{GasPump, PumpStatus};
use crate::registry::PumpRegistry;
use crate::statistics::{Statistics, StatisticsRecorder};
use crate::StationError;
use rust_decimal::Decimal;
use tracing::{debug, info};

/// A station with a fixed set of pumps serving concurrent customers.
///
/// # Invariants
///
/// - Every fuel type with a registered pump has a price.
/// - A pump is dispensed by at most one purchase at a time.
/// - `revenue` equals the sum of all charges returned by successful purchases.
/// - Each purchase updates exactly one counter, or none if its input is invalid.
#[derive(Debug)]
pub struct GasStation {
    config: StationConfig,
    pumps: PumpRegistry,
    prices: PriceList,
    statistics: StatisticsRecorder,
}

impl GasStation {
    /// Creates a station with the default configuration and no pumps.
    pub fn new() -> Self {
        Self::with_config(StationConfig::default())
    }

    pub fn with_config(config: StationConfig) -> Self {
        GasStation {
            config,
            pumps: PumpRegistry::new(),
            prices: PriceList::new(),
            statistics: StatisticsRecorder::new(),
        }
    }

    pub fn config(&self) -> &StationConfig {
        &self.config
    }

    /// Registers a pump.
    ///
    /// The first pump of a fuel type seeds that fuel's price with
    /// [`StationConfig::default_price`]. Prices already set are kept.
    pub fn add_pump(&self, pump: GasPump) -> PumpId {
        let fuel_type = pump.fuel_type();
        let remaining = pump.remaining();
        let default_price = self.config.default_price();

        if self.prices.seed(fuel_type, default_price) {
            debug!(%fuel_type, price = %default_price, "seeded default price");
        }
        let id = self.pumps.register(pump);
        debug!(pump = %id, %fuel_type, %remaining, "registered pump");
        id
    }

    /// Returns a copy of every pump. Changing it does not affect the station.
    pub fn pumps(&self) -> Vec<PumpStatus> {
        self.pumps.snapshot()
    }

    pub fn pump(&self, id: PumpId) -> Option<PumpStatus> {
        self.pumps.get(id)
    }

    pub fn pump_count(&self) -> usize {
        self.pumps.len()
    }

    /// Sells exactly `volume` units of `fuel_type` from a single pump.
    ///
    /// Returns the charged amount, `price * volume`. Blocks for the
    /// dispensing time of the serving pump.
    ///
    /// # Errors
    ///
    /// - [`StationError::PriceTooLow`] - `max_price` is below the current price
    ///   of the first free pump's fuel. Counted.
    /// - [`StationError::InsufficientFuel`] - No free pump of this fuel holds
    ///   `volume`, including when the fuel has no pumps or no price. Counted.
    /// - [`StationError::InvalidVolume`] - `volume` is negative or the charge
    ///   overflows. Not counted.
    pub fn buy_gas(
        &self,
        fuel_type: FuelType,
        volume: Decimal,
        max_price: Decimal,
    ) -> Result<Decimal, StationError> {
        if volume < Decimal::ZERO {
            return Err(StationError::InvalidVolume(volume));
        }

        let Some(price) = self.prices.get(fuel_type) else {
            debug!(%fuel_type, %volume, "cancelled: fuel type not priced");
            return Err(self.no_gas(fuel_type, volume));
        };
        let charge = price
            .checked_mul(volume)
            .ok_or(StationError::InvalidVolume(volume))?;

        for slot in self.pumps.candidates(fuel_type) {
            // A busy pump is unavailable, not something to wait for.
            if slot.is_reserved() {
                continue;
            }

            if max_price < price {
                self.statistics.record_too_expensive();
                debug!(%fuel_type, %price, %max_price, "cancelled: too expensive");
                return Err(StationError::PriceTooLow {
                    fuel_type,
                    price,
                    max_price,
                });
            }

            if volume > slot.remaining() {
                continue;
            }

            let Some(reservation) = slot.try_reserve() else {
                continue;
            };

            let pump = slot.id();
            match reservation.dispense(volume, self.config.dispense_pace()) {
                Ok(()) => drop(reservation),
                Err(StationError::InsufficientFuel { .. }) => {
                    debug!(%pump, %fuel_type, %volume, "pump drained before reservation");
                    continue;
                }
                Err(e) => return Err(e),
            }

            self.statistics.record_sale(charge);
            info!(%pump, %fuel_type, %volume, %charge, "sale completed");
            return Ok(charge);
        }

        debug!(%fuel_type, %volume, "cancelled: no free pump with enough fuel");
        Err(self.no_gas(fuel_type, volume))
    }

    fn no_gas(&self, fuel_type: FuelType, requested: Decimal) -> StationError {
        self.statistics.record_no_gas();
        StationError::InsufficientFuel {
            fuel_type,
            requested,
        }
    }

    /// Returns the current price per unit.
    ///
    /// # Errors
    ///
    /// [`StationError::UnknownFuelType`] if the fuel has never been priced.
    pub fn price(&self, fuel_type: FuelType) -> Result<Decimal, StationError> {
        self.prices
            .get(fuel_type)
            .ok_or(StationError::UnknownFuelType(fuel_type))
    }

    /// Installs a new price, whether or not the fuel was priced before.
    ///
    /// # Errors
    ///
    /// [`StationError::InvalidPrice`] if `price` is not positive.
    pub fn set_price(&self, fuel_type: FuelType, price: Decimal) -> Result<(), StationError> {
        self.prices.set(fuel_type, price)?;
        info!(%fuel_type, %price, "price set");
        Ok(())
    }

    /// All known prices.
    pub fn prices(&self) -> Vec<(FuelType, Decimal)> {
        self.prices.snapshot()
    }

    pub fn revenue(&self) -> Decimal {
        self.statistics.snapshot().revenue
    }

    pub fn number_of_sales(&self) -> u64 {
        self.statistics.snapshot().sales
    }

    pub fn cancellations_no_gas(&self) -> u64 {
        self.statistics.snapshot().cancellations_no_gas
    }

    pub fn cancellations_too_expensive(&self) -> u64 {
        self.statistics.snapshot().cancellations_too_expensive
    }

    /// All counters read together.
    pub fn statistics(&self) -> Statistics {
        self.statistics.snapshot()
    }
}

impl Default for GasStation {
    fn default() -> Self {
        Self::new()
    }
}
