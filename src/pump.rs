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

//! Fuel pumps and their reservations.
//!
//! A registered pump lives in a `PumpSlot`. The slot carries a reservation
//! flag and the pump itself behind a mutex:
//!
//! ```text
//!  free ──try_reserve──► reserved ──dispense (slow)──► reserved ──drop──► free
//!    ▲                      │
//!    └───────drop───────────┘   (rejected: not enough fuel / too expensive)
//! ```
//!
//! Only the holder of a `Reservation` may read-then-write the remaining
//! volume. The mutex is held for the read or the write alone, never across
//! the dispensing delay, so snapshots of a busy pump never block.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use gas_station_rs::{FuelType, GasPump};
//!
//! let mut pump = GasPump::new(FuelType::Regular, dec!(100));
//! pump.dispense(dec!(10)).unwrap();
//! assert_eq!(pump.remaining(), dec!(90));
//! ```

use crate::StationError;
use crate::base::{FuelType, PumpId};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

/// A pump dispensing a single fuel type from a finite tank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GasPump {
    fuel_type: FuelType,
    remaining: Decimal,
}

impl GasPump {
    pub fn new(fuel_type: FuelType, remaining: Decimal) -> Self {
        Self {
            fuel_type,
            remaining: remaining.max(Decimal::ZERO),
        }
    }

    pub fn fuel_type(&self) -> FuelType {
        self.fuel_type
    }

    pub fn remaining(&self) -> Decimal {
        self.remaining
    }

    /// Removes exactly `volume` from the tank.
    pub fn dispense(&mut self, volume: Decimal) -> Result<(), StationError> {
        if volume < Decimal::ZERO {
            return Err(StationError::InvalidVolume(volume));
        }
        if volume > self.remaining {
            return Err(StationError::InsufficientFuel {
                fuel_type: self.fuel_type,
                requested: volume,
            });
        }
        self.remaining -= volume;
        debug_assert!(
            self.remaining >= Decimal::ZERO,
            "Invariant violated: remaining volume went negative: {}",
            self.remaining
        );
        Ok(())
    }
}

/// Point-in-time view of a registered pump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PumpStatus {
    pub pump: PumpId,
    pub fuel_type: FuelType,
    pub remaining: Decimal,
    pub reserved: bool,
}

/// A pump as owned by the station registry.
#[derive(Debug)]
pub(crate) struct PumpSlot {
    id: PumpId,
    fuel_type: FuelType,
    reserved: AtomicBool,
    pump: Mutex<GasPump>,
}

impl PumpSlot {
    pub(crate) fn new(id: PumpId, pump: GasPump) -> Self {
        Self {
            id,
            fuel_type: pump.fuel_type(),
            reserved: AtomicBool::new(false),
            pump: Mutex::new(pump),
        }
    }

    pub(crate) fn id(&self) -> PumpId {
        self.id
    }

    pub(crate) fn fuel_type(&self) -> FuelType {
        self.fuel_type
    }

    pub(crate) fn is_reserved(&self) -> bool {
        self.reserved.load(Ordering::Acquire)
    }

    /// Claims the pump without waiting. `None` while someone else holds it.
    pub(crate) fn try_reserve(&self) -> Option<Reservation<'_>> {
        self.reserved
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| Reservation { slot: self })
    }

    /// Volume left right now. Only a reservation holder can rely on it staying
    /// that way.
    pub(crate) fn remaining(&self) -> Decimal {
        self.pump.lock().remaining()
    }

    pub(crate) fn status(&self) -> PumpStatus {
        PumpStatus {
            pump: self.id,
            fuel_type: self.fuel_type,
            remaining: self.pump.lock().remaining(),
            reserved: self.is_reserved(),
        }
    }
}

/// Exclusive claim on a pump. Released on drop, including during unwinding.
#[derive(Debug)]
pub(crate) struct Reservation<'a> {
    slot: &'a PumpSlot,
}

impl Reservation<'_> {
    pub(crate) fn remaining(&self) -> Decimal {
        self.slot.remaining()
    }

    /// Dispenses `volume`, blocking for `pace * volume` first.
    ///
    /// A pump that cannot cover `volume` fails immediately, without waiting.
    /// The holder is the only writer, so the check cannot go stale.
    pub(crate) fn dispense(&self, volume: Decimal, pace: Duration) -> Result<(), StationError> {
        if volume > self.remaining() {
            return Err(StationError::InsufficientFuel {
                fuel_type: self.slot.fuel_type,
                requested: volume,
            });
        }
        let duration = dispense_duration(volume, pace);
        if !duration.is_zero() {
            thread::sleep(duration);
        }
        self.slot.pump.lock().dispense(volume)
    }
}

impl Drop for Reservation<'_> {
    fn drop(&mut self) {
        self.slot.reserved.store(false, Ordering::Release);
    }
}

fn dispense_duration(volume: Decimal, pace: Duration) -> Duration {
    let units = volume.to_f64().unwrap_or_default().max(0.0);
    Duration::try_from_secs_f64(pace.as_secs_f64() * units).unwrap_or(Duration::MAX)
}
