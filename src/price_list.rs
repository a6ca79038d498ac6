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

//! Thread-safe price list keyed by fuel type.

use crate::StationError;
use crate::base::FuelType;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rust_decimal::Decimal;

/// Price per unit for each fuel type the station has seen.
#[derive(Debug, Default)]
pub(crate) struct PriceList {
    prices: DashMap<FuelType, Decimal>,
}

impl PriceList {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Installs `price` only if the fuel type has no price yet.
    ///
    /// Returns `true` when the seed was applied.
    pub(crate) fn seed(&self, fuel_type: FuelType, price: Decimal) -> bool {
        // Entry API keeps check-and-insert atomic against a concurrent set.
        match self.prices.entry(fuel_type) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(price);
                true
            }
        }
    }

    pub(crate) fn set(&self, fuel_type: FuelType, price: Decimal) -> Result<(), StationError> {
        if price <= Decimal::ZERO {
            return Err(StationError::InvalidPrice(price));
        }
        self.prices.insert(fuel_type, price);
        Ok(())
    }

    pub(crate) fn get(&self, fuel_type: FuelType) -> Option<Decimal> {
        self.prices.get(&fuel_type).map(|price| *price)
    }

    /// Copy of all prices, ordered by [`FuelType::ALL`].
    pub(crate) fn snapshot(&self) -> Vec<(FuelType, Decimal)> {
        FuelType::ALL
            .into_iter()
            .filter_map(|fuel_type| self.get(fuel_type).map(|price| (fuel_type, price)))
            .collect()
    }
}
