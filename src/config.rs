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

//! Station configuration.

use crate::StationError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::time::Duration;

/// Price per unit seeded for a fuel type when its first pump is registered.
pub const DEFAULT_PRICE: Decimal = dec!(1.5);

/// Time a pump spends dispensing one unit of fuel by default.
pub const DEFAULT_DISPENSE_PACE: Duration = Duration::from_millis(100);

/// Tunables for a [`GasStation`](crate::GasStation).
///
/// The seed price is always positive: it can only be changed through
/// [`with_default_price`](StationConfig::with_default_price), which rejects
/// anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationConfig {
    default_price: Decimal,
    dispense_pace: Duration,
}

impl StationConfig {
    /// Seed price for newly observed fuel types.
    pub fn default_price(&self) -> Decimal {
        self.default_price
    }

    /// Dispensing takes `dispense_pace * volume`.
    pub fn dispense_pace(&self) -> Duration {
        self.dispense_pace
    }

    /// # Errors
    ///
    /// [`StationError::InvalidPrice`] if `price` is not positive.
    pub fn with_default_price(mut self, price: Decimal) -> Result<Self, StationError> {
        if price <= Decimal::ZERO {
            return Err(StationError::InvalidPrice(price));
        }
        self.default_price = price;
        Ok(self)
    }

    pub fn with_dispense_pace(mut self, pace: Duration) -> Self {
        self.dispense_pace = pace;
        self
    }
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            default_price: DEFAULT_PRICE,
            dispense_pace: DEFAULT_DISPENSE_PACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_business_constants() {
        let config = StationConfig::default();
        assert_eq!(config.default_price(), dec!(1.5));
        assert_eq!(config.dispense_pace(), Duration::from_millis(100));
    }

    #[test]
    fn builders_override_single_fields() {
        let config = StationConfig::default()
            .with_default_price(dec!(2.25))
            .unwrap()
            .with_dispense_pace(Duration::ZERO);
        assert_eq!(config.default_price(), dec!(2.25));
        assert_eq!(config.dispense_pace(), Duration::ZERO);
    }

    #[test]
    fn non_positive_default_price_is_rejected() {
        assert_eq!(
            StationConfig::default().with_default_price(dec!(-1)),
            Err(StationError::InvalidPrice(dec!(-1)))
        );
        assert_eq!(
            StationConfig::default().with_default_price(Decimal::ZERO),
            Err(StationError::InvalidPrice(Decimal::ZERO))
        );
    }
}
