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

//! Error types for station operations.

use crate::base::FuelType;
use rust_decimal::Decimal;
use thiserror::Error;

/// Station errors.
///
/// [`InsufficientFuel`](StationError::InsufficientFuel) and
/// [`PriceTooLow`](StationError::PriceTooLow) are business outcomes of a
/// purchase and are counted in the station statistics. The remaining
/// variants reject invalid input and leave the statistics untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StationError {
    /// No free pump of this fuel holds the requested volume
    #[error("not enough {fuel_type} available to dispense {requested}")]
    InsufficientFuel { fuel_type: FuelType, requested: Decimal },

    /// The customer's ceiling is below the current price
    #[error("{fuel_type} costs {price} per unit, above the accepted {max_price}")]
    PriceTooLow {
        fuel_type: FuelType,
        price: Decimal,
        max_price: Decimal,
    },

    /// The fuel type has never been priced
    #[error("no price known for {0}")]
    UnknownFuelType(FuelType),

    /// Volume is negative or the charge would overflow
    #[error("invalid volume {0}")]
    InvalidVolume(Decimal),

    /// Price is zero or negative
    #[error("invalid price {0} (must be positive)")]
    InvalidPrice(Decimal),
}
