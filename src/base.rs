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

//! Core identifier types for pumps and fuels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a pump within one station.
///
/// Assigned by the station in registration order, starting at zero. It is
/// the pump's index in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PumpId(pub usize);

impl fmt::Display for PumpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fuels a pump can dispense.
///
/// The set is fixed at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    Regular,
    Super,
    Diesel,
}

impl FuelType {
    pub const ALL: [FuelType; 3] = [FuelType::Regular, FuelType::Super, FuelType::Diesel];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Super => "super",
            Self::Diesel => "diesel",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsing is case-insensitive and ignores surrounding whitespace.
impl FromStr for FuelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "regular" => Ok(Self::Regular),
            "super" => Ok(Self::Super),
            "diesel" => Ok(Self::Diesel),
            other => Err(format!("unknown fuel type '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fuel_type_parses_case_insensitively() {
        assert_eq!(" Regular ".parse::<FuelType>(), Ok(FuelType::Regular));
        assert_eq!("SUPER".parse::<FuelType>(), Ok(FuelType::Super));
        assert_eq!("diesel".parse::<FuelType>(), Ok(FuelType::Diesel));
    }

    #[test]
    fn fuel_type_rejects_unknown_names() {
        assert!("kerosene".parse::<FuelType>().is_err());
        assert!("".parse::<FuelType>().is_err());
    }

    #[test]
    fn fuel_type_display_round_trips_through_from_str() {
        for fuel in FuelType::ALL {
            assert_eq!(fuel.to_string().parse::<FuelType>(), Ok(fuel));
        }
    }

    #[test]
    fn pump_id_displays_inner_value() {
        assert_eq!(PumpId(7).to_string(), "7");
    }
}
