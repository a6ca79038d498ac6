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

//! The set of pumps known to a station.

use crate::base::{FuelType, PumpId};
use crate::pump::{GasPump, PumpSlot, PumpStatus};
use parking_lot::RwLock;
use std::sync::Arc;

/// Append-only pump collection.
///
/// Readers receive copies: either [`PumpStatus`] values or cloned [`Arc`]s
/// of the slots. The read lock is never held while a pump dispenses.
#[derive(Debug, Default)]
pub(crate) struct PumpRegistry {
    pumps: RwLock<Vec<Arc<PumpSlot>>>,
}

impl PumpRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds a pump and returns its identifier.
    pub(crate) fn register(&self, pump: GasPump) -> PumpId {
        let mut pumps = self.pumps.write();
        let id = PumpId(pumps.len());
        pumps.push(Arc::new(PumpSlot::new(id, pump)));
        id
    }

    /// Independent copy of every pump, in registration order.
    pub(crate) fn snapshot(&self) -> Vec<PumpStatus> {
        self.pumps.read().iter().map(|slot| slot.status()).collect()
    }

    pub(crate) fn get(&self, id: PumpId) -> Option<PumpStatus> {
        self.pumps
            .read()
            .get(id.0)
            .map(|slot| slot.status())
    }

    /// Pumps dispensing `fuel_type`, in registration order.
    pub(crate) fn candidates(&self, fuel_type: FuelType) -> Vec<Arc<PumpSlot>> {
        self.pumps
            .read()
            .iter()
            .filter(|slot| slot.fuel_type() == fuel_type)
            .cloned()
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.pumps.read().len()
    }
}
