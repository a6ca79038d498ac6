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

//! Running business statistics.

use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde::Serialize;

/// Consistent snapshot of the station counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub revenue: Decimal,
    pub sales: u64,
    pub cancellations_no_gas: u64,
    pub cancellations_too_expensive: u64,
}

/// Counters updated once per terminal purchase outcome.
///
/// All four live under one lock so readers never see revenue without the
/// matching sale count.
#[derive(Debug, Default)]
pub(crate) struct StatisticsRecorder {
    inner: Mutex<Statistics>,
}

impl StatisticsRecorder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_sale(&self, charged: Decimal) {
        let mut stats = self.inner.lock();
        stats.revenue += charged;
        stats.sales += 1;
    }

    pub(crate) fn record_no_gas(&self) {
        self.inner.lock().cancellations_no_gas += 1;
    }

    pub(crate) fn record_too_expensive(&self) {
        self.inner.lock().cancellations_too_expensive += 1;
    }

    pub(crate) fn snapshot(&self) -> Statistics {
        *self.inner.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn new_recorder_is_zeroed() {
        assert_eq!(StatisticsRecorder::new().snapshot(), Statistics::default());
    }

    #[test]
    fn sale_updates_revenue_and_count_together() {
        let recorder = StatisticsRecorder::new();
        recorder.record_sale(dec!(10.0));
        recorder.record_sale(dec!(2.5));

        let stats = recorder.snapshot();
        assert_eq!(stats.revenue, dec!(12.5));
        assert_eq!(stats.sales, 2);
        assert_eq!(stats.cancellations_no_gas, 0);
        assert_eq!(stats.cancellations_too_expensive, 0);
    }

    #[test]
    fn cancellations_are_counted_separately() {
        let recorder = StatisticsRecorder::new();
        recorder.record_no_gas();
        recorder.record_too_expensive();
        recorder.record_too_expensive();

        let stats = recorder.snapshot();
        assert_eq!(stats.cancellations_no_gas, 1);
        assert_eq!(stats.cancellations_too_expensive, 2);
        assert_eq!(stats.revenue, Decimal::ZERO);
    }

    #[test]
    fn statistics_serialize_revenue_as_string() {
        let stats = Statistics {
            revenue: dec!(10.50),
            sales: 3,
            cancellations_no_gas: 1,
            cancellations_too_expensive: 0,
        };
        let parsed: serde_json::Value = serde_json::to_value(stats).unwrap();
        assert_eq!(parsed["revenue"].as_str().unwrap(), "10.50");
        assert_eq!(parsed["sales"], 3);
        assert_eq!(parsed["cancellations_no_gas"], 1);
    }
}
