//!  Farescan Deal Agent
//!
//!  Copyright (C) 2026  Farescan contributors
//!
//!  This program is free software: you can redistribute it and/or modify
//!  it under the terms of the GNU Affero General Public License as published by
//!  the Free Software Foundation, either version 3 of the License, or
//!  (at your option) any later version.
//!
//!  This program is distributed in the hope that it will be useful,
//!  but WITHOUT ANY WARRANTY; without even the implied warranty of
//!  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//!  GNU Affero General Public License for more details.
//!
//!  You should have received a copy of the GNU Affero General Public License
//!  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! # Scan Results
//!
//! The round-trip result model returned by the scan endpoint and the
//! side-effect free direction/price filtering over it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One flight leg of a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    /// Human-readable route label, e.g. "London - Barcelona".
    pub direction: String,
    pub departure_date_time: DateTime<Utc>,
    pub arrival_date_time: DateTime<Utc>,
    pub price: f64,
}

/// One round-trip itinerary as returned by the scan endpoint. Read-only
/// to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub outbound_flights: Vec<Flight>,
    pub return_flights: Vec<Flight>,
    pub total_price: f64,
}

/// Success body of the scan endpoint. An absent trips array means "no
/// results", not an error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScanResponse {
    #[serde(default)]
    pub trips: Vec<Trip>,
}

impl Trip {
    /// Outbound route label of the trip, used for grouping and filtering.
    pub fn outbound_direction(&self) -> Option<&str> {
        self.outbound_flights.first().map(|f| f.direction.as_str())
    }

    /// Days spanned between outbound arrival and return departure:
    /// floor of the difference in whole days, plus one.
    ///
    /// `None` when a leg is missing. The value can be zero or negative for
    /// malformed data (return departing before outbound arrival); it is
    /// reported as-is so the caller can flag the anomaly instead of the
    /// engine masking it.
    pub fn duration_days(&self) -> Option<i64> {
        let outbound_arrival = self.outbound_flights.first()?.arrival_date_time;
        let return_departure = self.return_flights.first()?.departure_date_time;
        let seconds = (return_departure - outbound_arrival).num_seconds();
        Some(seconds.div_euclid(86_400) + 1)
    }
}

/// Whether a computed duration is a data anomaly the caller must surface.
pub fn is_anomalous_duration(duration_days: Option<i64>) -> bool {
    !matches!(duration_days, Some(d) if d >= 1)
}

/// Direction and price bounds applied to a result set. Rebuilt per result
/// screen from the observed price range and replaced wholesale on change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub selected_direction: Option<String>,
    pub min_price: f64,
    pub max_price: f64,
}

impl FilterState {
    /// The widest filter for a result set: no direction, prices from zero
    /// to the highest observed total.
    pub fn from_trips(trips: &[Trip]) -> Self {
        let max_price = trips.iter().fold(0.0_f64, |acc, t| acc.max(t.total_price));
        Self {
            selected_direction: None,
            min_price: 0.0,
            max_price,
        }
    }

    pub fn with_direction(mut self, direction: Option<String>) -> Self {
        self.selected_direction = direction;
        self
    }

    pub fn with_price_range(mut self, min_price: f64, max_price: f64) -> Self {
        self.min_price = min_price;
        self.max_price = max_price;
        self
    }

    fn matches(&self, trip: &Trip) -> bool {
        let direction_ok = match &self.selected_direction {
            Some(direction) => trip.outbound_direction() == Some(direction.as_str()),
            None => true,
        };
        direction_ok && trip.total_price >= self.min_price && trip.total_price <= self.max_price
    }
}

/// Distinct outbound directions of a result set, first occurrence first.
pub fn distinct_directions(trips: &[Trip]) -> Vec<String> {
    let mut directions: Vec<String> = Vec::new();
    for trip in trips {
        if let Some(direction) = trip.outbound_direction() {
            if !directions.iter().any(|known| known == direction) {
                directions.push(direction.to_string());
            }
        }
    }
    directions
}

/// Trips passing the filter, in their original relative order.
///
/// The input is left untouched; calling again with the same arguments
/// yields the same list.
pub fn apply_filter(trips: &[Trip], filter: &FilterState) -> Vec<Trip> {
    trips
        .iter()
        .filter(|trip| filter.matches(trip))
        .cloned()
        .collect()
}
