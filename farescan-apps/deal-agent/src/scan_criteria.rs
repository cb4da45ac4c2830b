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

//! # Scan Criteria
//!
//! Side-effect free validation and shaping of a flight-scan request from
//! raw user input. Produces the exact JSON body the scan endpoint expects.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a scan request could not be built. Every variant is recoverable:
/// the caller re-prompts without losing entered fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("please fill in both availability dates")]
    MissingDates,
    #[error("minimum days must be a positive number no greater than maximum days")]
    DaysOrderViolation,
    #[error("availability end date must be within one year from today")]
    WindowTooFarAhead,
    #[error("days of travel must not exceed the availability window of {window_days} days")]
    TripLongerThanWindow { window_days: i64 },
    #[error("select at least one departure and one destination airport")]
    MissingAirportSelection,
}

/// Raw user input as entered in the search form, before any validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchInput {
    pub min_days: String,
    pub max_days: String,
    pub availability_start: String,
    pub availability_end: String,
    pub departure_airports: Vec<String>,
    pub destination_airports: Vec<String>,
}

/// A validated scan request. Constructed once per submission, immutable,
/// serialized verbatim as the scan endpoint's JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub min_days: u32,
    pub max_days: u32,
    pub availability_start: NaiveDate,
    pub availability_end: NaiveDate,
    pub departure_airports: Vec<String>,
    pub destination_airports: Vec<String>,
    pub max_changes: Option<u32>,
    pub min_time_between_changes_hours: Option<u32>,
    pub max_time_between_changes_hours: Option<u32>,
    pub return_to_same_airport: bool,
}

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Furthest-ahead availability end accepted, relative to `today`.
const MAX_WINDOW_AHEAD_DAYS: u64 = 365;

fn parse_day_count(raw: &str) -> Option<u32> {
    match raw.trim().parse::<u32>() {
        Ok(n) if n >= 1 => Some(n),
        _ => None,
    }
}

impl SearchInput {
    /// Validate the entered fields and shape them into a [`SearchCriteria`].
    ///
    /// Rules run in order and the first failure wins. `today` is an
    /// explicit parameter so results are deterministic under test.
    pub fn validate(&self, today: NaiveDate) -> Result<SearchCriteria, ValidationError> {
        let start = NaiveDate::parse_from_str(self.availability_start.trim(), DATE_FORMAT);
        let end = NaiveDate::parse_from_str(self.availability_end.trim(), DATE_FORMAT);
        let (Ok(start), Ok(end)) = (start, end) else {
            return Err(ValidationError::MissingDates);
        };

        let (Some(min_days), Some(max_days)) =
            (parse_day_count(&self.min_days), parse_day_count(&self.max_days))
        else {
            return Err(ValidationError::DaysOrderViolation);
        };
        if min_days > max_days {
            return Err(ValidationError::DaysOrderViolation);
        }

        let horizon = today
            .checked_add_days(Days::new(MAX_WINDOW_AHEAD_DAYS))
            .unwrap_or(NaiveDate::MAX);
        if end > horizon {
            return Err(ValidationError::WindowTooFarAhead);
        }

        // Calendar dates make the ceil of the original millisecond division
        // exact. A window of zero or less is reported literally, not clamped.
        let window_days = (end - start).num_days();
        if i64::from(max_days) > window_days || i64::from(min_days) > window_days {
            return Err(ValidationError::TripLongerThanWindow { window_days });
        }

        if self.departure_airports.is_empty() || self.destination_airports.is_empty() {
            return Err(ValidationError::MissingAirportSelection);
        }

        Ok(SearchCriteria {
            min_days,
            max_days,
            availability_start: start,
            availability_end: end,
            departure_airports: self.departure_airports.clone(),
            destination_airports: self.destination_airports.clone(),
            max_changes: None,
            min_time_between_changes_hours: None,
            max_time_between_changes_hours: None,
            return_to_same_airport: true,
        })
    }
}
