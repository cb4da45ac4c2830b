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

//! # Date Range Selection
//!
//! Side-effect free start/end date picking for the availability window,
//! plus the calendar-day marks used to highlight the selected span.

use chrono::{Days, NaiveDate};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateRangeError {
    #[error("the end date {picked} cannot be before the start date {start}")]
    EndBeforeStart { start: NaiveDate, picked: NaiveDate },
}

/// The current start/end pick, a plain value replaced on every change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRangeSelection {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// One highlighted calendar day. A single-day range carries both flags;
/// interior days carry neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayMark {
    pub date: NaiveDate,
    pub starting_day: bool,
    pub ending_day: bool,
}

impl DateRangeSelection {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Apply a day pick and return the next selection.
    ///
    /// With no start yet, or with a completed range, the pick restarts a
    /// new range. With only a start set, picking the start day itself makes
    /// a single-day range, a later day completes the range, and an earlier
    /// day is rejected with the selection unchanged.
    pub fn pick(&self, day: NaiveDate) -> Result<Self, DateRangeError> {
        match (self.start, self.end) {
            (None, _) | (Some(_), Some(_)) => Ok(Self {
                start: Some(day),
                end: None,
            }),
            (Some(start), None) => {
                if day < start {
                    Err(DateRangeError::EndBeforeStart { start, picked: day })
                } else {
                    Ok(Self {
                        start: Some(start),
                        end: Some(day),
                    })
                }
            }
        }
    }

    /// The selection as delivered when the picker closes: a lone start is
    /// completed into a single-day range so no half-open range reaches the
    /// consumer.
    pub fn closed(&self) -> Self {
        match (self.start, self.end) {
            (Some(start), None) => Self {
                start: Some(start),
                end: Some(start),
            },
            _ => *self,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Marks for every day of the span, start through end inclusive.
    ///
    /// Recomputed fresh on each call; with only a start picked the single
    /// start day is marked, and with nothing picked the result is empty.
    pub fn marks(&self) -> Vec<DayMark> {
        let Some(start) = self.start else {
            return Vec::new();
        };
        let end = self.end.unwrap_or(start);
        if end < start {
            return Vec::new();
        }

        let mut marks = Vec::new();
        let mut current = start;
        loop {
            marks.push(DayMark {
                date: current,
                starting_day: current == start,
                ending_day: current == end,
            });
            if current == end {
                break;
            }
            match current.checked_add_days(Days::new(1)) {
                Some(next) => current = next,
                None => break,
            }
        }
        marks
    }
}
