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

// Library for farescan-deal-agent
// Trip search & filtering engine behind the flight-deal CLI tools

pub mod airport_graph;
pub mod date_range;
pub mod favorites;
pub mod scan_criteria;
pub mod scan_results;
mod scan_search;

// Re-export the engine surface at the crate root
pub use airport_graph::{
    Airport, AirportConnections, ConnectivityGraph, DEFAULT_DIRECTORY, available_for_selection,
    is_plausible_code, resolve_destinations,
};
pub use date_range::{DateRangeError, DateRangeSelection, DayMark};
pub use favorites::{FavoritesCollection, FavoritesStore, TripIdentity, UserSession};
pub use scan_criteria::{SearchCriteria, SearchInput, ValidationError};
pub use scan_results::{
    FilterState, Flight, ScanResponse, Trip, apply_filter, distinct_directions,
    is_anomalous_duration,
};

// Re-export the transport client
pub use scan_search::{DEFAULT_AIRPORTS_URL, DEFAULT_SCAN_URL, ScanClient, ScanClientConfig};

// Re-export the backing store so binaries configure persistence without a
// direct internals dependency
pub use farescan_user_store::{JsonStore, StoreError};
