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

//! # Favorites
//!
//! Trip identity matching for favorites bookkeeping, the per-user
//! favorites collection, and its write-through persistence.

use chrono::{DateTime, Utc};
use farescan_user_store::{JsonStore, StoreError};
use serde::{Deserialize, Serialize};

use crate::scan_results::Trip;

/// The fields that decide whether two trip records denote the same
/// itinerary. Total price and any later legs are deliberately excluded:
/// the same trip may be re-scanned at a different price.
#[derive(Debug, Clone, PartialEq)]
pub struct TripIdentity {
    pub outbound_departure: DateTime<Utc>,
    pub return_departure: DateTime<Utc>,
    pub outbound_direction: String,
    pub return_direction: String,
}

impl Trip {
    /// Identity tuple of the trip, or `None` when a leg is missing and the
    /// trip can never be matched.
    pub fn identity(&self) -> Option<TripIdentity> {
        let outbound = self.outbound_flights.first()?;
        let inbound = self.return_flights.first()?;
        Some(TripIdentity {
            outbound_departure: outbound.departure_date_time,
            return_departure: inbound.departure_date_time,
            outbound_direction: outbound.direction.clone(),
            return_direction: inbound.direction.clone(),
        })
    }
}

/// Ordered collection of favorited trips, unique under [`TripIdentity`],
/// scoped to one user. A snapshot value: mutations return a new
/// collection and the caller persists it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoritesCollection(Vec<Trip>);

impl FavoritesCollection {
    pub fn trips(&self) -> &[Trip] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether some saved trip matches `trip`'s identity tuple.
    pub fn contains(&self, trip: &Trip) -> bool {
        let Some(identity) = trip.identity() else {
            return false;
        };
        self.0
            .iter()
            .any(|saved| saved.identity().as_ref() == Some(&identity))
    }

    /// The collection with `trip` appended, unless an identical trip is
    /// already saved. Adding twice is a no-op, not a duplicate.
    pub fn added(&self, trip: &Trip) -> Self {
        if trip.identity().is_none() {
            tracing::warn!("Refusing to favorite a trip with a missing leg");
            return self.clone();
        }
        if self.contains(trip) {
            return self.clone();
        }
        let mut trips = self.0.clone();
        trips.push(trip.clone());
        Self(trips)
    }

    /// The collection without any trip matching `trip`'s identity tuple.
    /// Removing an absent trip is a no-op.
    pub fn removed(&self, trip: &Trip) -> Self {
        let Some(identity) = trip.identity() else {
            return self.clone();
        };
        Self(
            self.0
                .iter()
                .filter(|saved| saved.identity().as_ref() != Some(&identity))
                .cloned()
                .collect(),
        )
    }
}

/// The signed-in user, passed explicitly into every favorites operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub user_id: String,
    pub username: String,
}

impl UserSession {
    pub fn new(user_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
        }
    }
}

/// Per-user favorites persistence over the key-value store, keyed
/// `favorites:<userId>`. Read on login/focus, overwritten wholesale on
/// every add/remove; a failed write leaves the in-memory snapshot ahead
/// of the stored one until the next successful write.
#[derive(Clone, Debug)]
pub struct FavoritesStore {
    store: JsonStore,
}

impl FavoritesStore {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    fn key(session: &UserSession) -> String {
        format!("favorites:{}", session.user_id)
    }

    /// Load the user's favorites; a user with no stored record starts
    /// with an empty collection.
    pub async fn load(&self, session: &UserSession) -> Result<FavoritesCollection, StoreError> {
        let favorites = self
            .store
            .get::<FavoritesCollection>(&Self::key(session))
            .await?
            .unwrap_or_default();
        tracing::debug!(
            "Loaded {} favorite(s) for user {}",
            favorites.len(),
            session.user_id
        );
        Ok(favorites)
    }

    /// Overwrite the user's stored favorites with `favorites`.
    pub async fn save(
        &self,
        session: &UserSession,
        favorites: &FavoritesCollection,
    ) -> Result<(), StoreError> {
        self.store.put(&Self::key(session), favorites).await
    }

    /// Drop the user's stored favorites, as on logout.
    pub async fn clear(&self, session: &UserSession) -> Result<(), StoreError> {
        self.store.remove(&Self::key(session)).await
    }
}
