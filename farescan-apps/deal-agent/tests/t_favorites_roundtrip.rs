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

//! Favorites identity and persistence tests.
//!
//! Tests the favorites lifecycle end to end:
//! - Identity-tuple algebra: add/contains/remove, idempotence
//! - Write-through persistence and per-user scoping
//! - Login/logout semantics against the backing store
//!
//! Run with:
//!     cargo test --test t_favorites_roundtrip

use farescan_deal_agent::{
    FavoritesCollection, FavoritesStore, Flight, JsonStore, Trip, UserSession,
};

fn flight(direction: &str, departure: &str) -> Flight {
    Flight {
        direction: direction.to_string(),
        departure_date_time: departure.parse().unwrap(),
        arrival_date_time: departure.parse().unwrap(),
        price: 30.0,
    }
}

fn trip(out_dep: &str, ret_dep: &str, price: f64) -> Trip {
    Trip {
        outbound_flights: vec![flight("London - Barcelona", out_dep)],
        return_flights: vec![flight("Barcelona - London", ret_dep)],
        total_price: price,
    }
}

#[test]
fn test_add_remove_algebra() {
    let a = trip("2025-06-01T06:00:00Z", "2025-06-05T18:00:00Z", 84.49);
    let b = trip("2025-07-01T06:00:00Z", "2025-07-03T18:00:00Z", 62.00);
    let empty = FavoritesCollection::default();

    // isFavorite(t, add(t, F))
    assert!(empty.added(&a).contains(&a));
    // !isFavorite(t, remove(t, add(t, F)))
    assert!(!empty.added(&a).removed(&a).contains(&a));
    // add(t, add(t, F)) has the length of add(t, F)
    assert_eq!(empty.added(&a).added(&a).len(), empty.added(&a).len());

    // Other entries are untouched by a remove.
    let both = empty.added(&a).added(&b);
    let only_b = both.removed(&a);
    assert!(!only_b.contains(&a));
    assert!(only_b.contains(&b));
    assert_eq!(only_b.len(), 1);
}

#[test]
fn test_identity_ignores_price_and_later_legs() {
    let saved = trip("2025-06-01T06:00:00Z", "2025-06-05T18:00:00Z", 84.49);
    let favorites = FavoritesCollection::default().added(&saved);

    // Same tuple, different price, extra outbound leg: still the same trip.
    let mut rescanned = trip("2025-06-01T06:00:00Z", "2025-06-05T18:00:00Z", 129.99);
    rescanned
        .outbound_flights
        .push(flight("London - Barcelona", "2025-06-01T09:00:00Z"));
    assert!(favorites.contains(&rescanned));
    assert_eq!(favorites.added(&rescanned).len(), 1);

    // A different return departure is a different trip.
    let different = trip("2025-06-01T06:00:00Z", "2025-06-06T18:00:00Z", 84.49);
    assert!(!favorites.contains(&different));
}

#[tokio::test]
async fn test_write_through_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let store = FavoritesStore::new(JsonStore::new(dir.path()));
    let session = UserSession::new("u-42", "carol");

    let a = trip("2025-06-01T06:00:00Z", "2025-06-05T18:00:00Z", 84.49);
    let b = trip("2025-07-01T06:00:00Z", "2025-07-03T18:00:00Z", 62.00);

    // Each mutation is persisted wholesale, as the result screen does.
    let favorites = store.load(&session).await.unwrap().added(&a);
    store.save(&session, &favorites).await.unwrap();
    let favorites = favorites.added(&b);
    store.save(&session, &favorites).await.unwrap();

    let reloaded = store.load(&session).await.unwrap();
    assert_eq!(reloaded.len(), 2);
    assert!(reloaded.contains(&a));
    assert!(reloaded.contains(&b));

    let favorites = reloaded.removed(&a);
    store.save(&session, &favorites).await.unwrap();
    let reloaded = store.load(&session).await.unwrap();
    assert_eq!(reloaded.len(), 1);
    assert!(!reloaded.contains(&a));
}

#[tokio::test]
async fn test_users_do_not_share_favorites() {
    let dir = tempfile::tempdir().unwrap();
    let store = FavoritesStore::new(JsonStore::new(dir.path()));
    let carol = UserSession::new("u-42", "carol");
    let dave = UserSession::new("u-43", "dave");

    let a = trip("2025-06-01T06:00:00Z", "2025-06-05T18:00:00Z", 84.49);
    store
        .save(&carol, &FavoritesCollection::default().added(&a))
        .await
        .unwrap();

    assert_eq!(store.load(&carol).await.unwrap().len(), 1);
    assert!(store.load(&dave).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_logout_clears_stored_record() {
    let dir = tempfile::tempdir().unwrap();
    let store = FavoritesStore::new(JsonStore::new(dir.path()));
    let session = UserSession::new("u-42", "carol");

    let a = trip("2025-06-01T06:00:00Z", "2025-06-05T18:00:00Z", 84.49);
    store
        .save(&session, &FavoritesCollection::default().added(&a))
        .await
        .unwrap();
    store.clear(&session).await.unwrap();

    // The next login starts from an empty collection again.
    assert!(store.load(&session).await.unwrap().is_empty());
    // Clearing twice is harmless.
    store.clear(&session).await.unwrap();
}
