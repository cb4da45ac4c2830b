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

//! Wire-format tests for the scan API payloads.
//!
//! Tests the JSON shapes exchanged with the scan service:
//! - The scan request body uses the exact field names the endpoint expects
//! - Airports feed and trips fixtures deserialize into the engine's types
//!
//! Run with:
//!     cargo test --test t_scan_wire_format

use chrono::NaiveDate;

use farescan_deal_agent::{ConnectivityGraph, ScanResponse, SearchInput, Trip};

fn criteria_json() -> serde_json::Value {
    let input = SearchInput {
        min_days: "2".to_string(),
        max_days: "4".to_string(),
        availability_start: "2025-06-01".to_string(),
        availability_end: "2025-06-15".to_string(),
        departure_airports: vec!["LHR".to_string(), "LGW".to_string()],
        destination_airports: vec!["BCN".to_string()],
    };
    let today = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
    let criteria = input.validate(today).expect("input should validate");
    serde_json::to_value(&criteria).expect("criteria should serialize")
}

/// The endpoint matches on exact field names; a rename here is a breaking
/// change even if deserialization still works locally.
#[test]
fn test_scan_request_field_names() {
    let body = criteria_json();
    let object = body.as_object().expect("body should be an object");

    for field in [
        "minDays",
        "maxDays",
        "availabilityStart",
        "availabilityEnd",
        "departureAirports",
        "destinationAirports",
        "maxChanges",
        "minTimeBetweenChangesHours",
        "maxTimeBetweenChangesHours",
        "returnToSameAirport",
    ] {
        assert!(object.contains_key(field), "missing field {:?}", field);
    }
    assert_eq!(object.len(), 10, "unexpected extra fields: {:?}", object);
}

#[test]
fn test_scan_request_field_values() {
    let body = criteria_json();
    assert_eq!(body["minDays"], 2);
    assert_eq!(body["maxDays"], 4);
    assert_eq!(body["availabilityStart"], "2025-06-01");
    assert_eq!(body["availabilityEnd"], "2025-06-15");
    assert_eq!(body["departureAirports"][1], "LGW");
    assert_eq!(body["maxChanges"], serde_json::Value::Null);
    assert_eq!(body["minTimeBetweenChangesHours"], serde_json::Value::Null);
    assert_eq!(body["maxTimeBetweenChangesHours"], serde_json::Value::Null);
    assert_eq!(body["returnToSameAirport"], true);
}

#[test]
fn test_airports_feed_fixture_parses() {
    let feed = r#"{
        "airports": [
            { "airportCode": "LHR", "connections": ["BCN", "FCO", "CDG"] },
            { "airportCode": "BCN", "connections": ["LHR"] },
            { "airportCode": "SEN", "connections": [] }
        ]
    }"#;
    let graph: ConnectivityGraph = serde_json::from_str(feed).expect("feed should parse");
    assert_eq!(graph.len(), 3);
    assert_eq!(graph.connections_of("LHR").len(), 3);
    assert!(graph.connections_of("SEN").is_empty());
}

#[test]
fn test_scan_response_fixture_parses() {
    let body = r#"{
        "trips": [
            {
                "outboundFlights": [
                    {
                        "direction": "London - Barcelona",
                        "departureDateTime": "2025-06-01T06:10:00Z",
                        "arrivalDateTime": "2025-06-01T09:25:00Z",
                        "price": 38.99
                    },
                    {
                        "direction": "London - Barcelona",
                        "departureDateTime": "2025-06-01T11:00:00Z",
                        "arrivalDateTime": "2025-06-01T14:15:00Z",
                        "price": 41.00
                    }
                ],
                "returnFlights": [
                    {
                        "direction": "Barcelona - London",
                        "departureDateTime": "2025-06-04T18:40:00Z",
                        "arrivalDateTime": "2025-06-04T20:05:00Z",
                        "price": 45.50
                    }
                ],
                "totalPrice": 84.49
            }
        ]
    }"#;
    let response: ScanResponse = serde_json::from_str(body).expect("response should parse");
    assert_eq!(response.trips.len(), 1);

    let trip = &response.trips[0];
    assert_eq!(trip.outbound_direction(), Some("London - Barcelona"));
    assert_eq!(trip.outbound_flights.len(), 2);
    assert_eq!(trip.duration_days(), Some(4));
}

/// Trips must survive a persistence round trip unchanged; favorites are
/// stored as the same JSON the scan endpoint returned.
#[test]
fn test_trip_serialization_round_trip() {
    let original = r#"{
        "outboundFlights": [{
            "direction": "London - Rome",
            "departureDateTime": "2025-09-10T07:00:00Z",
            "arrivalDateTime": "2025-09-10T10:35:00Z",
            "price": 52.00
        }],
        "returnFlights": [{
            "direction": "Rome - London",
            "departureDateTime": "2025-09-14T17:20:00Z",
            "arrivalDateTime": "2025-09-14T19:00:00Z",
            "price": 48.75
        }],
        "totalPrice": 100.75
    }"#;
    let parsed: Trip = serde_json::from_str(original).expect("trip should parse");
    let reencoded = serde_json::to_string(&parsed).expect("trip should serialize");
    let reparsed: Trip = serde_json::from_str(&reencoded).expect("trip should reparse");
    assert_eq!(parsed, reparsed);
}
