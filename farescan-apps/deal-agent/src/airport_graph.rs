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

//! # Airport Directory & Connectivity Graph
//!
//! Static airport reference data plus the side-effect free routines that
//! scope destination pickers from a per-session connectivity graph.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// One entry of the airport reference directory. Set at process start and
/// never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    pub code: String,
    pub name: String,
}

static AIRPORT_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{3,4}$").unwrap());

/// Whether `code` has the shape of an IATA-like airport code.
pub fn is_plausible_code(code: &str) -> bool {
    AIRPORT_CODE_RE.is_match(code)
}

/// Built-in directory of selectable European airports.
pub static DEFAULT_DIRECTORY: Lazy<Vec<Airport>> = Lazy::new(|| {
    EUROPEAN_AIRPORTS
        .iter()
        .map(|(code, name)| Airport {
            code: (*code).to_string(),
            name: (*name).to_string(),
        })
        .collect()
});

const EUROPEAN_AIRPORTS: &[(&str, &str)] = &[
    ("VIE", "Austria - Vienna (Vienna International Airport)"),
    ("BRU", "Belgium - Brussels (Brussels Airport)"),
    ("PRG", "Czech Republic - Prague (Václav Havel Airport Prague)"),
    ("CPH", "Denmark - Copenhagen (Copenhagen Airport)"),
    ("HEL", "Finland - Helsinki (Helsinki Airport)"),
    ("NCE", "France - Nice (Nice Côte d'Azur Airport)"),
    ("CDG", "France - Paris (Charles de Gaulle Airport)"),
    ("ORY", "France - Paris (Orly Airport)"),
    ("TXL", "Germany - Berlin (Berlin Tegel Airport)"),
    ("DUS", "Germany - Düsseldorf (Düsseldorf Airport)"),
    ("FRA", "Germany - Frankfurt (Frankfurt Airport)"),
    ("HAM", "Germany - Hamburg (Hamburg Airport)"),
    ("MUC", "Germany - Munich (Munich Airport)"),
    ("STR", "Germany - Stuttgart (Stuttgart Airport)"),
    ("ATH", "Greece - Athens (Athens International Airport)"),
    ("JMK", "Greece - Mykonos (Mykonos Airport)"),
    ("JTR", "Greece - Santorini (Santorini Airport)"),
    ("DUB", "Ireland - Dublin (Dublin Airport)"),
    ("BUD", "Hungary - Budapest (Budapest Ferenc Liszt International Airport)"),
    ("BLQ", "Italy - Bologna (Bologna Guglielmo Marconi Airport)"),
    ("MXP", "Italy - Milan (Milan Malpensa Airport)"),
    ("NAP", "Italy - Naples (Naples International Airport)"),
    ("FCO", "Italy - Rome (Leonardo da Vinci–Fiumicino Airport)"),
    ("TRS", "Italy - Trieste (Trieste–Friuli Venezia Giulia Airport)"),
    ("VCE", "Italy - Venezia (Venezia Marco Polo)"),
    ("TSF", "Italy - Venice (Treviso Airport)"),
    ("MLA", "Malta - Luqa (Malta International Airport)"),
    ("AMS", "Netherlands - Amsterdam (Amsterdam Airport Schiphol)"),
    ("EIN", "Netherlands - Eindhoven (Eindhoven Airport)"),
    ("OSL", "Norway - Oslo (Oslo Airport Gardermoen)"),
    ("WAW", "Poland - Warsaw (Warsaw Chopin Airport)"),
    ("LIS", "Portugal - Lisbon (Lisbon Airport)"),
    ("OTP", "Romania - Bucharest (Henri Coandă International Airport)"),
    ("DME", "Russia - Moscow (Domodedovo International Airport)"),
    ("SVO", "Russia - Moscow (Sheremetyevo International Airport)"),
    ("BCN", "Spain - Barcelona (Barcelona–El Prat Airport)"),
    ("LPA", "Spain - Gran Canaria (Gran Canaria Airport)"),
    ("ACE", "Spain - Lanzarote (Lanzarote Airport)"),
    ("MAD", "Spain - Madrid (Adolfo Suárez Madrid–Barajas Airport)"),
    ("PMI", "Spain - Palma de Mallorca (Palma de Mallorca Airport)"),
    ("TFN", "Spain - Tenerife North (Tenerife North Airport)"),
    ("TFS", "Spain - Tenerife South (Tenerife South Airport)"),
    ("VLC", "Spain - Valencia (Valencia Airport)"),
    ("ARN", "Sweden - Stockholm (Stockholm Arlanda Airport)"),
    ("ZRH", "Switzerland - Zurich (Zurich Airport)"),
    ("GVA", "Switzerland - Geneva (Geneva Airport)"),
    ("IST", "Turkey - Istanbul (Istanbul Airport)"),
    ("BHX", "United Kingdom - Birmingham (Birmingham Airport)"),
    ("BRS", "United Kingdom - Bristol (Bristol Airport)"),
    ("EDI", "United Kingdom - Edinburgh (Edinburgh Airport)"),
    ("GLA", "United Kingdom - Glasgow (Glasgow Airport)"),
    ("LBA", "United Kingdom - Leeds (Leeds Bradford Airport)"),
    ("LHR", "United Kingdom - London (Heathrow Airport)"),
    ("LGW", "United Kingdom - London (Gatwick Airport)"),
    ("MAN", "United Kingdom - Manchester (Manchester Airport)"),
    ("SEN", "United Kingdom - Southend (London Southend Airport)"),
    ("STN", "United Kingdom - London (London Stansted Airport)"),
];

/// One airports-feed record: an airport and the airports it has known
/// routes to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirportConnections {
    pub airport_code: String,
    #[serde(default)]
    pub connections: Vec<String>,
}

/// Connectivity graph in the shape served by the airports feed. Fetched
/// once per session and read-only afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectivityGraph {
    pub airports: Vec<AirportConnections>,
}

impl ConnectivityGraph {
    /// Connection codes of `code`; empty when the feed has no entry for it.
    pub fn connections_of(&self, code: &str) -> &[String] {
        self.airports
            .iter()
            .find(|entry| entry.airport_code == code)
            .map(|entry| entry.connections.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }
}

/// Destinations reachable from any of `departure_codes`.
///
/// First-seen order, no duplicate codes. Connection codes that do not
/// resolve against `directory` are dropped. An empty departure set yields
/// an empty result; there is no fallback to the full directory.
pub fn resolve_destinations(
    departure_codes: &[String],
    graph: &ConnectivityGraph,
    directory: &[Airport],
) -> Vec<Airport> {
    let mut destinations: Vec<Airport> = Vec::new();
    for departure in departure_codes {
        for connection in graph.connections_of(departure) {
            if destinations.iter().any(|known| &known.code == connection) {
                continue;
            }
            if let Some(airport) = directory.iter().find(|entry| &entry.code == connection) {
                destinations.push(airport.clone());
            } else {
                tracing::trace!("Dropping connection {:?} not in directory", connection);
            }
        }
    }
    destinations
}

/// Directory airports still selectable given the already-picked codes,
/// directory order preserved. Used for departure pickers, which are not
/// scoped by the graph.
pub fn available_for_selection(already_selected: &[String], directory: &[Airport]) -> Vec<Airport> {
    directory
        .iter()
        .filter(|airport| !already_selected.contains(&airport.code))
        .cloned()
        .collect()
}
