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

//! CLI for flight-deal scanning.

use anyhow::{Context, Result, bail};
use clap::Parser;
use farescan_deal_agent::{
    DEFAULT_AIRPORTS_URL, DEFAULT_DIRECTORY, DEFAULT_SCAN_URL, DateRangeSelection,
    FavoritesCollection, FavoritesStore, FilterState, JsonStore, ScanClient, ScanClientConfig,
    SearchInput, Trip, apply_filter, distinct_directions, is_anomalous_duration, is_plausible_code,
    resolve_destinations,
};
use std::cmp::max;

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "farescan-flights")]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Availability window start (YYYY-MM-DD)
    #[arg(short, long)]
    start: String,

    /// Availability window end (YYYY-MM-DD); defaults to a single-day window
    #[arg(short, long)]
    end: Option<String>,

    /// Minimum days of travel
    #[arg(long, default_value = "1")]
    min_days: String,

    /// Maximum days of travel
    #[arg(long, default_value = "1")]
    max_days: String,

    /// Departure airport codes (comma-separated, e.g. "LHR,LGW")
    #[arg(short, long)]
    from: String,

    /// Destination airport codes (comma-separated); when omitted, every
    /// destination reachable from the departures is scanned
    #[arg(short, long)]
    to: Option<String>,

    /// Keep only trips with this outbound direction label
    #[arg(long)]
    direction: Option<String>,

    /// Keep only trips priced at or above this amount
    #[arg(long)]
    min_price: Option<f64>,

    /// Keep only trips priced at or below this amount
    #[arg(long)]
    max_price: Option<f64>,

    /// User id; marks favorited trips and enables --favorite
    #[arg(short, long)]
    user: Option<String>,

    /// Save the trip at this rank (1-based, after filtering) to favorites
    #[arg(long)]
    favorite: Option<usize>,

    /// Print the day-by-day availability window before scanning
    #[arg(long, default_value = "false")]
    show_window: bool,

    /// Airports feed endpoint
    #[arg(long, default_value = DEFAULT_AIRPORTS_URL)]
    airports_url: String,

    /// Scan endpoint
    #[arg(long, default_value = DEFAULT_SCAN_URL)]
    scan_url: String,

    /// API key for both endpoints
    #[arg(long, env = "FARESCAN_API_KEY")]
    api_key: String,

    /// Directory for per-user state such as favorites
    #[arg(long, default_value = ".farescan")]
    data_dir: String,

    /// Verbose output
    #[arg(short, long, default_value = "false")]
    verbose: bool,
}

/// Configure logging based on verbosity level
fn setup_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();
}

/// Split a comma-separated code list, uppercased, rejecting non-IATA shapes
fn parse_codes(raw: &str) -> Result<Vec<String>> {
    let mut codes = Vec::new();
    for part in raw.split(',') {
        let code = part.trim().to_uppercase();
        if code.is_empty() {
            continue;
        }
        if !is_plausible_code(&code) {
            bail!("Invalid airport code: {}. Use 3- or 4-letter codes", part);
        }
        if !codes.contains(&code) {
            codes.push(code);
        }
    }
    Ok(codes)
}

/// Build the availability window through the same picking rules the date
/// picker uses, so a reversed range is rejected up front
fn pick_window(start: &str, end: Option<&str>) -> Result<DateRangeSelection> {
    let start = start
        .trim()
        .parse()
        .context("Invalid start date. Use YYYY-MM-DD")?;
    let mut selection = DateRangeSelection::default()
        .pick(start)
        .context("Start date rejected")?;
    if let Some(end) = end {
        let end = end
            .trim()
            .parse()
            .context("Invalid end date. Use YYYY-MM-DD")?;
        selection = selection.pick(end).context("End date rejected")?;
    }
    Ok(selection.closed())
}

fn fmt_date(value: Option<chrono::NaiveDate>) -> String {
    value.map_or("????-??-??".to_string(), |d| d.to_string())
}

/// Format a trip's leg times: "Jun 01 06:00 → Jun 05 18:00"
fn fmt_legs(trip: &Trip) -> String {
    let out = trip
        .outbound_flights
        .first()
        .map(|f| f.departure_date_time.format("%b %d %H:%M").to_string());
    let ret = trip
        .return_flights
        .first()
        .map(|f| f.departure_date_time.format("%b %d %H:%M").to_string());
    format!(
        "{} → {}",
        out.as_deref().unwrap_or("??"),
        ret.as_deref().unwrap_or("??")
    )
}

fn fmt_days(trip: &Trip) -> String {
    match trip.duration_days() {
        Some(1) => "1 day".to_string(),
        Some(days) => format!("{} days", days),
        None => "?".to_string(),
    }
}

fn get_terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(100)
}

fn dash_bar() -> String {
    "-".repeat(get_terminal_width().min(100))
}

/// Render the filtered trips to stdout
fn render_results(trips: &[Trip], favorites: Option<&FavoritesCollection>) {
    let directions = distinct_directions(trips);
    println!("📍 Directions: {}", directions.join(", "));

    let best_price = trips
        .iter()
        .map(|t| t.total_price)
        .fold(f64::INFINITY, f64::min);
    if best_price.is_finite() {
        println!("💰 Best Price:  €{:.2}", best_price);
    }
    println!("📊 Trips: {}\n", trips.len());

    let mut direction_width = 9;
    let mut legs_width = 13;
    for trip in trips {
        direction_width = max(
            direction_width,
            trip.outbound_direction().unwrap_or("??").len(),
        );
        legs_width = max(legs_width, fmt_legs(trip).len());
    }
    direction_width = direction_width.min(get_terminal_width().saturating_sub(50).max(9));

    println!("{}", dash_bar());
    println!(
        "  {:>4}  {:<dw$}  {:<lw$}  {:<8}  {:>9}",
        "#",
        "DIRECTION",
        "OUT → RETURN",
        "DAYS",
        "PRICE",
        dw = direction_width,
        lw = legs_width,
    );
    println!("{}", dash_bar());

    for (i, trip) in trips.iter().enumerate() {
        let mut direction = trip.outbound_direction().unwrap_or("??").to_string();
        if direction.chars().count() > direction_width {
            direction = direction.chars().take(direction_width).collect();
        }
        let anomaly = if is_anomalous_duration(trip.duration_days()) {
            " ⚠️"
        } else {
            ""
        };
        let heart = match favorites {
            Some(favorites) if favorites.contains(trip) => " ♥",
            _ => "",
        };
        println!(
            "  {:>4}  {:<dw$}  {:<lw$}  {:<8}  {:>8.2}€{}{}",
            i + 1,
            direction,
            fmt_legs(trip),
            fmt_days(trip),
            trip.total_price,
            anomaly,
            heart,
            dw = direction_width,
            lw = legs_width,
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    setup_logging(args.verbose);

    tracing::info!("Starting farescan-flights CLI");
    tracing::debug!("Args: {:?}", args);

    let window = pick_window(&args.start, args.end.as_deref())?;
    if args.show_window {
        println!("Availability window:");
        for mark in window.marks() {
            let tag = match (mark.starting_day, mark.ending_day) {
                (true, true) => "start+end",
                (true, false) => "start",
                (false, true) => "end",
                (false, false) => "",
            };
            println!("  {}  {}", mark.date, tag);
        }
    }

    let departure_airports = parse_codes(&args.from)?;

    let client = ScanClient::new(
        ScanClientConfig::new(args.api_key.clone())
            .with_airports_url(args.airports_url.clone())
            .with_scan_url(args.scan_url.clone()),
    )?;

    // Destination scoping: explicit codes, or everything reachable from the
    // chosen departures per the connectivity graph
    let destination_airports = match args.to.as_deref() {
        Some(to) => parse_codes(to)?,
        None => {
            let graph = client
                .fetch_connectivity()
                .await
                .context("Cannot fetch airports data")?;
            let destinations =
                resolve_destinations(&departure_airports, &graph, &DEFAULT_DIRECTORY);
            if destinations.is_empty() {
                bail!(
                    "No destinations reachable from {}; pass --to explicitly",
                    departure_airports.join(",")
                );
            }
            tracing::info!("Resolved {} reachable destination(s)", destinations.len());
            destinations.into_iter().map(|a| a.code).collect()
        }
    };

    let input = SearchInput {
        min_days: args.min_days.clone(),
        max_days: args.max_days.clone(),
        availability_start: fmt_date(window.start),
        availability_end: fmt_date(window.end),
        departure_airports,
        destination_airports,
    };
    let today = chrono::Local::now().date_naive();
    let criteria = input.validate(today).context("Cannot scan")?;

    let trips = client.scan(&criteria).await.context("Cannot scan")?;
    if trips.is_empty() {
        println!("No flights found for the given criteria.");
        return Ok(());
    }

    // Result filtering mirrors the result screen: start from the observed
    // price range, then narrow by the requested direction/prices
    let mut filter = FilterState::from_trips(&trips).with_direction(args.direction.clone());
    if let Some(min_price) = args.min_price {
        filter.min_price = min_price;
    }
    if let Some(max_price) = args.max_price {
        filter.max_price = max_price;
    }
    let filtered = apply_filter(&trips, &filter);
    tracing::info!("{} of {} trip(s) pass the filter", filtered.len(), trips.len());

    let session = args
        .user
        .as_ref()
        .map(|user| farescan_deal_agent::UserSession::new(user.clone(), user.clone()));
    let store = FavoritesStore::new(JsonStore::new(args.data_dir.clone()));

    let mut favorites = None;
    if let Some(session) = &session {
        let mut loaded = store
            .load(session)
            .await
            .context("Cannot load favorites")?;

        if let Some(rank) = args.favorite {
            let trip = filtered
                .get(rank.wrapping_sub(1))
                .with_context(|| format!("No trip at rank {} to favorite", rank))?;
            let updated = loaded.added(trip);
            if updated.len() > loaded.len() {
                store
                    .save(session, &updated)
                    .await
                    .context("Cannot save favorites")?;
                println!("Saved trip #{} to favorites ({} total)", rank, updated.len());
            } else {
                println!("Trip #{} is already a favorite", rank);
            }
            loaded = updated;
        }
        favorites = Some(loaded);
    } else if args.favorite.is_some() {
        bail!("--favorite requires --user");
    }

    render_results(&filtered, favorites.as_ref());
    Ok(())
}
