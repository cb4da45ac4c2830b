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

//! CLI for managing saved favorite trips.

use anyhow::{Context, Result, bail};
use clap::Parser;
use farescan_deal_agent::{FavoritesStore, JsonStore, Trip, UserSession, is_anomalous_duration};

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "farescan-favorites")]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// User id whose favorites to manage
    #[arg(short, long)]
    user: String,

    /// Remove the favorite at this rank (1-based) instead of listing
    #[arg(long)]
    remove: Option<usize>,

    /// Clear all favorites for the user instead of listing
    #[arg(long, default_value = "false")]
    clear: bool,

    /// Directory for per-user state
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

fn fmt_leg(trip: &Trip, outbound: bool) -> String {
    let leg = if outbound {
        trip.outbound_flights.first()
    } else {
        trip.return_flights.first()
    };
    match leg {
        Some(flight) => format!(
            "{} on {}",
            flight.direction,
            flight.departure_date_time.format("%b %d, %Y %H:%M")
        ),
        None => "missing leg".to_string(),
    }
}

fn render_favorites(trips: &[Trip]) {
    if trips.is_empty() {
        println!("No favorite trips saved.");
        return;
    }
    for (i, trip) in trips.iter().enumerate() {
        let anomaly = if is_anomalous_duration(trip.duration_days()) {
            " ⚠️"
        } else {
            ""
        };
        println!("#{}  Total Price: {:.2}€{}", i + 1, trip.total_price, anomaly);
        println!("    Outbound: {}", fmt_leg(trip, true));
        println!("    Return:   {}", fmt_leg(trip, false));
        match trip.duration_days() {
            Some(1) => println!("    Duration: 1 day"),
            Some(days) => println!("    Duration: {} days", days),
            None => println!("    Duration: unknown"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    setup_logging(args.verbose);

    let session = UserSession::new(args.user.clone(), args.user.clone());
    let store = FavoritesStore::new(JsonStore::new(args.data_dir.clone()));

    if args.clear {
        store.clear(&session).await.context("Cannot clear favorites")?;
        println!("Cleared favorites for {}", session.user_id);
        return Ok(());
    }

    let favorites = store.load(&session).await.context("Cannot load favorites")?;

    if let Some(rank) = args.remove {
        let Some(trip) = favorites.trips().get(rank.wrapping_sub(1)) else {
            bail!(
                "No favorite at rank {} ({} saved)",
                rank,
                favorites.len()
            );
        };
        let updated = favorites.removed(trip);
        store
            .save(&session, &updated)
            .await
            .context("Cannot save favorites")?;
        println!("Removed favorite #{} ({} remaining)", rank, updated.len());
        render_favorites(updated.trips());
        return Ok(());
    }

    render_favorites(favorites.trips());
    Ok(())
}
