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

//! # Scan API Client
//!
//! Effectful (network) operations against the flight-scan API: the
//! per-session airports feed and the scan submission itself.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::airport_graph::ConnectivityGraph;
use crate::scan_criteria::SearchCriteria;
use crate::scan_results::{ScanResponse, Trip};

pub const DEFAULT_AIRPORTS_URL: &str = "https://api.farescan.dev/prod/airports/merged";
pub const DEFAULT_SCAN_URL: &str = "https://api.farescan.dev/prod/scan";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Error body shape of the scan API; the server message, when present,
/// becomes the surfaced error text.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// Configuration for the scan API client.
#[derive(Debug, Clone)]
pub struct ScanClientConfig {
    pub airports_url: String,
    pub scan_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl ScanClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            airports_url: DEFAULT_AIRPORTS_URL.to_string(),
            scan_url: DEFAULT_SCAN_URL.to_string(),
            api_key: api_key.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_airports_url(mut self, url: impl Into<String>) -> Self {
        self.airports_url = url.into();
        self
    }

    pub fn with_scan_url(mut self, url: impl Into<String>) -> Self {
        self.scan_url = url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP client for the scan API. Requests are awaited sequentially by the
/// caller; the client itself keeps no retry queue.
#[derive(Clone)]
pub struct ScanClient {
    client: Arc<wreq::Client>,
    config: ScanClientConfig,
}

impl ScanClient {
    pub fn new(config: ScanClientConfig) -> Result<Self> {
        let client = wreq::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client: Arc::new(client),
            config,
        })
    }

    /// Fetch the connectivity graph, done once at session start.
    pub async fn fetch_connectivity(&self) -> Result<ConnectivityGraph> {
        let fetch_start = std::time::Instant::now();
        tracing::debug!("Fetching airports feed from {}", self.config.airports_url);

        let response = self
            .client
            .get(&self.config.airports_url)
            .header("x-api-key", &self.config.api_key)
            .send()
            .await
            .context("Airports feed request failed")?;

        let status = response.status();
        let body = response.text().await.context("Read airports feed body")?;
        if !status.is_success() {
            bail!("{}", surface_error(status.as_u16(), &body));
        }

        let graph: ConnectivityGraph =
            serde_json::from_str(&body).context("Malformed airports feed body")?;
        tracing::info!(
            "Airports feed: {} airports in {:?}",
            graph.len(),
            fetch_start.elapsed()
        );
        Ok(graph)
    }

    /// Submit a validated scan request and return the trips found.
    ///
    /// An empty or absent trips array is "no results", not an error.
    pub async fn scan(&self, criteria: &SearchCriteria) -> Result<Vec<Trip>> {
        let scan_start = std::time::Instant::now();
        tracing::info!(
            "Scanning {} departure(s) -> {} destination(s), {}..{} days",
            criteria.departure_airports.len(),
            criteria.destination_airports.len(),
            criteria.min_days,
            criteria.max_days
        );

        let response = self
            .client
            .post(&self.config.scan_url)
            .header("x-api-key", &self.config.api_key)
            .json(criteria)
            .send()
            .await
            .context("Scan request failed")?;

        let status = response.status();
        let body = response.text().await.context("Read scan body")?;
        if !status.is_success() {
            bail!("{}", surface_error(status.as_u16(), &body));
        }

        let parsed: ScanResponse =
            serde_json::from_str(&body).context("Malformed scan response body")?;
        tracing::info!(
            "Scan returned {} trip(s) in {:?}",
            parsed.trips.len(),
            scan_start.elapsed()
        );
        Ok(parsed.trips)
    }
}

/// Prefer the server-provided message for a failed call, falling back to a
/// generic text carrying the status code.
fn surface_error(status: u16, body: &str) -> String {
    let server_message = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .filter(|message| !message.trim().is_empty());
    match server_message {
        Some(message) => message,
        None => format!("Request failed with HTTP {status}"),
    }
}
