//! Flight cache
//!
//! The one stateful component: holds the current flight snapshot with a TTL,
//! tracks the daily quota of AviationStack calls, and decides per refresh
//! whether to serve cached data, fetch live, or fall back to generated
//! flights. Plays the role the sync manager plays in a polling service, but
//! lazily: reads trigger the refresh, with a periodic loop as a backstop.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::config::{CacheConfig, Credentials};
use crate::models::{FlightRecord, FlightStatus};
use crate::providers::aviationstack::{ApiFlight, AviationstackClient};
use crate::reference;
use crate::services::generator;

/// Mutable cache state. The flight list is only ever replaced wholesale.
struct CacheState {
    flights: Vec<FlightRecord>,
    fetched_at: Option<DateTime<Utc>>,
    api_calls_today: u32,
    last_reset_date: NaiveDate,
}

/// Outcome of a live fetch attempt. `Unavailable` is ordinary control flow,
/// not an error: the refresh falls through to the generator.
enum LiveFetch {
    Fetched(Vec<FlightRecord>),
    Unavailable(&'static str),
}

/// Cache health snapshot served by `/health`.
#[derive(Debug, Clone)]
pub struct CacheStatus {
    pub flights_count: usize,
    pub api_calls_today: u32,
    pub cache_age_minutes: i64,
    pub using_live_data: bool,
    pub last_updated: Option<DateTime<Utc>>,
}

/// TTL cache over the current flight set.
///
/// Every refresh is entirely live or entirely generated, never mixed.
/// `get_flight_data` never fails: all upstream failure paths degrade to
/// generated flights.
pub struct FlightCache {
    state: RwLock<CacheState>,
    /// Serializes the staleness-check-and-replace sequence so concurrent
    /// stale reads trigger at most one in-flight refresh.
    refresh_lock: Mutex<()>,
    client: Option<AviationstackClient>,
    config: CacheConfig,
}

impl FlightCache {
    pub fn new(config: CacheConfig, credentials: &Credentials) -> Self {
        let client = credentials
            .aviationstack_api_key
            .clone()
            .and_then(|key| match AviationstackClient::new(key) {
                Ok(client) => Some(client),
                Err(e) => {
                    warn!(error = %e, "Failed to build AviationStack client, live data disabled");
                    None
                }
            });
        if client.is_none() {
            info!("No AviationStack API key configured, serving generated flights");
        }

        Self {
            state: RwLock::new(CacheState {
                flights: Vec::new(),
                fetched_at: None,
                api_calls_today: 0,
                last_reset_date: Utc::now().date_naive(),
            }),
            refresh_lock: Mutex::new(()),
            client,
            config,
        }
    }

    /// Current flight snapshot, refreshing first when the cache is stale.
    pub async fn get_flight_data(&self) -> Vec<FlightRecord> {
        {
            let state = self.state.read().await;
            if self.is_fresh(&state) {
                return state.flights.clone();
            }
        }

        // Whoever wins the lock refreshes; later arrivals see fresh data on
        // the re-check and return without a second upstream call.
        let _guard = self.refresh_lock.lock().await;
        {
            let state = self.state.read().await;
            if self.is_fresh(&state) {
                return state.flights.clone();
            }
        }

        self.refresh().await
    }

    /// Discard the current snapshot and repopulate, ignoring the TTL.
    /// Blocks until the refresh (including any upstream call) completes.
    pub async fn force_refresh(&self) -> Vec<FlightRecord> {
        {
            let mut state = self.state.write().await;
            state.fetched_at = None;
        }

        let _guard = self.refresh_lock.lock().await;
        {
            let state = self.state.read().await;
            if self.is_fresh(&state) {
                return state.flights.clone();
            }
        }

        self.refresh().await
    }

    /// Cache health snapshot for `/health` and `/flights/all`.
    pub async fn status(&self) -> CacheStatus {
        let state = self.state.read().await;
        CacheStatus {
            flights_count: state.flights.len(),
            api_calls_today: state.api_calls_today,
            cache_age_minutes: state
                .fetched_at
                .map(|at| (Utc::now() - at).num_minutes())
                .unwrap_or(0),
            using_live_data: state.flights.iter().any(|f| f.is_live),
            last_updated: state.fetched_at,
        }
    }

    pub async fn api_calls_today(&self) -> u32 {
        self.state.read().await.api_calls_today
    }

    /// Periodic background refresh, independent of read traffic. Runs the
    /// same logic as the lazy path, so a fresh cache makes a tick a no-op.
    pub async fn run_refresh_loop(self: Arc<Self>) {
        let period = tokio::time::Duration::from_secs(self.config.refresh_interval_minutes * 60);
        let mut interval = tokio::time::interval(period);
        // Skip the first tick which fires immediately (initial population
        // happens at startup).
        interval.tick().await;

        loop {
            interval.tick().await;
            info!("Scheduled refresh");
            let _ = self.get_flight_data().await;
        }
    }

    fn is_fresh(&self, state: &CacheState) -> bool {
        match state.fetched_at {
            Some(at) => {
                Utc::now() - at < Duration::minutes(self.config.ttl_minutes as i64)
                    && !state.flights.is_empty()
            }
            None => false,
        }
    }

    /// Replace the flight set: live data when possible, generated otherwise.
    /// Must be called with the refresh lock held.
    async fn refresh(&self) -> Vec<FlightRecord> {
        info!("Refreshing flight data");

        let flights = match self.fetch_live().await {
            LiveFetch::Fetched(flights) => {
                info!(count = flights.len(), "Adopted live flight data");
                flights
            }
            LiveFetch::Unavailable(reason) => {
                info!(reason, "Live data unavailable, generating flights for popular routes");
                let mut rng = rand::rng();
                let mut flights = Vec::new();
                for &(origin, destination) in reference::POPULAR_ROUTES {
                    flights.extend(generator::generate_flights(&mut rng, origin, destination));
                }
                flights
            }
        };

        let mut state = self.state.write().await;
        state.flights = flights.clone();
        state.fetched_at = Some(Utc::now());
        flights
    }

    /// Attempt a live fetch, honoring the daily call budget.
    async fn fetch_live(&self) -> LiveFetch {
        // Roll the quota counter over on a new calendar day, then gate on
        // the daily limit before anything touches the network.
        {
            let mut state = self.state.write().await;
            let today = Utc::now().date_naive();
            if state.last_reset_date != today {
                state.api_calls_today = 0;
                state.last_reset_date = today;
            }
            if state.api_calls_today >= self.config.daily_api_limit {
                return LiveFetch::Unavailable("daily API limit reached");
            }
        }

        let Some(client) = &self.client else {
            return LiveFetch::Unavailable("no API key configured");
        };

        // Count the attempt immediately before the call; failures are
        // refunded below so they never eat into the budget.
        let call_number = {
            let mut state = self.state.write().await;
            state.api_calls_today += 1;
            state.api_calls_today
        };

        info!(
            call_number,
            airport = %self.config.fetch_airport,
            "Fetching live flights"
        );

        match client
            .fetch_departures(&self.config.fetch_airport, self.config.fetch_limit)
            .await
        {
            Ok(response) => {
                let flights: Vec<FlightRecord> =
                    response.data.iter().filter_map(map_live_flight).collect();
                if flights.is_empty() {
                    LiveFetch::Unavailable("no flights for tracked airports in API response")
                } else {
                    info!(count = flights.len(), "Got live flights from API");
                    LiveFetch::Fetched(flights)
                }
            }
            Err(e) => {
                warn!(error = %e, "AviationStack fetch failed");
                let mut state = self.state.write().await;
                state.api_calls_today = state.api_calls_today.saturating_sub(1);
                LiveFetch::Unavailable("API fetch failed")
            }
        }
    }
}

/// Map one upstream record into a `FlightRecord`. Flights touching airports
/// outside the tracked set, or with no usable designator, are dropped.
fn map_live_flight(api: &ApiFlight) -> Option<FlightRecord> {
    let origin = api.dep_iata()?;
    let destination = api.arr_iata()?;
    reference::airport(origin)?;
    reference::airport(destination)?;

    let flight_id = api.flight_id()?.to_string();
    let departure = api.departure.as_ref()?;
    let arrival = api.arrival.as_ref()?;

    let airline_code = api.airline_iata().unwrap_or("").to_string();
    let airline_name = reference::airline_name(&airline_code)
        .map(str::to_string)
        .or_else(|| api.airline_name().map(str::to_string))
        .unwrap_or_else(|| airline_code.clone());

    let delay = delay_minutes(departure.scheduled.as_deref(), departure.actual.as_deref());

    Some(FlightRecord {
        flight_id,
        airline_code,
        airline_name,
        origin: origin.to_string(),
        destination: destination.to_string(),
        origin_city: reference::city_or_code(origin).to_string(),
        destination_city: reference::city_or_code(destination).to_string(),
        scheduled_dep: display_time(departure.scheduled.as_deref()),
        scheduled_arr: display_time(arrival.scheduled.as_deref()),
        actual_dep: opt_display_time(departure.actual.as_deref()),
        actual_arr: opt_display_time(arrival.actual.as_deref()),
        status: FlightStatus::parse(api.flight_status.as_deref().unwrap_or("")),
        aircraft: api.registration().unwrap_or("Unknown").to_string(),
        delay,
        gate: departure.gate.clone(),
        terminal: departure.terminal.clone(),
        is_live: true,
        route: reference::route_label(origin, destination),
    })
}

/// Departure delay in whole minutes: `max(0, actual - scheduled)`, or 0 when
/// either timestamp is missing or unparseable.
fn delay_minutes(scheduled: Option<&str>, actual: Option<&str>) -> u32 {
    match (
        scheduled.and_then(parse_timestamp),
        actual.and_then(parse_timestamp),
    ) {
        (Some(scheduled), Some(actual)) => (actual - scheduled).num_minutes().max(0) as u32,
        _ => 0,
    }
}

/// Wall-clock "HH:MM" from an upstream ISO 8601 timestamp, "N/A" when absent.
fn display_time(timestamp: Option<&str>) -> String {
    opt_display_time(timestamp).unwrap_or_else(|| "N/A".to_string())
}

fn opt_display_time(timestamp: Option<&str>) -> Option<String> {
    timestamp
        .and_then(parse_timestamp)
        .map(|t| t.format("%H:%M").to_string())
}

/// Parse an upstream timestamp, keeping the wall-clock time it states.
fn parse_timestamp(s: &str) -> Option<chrono::NaiveDateTime> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.naive_local());
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

#[cfg(test)]
impl FlightCache {
    /// Seed quota state directly; tests only.
    async fn seed_quota(&self, api_calls_today: u32, last_reset_date: NaiveDate) {
        let mut state = self.state.write().await;
        state.api_calls_today = api_calls_today;
        state.last_reset_date = last_reset_date;
    }
}
