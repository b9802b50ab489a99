use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::{AppState, RouteQuery};
use crate::models::{FlightRecord, FlightView};

/// Flights listed by `GET /flights/all` are capped to keep the payload small.
const ALL_FLIGHTS_LIMIT: usize = 50;

/// List flights for one route.
#[utoipa::path(
    get,
    path = "/flights",
    params(RouteQuery),
    responses(
        (status = 200, description = "Flights matching the route, possibly empty", body = Vec<FlightView>)
    ),
    tag = "flights"
)]
pub async fn list_route_flights(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Json<Vec<FlightView>> {
    let flights = state.cache.get_flight_data().await;
    let views = flights
        .iter()
        .filter(|f| f.origin == query.origin && f.destination == query.destination)
        .map(FlightView::from)
        .collect();
    Json(views)
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AllFlightsResponse {
    /// Total flights in the snapshot, before the listing cap
    pub total: usize,
    pub flights: Vec<FlightRecord>,
    /// Unique "ORIGIN-DEST" pairs present in the snapshot
    pub routes_available: Vec<String>,
    pub api_calls_used: u32,
    pub using_live_data: bool,
}

/// Snapshot of the whole cache across routes.
#[utoipa::path(
    get,
    path = "/flights/all",
    responses(
        (status = 200, description = "All cached flights", body = AllFlightsResponse)
    ),
    tag = "flights"
)]
pub async fn list_all_flights(State(state): State<AppState>) -> Json<AllFlightsResponse> {
    let flights = state.cache.get_flight_data().await;

    let mut routes_available: Vec<String> = Vec::new();
    for flight in &flights {
        let route = format!("{}-{}", flight.origin, flight.destination);
        if !routes_available.contains(&route) {
            routes_available.push(route);
        }
    }

    let total = flights.len();
    let using_live_data = flights.iter().any(|f| f.is_live);

    Json(AllFlightsResponse {
        total,
        flights: flights.into_iter().take(ALL_FLIGHTS_LIMIT).collect(),
        routes_available,
        api_calls_used: state.cache.api_calls_today().await,
        using_live_data,
    })
}
