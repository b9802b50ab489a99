use axum::{
    extract::{Query, State},
    Json,
};

use crate::api::{AppState, RouteQuery};
use crate::services::metrics::{compute_metrics, RouteMetrics};

/// Aggregate delay metrics for one route.
#[utoipa::path(
    get,
    path = "/metrics",
    params(RouteQuery),
    responses(
        (status = 200, description = "Summary cards, hourly delay series and airline averages", body = RouteMetrics)
    ),
    tag = "metrics"
)]
pub async fn route_metrics(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Json<RouteMetrics> {
    let flights = state.cache.get_flight_data().await;
    Json(compute_metrics(&flights, &query.origin, &query.destination))
}
