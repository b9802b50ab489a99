use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::{AppState, ErrorResponse};
use crate::services::reschedule;

#[derive(Debug, Deserialize, IntoParams)]
pub struct RescheduleQuery {
    pub flight_id: String,
    /// Minutes to shift the departure slot; negative moves it earlier.
    #[serde(default)]
    pub minutes_shift: i32,
}

/// Simulate the congestion impact of shifting a flight's slot.
#[utoipa::path(
    post,
    path = "/reschedule",
    params(RescheduleQuery),
    responses(
        (status = 200, description = "Simulated before/after impact, or a not-found envelope", body = reschedule::RescheduleImpact)
    ),
    tag = "reschedule"
)]
pub async fn reschedule_flight(
    State(state): State<AppState>,
    Query(query): Query<RescheduleQuery>,
) -> Response {
    let flights = state.cache.get_flight_data().await;
    let mut rng = rand::rng();

    match reschedule::simulate(&mut rng, &flights, &query.flight_id, query.minutes_shift) {
        Some(impact) => Json(impact).into_response(),
        None => Json(ErrorResponse::new("Flight not found")).into_response(),
    }
}
