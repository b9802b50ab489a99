use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct RefreshResponse {
    pub ok: bool,
    pub message: String,
    pub flights_count: usize,
    pub api_calls_used: u32,
    pub using_live_data: bool,
}

/// Drop the cache and repopulate immediately, ignoring the TTL.
#[utoipa::path(
    post,
    path = "/refresh",
    responses(
        (status = 200, description = "Refresh outcome", body = RefreshResponse)
    ),
    tag = "system"
)]
pub async fn force_refresh(State(state): State<AppState>) -> Json<RefreshResponse> {
    let flights = state.cache.force_refresh().await;
    let using_live_data = flights.iter().any(|f| f.is_live);

    Json(RefreshResponse {
        ok: true,
        message: format!("Refreshed {} flights", flights.len()),
        flights_count: flights.len(),
        api_calls_used: state.cache.api_calls_today().await,
        using_live_data,
    })
}
