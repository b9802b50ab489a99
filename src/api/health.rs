use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub ok: bool,
    pub status: String,
    /// Number of flights in the current cache snapshot
    pub flights_count: usize,
    /// Attempted (and not known-failed) AviationStack calls today
    pub api_calls_today: u32,
    /// Minutes since the last successful refresh, 0 if never populated
    pub cache_age_minutes: i64,
    /// Whether the current snapshot came from the live API
    pub using_live_data: bool,
    /// RFC 3339 timestamp of the last successful refresh, if any
    pub last_updated: Option<String>,
}

/// Service health and cache freshness.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health status", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = state.cache.status().await;

    Json(HealthResponse {
        ok: true,
        status: "healthy".to_string(),
        flights_count: status.flights_count,
        api_calls_today: status.api_calls_today,
        cache_age_minutes: status.cache_age_minutes,
        using_live_data: status.using_live_data,
        last_updated: status.last_updated.map(|t| t.to_rfc3339()),
    })
}
