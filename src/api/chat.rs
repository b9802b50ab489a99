use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::{IntoParams, ToSchema};

use crate::api::{default_destination, default_origin, AppState, ErrorResponse};
use crate::models::FlightRecord;
use crate::providers::openrouter::ChatError;

const SYSTEM_PROMPT: &str = "You are a helpful flight information assistant. \
Provide concise, practical answers about flight delays and scheduling. \
Keep responses under 100 words.";

#[derive(Debug, Deserialize, IntoParams)]
pub struct AskQuery {
    /// Natural-language question about the selected route
    #[serde(default)]
    pub query: String,
    #[serde(default = "default_origin")]
    pub origin: String,
    #[serde(default = "default_destination")]
    pub destination: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AskResponse {
    pub ok: bool,
    pub answer: String,
}

/// Answer a question about the selected route's flight data.
#[utoipa::path(
    get,
    path = "/qa",
    params(AskQuery),
    responses(
        (status = 200, description = "Assistant answer, or an error envelope when the model call fails", body = AskResponse)
    ),
    tag = "chat"
)]
pub async fn ask(State(state): State<AppState>, Query(query): Query<AskQuery>) -> Response {
    let Some(chat) = &state.chat else {
        return Json(AskResponse {
            ok: true,
            answer: "AI chat is not configured. Set OPENROUTER_API_KEY to enable it.".to_string(),
        })
        .into_response();
    };

    let flights = state.cache.get_flight_data().await;
    let route_flights: Vec<&FlightRecord> = flights
        .iter()
        .filter(|f| f.origin == query.origin && f.destination == query.destination)
        .collect();

    if route_flights.is_empty() {
        return Json(AskResponse {
            ok: true,
            answer: format!(
                "No flight data available for the {} to {} route. Try selecting a different route.",
                query.origin, query.destination
            ),
        })
        .into_response();
    }

    let user_prompt = build_prompt(&route_flights, &query);

    match chat.complete(SYSTEM_PROMPT, &user_prompt).await {
        Ok(answer) => Json(AskResponse { ok: true, answer }).into_response(),
        Err(ChatError::MissingContent) => Json(AskResponse {
            ok: true,
            answer: "Sorry, I could not process your question.".to_string(),
        })
        .into_response(),
        Err(e) => {
            warn!(error = %e, "Q&A completion failed");
            Json(ErrorResponse::new("AI service temporarily unavailable")).into_response()
        }
    }
}

/// Compact route statistics handed to the model alongside the question.
fn build_prompt(route_flights: &[&FlightRecord], query: &AskQuery) -> String {
    let total = route_flights.len();
    let avg_delay =
        route_flights.iter().map(|f| f.delay as f64).sum::<f64>() / total as f64;
    let on_time = route_flights.iter().filter(|f| f.delay <= 5).count();

    format!(
        "Route: {} → {}\n\
         Total flights: {}\n\
         Average delay: {:.1} minutes\n\
         On-time flights: {}\n\
         Delayed flights: {}\n\
         \n\
         Question: {}",
        query.origin,
        query.destination,
        total,
        avg_delay,
        on_time,
        total - on_time,
        query.query
    )
}
