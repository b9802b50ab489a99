pub mod chat;
pub mod error;
pub mod flights;
pub mod health;
pub mod metrics;
pub mod refresh;
pub mod reschedule;

pub use error::ErrorResponse;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::cache::FlightCache;
use crate::providers::openrouter::OpenRouterClient;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<FlightCache>,
    /// Present only when an OpenRouter key is configured.
    pub chat: Option<Arc<OpenRouterClient>>,
}

/// Route selection shared by the flights, metrics and Q&A endpoints.
/// Defaults to the busiest corridor.
#[derive(Debug, Deserialize, IntoParams)]
pub struct RouteQuery {
    #[serde(default = "default_origin")]
    pub origin: String,
    #[serde(default = "default_destination")]
    pub destination: String,
}

pub(crate) fn default_origin() -> String {
    "BOM".to_string()
}

pub(crate) fn default_destination() -> String {
    "DEL".to_string()
}

pub fn router(cache: Arc<FlightCache>, chat: Option<Arc<OpenRouterClient>>) -> Router {
    let state = AppState { cache, chat };

    Router::new()
        .route("/health", get(health::health_check))
        .route("/flights", get(flights::list_route_flights))
        .route("/flights/all", get(flights::list_all_flights))
        .route("/metrics", get(metrics::route_metrics))
        .route("/reschedule", post(reschedule::reschedule_flight))
        .route("/qa", get(chat::ask))
        .route("/refresh", post(refresh::force_refresh))
        .with_state(state)
}
