pub mod flight;

use serde::Serialize;
use utoipa::ToSchema;

pub use flight::{FlightRecord, FlightStatus};

/// Simplified per-route flight view served by `GET /flights`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FlightView {
    pub flight_id: String,
    pub airline: String,
    pub route: String,
    pub scheduled_dep: String,
    pub scheduled_arr: String,
    pub aircraft: String,
    pub delay: u32,
    pub status: FlightStatus,
    pub gate: Option<String>,
    pub terminal: Option<String>,
    pub is_live: bool,
}

impl From<&FlightRecord> for FlightView {
    fn from(record: &FlightRecord) -> Self {
        let airline = if record.airline_name.is_empty() {
            record.airline_code.clone()
        } else {
            record.airline_name.clone()
        };
        Self {
            flight_id: record.flight_id.clone(),
            airline,
            route: record.route.clone(),
            scheduled_dep: record.scheduled_dep.clone(),
            scheduled_arr: record.scheduled_arr.clone(),
            aircraft: record.aircraft.clone(),
            delay: record.delay,
            status: record.status,
            gate: record.gate.clone(),
            terminal: record.terminal.clone(),
            is_live: record.is_live,
        }
    }
}
