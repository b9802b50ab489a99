use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Flight status vocabulary. Advisory only (display coloring) - control flow
/// never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum FlightStatus {
    Scheduled,
    Boarding,
    Delayed,
    OnTime,
    Active,
    Landed,
    Cancelled,
    Unknown,
}

impl FlightStatus {
    /// Map an upstream status string; anything unrecognized becomes Unknown.
    pub fn parse(s: &str) -> Self {
        match s {
            "scheduled" => FlightStatus::Scheduled,
            "boarding" => FlightStatus::Boarding,
            "delayed" => FlightStatus::Delayed,
            "on-time" => FlightStatus::OnTime,
            "active" => FlightStatus::Active,
            "landed" => FlightStatus::Landed,
            "cancelled" => FlightStatus::Cancelled,
            _ => FlightStatus::Unknown,
        }
    }

    /// Status for a generated flight, derived from its delay.
    pub fn from_delay(delay_minutes: u32) -> Self {
        if delay_minutes > 15 {
            FlightStatus::Delayed
        } else if delay_minutes > 5 {
            FlightStatus::Boarding
        } else {
            FlightStatus::OnTime
        }
    }
}

/// One observed or generated flight instance.
///
/// `flight_id` is unique within a refresh cycle but not globally (generated
/// flight numbers may repeat). Times are wall-clock display values ("HH:MM",
/// or "N/A" when the upstream field was missing); actual times are only
/// present on live records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FlightRecord {
    pub flight_id: String,
    pub airline_code: String,
    pub airline_name: String,
    pub origin: String,
    pub destination: String,
    pub origin_city: String,
    pub destination_city: String,
    pub scheduled_dep: String,
    pub scheduled_arr: String,
    pub actual_dep: Option<String>,
    pub actual_arr: Option<String>,
    pub status: FlightStatus,
    pub aircraft: String,
    /// Departure delay in whole minutes, never negative.
    pub delay: u32,
    pub gate: Option<String>,
    pub terminal: Option<String>,
    /// True for API-sourced records, false for generated ones. Homogeneous
    /// across any one cache snapshot.
    pub is_live: bool,
    /// Display label like "Mumbai → Delhi".
    pub route: String,
}
