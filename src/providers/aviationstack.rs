/// AviationStack API client
///
/// Fetches real-time flight data for a single departure airport. The free
/// tier is tightly quota-limited, so the client is only invoked through the
/// flight cache, which enforces the daily call budget and falls back to
/// generated data when this API yields nothing.
///
/// ## Endpoint
/// `http://api.aviationstack.com/v1/flights`
///
/// ## Key parameters
/// - `access_key` - API credential
/// - `dep_iata` - departure airport IATA code
/// - `limit` - maximum number of results
///
/// Responses carry a `data` array of flight objects with nested `departure`,
/// `arrival`, `airline`, `flight` and `aircraft` blocks; timestamps are
/// ISO 8601 with an offset.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const AVIATIONSTACK_BASE_URL: &str = "http://api.aviationstack.com/v1/flights";

#[derive(Debug, Error)]
pub enum AviationError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// HTTP client for the AviationStack flights endpoint.
pub struct AviationstackClient {
    client: Client,
    api_key: String,
}

impl AviationstackClient {
    pub fn new(api_key: String) -> Result<Self, AviationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AviationError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, api_key })
    }

    /// Fetch flights departing `dep_iata`, bounded by `limit`.
    ///
    /// Single attempt, no retries: a failure here makes the current refresh
    /// cycle fall back to generated data, and the condition self-heals on
    /// the next cycle.
    pub async fn fetch_departures(
        &self,
        dep_iata: &str,
        limit: u32,
    ) -> Result<FlightsResponse, AviationError> {
        let url = format!(
            "{}?access_key={}&dep_iata={}&limit={}",
            AVIATIONSTACK_BASE_URL,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(dep_iata),
            limit
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AviationError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AviationError::Api(format!("HTTP error: {}", status.as_u16())));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AviationError::Network(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(
                "Failed to parse AviationStack response for {}: {} - body: {}",
                dep_iata,
                e,
                &body[..body.len().min(500)]
            );
            AviationError::Parse(e.to_string())
        })
    }
}

// Response structures

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightsResponse {
    #[serde(default)]
    pub data: Vec<ApiFlight>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiFlight {
    pub flight_date: Option<String>,
    pub flight_status: Option<String>,
    pub departure: Option<ApiStop>,
    pub arrival: Option<ApiStop>,
    pub airline: Option<ApiAirline>,
    pub flight: Option<ApiFlightIdent>,
    pub aircraft: Option<ApiAircraft>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiStop {
    pub airport: Option<String>,
    pub iata: Option<String>,
    pub icao: Option<String>,
    pub terminal: Option<String>,
    pub gate: Option<String>,
    pub delay: Option<i64>,
    pub scheduled: Option<String>,
    pub estimated: Option<String>,
    pub actual: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiAirline {
    pub name: Option<String>,
    pub iata: Option<String>,
    pub icao: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiFlightIdent {
    pub number: Option<String>,
    pub iata: Option<String>,
    pub icao: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiAircraft {
    pub registration: Option<String>,
    pub iata: Option<String>,
}

impl ApiFlight {
    /// Departure airport IATA code
    pub fn dep_iata(&self) -> Option<&str> {
        self.departure.as_ref()?.iata.as_deref()
    }

    /// Arrival airport IATA code
    pub fn arr_iata(&self) -> Option<&str> {
        self.arrival.as_ref()?.iata.as_deref()
    }

    /// Flight designator (e.g., "6E1234"), falling back to the bare number
    pub fn flight_id(&self) -> Option<&str> {
        let flight = self.flight.as_ref()?;
        flight.iata.as_deref().or(flight.number.as_deref())
    }

    /// Carrier IATA code
    pub fn airline_iata(&self) -> Option<&str> {
        self.airline.as_ref()?.iata.as_deref()
    }

    /// Carrier name as supplied by the API
    pub fn airline_name(&self) -> Option<&str> {
        self.airline.as_ref()?.name.as_deref()
    }

    /// Aircraft registration (e.g., "VT-ABC")
    pub fn registration(&self) -> Option<&str> {
        self.aircraft.as_ref()?.registration.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flight_payload() {
        let body = r#"{
            "data": [{
                "flight_date": "2026-08-06",
                "flight_status": "active",
                "departure": {
                    "airport": "Chhatrapati Shivaji International",
                    "iata": "BOM",
                    "scheduled": "2026-08-06T08:30:00+00:00",
                    "actual": "2026-08-06T08:42:00+00:00",
                    "gate": "14",
                    "terminal": "2"
                },
                "arrival": {"airport": "Indira Gandhi International", "iata": "DEL"},
                "airline": {"name": "IndiGo", "iata": "6E"},
                "flight": {"number": "1234", "iata": "6E1234"},
                "aircraft": {"registration": "VT-ABC"}
            }]
        }"#;

        let response: FlightsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.data.len(), 1);
        let flight = &response.data[0];
        assert_eq!(flight.dep_iata(), Some("BOM"));
        assert_eq!(flight.arr_iata(), Some("DEL"));
        assert_eq!(flight.flight_id(), Some("6E1234"));
        assert_eq!(flight.airline_iata(), Some("6E"));
        assert_eq!(flight.registration(), Some("VT-ABC"));
    }

    #[test]
    fn tolerates_missing_blocks() {
        let response: FlightsResponse = serde_json::from_str(r#"{"data": [{}]}"#).unwrap();
        let flight = &response.data[0];
        assert_eq!(flight.dep_iata(), None);
        assert_eq!(flight.flight_id(), None);

        let empty: FlightsResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.data.is_empty());
    }

    #[test]
    fn flight_id_falls_back_to_number() {
        let response: FlightsResponse =
            serde_json::from_str(r#"{"data": [{"flight": {"number": "421"}}]}"#).unwrap();
        assert_eq!(response.data[0].flight_id(), Some("421"));
    }
}
