//! Route metrics aggregation
//!
//! Pure derivations over the cached flight list: summary cards, the hourly
//! delay series and per-airline averages for one origin/destination pair.

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::FlightRecord;

/// Delays at or under this many minutes count as on time.
const ON_TIME_THRESHOLD_MINUTES: u32 = 5;

/// Summary card values for a route.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MetricsCards {
    pub total_flights: usize,
    pub avg_delay: u32,
    pub pct_on_time: u32,
}

/// Average delay for one departure hour.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HourlyDelay {
    pub hour: u32,
    pub avg_delay: f64,
}

/// Average delay for one carrier.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AirlineDelay {
    pub airline: String,
    pub avg_delay: u32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RouteMetrics {
    pub origin: String,
    pub destination: String,
    pub cards: MetricsCards,
    pub delay_series: Vec<HourlyDelay>,
    pub airline_delays: Vec<AirlineDelay>,
}

/// Derive per-route statistics from a flat flight list.
///
/// The filter is an exact, case-sensitive match on both airport codes. An
/// empty filtered set yields a zero-valued result rather than an error. The
/// hourly series is sparse: hours with no flights are omitted, and entries
/// are ascending by hour. Flights whose departure time cannot be parsed stay
/// out of the series but still count toward the cards.
pub fn compute_metrics(flights: &[FlightRecord], origin: &str, destination: &str) -> RouteMetrics {
    let route_flights: Vec<&FlightRecord> = flights
        .iter()
        .filter(|f| f.origin == origin && f.destination == destination)
        .collect();

    if route_flights.is_empty() {
        return RouteMetrics {
            origin: origin.to_string(),
            destination: destination.to_string(),
            cards: MetricsCards {
                total_flights: 0,
                avg_delay: 0,
                pct_on_time: 0,
            },
            delay_series: Vec::new(),
            airline_delays: Vec::new(),
        };
    }

    let total = route_flights.len();
    let delays: Vec<u32> = route_flights.iter().map(|f| f.delay).collect();
    let avg_delay = mean(&delays).round() as u32;
    let on_time = delays
        .iter()
        .filter(|&&d| d <= ON_TIME_THRESHOLD_MINUTES)
        .count();
    let pct_on_time = (on_time as f64 / total as f64 * 100.0).round() as u32;

    let mut by_hour: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
    for flight in &route_flights {
        if let Some(hour) = departure_hour(&flight.scheduled_dep) {
            by_hour.entry(hour).or_default().push(flight.delay);
        }
    }
    let delay_series = by_hour
        .into_iter()
        .map(|(hour, delays)| HourlyDelay {
            hour,
            avg_delay: round1(mean(&delays)),
        })
        .collect();

    // First-seen grouping order; the display layer sorts for ranking.
    let mut airline_order: Vec<&str> = Vec::new();
    let mut by_airline: BTreeMap<&str, Vec<u32>> = BTreeMap::new();
    for flight in &route_flights {
        let airline = if flight.airline_name.is_empty() {
            "Unknown"
        } else {
            flight.airline_name.as_str()
        };
        if !by_airline.contains_key(airline) {
            airline_order.push(airline);
        }
        by_airline.entry(airline).or_default().push(flight.delay);
    }
    let airline_delays = airline_order
        .into_iter()
        .map(|airline| AirlineDelay {
            airline: airline.to_string(),
            avg_delay: mean(&by_airline[airline]).round() as u32,
        })
        .collect();

    RouteMetrics {
        origin: origin.to_string(),
        destination: destination.to_string(),
        cards: MetricsCards {
            total_flights: total,
            avg_delay,
            pct_on_time,
        },
        delay_series,
        airline_delays,
    }
}

/// Integer hour from the leading `HH` token of a display time, if it parses.
fn departure_hour(scheduled_dep: &str) -> Option<u32> {
    if scheduled_dep == "N/A" {
        return None;
    }
    scheduled_dep.split(':').next()?.parse().ok()
}

fn mean(values: &[u32]) -> f64 {
    values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FlightStatus;

    fn flight(
        origin: &str,
        destination: &str,
        scheduled_dep: &str,
        airline_name: &str,
        delay: u32,
    ) -> FlightRecord {
        FlightRecord {
            flight_id: format!("6E{}", delay),
            airline_code: "6E".to_string(),
            airline_name: airline_name.to_string(),
            origin: origin.to_string(),
            destination: destination.to_string(),
            origin_city: origin.to_string(),
            destination_city: destination.to_string(),
            scheduled_dep: scheduled_dep.to_string(),
            scheduled_arr: "12:00".to_string(),
            actual_dep: None,
            actual_arr: None,
            status: FlightStatus::from_delay(delay),
            aircraft: "VT-ABC".to_string(),
            delay,
            gate: None,
            terminal: None,
            is_live: false,
            route: format!("{} → {}", origin, destination),
        }
    }

    #[test]
    fn counts_only_exact_route_matches() {
        let flights = vec![
            flight("BOM", "DEL", "08:00", "IndiGo", 0),
            flight("BOM", "BLR", "09:00", "IndiGo", 10),
            flight("DEL", "BOM", "10:00", "IndiGo", 20),
        ];
        let metrics = compute_metrics(&flights, "BOM", "DEL");
        assert_eq!(metrics.cards.total_flights, 1);
        assert_eq!(metrics.origin, "BOM");
        assert_eq!(metrics.destination, "DEL");
    }

    #[test]
    fn bom_del_scenario() {
        let flights = vec![
            flight("BOM", "DEL", "08:00", "IndiGo", 0),
            flight("BOM", "DEL", "09:00", "Air India", 10),
            flight("BOM", "DEL", "10:00", "SpiceJet", 20),
        ];
        let metrics = compute_metrics(&flights, "BOM", "DEL");
        assert_eq!(metrics.cards.total_flights, 3);
        assert_eq!(metrics.cards.avg_delay, 10);
        // 1 of 3 flights within the 5 minute threshold.
        assert_eq!(metrics.cards.pct_on_time, 33);
    }

    #[test]
    fn empty_route_yields_zero_result() {
        let flights = vec![flight("BOM", "DEL", "08:00", "IndiGo", 12)];
        let metrics = compute_metrics(&flights, "GOI", "COK");
        assert_eq!(metrics.cards.total_flights, 0);
        assert_eq!(metrics.cards.avg_delay, 0);
        assert_eq!(metrics.cards.pct_on_time, 0);
        assert!(metrics.delay_series.is_empty());
        assert!(metrics.airline_delays.is_empty());
    }

    #[test]
    fn pct_on_time_stays_in_range() {
        let all_on_time = vec![
            flight("BOM", "DEL", "08:00", "IndiGo", 0),
            flight("BOM", "DEL", "09:00", "IndiGo", 5),
        ];
        assert_eq!(compute_metrics(&all_on_time, "BOM", "DEL").cards.pct_on_time, 100);

        let none_on_time = vec![flight("BOM", "DEL", "08:00", "IndiGo", 30)];
        assert_eq!(compute_metrics(&none_on_time, "BOM", "DEL").cards.pct_on_time, 0);
    }

    #[test]
    fn hourly_series_is_sparse_and_ascending() {
        let flights = vec![
            flight("BOM", "DEL", "18:30", "IndiGo", 20),
            flight("BOM", "DEL", "06:00", "IndiGo", 0),
            flight("BOM", "DEL", "06:45", "IndiGo", 11),
            flight("BOM", "DEL", "12:15", "IndiGo", 5),
        ];
        let metrics = compute_metrics(&flights, "BOM", "DEL");

        let hours: Vec<u32> = metrics.delay_series.iter().map(|e| e.hour).collect();
        assert_eq!(hours, vec![6, 12, 18]);
        assert!(hours.windows(2).all(|w| w[0] < w[1]));

        // Hour 6 averages 0 and 11 -> 5.5, rounded to one decimal.
        assert_eq!(metrics.delay_series[0].avg_delay, 5.5);
        assert_eq!(metrics.delay_series[1].avg_delay, 5.0);
    }

    #[test]
    fn unparseable_departure_time_counts_in_cards_only() {
        let flights = vec![
            flight("BOM", "DEL", "N/A", "IndiGo", 30),
            flight("BOM", "DEL", "garbage", "IndiGo", 30),
            flight("BOM", "DEL", "08:00", "IndiGo", 0),
        ];
        let metrics = compute_metrics(&flights, "BOM", "DEL");

        assert_eq!(metrics.cards.total_flights, 3);
        assert_eq!(metrics.cards.avg_delay, 20);
        assert_eq!(metrics.delay_series.len(), 1);
        assert_eq!(metrics.delay_series[0].hour, 8);
    }

    #[test]
    fn airlines_grouped_in_first_seen_order() {
        let flights = vec![
            flight("BOM", "DEL", "08:00", "Vistara", 10),
            flight("BOM", "DEL", "09:00", "IndiGo", 4),
            flight("BOM", "DEL", "10:00", "Vistara", 21),
            flight("BOM", "DEL", "11:00", "", 7),
        ];
        let metrics = compute_metrics(&flights, "BOM", "DEL");

        let airlines: Vec<&str> = metrics
            .airline_delays
            .iter()
            .map(|a| a.airline.as_str())
            .collect();
        assert_eq!(airlines, vec!["Vistara", "IndiGo", "Unknown"]);

        // Vistara averages (10 + 21) / 2 = 15.5, rounded to 16.
        assert_eq!(metrics.airline_delays[0].avg_delay, 16);
        assert_eq!(metrics.airline_delays[1].avg_delay, 4);
        assert_eq!(metrics.airline_delays[2].avg_delay, 7);
    }
}
