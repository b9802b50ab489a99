//! Synthetic flight generator used when live data is unavailable.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::models::{FlightRecord, FlightStatus};
use crate::reference;

/// Carriers drawn from for generated flights.
const CARRIERS: &[&str] = &["6E", "AI", "SG", "UK"];
/// Flights generated per route.
const FLIGHTS_PER_ROUTE: usize = 8;
/// First generated departure of the day; later departures follow at
/// two-hour intervals.
const FIRST_DEPARTURE_HOUR: u32 = 6;
/// Block time of every generated flight, in hours.
const FLIGHT_DURATION_HOURS: u32 = 2;

/// Generate plausible flights for a route.
///
/// The shape is fixed - 8 flights, departures every 2 hours from 06:00,
/// arrival 2 hours after departure - while carriers, flight numbers, delays
/// and gates come from `rng`. Production passes a thread RNG; tests pass a
/// seeded one to pin the output down.
pub fn generate_flights<R: Rng + ?Sized>(
    rng: &mut R,
    origin: &str,
    destination: &str,
) -> Vec<FlightRecord> {
    let mut flights = Vec::with_capacity(FLIGHTS_PER_ROUTE);

    for i in 0..FLIGHTS_PER_ROUTE {
        let carrier = *CARRIERS.choose(rng).unwrap_or(&CARRIERS[0]);
        let delay: u32 = rng.random_range(0..45);
        let dep_hour = FIRST_DEPARTURE_HOUR + 2 * i as u32;

        flights.push(FlightRecord {
            flight_id: format!("{}{}", carrier, rng.random_range(1000..10000)),
            airline_code: carrier.to_string(),
            airline_name: reference::airline_name(carrier).unwrap_or(carrier).to_string(),
            origin: origin.to_string(),
            destination: destination.to_string(),
            origin_city: reference::city_or_code(origin).to_string(),
            destination_city: reference::city_or_code(destination).to_string(),
            scheduled_dep: format!("{:02}:00", dep_hour),
            scheduled_arr: format!("{:02}:00", dep_hour + FLIGHT_DURATION_HOURS),
            actual_dep: None,
            actual_arr: None,
            status: FlightStatus::from_delay(delay),
            aircraft: format!("VT-{}", registration_suffix(rng)),
            delay,
            gate: Some(rng.random_range(1..=20u32).to_string()),
            terminal: Some(rng.random_range(1..=3u32).to_string()),
            is_live: false,
            route: reference::route_label(origin, destination),
        });
    }

    flights
}

fn registration_suffix<R: Rng + ?Sized>(rng: &mut R) -> String {
    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    (0..3)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generates_fixed_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let flights = generate_flights(&mut rng, "BOM", "DEL");

        assert_eq!(flights.len(), 8);
        for (i, flight) in flights.iter().enumerate() {
            assert_eq!(flight.scheduled_dep, format!("{:02}:00", 6 + 2 * i));
            assert_eq!(flight.scheduled_arr, format!("{:02}:00", 8 + 2 * i));
            assert_eq!(flight.origin, "BOM");
            assert_eq!(flight.destination, "DEL");
            assert_eq!(flight.route, "Mumbai → Delhi");
            assert!(!flight.is_live);
            assert!(flight.actual_dep.is_none());
        }
    }

    #[test]
    fn status_tracks_delay() {
        let mut rng = StdRng::seed_from_u64(42);
        for flight in generate_flights(&mut rng, "DEL", "BLR") {
            match flight.status {
                FlightStatus::Delayed => assert!(flight.delay > 15),
                FlightStatus::Boarding => assert!(flight.delay > 5 && flight.delay <= 15),
                FlightStatus::OnTime => assert!(flight.delay <= 5),
                other => panic!("unexpected generated status: {:?}", other),
            }
        }
    }

    #[test]
    fn fields_stay_within_generator_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        for flight in generate_flights(&mut rng, "BOM", "MAA") {
            assert!(flight.delay < 45);
            assert!(CARRIERS.contains(&flight.airline_code.as_str()));
            assert!(flight.flight_id.starts_with(&flight.airline_code));

            let gate: u32 = flight.gate.unwrap().parse().unwrap();
            assert!((1..=20).contains(&gate));
            let terminal: u32 = flight.terminal.unwrap().parse().unwrap();
            assert!((1..=3).contains(&terminal));

            assert_eq!(flight.aircraft.len(), "VT-XYZ".len());
            assert!(flight.aircraft.starts_with("VT-"));
        }
    }

    #[test]
    fn same_seed_reproduces_output() {
        let a = generate_flights(&mut StdRng::seed_from_u64(11), "BOM", "DEL");
        let b = generate_flights(&mut StdRng::seed_from_u64(11), "BOM", "DEL");
        assert_eq!(a, b);
    }
}
