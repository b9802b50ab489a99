//! Reschedule impact simulation.
//!
//! Not a scheduling engine: shifting a flight away from its current slot
//! relieves the predicted delay slightly and perturbs the slot load by one.
//! Only the before/after contract matters to consumers.

use rand::Rng;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::FlightRecord;

/// Simulated impact of shifting one flight's departure slot.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RescheduleImpact {
    pub ok: bool,
    pub flight_id: String,
    pub minutes_shift: i32,
    pub pred_delay_before: u32,
    pub pred_delay_after: u32,
    pub slot_load_before: u32,
    pub slot_load_after: u32,
    pub message: String,
}

/// Simulate shifting `flight_id` by `minutes_shift` minutes.
///
/// Reads the snapshot only; cache state is never touched. Returns `None`
/// when the flight is not in the current snapshot.
pub fn simulate<R: Rng + ?Sized>(
    rng: &mut R,
    flights: &[FlightRecord],
    flight_id: &str,
    minutes_shift: i32,
) -> Option<RescheduleImpact> {
    let flight = flights.iter().find(|f| f.flight_id == flight_id)?;

    let current_delay = flight.delay;
    let new_delay = if minutes_shift > 0 {
        current_delay.saturating_sub(2)
    } else {
        current_delay + 1
    };

    let slot_load_before: u32 = rng.random_range(3..=10);
    let slot_load_after = if minutes_shift > 0 {
        slot_load_before + 1
    } else {
        (slot_load_before - 1).max(1)
    };

    Some(RescheduleImpact {
        ok: true,
        flight_id: flight_id.to_string(),
        minutes_shift,
        pred_delay_before: current_delay,
        pred_delay_after: new_delay,
        slot_load_before,
        slot_load_after,
        message: format!("Flight {} rescheduled by {} minutes", flight_id, minutes_shift),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::generator::generate_flights;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn unknown_flight_id_is_none() {
        let mut rng = StdRng::seed_from_u64(1);
        let flights = generate_flights(&mut rng, "BOM", "DEL");
        assert!(simulate(&mut rng, &flights, "XX9999", 30).is_none());
    }

    #[test]
    fn forward_shift_relieves_delay() {
        let mut rng = StdRng::seed_from_u64(5);
        let flights = generate_flights(&mut rng, "BOM", "DEL");
        let flight = &flights[0];

        let impact = simulate(&mut rng, &flights, &flight.flight_id, 30).unwrap();
        assert!(impact.ok);
        assert_eq!(impact.pred_delay_before, flight.delay);
        assert_eq!(impact.pred_delay_after, flight.delay.saturating_sub(2));
        assert_eq!(impact.slot_load_after, impact.slot_load_before + 1);
        assert_eq!(impact.message, format!("Flight {} rescheduled by 30 minutes", flight.flight_id));
    }

    #[test]
    fn backward_shift_adds_delay_and_keeps_load_positive() {
        let mut rng = StdRng::seed_from_u64(9);
        let flights = generate_flights(&mut rng, "DEL", "BOM");
        let flight = &flights[3];

        for _ in 0..50 {
            let impact = simulate(&mut rng, &flights, &flight.flight_id, -15).unwrap();
            assert_eq!(impact.pred_delay_after, flight.delay + 1);
            assert!((3..=10).contains(&impact.slot_load_before));
            assert!(impact.slot_load_after >= 1);
        }
    }
}
