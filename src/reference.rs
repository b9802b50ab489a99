//! Static airport and airline reference data.
//!
//! The dashboard tracks a fixed set of Indian airports; flights touching
//! anything outside this set are dropped before they enter the cache.

/// Airport metadata keyed by IATA code.
#[derive(Debug, Clone, Copy)]
pub struct Airport {
    pub iata: &'static str,
    pub name: &'static str,
    pub city: &'static str,
    pub lat: f64,
    pub lon: f64,
    pub icao: &'static str,
}

pub const AIRPORTS: &[Airport] = &[
    Airport { iata: "BOM", name: "Mumbai", city: "Mumbai", lat: 19.0896, lon: 72.8656, icao: "VABB" },
    Airport { iata: "DEL", name: "Delhi", city: "Delhi", lat: 28.5562, lon: 77.1000, icao: "VIDP" },
    Airport { iata: "BLR", name: "Bangalore", city: "Bangalore", lat: 12.9716, lon: 77.5946, icao: "VOBL" },
    Airport { iata: "MAA", name: "Chennai", city: "Chennai", lat: 12.9941, lon: 80.1709, icao: "VOMM" },
    Airport { iata: "CCU", name: "Kolkata", city: "Kolkata", lat: 22.6547, lon: 88.4467, icao: "VECC" },
    Airport { iata: "HYD", name: "Hyderabad", city: "Hyderabad", lat: 17.2403, lon: 78.4294, icao: "VOHS" },
    Airport { iata: "AMD", name: "Ahmedabad", city: "Ahmedabad", lat: 23.0726, lon: 72.6263, icao: "VAAH" },
    Airport { iata: "COK", name: "Kochi", city: "Kochi", lat: 10.1520, lon: 76.4019, icao: "VOCI" },
    Airport { iata: "GOI", name: "Goa", city: "Goa", lat: 15.3808, lon: 73.8314, icao: "VOGO" },
    Airport { iata: "PNQ", name: "Pune", city: "Pune", lat: 18.5822, lon: 73.9197, icao: "VAPO" },
];

/// Carrier display names keyed by IATA carrier code.
pub const AIRLINES: &[(&str, &str)] = &[
    ("6E", "IndiGo"),
    ("AI", "Air India"),
    ("SG", "SpiceJet"),
    ("UK", "Vistara"),
    ("G8", "Go First"),
    ("I5", "AirAsia India"),
    ("9I", "Alliance Air"),
];

/// Routes generated when live data is unavailable.
pub const POPULAR_ROUTES: &[(&str, &str)] = &[
    ("BOM", "DEL"),
    ("DEL", "BOM"),
    ("BOM", "BLR"),
    ("DEL", "BLR"),
    ("BLR", "BOM"),
    ("BLR", "DEL"),
    ("BOM", "MAA"),
    ("DEL", "MAA"),
];

pub fn airport(iata: &str) -> Option<&'static Airport> {
    AIRPORTS.iter().find(|a| a.iata == iata)
}

pub fn airline_name(code: &str) -> Option<&'static str> {
    AIRLINES.iter().find(|(c, _)| *c == code).map(|(_, name)| *name)
}

/// City for an IATA code, falling back to the code itself for unknown airports.
pub fn city_or_code<'a>(iata: &'a str) -> &'a str {
    airport(iata).map(|a| a.city).unwrap_or(iata)
}

/// Display label like "Mumbai → Delhi".
pub fn route_label(origin: &str, destination: &str) -> String {
    format!("{} → {}", city_or_code(origin), city_or_code(destination))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_known_airport() {
        let bom = airport("BOM").unwrap();
        assert_eq!(bom.city, "Mumbai");
        assert_eq!(bom.icao, "VABB");
        assert!(airport("JFK").is_none());
    }

    #[test]
    fn airline_lookup_falls_back_for_unknown_codes() {
        assert_eq!(airline_name("6E"), Some("IndiGo"));
        assert_eq!(airline_name("ZZ"), None);
        assert_eq!(city_or_code("XYZ"), "XYZ");
    }

    #[test]
    fn popular_routes_stay_within_tracked_airports() {
        for (origin, destination) in POPULAR_ROUTES {
            assert!(airport(origin).is_some());
            assert!(airport(destination).is_some());
        }
    }
}
