//! Great-circle geometry.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine formula (miles)
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Haversine distance in miles on a sphere of [`EARTH_RADIUS_MILES`].
///
/// Symmetric, and zero iff both coordinates are equal.
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    distance_with_radius(a, b, EARTH_RADIUS_MILES)
}

pub fn distance_with_radius(a: Coordinate, b: Coordinate, radius: f64) -> f64 {
    if a == b {
        return 0.0;
    }
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    radius * c
}

/// Round to `places` decimal places, ties to even.
///
/// Works on the exact binary value of `value`, so `2.675` (stored just
/// below the tie) rounds down while a true tie like `5.25` goes to `5.2`.
pub fn round_to(value: f64, places: u32) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven))
        .and_then(|d| d.to_string().parse().ok())
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SOUTH_BEND: Coordinate = Coordinate::new(41.7033, -86.2390);
    const CHARLOTTESVILLE: Coordinate = Coordinate::new(38.0293, -78.4767);

    #[test]
    fn test_known_distance() {
        let d = distance(SOUTH_BEND, CHARLOTTESVILLE);
        assert!((d - 483.36).abs() < 0.01, "got {d}");
        assert_eq!(round_to(d, 1), 483.4);
    }

    #[test]
    fn test_same_point_is_zero() {
        assert_eq!(distance(SOUTH_BEND, SOUTH_BEND), 0.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(8.7884, 2), 8.79);
        assert_eq!(round_to(30.4103, 1), 30.4);
        assert_eq!(round_to(0.0, 1), 0.0);
    }

    #[test]
    fn test_round_to_ties_to_even() {
        // 625 mi by air is exactly 5.25 h
        assert_eq!(round_to(5.25, 1), 5.2);
        assert_eq!(round_to(8.75, 1), 8.8);
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(2.5, 0), 2.0);
        // Stored below the tie, so not a tie at all
        assert_eq!(round_to(2.675, 2), 2.67);
        assert!(round_to(f64::NAN, 1).is_nan());
    }

    fn coordinate_strategy() -> impl Strategy<Value = Coordinate> {
        (-89.0f64..=89.0, -179.0f64..=179.0).prop_map(|(lat, lon)| Coordinate { lat, lon })
    }

    proptest! {
        #[test]
        fn prop_distance_symmetric(a in coordinate_strategy(), b in coordinate_strategy()) {
            let ab = distance(a, b);
            let ba = distance(b, a);
            prop_assert!((ab - ba).abs() < 1e-9);
            prop_assert!(ab >= 0.0);
        }

        #[test]
        fn prop_distance_zero_on_self(a in coordinate_strategy()) {
            prop_assert_eq!(distance(a, a), 0.0);
        }
    }
}
