//! Travel-metrics calculator: one origin/destination pair to one [`TravelLeg`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::TravelModel;
use crate::geo::{distance_with_radius, round_to};
use crate::venue::Venue;

/// Dominant compass axis of a leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Direction {
    /// No travel
    #[default]
    Home,
    North,
    South,
    Eastbound,
    Westbound,
}

impl Direction {
    pub const ALL: [Direction; 5] = [
        Direction::Home,
        Direction::North,
        Direction::South,
        Direction::Eastbound,
        Direction::Westbound,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Home => "Home",
            Direction::North => "North",
            Direction::South => "South",
            Direction::Eastbound => "Eastbound",
            Direction::Westbound => "Westbound",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Direction::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(value.trim()))
    }

    /// Classify the move from `origin` to `destination`.
    ///
    /// The larger of |Δlat| and |Δlon| picks the axis; ties go to longitude.
    pub fn between(origin: &Venue, destination: &Venue) -> Self {
        if origin.id == destination.id || origin.coordinate == destination.coordinate {
            return Direction::Home;
        }
        let lat_diff = destination.coordinate.lat - origin.coordinate.lat;
        let lon_diff = destination.coordinate.lon - origin.coordinate.lon;

        if lat_diff.abs() > lon_diff.abs() {
            if lat_diff > 0.0 {
                Direction::North
            } else {
                Direction::South
            }
        } else if lon_diff > 0.0 {
            Direction::Eastbound
        } else {
            Direction::Westbound
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Travel metrics for one game's trip, rounded for reporting
/// (distance 1 dp, duration 2 dp)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TravelLeg {
    pub distance_miles: f64,
    pub duration_hours: f64,
    pub timezones_crossed: u32,
    pub direction: Direction,
}

impl TravelLeg {
    /// Identity leg for games played at home
    pub const HOME: TravelLeg = TravelLeg {
        distance_miles: 0.0,
        duration_hours: 0.0,
        timezones_crossed: 0,
        direction: Direction::Home,
    };

    pub fn is_home(&self) -> bool {
        *self == TravelLeg::HOME
    }
}

impl Default for TravelLeg {
    fn default() -> Self {
        TravelLeg::HOME
    }
}

impl TravelModel {
    /// Door-to-door hours for an unrounded distance.
    ///
    /// Strictly below the threshold the team drives; at or above it flies.
    pub fn duration_hours(&self, distance_miles: f64) -> f64 {
        if distance_miles < self.ground_threshold_miles {
            distance_miles / self.ground_speed_mph
        } else {
            distance_miles / self.air_speed_mph + self.air_overhead_hours
        }
    }

    /// Derive the leg from `origin` to `destination`
    pub fn leg(&self, origin: &Venue, destination: &Venue) -> TravelLeg {
        let raw_distance =
            distance_with_radius(origin.coordinate, destination.coordinate, self.earth_radius_miles);
        let raw_duration = self.duration_hours(raw_distance);

        TravelLeg {
            distance_miles: round_to(raw_distance, 1),
            duration_hours: round_to(raw_duration, 2),
            timezones_crossed: (origin.utc_offset - destination.utc_offset).unsigned_abs(),
            direction: Direction::between(origin, destination),
        }
    }
}

/// [`TravelModel::leg`] under the reference model
pub fn compute(origin: &Venue, destination: &Venue) -> TravelLeg {
    TravelModel::default().leg(origin, destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::venue::VenueRegistry;

    fn venue(id: &str) -> Venue {
        VenueRegistry::builtin().lookup(id).cloned().unwrap()
    }

    #[test]
    fn test_south_bend_to_charlottesville() {
        let leg = compute(&venue("South Bend, IN"), &venue("Charlottesville, VA"));
        assert_eq!(leg.distance_miles, 483.4);
        assert_eq!(leg.duration_hours, 8.79); // 483.36 / 55
        assert_eq!(leg.timezones_crossed, 1);
        assert_eq!(leg.direction, Direction::Eastbound);
    }

    #[test]
    fn test_air_regime() {
        let leg = compute(&venue("South Bend, IN"), &venue("Berkeley, CA"));
        assert_eq!(leg.distance_miles, 1916.6);
        assert_eq!(leg.duration_hours, 7.83);
        assert_eq!(leg.timezones_crossed, 2);
        assert_eq!(leg.direction, Direction::Westbound);
    }

    #[test]
    fn test_short_hop_and_latitude_axis() {
        let leg = compute(&venue("Berkeley, CA"), &venue("Palo Alto, CA"));
        assert_eq!(leg.distance_miles, 30.4);
        assert_eq!(leg.duration_hours, 0.55);
        assert_eq!(leg.timezones_crossed, 0);
        // |Δlat| 0.43 > |Δlon| 0.12
        assert_eq!(leg.direction, Direction::South);

        let leg = compute(&venue("South Bend, IN"), &venue("Milwaukee, WI"));
        assert_eq!(leg.direction, Direction::Westbound);
    }

    #[test]
    fn test_same_venue_is_home_direction() {
        let sb = venue("South Bend, IN");
        let leg = compute(&sb, &sb);
        assert_eq!(leg, TravelLeg::HOME);
        assert!(leg.is_home());
    }

    #[test]
    fn test_duration_boundary_is_strict() {
        let model = TravelModel::default();
        assert_eq!(model.duration_hours(500.0), 5.0);
        assert!((model.duration_hours(499.0) - 499.0 / 55.0).abs() < 1e-12);
        assert_eq!(model.duration_hours(0.0), 0.0);
    }

    #[test]
    fn test_direction_tie_goes_to_longitude() {
        let origin = Venue::new("A", 40.0, -80.0, -5);
        let east = Venue::new("B", 41.0, -79.0, -5);
        let west = Venue::new("C", 39.0, -81.0, -5);
        assert_eq!(Direction::between(&origin, &east), Direction::Eastbound);
        assert_eq!(Direction::between(&origin, &west), Direction::Westbound);
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!(Direction::parse("eastbound"), Some(Direction::Eastbound));
        assert_eq!(Direction::parse(" Home "), Some(Direction::Home));
        assert_eq!(Direction::parse("Northeast"), None);
    }
}
