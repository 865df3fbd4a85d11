//! Venue registry - closed, static lookup of venue coordinates and UTC offsets.
//!
//! Venue ids use the `"City, ST"` form that appears in schedule files.
//! A venue resolves to its coordinate and its standard-time offset together;
//! there is no partial entry and no fallback offset.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// A named location with a coordinate and a UTC offset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: String,
    pub coordinate: Coordinate,
    /// Signed whole hours from UTC (standard time)
    pub utc_offset: i32,
}

impl Venue {
    pub fn new(id: impl Into<String>, lat: f64, lon: f64, utc_offset: i32) -> Self {
        Self {
            id: id.into(),
            coordinate: Coordinate::new(lat, lon),
            utc_offset,
        }
    }
}

/// Campus locations of every venue the shipped seasons visit.
/// (id, lat, lon, utc offset)
const BUILTIN_VENUES: &[(&str, f64, f64, i32)] = &[
    ("South Bend, IN", 41.7033, -86.2390, -6),
    ("Detroit, MI", 42.3314, -83.0458, -5),
    ("Oxford, MS", 34.3644, -89.5186, -6),
    ("Tallahassee, FL", 30.4383, -84.2807, -5),
    ("Harrisonburg, VA", 38.4495, -79.2393, -5),
    ("Atlanta, GA", 33.7490, -84.3880, -5),
    ("Durham, NC", 35.9940, -78.8986, -5),
    ("Storrs, CT", 41.8086, -72.2470, -5),
    ("Clemson, SC", 34.6834, -82.8374, -5),
    ("Berkeley, CA", 37.8722, -122.2597, -8),
    ("Palo Alto, CA", 37.4419, -122.1430, -8),
    ("Charlottesville, VA", 38.0293, -78.4767, -5),
    ("Winston-Salem, NC", 36.0999, -80.2442, -5),
    ("Dallas, TX", 32.7767, -96.7970, -6),
    ("Louisville, KY", 38.2527, -85.7585, -6),
    ("Milwaukee, WI", 43.0396, -87.9073, -6),
    ("University Park, PA", 40.8135, -77.8601, -5),
    ("Norman, OK", 35.2087, -97.4867, -6),
    ("Columbia, SC", 34.0007, -81.0348, -5),
    ("Boston, MA", 42.3601, -71.0589, -5),
    ("Syracuse, NY", 43.0481, -76.1474, -5),
    ("Philadelphia, PA", 39.9526, -75.1652, -5),
    ("Blacksburg, VA", 37.2295, -80.4139, -5),
    ("Coral Gables, FL", 25.7217, -80.2764, -5),
];

/// Default home venue of the shipped seasons
pub const DEFAULT_HOME_VENUE: &str = "South Bend, IN";

static BUILTIN: Lazy<VenueRegistry> = Lazy::new(|| {
    let mut registry = VenueRegistry::new();
    for &(id, lat, lon, offset) in BUILTIN_VENUES {
        registry.insert(Venue::new(id, lat, lon, offset));
    }
    registry
});

/// Venue lookup by id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VenueRegistry {
    venues: FxHashMap<String, Venue>,
}

impl VenueRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the built-in venue table
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Insert or replace a venue, returning the previous entry
    pub fn insert(&mut self, venue: Venue) -> Option<Venue> {
        self.venues.insert(venue.id.clone(), venue)
    }

    pub fn with_venue(mut self, venue: Venue) -> Self {
        self.insert(venue);
        self
    }

    /// Resolve a venue id; surrounding whitespace is ignored
    pub fn lookup(&self, id: &str) -> Option<&Venue> {
        self.venues.get(id.trim())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lookup(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.venues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }

    /// Venues sorted by id
    pub fn iter(&self) -> impl Iterator<Item = &Venue> {
        let mut venues: Vec<&Venue> = self.venues.values().collect();
        venues.sort_by(|a, b| a.id.cmp(&b.id));
        venues.into_iter()
    }

    /// Largest possible timezone crossing between two registered venues
    pub fn offset_span(&self) -> u32 {
        let min = self.venues.values().map(|v| v.utc_offset).min();
        let max = self.venues.values().map(|v| v.utc_offset).max();
        match (min, max) {
            (Some(min), Some(max)) => (max - min).unsigned_abs(),
            _ => 0,
        }
    }
}
