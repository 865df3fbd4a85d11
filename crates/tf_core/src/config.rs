//! # Engine Configuration
//!
//! Every tuning constant of the travel and fatigue models lives here so
//! schedules can be re-scored under a different model without touching the
//! algorithms. `Default` reproduces the reference season reports exactly.
//!
//! ```rust
//! use tf_core::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! assert_eq!(config.travel.ground_threshold_miles, 500.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::geo::EARTH_RADIUS_MILES;

/// Two-regime travel duration model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelModel {
    /// Sphere radius for haversine (기본: 3959 miles)
    pub earth_radius_miles: f64,
    /// Legs strictly shorter than this are driven (기본: 500)
    pub ground_threshold_miles: f64,
    /// Bus speed (기본: 55 mph)
    pub ground_speed_mph: f64,
    /// Cruise speed (기본: 500 mph)
    pub air_speed_mph: f64,
    /// Door-to-door airport overhead (기본: 4 hours)
    pub air_overhead_hours: f64,
}

impl Default for TravelModel {
    fn default() -> Self {
        Self {
            earth_radius_miles: EARTH_RADIUS_MILES,
            ground_threshold_miles: 500.0,
            ground_speed_mph: 55.0,
            air_speed_mph: 500.0,
            air_overhead_hours: 4.0,
        }
    }
}

/// Fatigue score parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FatigueConfig {
    // === Travel component ===
    /// Ascending (upper bound, points) bands; the first band whose bound
    /// exceeds the distance wins
    pub travel_bands: Vec<(f64, u32)>,
    /// Points for legs beyond the last band (기본: 30)
    pub travel_max_points: u32,

    // === Timezone component ===
    pub timezone_points_per_zone: u32,
    /// `None` leaves the component unbounded (기본: Some(20))
    pub timezone_cap: Option<u32>,

    // === Rest component ===
    /// Points when rest days <= 1 (기본: 20)
    pub rest_back_to_back_points: u32,
    /// Points for exactly 2 days (기본: 10)
    pub rest_two_day_points: u32,
    /// Points for exactly 3 days (기본: 5)
    pub rest_three_day_points: u32,

    // === Consecutive away component ===
    /// Two away games in the lookback window (기본: 30)
    pub streak_points: u32,
    /// One away game in the window and this game away (기본: 15)
    pub single_carry_points: u32,

    // === Totals ===
    pub score_cap: u32,
    pub very_high_threshold: u32,
    pub high_threshold: u32,
    pub moderate_threshold: u32,
}

impl Default for FatigueConfig {
    fn default() -> Self {
        Self {
            travel_bands: vec![(500.0, 5), (1000.0, 15), (2500.0, 25)],
            travel_max_points: 30,

            timezone_points_per_zone: 5,
            timezone_cap: Some(20),

            rest_back_to_back_points: 20,
            rest_two_day_points: 10,
            rest_three_day_points: 5,

            streak_points: 30,
            single_carry_points: 15,

            score_cap: 100,
            very_high_threshold: 70,
            high_threshold: 50,
            moderate_threshold: 30,
        }
    }
}

/// How neutral-site games move the team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NeutralSitePolicy {
    /// Zero travel, team stays home
    #[default]
    AsHome,
    /// Real leg from the current position, then the team returns home
    Travel,
}

/// Aggregate engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub travel: TravelModel,
    pub fatigue: FatigueConfig,
    pub neutral_site: NeutralSitePolicy,
}

impl EngineConfig {
    /// Reference model (기본)
    pub fn reference() -> Self {
        Self::default()
    }

    /// Reference model with neutral sites costing real travel
    pub fn neutral_travel() -> Self {
        Self {
            neutral_site: NeutralSitePolicy::Travel,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_constants() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.travel.ground_speed_mph, 55.0);
        assert_eq!(cfg.travel.air_overhead_hours, 4.0);
        assert_eq!(cfg.fatigue.timezone_cap, Some(20));
        assert_eq!(cfg.fatigue.score_cap, 100);
        assert_eq!(cfg.neutral_site, NeutralSitePolicy::AsHome);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let cfg: EngineConfig =
            serde_json::from_str(r#"{"neutral_site":"travel","fatigue":{"timezone_cap":null}}"#)
                .unwrap();
        assert_eq!(cfg.neutral_site, NeutralSitePolicy::Travel);
        assert_eq!(cfg.fatigue.timezone_cap, None);
        assert_eq!(cfg.fatigue.streak_points, 30);
        assert_eq!(cfg.travel, TravelModel::default());
    }
}
