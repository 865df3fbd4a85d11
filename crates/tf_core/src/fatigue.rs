//! Fatigue scorer.
//!
//! One pass over the walked schedule with a two-game lookback. Each game's
//! score is the capped sum of four components:
//!
//! | component    | source                                  | reference range |
//! |--------------|-----------------------------------------|-----------------|
//! | travel       | leg distance step function              | 0-30            |
//! | timezone     | zones crossed x 5                       | 0-20 (capped)   |
//! | rest         | days since previous game                | 0-20            |
//! | consecutive  | away games among the previous two games | 0-30            |

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::FatigueConfig;
use crate::geo::round_to;
use crate::schedule::Game;
use crate::travel::TravelLeg;
use crate::walker::GameLeg;

/// Discrete fatigue band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FatigueLevel {
    #[serde(rename = "LOW")]
    Low,
    #[serde(rename = "MODERATE")]
    Moderate,
    #[serde(rename = "HIGH")]
    High,
    #[serde(rename = "VERY HIGH")]
    VeryHigh,
}

impl FatigueLevel {
    /// Highest band first
    pub const ALL: [FatigueLevel; 4] = [
        FatigueLevel::VeryHigh,
        FatigueLevel::High,
        FatigueLevel::Moderate,
        FatigueLevel::Low,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FatigueLevel::Low => "LOW",
            FatigueLevel::Moderate => "MODERATE",
            FatigueLevel::High => "HIGH",
            FatigueLevel::VeryHigh => "VERY HIGH",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        FatigueLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(value.trim()))
    }

    /// Band for `score` under the reference thresholds (70/50/30)
    pub fn from_score(score: u32) -> Self {
        FatigueConfig::default().level(score)
    }
}

impl fmt::Display for FatigueLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four additive parts of a fatigue score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FatigueComponents {
    pub travel: u32,
    pub timezone: u32,
    pub rest: u32,
    pub consecutive: u32,
}

impl FatigueComponents {
    pub fn sum(&self) -> u32 {
        self.travel + self.timezone + self.rest + self.consecutive
    }
}

/// Fatigue derivation for one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FatigueRecord {
    /// 1-based position in the season
    pub game_number: usize,
    pub game: Game,
    pub leg: TravelLeg,
    pub rest_days: i64,
    pub components: FatigueComponents,
    pub overall_score: u32,
    pub level: FatigueLevel,
    /// Running totals through this game, rounded to 1 dp
    pub cumulative_distance: f64,
    pub cumulative_hours: f64,
}

impl FatigueConfig {
    pub fn travel_points(&self, distance_miles: f64) -> u32 {
        if distance_miles <= 0.0 {
            return 0;
        }
        self.travel_bands
            .iter()
            .find(|(bound, _)| distance_miles < *bound)
            .map(|&(_, points)| points)
            .unwrap_or(self.travel_max_points)
    }

    pub fn timezone_points(&self, timezones_crossed: u32) -> u32 {
        let points = timezones_crossed * self.timezone_points_per_zone;
        match self.timezone_cap {
            Some(cap) => points.min(cap),
            None => points,
        }
    }

    pub fn rest_points(&self, rest_days: i64) -> u32 {
        match rest_days {
            d if d <= 1 => self.rest_back_to_back_points,
            2 => self.rest_two_day_points,
            3 => self.rest_three_day_points,
            _ => 0,
        }
    }

    /// `prior_away` is the number of away games among the two previous games
    pub fn consecutive_points(&self, prior_away: usize, is_away: bool) -> u32 {
        match prior_away {
            k if k >= 2 => self.streak_points,
            1 if is_away => self.single_carry_points,
            _ => 0,
        }
    }

    pub fn level(&self, score: u32) -> FatigueLevel {
        match score {
            s if s >= self.very_high_threshold => FatigueLevel::VeryHigh,
            s if s >= self.high_threshold => FatigueLevel::High,
            s if s >= self.moderate_threshold => FatigueLevel::Moderate,
            _ => FatigueLevel::Low,
        }
    }

    pub fn overall(&self, components: &FatigueComponents) -> u32 {
        components.sum().min(self.score_cap)
    }

    /// Score a walked season. Input must already be in date order.
    pub fn score(&self, legs: &[GameLeg]) -> Vec<FatigueRecord> {
        let mut records = Vec::with_capacity(legs.len());
        let mut total_miles = 0.0;
        let mut total_hours = 0.0;

        for (i, current) in legs.iter().enumerate() {
            let rest_days = if i > 0 {
                (current.game.date - legs[i - 1].game.date).num_days()
            } else {
                0
            };
            let prior_away = legs[i.saturating_sub(2)..i]
                .iter()
                .filter(|g| g.game.home_away.is_away())
                .count();

            let components = FatigueComponents {
                travel: self.travel_points(current.leg.distance_miles),
                timezone: self.timezone_points(current.leg.timezones_crossed),
                rest: self.rest_points(rest_days),
                consecutive: self
                    .consecutive_points(prior_away, current.game.home_away.is_away()),
            };
            let overall_score = self.overall(&components);

            total_miles += current.leg.distance_miles;
            total_hours += current.leg.duration_hours;

            debug!(
                game = i + 1,
                opponent = %current.game.opponent,
                score = overall_score,
                "fatigue"
            );

            records.push(FatigueRecord {
                game_number: i + 1,
                game: current.game.clone(),
                leg: current.leg,
                rest_days,
                components,
                overall_score,
                level: self.level(overall_score),
                cumulative_distance: round_to(total_miles, 1),
                cumulative_hours: round_to(total_hours, 1),
            });
        }
        records
    }
}

/// Score with the reference configuration
pub fn score(legs: &[GameLeg]) -> Vec<FatigueRecord> {
    FatigueConfig::default().score(legs)
}
