//! Season analysis over scored records: totals, road trips, monthly and
//! fatigue breakdowns.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::fatigue::{FatigueLevel, FatigueRecord};
use crate::geo::round_to;
use crate::schedule::HomeAway;
use crate::travel::Direction;

/// Minimum length for a road trip to be reported by games...
pub const ROAD_TRIP_MIN_GAMES: usize = 2;
/// ...or by distance
pub const ROAD_TRIP_MIN_MILES: f64 = 1000.0;
/// Scores at or above this are flagged as critical
pub const CRITICAL_SCORE: u32 = 70;
/// Rest days that count as a recovery window
pub const RECOVERY_REST_DAYS: i64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameCounts {
    pub total: usize,
    pub home: usize,
    pub away: usize,
    pub neutral: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TravelTotals {
    pub total_miles: f64,
    pub total_hours: f64,
    pub mean_miles_per_away_game: f64,
    pub mean_hours_per_away_game: f64,
    /// Away games over all games
    pub travel_frequency: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimezoneStats {
    pub games_with_change: usize,
    pub total_crossed: u32,
    pub max_single_trip: u32,
}

/// A maximal run of consecutive away games
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadTrip {
    /// Game numbers in the trip
    pub games: Vec<usize>,
    pub stops: Vec<String>,
    pub miles: f64,
    pub hours: f64,
    /// The season ended while the team was still away
    pub open_ended: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSummary {
    /// `YYYY-MM`
    pub month: String,
    pub games: usize,
    pub away_games: usize,
    pub miles: f64,
    pub mean_fatigue: f64,
    pub max_fatigue: u32,
}

/// Highlighted game with its score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameHighlight {
    pub game_number: usize,
    pub date: NaiveDate,
    pub opponent: String,
    pub home_away: HomeAway,
    pub rest_days: i64,
    pub score: u32,
    pub level: FatigueLevel,
}

impl GameHighlight {
    fn from_record(record: &FatigueRecord) -> Self {
        Self {
            game_number: record.game_number,
            date: record.game.date,
            opponent: record.game.opponent.clone(),
            home_away: record.game.home_away,
            rest_days: record.rest_days,
            score: record.overall_score,
            level: record.level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub counts: GameCounts,
    pub travel: TravelTotals,
    pub timezones: TimezoneStats,
    /// Non-home games per direction
    pub directions: Vec<(Direction, usize)>,
    pub road_trips: Vec<RoadTrip>,
    pub months: Vec<MonthSummary>,
    /// Highest score first, ties in season order
    pub top_fatigue: Vec<GameHighlight>,
    pub critical: Vec<GameHighlight>,
    pub recovery_windows: Vec<GameHighlight>,
    /// Highest band first
    pub level_distribution: Vec<(FatigueLevel, usize)>,
}

impl SeasonSummary {
    pub fn from_records(records: &[FatigueRecord], top_n: usize) -> Self {
        let counts = count_games(records);

        let total_miles: f64 = records.iter().map(|r| r.leg.distance_miles).sum();
        let total_hours: f64 = records.iter().map(|r| r.leg.duration_hours).sum();
        let away: Vec<&FatigueRecord> = records
            .iter()
            .filter(|r| r.game.home_away.is_away())
            .collect();
        let travel = TravelTotals {
            total_miles: round_to(total_miles, 1),
            total_hours: round_to(total_hours, 1),
            mean_miles_per_away_game: mean(away.iter().map(|r| r.leg.distance_miles)),
            mean_hours_per_away_game: mean(away.iter().map(|r| r.leg.duration_hours)),
            travel_frequency: if counts.total > 0 {
                counts.away as f64 / counts.total as f64
            } else {
                0.0
            },
        };

        let timezones = TimezoneStats {
            games_with_change: records.iter().filter(|r| r.leg.timezones_crossed > 0).count(),
            total_crossed: records.iter().map(|r| r.leg.timezones_crossed).sum(),
            max_single_trip: records
                .iter()
                .map(|r| r.leg.timezones_crossed)
                .max()
                .unwrap_or(0),
        };

        let directions = Direction::ALL
            .into_iter()
            .map(|d| {
                let n = records
                    .iter()
                    .filter(|r| r.game.home_away != HomeAway::Home && r.leg.direction == d)
                    .count();
                (d, n)
            })
            .filter(|&(_, n)| n > 0)
            .collect();

        let mut ranked: Vec<&FatigueRecord> = records.iter().collect();
        // sort_by is stable: equal scores keep season order
        ranked.sort_by(|a, b| b.overall_score.cmp(&a.overall_score));
        let top_fatigue = ranked
            .into_iter()
            .take(top_n)
            .map(GameHighlight::from_record)
            .collect();

        let critical = records
            .iter()
            .filter(|r| r.overall_score >= CRITICAL_SCORE)
            .map(GameHighlight::from_record)
            .collect();
        let recovery_windows = records
            .iter()
            .filter(|r| r.rest_days >= RECOVERY_REST_DAYS)
            .map(GameHighlight::from_record)
            .collect();

        let level_distribution = FatigueLevel::ALL
            .into_iter()
            .map(|level| (level, records.iter().filter(|r| r.level == level).count()))
            .collect();

        Self {
            counts,
            travel,
            timezones,
            directions,
            road_trips: road_trips(records),
            months: monthly(records),
            top_fatigue,
            critical,
            recovery_windows,
            level_distribution,
        }
    }
}

fn count_games(records: &[FatigueRecord]) -> GameCounts {
    records.iter().fold(
        GameCounts {
            total: records.len(),
            ..GameCounts::default()
        },
        |mut counts, r| {
            match r.game.home_away {
                HomeAway::Home => counts.home += 1,
                HomeAway::Away => counts.away += 1,
                HomeAway::Neutral => counts.neutral += 1,
            }
            counts
        },
    )
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Runs of consecutive away games worth reporting
pub fn road_trips(records: &[FatigueRecord]) -> Vec<RoadTrip> {
    let mut trips = Vec::new();
    let mut current: Vec<&FatigueRecord> = Vec::new();

    let close = |run: &[&FatigueRecord], open_ended: bool| -> Option<RoadTrip> {
        if run.is_empty() {
            return None;
        }
        let miles: f64 = run.iter().map(|r| r.leg.distance_miles).sum();
        let hours: f64 = run.iter().map(|r| r.leg.duration_hours).sum();
        if run.len() < ROAD_TRIP_MIN_GAMES && miles < ROAD_TRIP_MIN_MILES {
            return None;
        }
        Some(RoadTrip {
            games: run.iter().map(|r| r.game_number).collect(),
            stops: run.iter().map(|r| r.game.location.clone()).collect(),
            miles: round_to(miles, 1),
            hours: round_to(hours, 2),
            open_ended,
        })
    };

    for record in records {
        if record.game.home_away.is_away() {
            current.push(record);
        } else {
            trips.extend(close(&current, false));
            current.clear();
        }
    }
    trips.extend(close(&current, true));
    trips
}

/// Per calendar month, in date order
pub fn monthly(records: &[FatigueRecord]) -> Vec<MonthSummary> {
    let mut months: BTreeMap<(i32, u32), Vec<&FatigueRecord>> = BTreeMap::new();
    for record in records {
        months
            .entry((record.game.date.year(), record.game.date.month()))
            .or_default()
            .push(record);
    }

    months
        .into_iter()
        .map(|((year, month), group)| MonthSummary {
            month: format!("{:04}-{:02}", year, month),
            games: group.len(),
            away_games: group.iter().filter(|r| r.game.home_away.is_away()).count(),
            miles: round_to(group.iter().map(|r| r.leg.distance_miles).sum(), 1),
            mean_fatigue: round_to(mean(group.iter().map(|r| r.overall_score as f64)), 1),
            max_fatigue: group.iter().map(|r| r.overall_score).max().unwrap_or(0),
        })
        .collect()
}
