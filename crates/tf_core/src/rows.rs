//! Flat report rows with the fixed external column order.
//!
//! Field order here *is* the column order of the emitted files.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fatigue::{FatigueComponents, FatigueLevel, FatigueRecord};
use crate::schedule::{Game, HomeAway};
use crate::travel::{Direction, TravelLeg};
use crate::walker::GameLeg;

/// One row of the base travel report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelRow {
    #[serde(rename = "Game_Number")]
    pub game_number: usize,
    #[serde(rename = "Sport")]
    pub sport: String,
    #[serde(rename = "Opponent")]
    pub opponent: String,
    #[serde(rename = "Game_Date")]
    pub game_date: NaiveDate,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Home_Away")]
    pub home_away: HomeAway,
    #[serde(rename = "Travel_Distance_Miles")]
    pub travel_distance_miles: f64,
    #[serde(rename = "Travel_Duration_Hours")]
    pub travel_duration_hours: f64,
    #[serde(rename = "Timezones_Crossed")]
    pub timezones_crossed: u32,
    #[serde(rename = "Travel_Direction")]
    pub travel_direction: Direction,
}

impl TravelRow {
    pub fn from_leg(game_number: usize, sport: &str, leg: &GameLeg) -> Self {
        Self {
            game_number,
            sport: sport.to_string(),
            opponent: leg.game.opponent.clone(),
            game_date: leg.game.date,
            location: leg.game.location.clone(),
            home_away: leg.game.home_away,
            travel_distance_miles: leg.leg.distance_miles,
            travel_duration_hours: leg.leg.duration_hours,
            timezones_crossed: leg.leg.timezones_crossed,
            travel_direction: leg.leg.direction,
        }
    }

    pub fn game(&self) -> Game {
        Game::new(self.game_date, &self.opponent, &self.location, self.home_away)
    }

    pub fn leg(&self) -> TravelLeg {
        TravelLeg {
            distance_miles: self.travel_distance_miles,
            duration_hours: self.travel_duration_hours,
            timezones_crossed: self.timezones_crossed,
            direction: self.travel_direction,
        }
    }
}

/// Number every walked game from 1
pub fn travel_rows(sport: &str, legs: &[GameLeg]) -> Vec<TravelRow> {
    legs.iter()
        .enumerate()
        .map(|(i, leg)| TravelRow::from_leg(i + 1, sport, leg))
        .collect()
}

/// One row of the fatigue-extended report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FatigueRow {
    #[serde(rename = "Game_Number")]
    pub game_number: usize,
    #[serde(rename = "Sport")]
    pub sport: String,
    #[serde(rename = "Opponent")]
    pub opponent: String,
    #[serde(rename = "Game_Date")]
    pub game_date: NaiveDate,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Home_Away")]
    pub home_away: HomeAway,
    #[serde(rename = "Travel_Distance_Miles")]
    pub travel_distance_miles: f64,
    #[serde(rename = "Travel_Duration_Hours")]
    pub travel_duration_hours: f64,
    #[serde(rename = "Timezones_Crossed")]
    pub timezones_crossed: u32,
    #[serde(rename = "Travel_Direction")]
    pub travel_direction: Direction,
    #[serde(rename = "Days_Rest_Since_Last")]
    pub days_rest_since_last: i64,
    #[serde(rename = "Cumulative_Distance_Miles")]
    pub cumulative_distance_miles: f64,
    #[serde(rename = "Cumulative_Hours")]
    pub cumulative_hours: f64,
    #[serde(rename = "Travel_Fatigue_Component")]
    pub travel_fatigue_component: u32,
    #[serde(rename = "Timezone_Fatigue_Component")]
    pub timezone_fatigue_component: u32,
    #[serde(rename = "Rest_Fatigue_Component")]
    pub rest_fatigue_component: u32,
    #[serde(rename = "Consecutive_Game_Fatigue")]
    pub consecutive_game_fatigue: u32,
    #[serde(rename = "Overall_Fatigue_Score")]
    pub overall_fatigue_score: u32,
    #[serde(rename = "Fatigue_Level")]
    pub fatigue_level: FatigueLevel,
}

impl FatigueRow {
    pub fn from_record(sport: &str, record: &FatigueRecord) -> Self {
        Self {
            game_number: record.game_number,
            sport: sport.to_string(),
            opponent: record.game.opponent.clone(),
            game_date: record.game.date,
            location: record.game.location.clone(),
            home_away: record.game.home_away,
            travel_distance_miles: record.leg.distance_miles,
            travel_duration_hours: record.leg.duration_hours,
            timezones_crossed: record.leg.timezones_crossed,
            travel_direction: record.leg.direction,
            days_rest_since_last: record.rest_days,
            cumulative_distance_miles: record.cumulative_distance,
            cumulative_hours: record.cumulative_hours,
            travel_fatigue_component: record.components.travel,
            timezone_fatigue_component: record.components.timezone,
            rest_fatigue_component: record.components.rest,
            consecutive_game_fatigue: record.components.consecutive,
            overall_fatigue_score: record.overall_score,
            fatigue_level: record.level,
        }
    }

    pub fn components(&self) -> FatigueComponents {
        FatigueComponents {
            travel: self.travel_fatigue_component,
            timezone: self.timezone_fatigue_component,
            rest: self.rest_fatigue_component,
            consecutive: self.consecutive_game_fatigue,
        }
    }

    pub fn leg(&self) -> TravelLeg {
        TravelLeg {
            distance_miles: self.travel_distance_miles,
            duration_hours: self.travel_duration_hours,
            timezones_crossed: self.timezones_crossed,
            direction: self.travel_direction,
        }
    }
}

pub fn fatigue_rows(sport: &str, records: &[FatigueRecord]) -> Vec<FatigueRow> {
    records
        .iter()
        .map(|record| FatigueRow::from_record(sport, record))
        .collect()
}
