//! Schedule data: games and their ordering precondition.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TravelError};

/// Where a game is played relative to the team's home venue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HomeAway {
    Home,
    Away,
    Neutral,
}

impl HomeAway {
    pub fn as_str(&self) -> &'static str {
        match self {
            HomeAway::Home => "Home",
            HomeAway::Away => "Away",
            HomeAway::Neutral => "Neutral",
        }
    }

    pub fn is_away(&self) -> bool {
        matches!(self, HomeAway::Away)
    }
}

impl fmt::Display for HomeAway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HomeAway {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" => Ok(HomeAway::Home),
            "away" => Ok(HomeAway::Away),
            "neutral" => Ok(HomeAway::Neutral),
            other => Err(format!("expected Home, Away or Neutral, found '{}'", other)),
        }
    }
}

/// One scheduled game. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub date: NaiveDate,
    pub opponent: String,
    /// Venue id in `"City, ST"` form
    pub location: String,
    pub home_away: HomeAway,
}

impl Game {
    pub fn new(
        date: NaiveDate,
        opponent: impl Into<String>,
        location: impl Into<String>,
        home_away: HomeAway,
    ) -> Self {
        Self {
            date,
            opponent: opponent.into(),
            location: location.into(),
            home_away,
        }
    }

    /// Build a game from raw text fields, as read from a schedule file.
    ///
    /// `line` is the 1-based source line used in error messages.
    pub fn parse(
        line: usize,
        date: &str,
        opponent: &str,
        location: &str,
        home_away: &str,
    ) -> Result<Self> {
        let date_text = required(line, "date", date)?;
        let date = NaiveDate::parse_from_str(date_text, "%Y-%m-%d")
            .map_err(|e| TravelError::malformed(line, "date", format!("'{}': {}", date_text, e)))?;
        let opponent = required(line, "opponent", opponent)?;
        let location = required(line, "location", location)?;
        let home_away = required(line, "home_away", home_away)?
            .parse::<HomeAway>()
            .map_err(|e| TravelError::malformed(line, "home_away", e))?;

        Ok(Game::new(date, opponent, location, home_away))
    }
}

fn required<'a>(line: usize, field: &str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(TravelError::malformed(line, field, "missing value"));
    }
    Ok(value)
}

/// Require strictly increasing game dates.
pub fn validate_order(games: &[Game]) -> Result<()> {
    for (index, pair) in games.windows(2).enumerate() {
        let (previous, current) = (&pair[0], &pair[1]);
        if current.date <= previous.date {
            return Err(TravelError::UnsortedSchedule {
                index: index + 1,
                opponent: current.opponent.clone(),
                previous: previous.date,
                current: current.date,
            });
        }
    }
    Ok(())
}

/// Whole days between consecutive games; 0 for the first game
pub fn rest_days(games: &[Game], index: usize) -> i64 {
    if index == 0 || index >= games.len() {
        return 0;
    }
    (games[index].date - games[index - 1].date).num_days()
}
