use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while deriving travel legs and fatigue scores.
///
/// Every game-scoped variant carries the 0-based game index and the
/// opponent so the caller can point at the offending schedule row.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TravelError {
    #[error("game {index} ({opponent}): unknown venue '{location}'")]
    UnknownVenue {
        index: usize,
        opponent: String,
        location: String,
    },

    #[error("home venue '{venue}' is not in the venue registry")]
    UnknownHomeVenue { venue: String },

    #[error("game {index} ({opponent}): date {current} is not after previous game date {previous}")]
    UnsortedSchedule {
        index: usize,
        opponent: String,
        previous: NaiveDate,
        current: NaiveDate,
    },

    #[error("line {line}: malformed field '{field}': {reason}")]
    MalformedRecord {
        line: usize,
        field: String,
        reason: String,
    },
}

impl TravelError {
    /// Index of the game the error refers to, if the error is game-scoped.
    pub fn game_index(&self) -> Option<usize> {
        match self {
            TravelError::UnknownVenue { index, .. } => Some(*index),
            TravelError::UnsortedSchedule { index, .. } => Some(*index),
            TravelError::UnknownHomeVenue { .. } => None,
            TravelError::MalformedRecord { .. } => None,
        }
    }

    pub fn malformed(line: usize, field: &str, reason: impl Into<String>) -> Self {
        TravelError::MalformedRecord {
            line,
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TravelError>;
