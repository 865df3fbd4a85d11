//! Season pipeline: validate, walk, score.

use tracing::info;

use crate::config::EngineConfig;
use crate::error::{Result, TravelError};
use crate::fatigue::FatigueRecord;
use crate::schedule::{validate_order, Game};
use crate::venue::{Venue, VenueRegistry};
use crate::walker::{GameLeg, Walker};

/// Owns the registry, home venue and model for a season run
#[derive(Debug, Clone)]
pub struct TravelEngine {
    registry: VenueRegistry,
    home_venue: String,
    config: EngineConfig,
}

impl TravelEngine {
    /// Fails if `home_venue` is not registered
    pub fn new(
        registry: VenueRegistry,
        home_venue: impl Into<String>,
        config: EngineConfig,
    ) -> Result<Self> {
        let home_venue = home_venue.into();
        if !registry.contains(&home_venue) {
            return Err(TravelError::UnknownHomeVenue { venue: home_venue });
        }
        Ok(Self {
            registry,
            home_venue,
            config,
        })
    }

    pub fn registry(&self) -> &VenueRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn home(&self) -> Result<&Venue> {
        self.registry
            .lookup(&self.home_venue)
            .ok_or_else(|| TravelError::UnknownHomeVenue {
                venue: self.home_venue.clone(),
            })
    }

    fn walker(&self) -> Walker<'_> {
        Walker::new(
            &self.registry,
            &self.config.travel,
            self.config.neutral_site,
        )
    }

    /// Check every precondition before any derivation starts
    pub fn validate(&self, games: &[Game]) -> Result<()> {
        validate_order(games)?;
        let walker = self.walker();
        for (index, game) in games.iter().enumerate() {
            if walker.needs_venue(game) {
                walker.resolve(index, game)?;
            }
        }
        Ok(())
    }

    pub fn walk(&self, games: &[Game]) -> Result<Vec<GameLeg>> {
        self.walker().walk(self.home()?, games)
    }

    pub fn score(&self, legs: &[GameLeg]) -> Vec<FatigueRecord> {
        self.config.fatigue.score(legs)
    }

    /// Full season derivation; all-or-nothing
    pub fn run(&self, games: &[Game]) -> Result<Vec<FatigueRecord>> {
        self.validate(games)?;
        let legs = self.walk(games)?;
        let records = self.score(&legs);

        let miles = records.last().map(|r| r.cumulative_distance).unwrap_or(0.0);
        info!(games = records.len(), miles, "season scored");
        Ok(records)
    }
}

impl Default for TravelEngine {
    fn default() -> Self {
        Self {
            registry: VenueRegistry::builtin(),
            home_venue: crate::venue::DEFAULT_HOME_VENUE.to_string(),
            config: EngineConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fatigue::FatigueLevel;
    use crate::schedule::HomeAway;
    use crate::travel::{Direction, TravelLeg};
    use chrono::NaiveDate;

    fn game(date: &str, opponent: &str, location: &str, home_away: HomeAway) -> Game {
        Game::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            opponent,
            location,
            home_away,
        )
    }

    #[test]
    fn test_end_to_end_charlottesville() {
        let engine = TravelEngine::default();
        let games = vec![
            game("2026-02-05", "Virginia Tech", "South Bend, IN", HomeAway::Home),
            game("2026-02-08", "Virginia", "Charlottesville, VA", HomeAway::Away),
            game("2026-02-14", "NC State", "South Bend, IN", HomeAway::Home),
        ];
        let records = engine.run(&games).unwrap();

        let trip = &records[1];
        assert!((trip.leg.distance_miles - 483.4).abs() <= 1.0);
        assert_eq!(trip.leg.timezones_crossed, 1);
        assert_eq!(trip.leg.direction, Direction::Eastbound);
        // travel 5 + timezone 5 + rest (3 days) 5
        assert_eq!(trip.overall_score, 15);
        assert_eq!(trip.level, FatigueLevel::Low);

        assert_eq!(records[2].leg, TravelLeg::HOME);
        assert_eq!(records[2].cumulative_distance, 483.4);
    }

    #[test]
    fn test_run_rejects_unsorted_before_walking() {
        let engine = TravelEngine::default();
        let games = vec![
            game("2026-02-08", "Virginia", "Honolulu, HI", HomeAway::Away),
            game("2026-02-05", "Virginia Tech", "South Bend, IN", HomeAway::Home),
        ];
        // Ordering is checked first, so the unknown venue is not what fails
        let err = engine.run(&games).unwrap_err();
        assert!(matches!(err, TravelError::UnsortedSchedule { index: 1, .. }));
    }

    #[test]
    fn test_run_all_or_nothing_on_unknown_venue() {
        let engine = TravelEngine::default();
        let games = vec![
            game("2026-02-05", "Virginia Tech", "South Bend, IN", HomeAway::Home),
            game("2026-02-08", "Virginia", "Charlottesville, VA", HomeAway::Away),
            game("2026-02-14", "Hawaii", "Honolulu, HI", HomeAway::Away),
        ];
        let err = engine.run(&games).unwrap_err();
        assert_eq!(err.game_index(), Some(2));
    }

    #[test]
    fn test_neutral_travel_requires_registered_venue() {
        let engine = TravelEngine::new(
            VenueRegistry::builtin(),
            "South Bend, IN",
            EngineConfig::neutral_travel(),
        )
        .unwrap();
        let games = vec![game("2025-11-15", "Michigan", "Ford Field", HomeAway::Neutral)];
        assert!(matches!(
            engine.run(&games),
            Err(TravelError::UnknownVenue { index: 0, .. })
        ));

        assert!(TravelEngine::default().run(&games).is_ok());
    }

    #[test]
    fn test_unknown_home_venue_rejected() {
        let err = TravelEngine::new(VenueRegistry::builtin(), "Nowhere, ZZ", EngineConfig::default())
            .unwrap_err();
        assert_eq!(
            err,
            TravelError::UnknownHomeVenue {
                venue: "Nowhere, ZZ".to_string()
            }
        );
    }
}
