//! # tf_core - Season Travel & Fatigue Engine
//!
//! Derives per-game travel legs and fatigue scores from a season schedule.
//!
//! ## Features
//! - Great-circle legs with a ground/air duration model
//! - Stateful walk that follows the team across consecutive road games
//! - Four-component fatigue score with cumulative season totals
//! - Season summaries and a report audit that re-derives every column

#![allow(clippy::doc_lazy_continuation)]

pub mod analysis;
pub mod audit;
pub mod config;
pub mod engine;
pub mod error;
pub mod fatigue;
pub mod geo;
pub mod rows;
pub mod schedule;
pub mod travel;
pub mod venue;
pub mod walker;

// Re-export pipeline entry points
pub use engine::TravelEngine;
pub use error::{Result, TravelError};
pub use walker::{walk, GameLeg, TeamPosition, Walker};

// Re-export domain types
pub use config::{EngineConfig, FatigueConfig, NeutralSitePolicy, TravelModel};
pub use fatigue::{score, FatigueComponents, FatigueLevel, FatigueRecord};
pub use geo::{distance, Coordinate, EARTH_RADIUS_MILES};
pub use schedule::{Game, HomeAway};
pub use travel::{compute, Direction, TravelLeg};
pub use venue::{Venue, VenueRegistry, DEFAULT_HOME_VENUE};

// Re-export reporting
pub use analysis::{RoadTrip, SeasonSummary};
pub use audit::{AuditFinding, AuditReport, AuditTolerance, Auditor};
pub use rows::{fatigue_rows, travel_rows, FatigueRow, TravelRow};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn season() -> Vec<Game> {
        [
            ("2025-11-04", "Akron", "South Bend, IN", HomeAway::Home),
            ("2025-11-13", "Virginia", "Charlottesville, VA", HomeAway::Away),
            ("2025-12-04", "Michigan State", "Detroit, MI", HomeAway::Neutral),
            ("2026-01-29", "California", "Berkeley, CA", HomeAway::Away),
            ("2026-02-01", "Stanford", "Palo Alto, CA", HomeAway::Away),
            ("2026-02-05", "Duke", "South Bend, IN", HomeAway::Home),
        ]
        .into_iter()
        .map(|(date, opponent, location, home_away)| {
            Game::new(
                NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
                opponent,
                location,
                home_away,
            )
        })
        .collect()
    }

    #[test]
    fn test_season_run() {
        let records = TravelEngine::default().run(&season()).unwrap();
        assert_eq!(records.len(), 6);

        let stanford = &records[4];
        assert_eq!(stanford.leg.distance_miles, 30.4);
        assert_eq!(stanford.leg.direction, Direction::South);
        assert!((stanford.cumulative_distance - 2430.4).abs() < 1e-9);

        // Neutral site treated as home by default
        assert!(records[2].leg.is_home());
        assert!(records[5].leg.is_home());
    }

    #[test]
    fn test_determinism() {
        let engine = TravelEngine::default();
        let first = serde_json::to_string(&engine.run(&season()).unwrap()).unwrap();
        let second = serde_json::to_string(&engine.run(&season()).unwrap()).unwrap();
        assert_eq!(first, second, "Same schedule should produce the same records");
    }

    #[test]
    fn test_generated_reports_audit_clean() {
        let engine = TravelEngine::default();
        let legs = engine.walk(&season()).unwrap();
        let records = engine.score(&legs);
        let travel = travel_rows("Women's Basketball", &legs);
        let fatigue = fatigue_rows("Women's Basketball", &records);

        let report = Auditor::new(engine.registry(), DEFAULT_HOME_VENUE, engine.config())
            .audit(&travel, &fatigue);
        assert!(report.passed(), "unexpected errors: {:?}", report.errors);
    }
}
