//! Report audit: re-derive travel and fatigue values from emitted report
//! rows and diff them against what the rows claim.
//!
//! Findings are split into errors (the report is wrong) and warnings (the
//! report is plausible but worth a look, e.g. distance outliers).

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::EngineConfig;
use crate::rows::{FatigueRow, TravelRow};
use crate::schedule::HomeAway;
use crate::travel::{Direction, TravelLeg};
use crate::walker::{GameLeg, TeamPosition, Walker};
use crate::venue::VenueRegistry;

/// Allowed absolute differences between reported and re-derived values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AuditTolerance {
    pub miles: f64,
    pub hours: f64,
}

impl Default for AuditTolerance {
    fn default() -> Self {
        // One unit of the reported rounding
        Self {
            miles: 0.1,
            hours: 0.01,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditFinding {
    pub game_number: Option<usize>,
    pub message: String,
}

impl AuditFinding {
    fn game(game_number: usize, message: impl Into<String>) -> Self {
        Self {
            game_number: Some(game_number),
            message: message.into(),
        }
    }

    fn season(message: impl Into<String>) -> Self {
        Self {
            game_number: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for AuditFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.game_number {
            Some(n) => write!(f, "Game {}: {}", n, self.message),
            None => f.write_str(&self.message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AuditReport {
    pub errors: Vec<AuditFinding>,
    pub warnings: Vec<AuditFinding>,
}

impl AuditReport {
    /// No errors (warnings allowed)
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    /// No errors and no warnings
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    pub fn merge(&mut self, other: AuditReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    fn error(&mut self, finding: AuditFinding) {
        self.errors.push(finding);
    }

    fn warning(&mut self, finding: AuditFinding) {
        warn!(%finding, "audit warning");
        self.warnings.push(finding);
    }
}

/// Re-derives report values against a registry and engine configuration
#[derive(Debug, Clone, Copy)]
pub struct Auditor<'a> {
    pub registry: &'a VenueRegistry,
    pub home_venue: &'a str,
    pub config: &'a EngineConfig,
    pub tolerance: AuditTolerance,
}

impl<'a> Auditor<'a> {
    pub fn new(registry: &'a VenueRegistry, home_venue: &'a str, config: &'a EngineConfig) -> Self {
        Self {
            registry,
            home_venue,
            config,
            tolerance: AuditTolerance::default(),
        }
    }

    pub fn with_tolerance(mut self, tolerance: AuditTolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Both audits over a travel report and its fatigue extension
    pub fn audit(&self, travel: &[TravelRow], fatigue: &[FatigueRow]) -> AuditReport {
        let mut report = self.audit_trips(travel);
        report.merge(self.audit_fatigue(travel, fatigue));
        report
    }

    /// Re-walk the season trip by trip and compare every leg
    pub fn audit_trips(&self, rows: &[TravelRow]) -> AuditReport {
        let mut report = AuditReport::default();
        let Some(home) = self.registry.lookup(self.home_venue) else {
            report.error(AuditFinding::season(format!(
                "home venue '{}' not in venue registry",
                self.home_venue
            )));
            return report;
        };

        let walker = Walker::new(self.registry, &self.config.travel, self.config.neutral_site);
        let mut position = TeamPosition::at_home(home);

        for (index, row) in rows.iter().enumerate() {
            let origin = position.current().id.clone();
            let expected = match walker.step(&mut position, index, &row.game()) {
                Ok(leg) => leg,
                Err(_) => {
                    report.error(AuditFinding::game(
                        row.game_number,
                        format!("unknown location '{}'", row.location),
                    ));
                    continue;
                }
            };
            self.compare_leg(&mut report, row.game_number, &origin, &row.location, &row.leg(), &expected);
        }
        report
    }

    fn compare_leg(
        &self,
        report: &mut AuditReport,
        game_number: usize,
        origin: &str,
        destination: &str,
        actual: &TravelLeg,
        expected: &TravelLeg,
    ) {
        let miles_diff = actual.distance_miles - expected.distance_miles;
        if miles_diff.abs() > self.tolerance.miles + 1e-9 {
            report.error(AuditFinding::game(
                game_number,
                format!(
                    "{} -> {}: distance {:.1} mi, expected {:.1} mi ({:+.1})",
                    origin, destination, actual.distance_miles, expected.distance_miles, miles_diff
                ),
            ));
        }
        let hours_diff = actual.duration_hours - expected.duration_hours;
        if hours_diff.abs() > self.tolerance.hours + 1e-9 {
            report.error(AuditFinding::game(
                game_number,
                format!(
                    "{} -> {}: duration {:.2} h, expected {:.2} h ({:+.2})",
                    origin, destination, actual.duration_hours, expected.duration_hours, hours_diff
                ),
            ));
        }
        if actual.timezones_crossed != expected.timezones_crossed {
            report.error(AuditFinding::game(
                game_number,
                format!(
                    "timezones crossed {}, expected {}",
                    actual.timezones_crossed, expected.timezones_crossed
                ),
            ));
        }
        if actual.direction != expected.direction {
            report.error(AuditFinding::game(
                game_number,
                format!("direction {}, expected {}", actual.direction, expected.direction),
            ));
        }
    }

    /// Integrity of the fatigue report, on its own and against the base report
    pub fn audit_fatigue(&self, travel: &[TravelRow], fatigue: &[FatigueRow]) -> AuditReport {
        let mut report = AuditReport::default();
        self.check_consistency(&mut report, travel, fatigue);
        self.check_fatigue_rows(&mut report, fatigue);
        self.check_travel_patterns(&mut report, fatigue);
        self.check_rederived(&mut report, travel, fatigue);
        report
    }

    fn check_consistency(&self, report: &mut AuditReport, travel: &[TravelRow], fatigue: &[FatigueRow]) {
        if travel.len() != fatigue.len() {
            report.error(AuditFinding::season(format!(
                "game count mismatch: travel report {}, fatigue report {}",
                travel.len(),
                fatigue.len()
            )));
        }
        for (base, ext) in travel.iter().zip(fatigue) {
            let n = ext.game_number;
            if base.game_date != ext.game_date {
                report.error(AuditFinding::game(
                    n,
                    format!("date {} vs {} between reports", base.game_date, ext.game_date),
                ));
            }
            if base.opponent != ext.opponent {
                report.error(AuditFinding::game(
                    n,
                    format!("opponent '{}' vs '{}' between reports", base.opponent, ext.opponent),
                ));
            }
            if base.home_away != ext.home_away {
                report.error(AuditFinding::game(
                    n,
                    format!("home/away {} vs {} between reports", base.home_away, ext.home_away),
                ));
            }
            if (base.travel_distance_miles - ext.travel_distance_miles).abs() > self.tolerance.miles {
                report.warning(AuditFinding::game(n, "distance differs between reports"));
            }
            if (base.travel_duration_hours - ext.travel_duration_hours).abs() > self.tolerance.hours {
                report.warning(AuditFinding::game(n, "duration differs between reports"));
            }
        }
    }

    fn check_fatigue_rows(&self, report: &mut AuditReport, fatigue: &[FatigueRow]) {
        let cfg = &self.config.fatigue;

        for pair in fatigue.windows(2) {
            let (prev, row) = (&pair[0], &pair[1]);
            if row.cumulative_distance_miles < prev.cumulative_distance_miles {
                report.error(AuditFinding::game(
                    row.game_number,
                    format!(
                        "cumulative distance decreased {:.1} -> {:.1}",
                        prev.cumulative_distance_miles, row.cumulative_distance_miles
                    ),
                ));
            }
            if row.cumulative_hours < prev.cumulative_hours {
                report.error(AuditFinding::game(
                    row.game_number,
                    format!(
                        "cumulative hours decreased {:.1} -> {:.1}",
                        prev.cumulative_hours, row.cumulative_hours
                    ),
                ));
            }
            let expected_rest = (row.game_date - prev.game_date).num_days();
            if row.days_rest_since_last != expected_rest {
                report.error(AuditFinding::game(
                    row.game_number,
                    format!(
                        "rest days recorded as {} but dates give {}",
                        row.days_rest_since_last, expected_rest
                    ),
                ));
            }
        }

        let travel_max = cfg
            .travel_bands
            .iter()
            .map(|&(_, p)| p)
            .chain(std::iter::once(cfg.travel_max_points))
            .max()
            .unwrap_or(0);
        let rest_max = cfg
            .rest_back_to_back_points
            .max(cfg.rest_two_day_points)
            .max(cfg.rest_three_day_points);
        let consecutive_max = cfg.streak_points.max(cfg.single_carry_points);

        for row in fatigue {
            let n = row.game_number;
            if row.overall_fatigue_score > cfg.score_cap {
                report.error(AuditFinding::game(
                    n,
                    format!("fatigue score {} outside 0-{}", row.overall_fatigue_score, cfg.score_cap),
                ));
            }
            let components = row.components();
            let bounds = [
                ("travel", components.travel, Some(travel_max)),
                ("timezone", components.timezone, cfg.timezone_cap),
                ("rest", components.rest, Some(rest_max)),
                ("consecutive", components.consecutive, Some(consecutive_max)),
            ];
            for (name, value, max) in bounds {
                if let Some(max) = max {
                    if value > max {
                        report.warning(AuditFinding::game(
                            n,
                            format!("{} component {} above its maximum {}", name, value, max),
                        ));
                    }
                }
            }
            if row.overall_fatigue_score != cfg.overall(&components) {
                report.error(AuditFinding::game(
                    n,
                    format!(
                        "score {} is not the capped sum of its components ({})",
                        row.overall_fatigue_score,
                        cfg.overall(&components)
                    ),
                ));
            }
            let expected_level = cfg.level(row.overall_fatigue_score);
            if row.fatigue_level != expected_level {
                report.error(AuditFinding::game(
                    n,
                    format!(
                        "score {} mapped to '{}' but should be '{}'",
                        row.overall_fatigue_score, row.fatigue_level, expected_level
                    ),
                ));
            }
        }
    }

    fn check_travel_patterns(&self, report: &mut AuditReport, fatigue: &[FatigueRow]) {
        let span = self.registry.offset_span();
        // Where the team was before each game; only away games leave it there
        let mut at = self.home_venue.trim();
        for row in fatigue {
            let n = row.game_number;
            let location = row.location.trim();
            match row.home_away {
                HomeAway::Away => {
                    if row.travel_distance_miles <= 0.0 && location != at {
                        report.error(AuditFinding::game(
                            n,
                            format!("away game shows 0 miles travel from {} to {}", at, location),
                        ));
                    }
                }
                HomeAway::Home => {
                    if row.travel_distance_miles > 0.0 || row.travel_duration_hours > 0.0 {
                        report.error(AuditFinding::game(n, "home game shows travel"));
                    }
                    if row.timezones_crossed > 0 {
                        report.error(AuditFinding::game(n, "home game shows timezone crossing"));
                    }
                    if row.travel_direction != Direction::Home {
                        report.error(AuditFinding::game(
                            n,
                            format!("home game has direction {}", row.travel_direction),
                        ));
                    }
                }
                HomeAway::Neutral => {}
            }
            at = if row.home_away.is_away() {
                location
            } else {
                self.home_venue.trim()
            };
            if row.timezones_crossed > span {
                report.warning(AuditFinding::game(
                    n,
                    format!(
                        "{} timezones crossed exceeds registry span {}",
                        row.timezones_crossed, span
                    ),
                ));
            }
        }

        let away: Vec<&FatigueRow> = fatigue
            .iter()
            .filter(|r| r.home_away.is_away())
            .collect();
        if away.len() > 1 {
            let n = away.len() as f64;
            let mean = away.iter().map(|r| r.travel_distance_miles).sum::<f64>() / n;
            let variance = away
                .iter()
                .map(|r| (r.travel_distance_miles - mean).powi(2))
                .sum::<f64>()
                / (n - 1.0);
            let std = variance.sqrt();
            for row in away {
                if (row.travel_distance_miles - mean).abs() > 3.0 * std {
                    report.warning(AuditFinding::game(
                        row.game_number,
                        format!(
                            "{} distance {:.1} mi is a 3-sigma outlier (mean {:.0}, std {:.0})",
                            row.opponent, row.travel_distance_miles, mean, std
                        ),
                    ));
                }
            }
        }
    }

    /// Re-score the base report and diff the fatigue columns
    fn check_rederived(&self, report: &mut AuditReport, travel: &[TravelRow], fatigue: &[FatigueRow]) {
        let legs: Vec<GameLeg> = travel
            .iter()
            .map(|row| GameLeg {
                game: row.game(),
                leg: row.leg(),
            })
            .collect();
        let expected = self.config.fatigue.score(&legs);

        for (row, want) in fatigue.iter().zip(&expected) {
            let n = row.game_number;
            if row.components() != want.components {
                report.error(AuditFinding::game(
                    n,
                    format!(
                        "components {:?}, re-derived {:?}",
                        row.components(),
                        want.components
                    ),
                ));
            }
            if row.overall_fatigue_score != want.overall_score {
                report.error(AuditFinding::game(
                    n,
                    format!(
                        "score {}, re-derived {}",
                        row.overall_fatigue_score, want.overall_score
                    ),
                ));
            }
            if (row.cumulative_distance_miles - want.cumulative_distance).abs() > self.tolerance.miles {
                report.error(AuditFinding::game(
                    n,
                    format!(
                        "cumulative distance {:.1}, re-derived {:.1}",
                        row.cumulative_distance_miles, want.cumulative_distance
                    ),
                ));
            }
            if (row.cumulative_hours - want.cumulative_hours).abs() > 0.1 + 1e-9 {
                report.error(AuditFinding::game(
                    n,
                    format!(
                        "cumulative hours {:.1}, re-derived {:.1}",
                        row.cumulative_hours, want.cumulative_hours
                    ),
                ));
            }
        }
    }
}
