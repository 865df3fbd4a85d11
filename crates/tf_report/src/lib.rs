//! Season Travel Reports
//!
//! Schedule CSV → travel/fatigue report CSVs, SVG charts, season summaries
//! and report audits on top of `tf_core`.

pub mod chart;
pub mod config;
pub mod report;

use anyhow::Result;
use std::path::Path;
use tf_core::{fatigue_rows, travel_rows, FatigueRow, TravelRow};

pub use chart::write_season_chart;
pub use config::{load_config, load_or_default, SeasonConfig, VenueEntry};
pub use report::{
    read_fatigue_report, read_schedule, read_travel_report, write_fatigue_report,
    write_travel_report,
};

/// Both reports for one schedule file
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonReports {
    pub travel: Vec<TravelRow>,
    pub fatigue: Vec<FatigueRow>,
}

/// Read, validate, walk and score a schedule file
pub fn build_reports(schedule: &Path, config: &SeasonConfig) -> Result<SeasonReports> {
    let games = read_schedule(schedule)?;
    let engine = config.engine()?;
    engine.validate(&games)?;

    let legs = engine.walk(&games)?;
    let records = engine.score(&legs);
    tracing::info!(
        games = records.len(),
        schedule = %schedule.display(),
        "reports built"
    );

    Ok(SeasonReports {
        travel: travel_rows(&config.sport, &legs),
        fatigue: fatigue_rows(&config.sport, &records),
    })
}
