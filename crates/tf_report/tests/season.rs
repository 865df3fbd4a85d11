//! Shipped season schedules through the full report pipeline

use std::path::PathBuf;

use anyhow::Result;
use tempfile::tempdir;
use tf_core::{Auditor, Direction, FatigueLevel, HomeAway, NeutralSitePolicy, SeasonSummary};
use tf_report::{
    build_reports, load_config, read_fatigue_report, read_schedule, read_travel_report,
    write_fatigue_report, write_season_chart, write_travel_report, SeasonConfig,
};

fn data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../data")
        .join(name)
}

#[test]
fn test_corrected_season_reports() -> Result<()> {
    let config = load_config(&data("season.yaml"))?;
    let reports = build_reports(&data("nd_wbb_2025_26.csv"), &config)?;
    assert_eq!(reports.travel.len(), 30);

    // Blacksburg straight on to Berkeley, then a short hop to Stanford
    let cal = &reports.fatigue[21];
    assert_eq!(cal.opponent, "California");
    assert_eq!(cal.travel_distance_miles, 2273.2);
    assert_eq!(cal.timezones_crossed, 3);
    assert_eq!(cal.overall_fatigue_score, 70);
    assert_eq!(cal.fatigue_level, FatigueLevel::VeryHigh);

    let stanford = &reports.travel[22];
    assert_eq!(stanford.travel_distance_miles, 30.4);
    assert_eq!(stanford.travel_direction, Direction::South);

    let oklahoma = &reports.travel[4];
    assert_eq!(oklahoma.travel_distance_miles, 1133.5);
    assert_eq!(oklahoma.travel_duration_hours, 6.27);

    // Running hours sit on an exact tie here and round to even
    let virginia = &reports.fatigue[24];
    assert_eq!(virginia.opponent, "Virginia");
    assert!((virginia.cumulative_hours - 100.8).abs() < 1e-9);

    let last = reports.fatigue.last().unwrap();
    assert!((last.cumulative_distance_miles - 13495.2).abs() < 1e-9);
    assert!((last.cumulative_hours - 114.8).abs() < 1e-9);

    for row in reports.fatigue.iter().filter(|r| r.home_away == HomeAway::Home) {
        assert_eq!(row.travel_distance_miles, 0.0);
        assert_eq!(row.travel_direction, Direction::Home);
    }

    Ok(())
}

#[test]
fn test_written_reports_pass_audit() -> Result<()> {
    let config = SeasonConfig::default();
    let reports = build_reports(&data("nd_wbb_2025_26.csv"), &config)?;

    let dir = tempdir()?;
    let travel_path = dir.path().join("travel.csv");
    let fatigue_path = dir.path().join("fatigue.csv");
    write_travel_report(&travel_path, &reports.travel)?;
    write_fatigue_report(&fatigue_path, &reports.fatigue)?;

    let travel = read_travel_report(&travel_path)?;
    let fatigue = read_fatigue_report(&fatigue_path)?;
    let registry = config.registry();
    let audit = Auditor::new(&registry, &config.home_venue, &config.engine).audit(&travel, &fatigue);
    assert!(audit.passed(), "unexpected errors: {:?}", audit.errors);

    Ok(())
}

#[test]
fn test_season_chart_written() -> Result<()> {
    let config = load_config(&data("season.yaml"))?;
    let games = read_schedule(&data("nd_wbb_2025_26.csv"))?;
    let records = config.engine()?.run(&games)?;

    let dir = tempdir()?;
    let path = dir.path().join("season.svg");
    write_season_chart(&path, &records, &config)?;

    let svg = std::fs::read_to_string(&path)?;
    assert!(svg.contains("Cumulative travel distance"));
    assert!(svg.matches("<circle").count() >= records.len());

    Ok(())
}

#[test]
fn test_season_summary() -> Result<()> {
    let config = SeasonConfig::default();
    let games = read_schedule(&data("nd_wbb_2025_26.csv"))?;
    let records = config.engine()?.run(&games)?;
    let summary = SeasonSummary::from_records(&records, 3);

    assert_eq!(summary.counts.total, 30);
    assert_eq!(summary.counts.home, 10);
    assert_eq!(summary.counts.away, 20);
    assert_eq!(summary.top_fatigue[0].opponent, "California");
    assert_eq!(summary.critical.len(), 1);

    let trips: Vec<Vec<usize>> = summary.road_trips.iter().map(|t| t.games.clone()).collect();
    assert_eq!(
        trips,
        vec![
            vec![4, 5],
            vec![7, 8, 9],
            vec![13, 14],
            vec![16, 17, 18, 19, 20, 21, 22, 23],
            vec![25, 26],
            vec![29],
        ]
    );
    assert!(summary.road_trips.iter().all(|t| !t.open_ended));

    Ok(())
}

#[test]
fn test_draft_neutral_site_policies() -> Result<()> {
    let schedule = data("nd_wbb_2025_26_draft.csv");

    let as_home = build_reports(&schedule, &SeasonConfig::default())?;
    let detroit = &as_home.travel[4];
    assert_eq!(detroit.home_away, HomeAway::Neutral);
    assert_eq!(detroit.travel_distance_miles, 0.0);

    let mut config = SeasonConfig::default();
    config.engine.neutral_site = NeutralSitePolicy::Travel;
    let travel = build_reports(&schedule, &config)?;
    let detroit = &travel.fatigue[4];
    assert_eq!(detroit.travel_distance_miles, 169.6);
    assert_eq!(detroit.timezones_crossed, 1);
    // Neutral sites never feed the away streak
    assert_eq!(detroit.consecutive_game_fatigue, 0);

    let gap = travel.fatigue.last().unwrap().cumulative_distance_miles
        - as_home.fatigue.last().unwrap().cumulative_distance_miles;
    assert!((gap - 169.6).abs() < 1e-6);

    Ok(())
}
