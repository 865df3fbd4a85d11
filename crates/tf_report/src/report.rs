//! Schedule ingestion and report CSV I/O
//!
//! Schedule files carry `date, opponent, location, home_away` columns.
//! Report files use the fixed column order of `tf_core::rows`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tf_core::{FatigueRow, Game, TravelRow};

/// Raw schedule row; blank and absent columns are both empty strings
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ScheduleRecord {
    date: String,
    opponent: String,
    location: String,
    home_away: String,
}

/// Read a season schedule. Fails on the first bad row, naming its line.
pub fn read_schedule(path: &Path) -> Result<Vec<Game>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Failed to open schedule file: {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read schedule header: {}", path.display()))?
        .clone();

    let mut games = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record
            .with_context(|| format!("Failed to read schedule row {}: {}", row + 1, path.display()))?;
        // Header is line 1
        let line = record.position().map_or(row + 2, |p| p.line() as usize);
        let raw: ScheduleRecord = record
            .deserialize(Some(&headers))
            .with_context(|| format!("Failed to decode line {}: {}", line, path.display()))?;

        let game = Game::parse(line, &raw.date, &raw.opponent, &raw.location, &raw.home_away)
            .with_context(|| format!("Invalid schedule file: {}", path.display()))?;
        games.push(game);
    }

    tracing::debug!(games = games.len(), path = %path.display(), "schedule loaded");
    Ok(games)
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create report file: {}", path.display()))?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write report row: {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush report file: {}", path.display()))?;
    Ok(())
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open report file: {}", path.display()))?;
    reader
        .deserialize()
        .enumerate()
        .map(|(row, result)| {
            result.with_context(|| {
                format!("Failed to decode report row {}: {}", row + 1, path.display())
            })
        })
        .collect()
}

pub fn write_travel_report(path: &Path, rows: &[TravelRow]) -> Result<()> {
    write_rows(path, rows)
}

/// Base travel columns followed by the fatigue extension columns
pub fn write_fatigue_report(path: &Path, rows: &[FatigueRow]) -> Result<()> {
    write_rows(path, rows)
}

pub fn read_travel_report(path: &Path) -> Result<Vec<TravelRow>> {
    read_rows(path)
}

pub fn read_fatigue_report(path: &Path) -> Result<Vec<FatigueRow>> {
    read_rows(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};
    use tf_core::{fatigue_rows, travel_rows, HomeAway, TravelEngine, TravelError};

    fn schedule_file(body: &str) -> Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "date,opponent,location,home_away")?;
        file.write_all(body.as_bytes())?;
        Ok(file)
    }

    #[test]
    fn test_read_schedule() -> Result<()> {
        let file = schedule_file(
            "2025-11-04,Akron,\"South Bend, IN\",Home\n\
             2025-11-13,Virginia,\"Charlottesville, VA\",away\n",
        )?;

        let games = read_schedule(file.path())?;
        assert_eq!(games.len(), 2);
        assert_eq!(games[1].location, "Charlottesville, VA");
        assert_eq!(games[1].home_away, HomeAway::Away);

        Ok(())
    }

    #[test]
    fn test_blank_field_reports_line() -> Result<()> {
        let file = schedule_file(
            "2025-11-04,Akron,\"South Bend, IN\",Home\n\
             2025-11-13,Virginia,,Away\n",
        )?;

        let err = read_schedule(file.path()).unwrap_err();
        let core = err
            .downcast_ref::<TravelError>()
            .expect("malformed record should surface");
        assert_eq!(
            core,
            &TravelError::MalformedRecord {
                line: 3,
                field: "location".to_string(),
                reason: "missing value".to_string(),
            }
        );

        Ok(())
    }

    #[test]
    fn test_bad_home_away_rejected() -> Result<()> {
        let file = schedule_file("2025-11-04,Akron,\"South Bend, IN\",Road\n")?;

        let err = read_schedule(file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TravelError>(),
            Some(TravelError::MalformedRecord { line: 2, .. })
        ));

        Ok(())
    }

    #[test]
    fn test_reports_survive_the_filesystem() -> Result<()> {
        let file = schedule_file(
            "2025-11-04,Akron,\"South Bend, IN\",Home\n\
             2026-01-29,California,\"Berkeley, CA\",Away\n\
             2026-02-01,Stanford,\"Palo Alto, CA\",Away\n",
        )?;
        let games = read_schedule(file.path())?;
        let engine = TravelEngine::default();
        let legs = engine.walk(&games)?;
        let records = engine.score(&legs);

        let dir = tempdir()?;
        let travel_path = dir.path().join("out/travel.csv");
        let fatigue_path = dir.path().join("out/fatigue.csv");
        let travel = travel_rows("Women's Basketball", &legs);
        let fatigue = fatigue_rows("Women's Basketball", &records);
        write_travel_report(&travel_path, &travel)?;
        write_fatigue_report(&fatigue_path, &fatigue)?;

        let text = fs::read_to_string(&travel_path)?;
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some(
                "Game_Number,Sport,Opponent,Game_Date,Location,Home_Away,\
                 Travel_Distance_Miles,Travel_Duration_Hours,Timezones_Crossed,Travel_Direction"
            )
        );
        assert_eq!(
            lines.nth(2),
            Some("3,Women's Basketball,Stanford,2026-02-01,\"Palo Alto, CA\",Away,30.4,0.55,0,South")
        );

        assert_eq!(read_travel_report(&travel_path)?, travel);
        assert_eq!(read_fatigue_report(&fatigue_path)?, fatigue);

        Ok(())
    }
}
