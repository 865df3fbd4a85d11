//! Static season charts (SVG)
//!
//! One file, four stacked panels sharing the game-number axis:
//! travel distance, rest days, cumulative miles and fatigue score.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use tf_core::{FatigueConfig, FatigueLevel, FatigueRecord};

use crate::config::SeasonConfig;

const WIDTH: u32 = 1200;
const PANEL_HEIGHT: u32 = 320;

type Panel<'a> = DrawingArea<SVGBackend<'a>, Shift>;

fn chart_err(err: impl std::fmt::Display) -> anyhow::Error {
    anyhow!("Chart rendering failed: {}", err)
}

/// Marker colour per fatigue band
pub fn level_color(level: FatigueLevel) -> RGBColor {
    match level {
        FatigueLevel::Low => RGBColor(46, 160, 67),
        FatigueLevel::Moderate => RGBColor(230, 190, 0),
        FatigueLevel::High => RGBColor(240, 120, 20),
        FatigueLevel::VeryHigh => RGBColor(210, 30, 30),
    }
}

/// Render the season chart for scored `records` to `path`
pub fn write_season_chart(
    path: &Path,
    records: &[FatigueRecord],
    config: &SeasonConfig,
) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    let title = match &config.team {
        Some(team) => format!("{} {} - Travel & Fatigue", team, config.sport),
        None => format!("{} - Travel & Fatigue", config.sport),
    };

    let root = SVGBackend::new(path, (WIDTH, PANEL_HEIGHT * 4 + 60)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;
    let root = root.titled(&title, ("sans-serif", 28)).map_err(chart_err)?;
    let panels = root.split_evenly((4, 1));

    // Game numbers start at 1; leave half a slot either side
    let games = records.len().max(1) as f64 + 0.5;

    draw_distance(&panels[0], records, games)?;
    draw_rest(&panels[1], records, games)?;
    draw_cumulative(&panels[2], records, games)?;
    draw_fatigue(&panels[3], records, games, &config.engine.fatigue)?;

    root.present().map_err(chart_err)?;
    tracing::debug!(games = records.len(), path = %path.display(), "chart written");
    Ok(())
}

fn draw_distance(area: &Panel<'_>, records: &[FatigueRecord], games: f64) -> Result<()> {
    let max_miles = records
        .iter()
        .map(|r| r.leg.distance_miles)
        .fold(100.0, f64::max)
        * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption("Travel distance per game", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(0.5f64..games, 0f64..max_miles)
        .map_err(chart_err)?;
    chart
        .configure_mesh()
        .x_desc("Game")
        .y_desc("Miles")
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(
            records
                .iter()
                .filter(|r| r.leg.distance_miles > 0.0)
                .map(|r| {
                    let x = r.game_number as f64;
                    Rectangle::new(
                        [(x - 0.35, 0.0), (x + 0.35, r.leg.distance_miles)],
                        BLUE.mix(0.7).filled(),
                    )
                }),
        )
        .map_err(chart_err)?;
    Ok(())
}

fn draw_rest(area: &Panel<'_>, records: &[FatigueRecord], games: f64) -> Result<()> {
    // First game has no predecessor
    let rest: Vec<(f64, f64)> = records
        .iter()
        .skip(1)
        .map(|r| (r.game_number as f64, r.rest_days as f64))
        .collect();
    let max_rest = rest.iter().map(|&(_, d)| d).fold(7.0, f64::max) + 1.0;

    let mut chart = ChartBuilder::on(area)
        .caption("Rest days since previous game", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(0.5f64..games, 0f64..max_rest)
        .map_err(chart_err)?;
    chart
        .configure_mesh()
        .x_desc("Game")
        .y_desc("Days")
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(rest.iter().map(|&(x, days)| {
            Rectangle::new([(x - 0.35, 0.0), (x + 0.35, days)], CYAN.mix(0.6).filled())
        }))
        .map_err(chart_err)?;

    if !rest.is_empty() {
        let mean = rest.iter().map(|&(_, d)| d).sum::<f64>() / rest.len() as f64;
        chart
            .draw_series(LineSeries::new(
                vec![(0.5, mean), (games, mean)],
                RED.stroke_width(2),
            ))
            .map_err(chart_err)?
            .label(format!("Average {:.1} days", mean))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(chart_err)?;
    }
    Ok(())
}

fn draw_cumulative(area: &Panel<'_>, records: &[FatigueRecord], games: f64) -> Result<()> {
    let total = records
        .last()
        .map(|r| r.cumulative_distance)
        .unwrap_or(0.0)
        .max(100.0)
        * 1.05;

    let mut chart = ChartBuilder::on(area)
        .caption("Cumulative travel distance", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(0.5f64..games, 0f64..total)
        .map_err(chart_err)?;
    chart
        .configure_mesh()
        .x_desc("Game")
        .y_desc("Miles")
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(LineSeries::new(
            records
                .iter()
                .map(|r| (r.game_number as f64, r.cumulative_distance)),
            MAGENTA.stroke_width(2),
        ))
        .map_err(chart_err)?;
    Ok(())
}

fn draw_fatigue(
    area: &Panel<'_>,
    records: &[FatigueRecord],
    games: f64,
    fatigue: &FatigueConfig,
) -> Result<()> {
    let cap = fatigue.score_cap as f64;

    let mut chart = ChartBuilder::on(area)
        .caption("Fatigue score by game", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(0.5f64..games, 0f64..cap)
        .map_err(chart_err)?;
    chart
        .configure_mesh()
        .x_desc("Game")
        .y_desc("Score")
        .draw()
        .map_err(chart_err)?;

    // Band boundaries
    for (threshold, level) in [
        (fatigue.moderate_threshold, FatigueLevel::Moderate),
        (fatigue.high_threshold, FatigueLevel::High),
        (fatigue.very_high_threshold, FatigueLevel::VeryHigh),
    ] {
        let y = threshold as f64;
        chart
            .draw_series(LineSeries::new(
                vec![(0.5, y), (games, y)],
                level_color(level).mix(0.5).stroke_width(1),
            ))
            .map_err(chart_err)?;
    }

    chart
        .draw_series(LineSeries::new(
            records
                .iter()
                .map(|r| (r.game_number as f64, r.overall_score as f64)),
            BLACK.mix(0.4).stroke_width(1),
        ))
        .map_err(chart_err)?;
    chart
        .draw_series(records.iter().map(|r| {
            Circle::new(
                (r.game_number as f64, r.overall_score as f64),
                5,
                level_color(r.level).filled(),
            )
        }))
        .map_err(chart_err)?;
    Ok(())
}
