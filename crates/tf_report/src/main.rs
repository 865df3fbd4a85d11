//! Season Travel CLI
//!
//! 일정 CSV → 이동/피로도 리포트 CSV, SVG 차트, 시즌 요약, 리포트 감사

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "tf_report")]
#[command(about = "Derive travel and fatigue reports from a season schedule", long_about = None)]
struct Cli {
    /// Season configuration YAML
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug-level logging (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Write the base travel report
    Travel {
        /// Schedule CSV (date, opponent, location, home_away)
        #[arg(long)]
        schedule: PathBuf,

        /// Output travel report CSV
        #[arg(long)]
        out: PathBuf,
    },

    /// Write the fatigue-extended report
    Fatigue {
        /// Schedule CSV (date, opponent, location, home_away)
        #[arg(long)]
        schedule: PathBuf,

        /// Output fatigue report CSV
        #[arg(long)]
        out: PathBuf,

        /// Also write the base travel report
        #[arg(long)]
        travel_out: Option<PathBuf>,
    },

    /// Render the season chart (SVG)
    Chart {
        /// Schedule CSV (date, opponent, location, home_away)
        #[arg(long)]
        schedule: PathBuf,

        /// Output SVG file
        #[arg(long)]
        out: PathBuf,
    },

    /// Print a season summary
    Analyze {
        /// Schedule CSV (date, opponent, location, home_away)
        #[arg(long)]
        schedule: PathBuf,

        /// Number of highest-fatigue games to list
        #[arg(long, default_value = "5")]
        top: usize,

        /// Print the summary as JSON instead
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Re-derive and check emitted reports
    Audit {
        /// Travel report CSV
        #[arg(long)]
        travel: PathBuf,

        /// Fatigue report CSV
        #[arg(long)]
        fatigue: PathBuf,
    },

    /// List the venue registry
    Venues,
}

#[cfg(feature = "cli")]
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .init();
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = tf_report::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Travel { schedule, out } => {
            print_banner("🧭 Building travel report...", &schedule, &config);
            let reports = tf_report::build_reports(&schedule, &config)?;
            tf_report::write_travel_report(&out, &reports.travel)?;

            let miles: f64 = reports.travel.iter().map(|r| r.travel_distance_miles).sum();
            println!("\n✅ Travel report written: {}", out.display());
            println!("   Games:       {}", reports.travel.len());
            println!("   Total miles: {:.1}", miles);
        }

        Commands::Fatigue {
            schedule,
            out,
            travel_out,
        } => {
            print_banner("😓 Building fatigue report...", &schedule, &config);
            let reports = tf_report::build_reports(&schedule, &config)?;
            tf_report::write_fatigue_report(&out, &reports.fatigue)?;
            println!("\n✅ Fatigue report written: {}", out.display());

            if let Some(path) = travel_out {
                tf_report::write_travel_report(&path, &reports.travel)?;
                println!("✅ Travel report written:  {}", path.display());
            }

            if let Some(last) = reports.fatigue.last() {
                println!("   Cumulative miles: {:.1}", last.cumulative_distance_miles);
                println!("   Cumulative hours: {:.1}", last.cumulative_hours);
            }
        }

        Commands::Chart { schedule, out } => {
            print_banner("📈 Rendering season chart...", &schedule, &config);
            let games = tf_report::read_schedule(&schedule)?;
            let records = config.engine()?.run(&games)?;
            tf_report::write_season_chart(&out, &records, &config)?;
            println!("\n✅ Chart written: {}", out.display());
        }

        Commands::Analyze {
            schedule,
            top,
            json,
        } => {
            let games = tf_report::read_schedule(&schedule)?;
            let records = config.engine()?.run(&games)?;
            let summary = tf_core::SeasonSummary::from_records(&records, top);

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary);
            }
        }

        Commands::Audit { travel, fatigue } => {
            println!("🔍 Auditing reports...");
            println!("   Travel:  {}", travel.display());
            println!("   Fatigue: {}", fatigue.display());

            let travel_rows = tf_report::read_travel_report(&travel)?;
            let fatigue_rows = tf_report::read_fatigue_report(&fatigue)?;
            let registry = config.registry();
            let report = tf_core::Auditor::new(&registry, &config.home_venue, &config.engine)
                .audit(&travel_rows, &fatigue_rows);

            print_audit(&report);
            if !report.passed() {
                anyhow::bail!("❌ Audit failed with {} error(s)", report.errors.len());
            }
        }

        Commands::Venues => {
            let registry = config.registry();
            println!("📍 {} venues (offset span {} h)", registry.len(), registry.offset_span());
            for venue in registry.iter() {
                let marker = if venue.id == config.home_venue { "🏠" } else { "  " };
                println!(
                    "{} {:<22} {:>9.4} {:>10.4}  UTC{:+}",
                    marker, venue.id, venue.coordinate.lat, venue.coordinate.lon, venue.utc_offset
                );
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_banner(title: &str, schedule: &Path, config: &tf_report::SeasonConfig) {
    println!("{}", title);
    println!("   Schedule: {}", schedule.display());
    println!("   Sport:    {}", config.sport);
    println!("   Home:     {}", config.home_venue);
}

#[cfg(feature = "cli")]
fn print_summary(summary: &tf_core::SeasonSummary) {
    let counts = &summary.counts;
    let travel = &summary.travel;

    println!("📊 Season summary");
    println!(
        "   Games: {} ({} home, {} away, {} neutral)",
        counts.total, counts.home, counts.away, counts.neutral
    );
    println!("   Travel frequency: {:.1}%", travel.travel_frequency * 100.0);
    println!("   Total distance:   {:.1} mi", travel.total_miles);
    println!("   Total hours:      {:.1} h", travel.total_hours);
    println!(
        "   Per away game:    {:.1} mi / {:.2} h",
        travel.mean_miles_per_away_game, travel.mean_hours_per_away_game
    );
    println!(
        "   Timezones:        {} games, {} crossed, max {}",
        summary.timezones.games_with_change,
        summary.timezones.total_crossed,
        summary.timezones.max_single_trip
    );

    if !summary.directions.is_empty() {
        println!("\n🧭 Directions");
        for (direction, n) in &summary.directions {
            println!("   {:<10} {}", direction.as_str(), n);
        }
    }

    if !summary.road_trips.is_empty() {
        println!("\n🚌 Road trips");
        for trip in &summary.road_trips {
            println!(
                "   Games {:?}: {} ({:.1} mi, {:.2} h){}",
                trip.games,
                trip.stops.join(" → "),
                trip.miles,
                trip.hours,
                if trip.open_ended { " [season ends away]" } else { "" }
            );
        }
    }

    println!("\n📅 Months");
    for month in &summary.months {
        println!(
            "   {}  games {:>2}  away {:>2}  {:>7.1} mi  fatigue avg {:>5.1} max {:>3}",
            month.month,
            month.games,
            month.away_games,
            month.miles,
            month.mean_fatigue,
            month.max_fatigue
        );
    }

    println!("\n🔥 Highest fatigue");
    for game in &summary.top_fatigue {
        println!(
            "   #{:<3} {} {:<20} {:<7} {:>3} {}",
            game.game_number,
            game.date,
            game.opponent,
            game.home_away.as_str(),
            game.score,
            game.level
        );
    }
    println!("   Critical games (≥70): {}", summary.critical.len());
    println!("   Recovery windows:     {}", summary.recovery_windows.len());

    println!("\n📈 Fatigue levels");
    for (level, n) in &summary.level_distribution {
        println!("   {:<10} {}", level.as_str(), n);
    }
}

#[cfg(feature = "cli")]
fn print_audit(report: &tf_core::AuditReport) {
    for finding in &report.errors {
        println!("   ❌ {}", finding);
    }
    for finding in &report.warnings {
        println!("   ⚠️  {}", finding);
    }
    if report.is_clean() {
        println!("\n✅ All checks passed");
    } else if report.passed() {
        println!("\n✅ Passed with {} warning(s)", report.warnings.len());
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("tf_report CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
