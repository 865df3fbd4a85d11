//! Season configuration (YAML)
//!
//! ```yaml
//! sport: Women's Basketball
//! team: Notre Dame
//! home_venue: South Bend, IN
//! venues:
//!   - id: Honolulu, HI
//!     lat: 21.3069
//!     lon: -157.8583
//!     utc_offset: -10
//! engine:
//!   neutral_site: travel
//!   fatigue:
//!     timezone_cap: null
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tf_core::{EngineConfig, TravelEngine, Venue, VenueRegistry, DEFAULT_HOME_VENUE};

/// Extra venue merged over the built-in table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueEntry {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
    pub utc_offset: i32,
}

impl From<&VenueEntry> for Venue {
    fn from(entry: &VenueEntry) -> Self {
        Venue::new(entry.id.trim(), entry.lat, entry.lon, entry.utc_offset)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonConfig {
    /// Value of the `Sport` report column (기본: "Women's Basketball")
    pub sport: String,
    /// Display name only
    pub team: Option<String>,
    /// Where every season walk starts (기본: "South Bend, IN")
    pub home_venue: String,
    /// Added to, or replacing entries of, the built-in registry
    pub venues: Vec<VenueEntry>,
    pub engine: EngineConfig,
}

impl Default for SeasonConfig {
    fn default() -> Self {
        Self {
            sport: "Women's Basketball".to_string(),
            team: None,
            home_venue: DEFAULT_HOME_VENUE.to_string(),
            venues: Vec::new(),
            engine: EngineConfig::default(),
        }
    }
}

impl SeasonConfig {
    /// Built-in registry with this season's extra venues applied
    pub fn registry(&self) -> VenueRegistry {
        self.venues
            .iter()
            .fold(VenueRegistry::builtin(), |registry, entry| {
                registry.with_venue(entry.into())
            })
    }

    pub fn engine(&self) -> Result<TravelEngine> {
        TravelEngine::new(self.registry(), &self.home_venue, self.engine.clone())
            .context("Invalid season configuration")
    }
}

pub fn load_config(path: &Path) -> Result<SeasonConfig> {
    let yaml = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_yaml::from_str(&yaml)
        .with_context(|| format!("Failed to parse YAML config: {}", path.display()))
}

/// `path` when given, defaults otherwise
pub fn load_or_default(path: Option<&Path>) -> Result<SeasonConfig> {
    match path {
        Some(path) => load_config(path),
        None => Ok(SeasonConfig::default()),
    }
}
