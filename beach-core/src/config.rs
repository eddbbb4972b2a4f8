use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::model::{City, Location};

pub const DEFAULT_WEATHER_ENDPOINT: &str = "http://localhost:8888/.netlify/functions/weather";
pub const DEFAULT_UV_ENDPOINT: &str = "http://localhost:8888/.netlify/functions/openuv";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// weather_endpoint = "http://localhost:8888/.netlify/functions/weather"
/// uv_endpoint = "http://localhost:8888/.netlify/functions/openuv"
///
/// [[cities]]
/// name = "Casablanca"
///
/// [[cities.locations]]
/// name = "Ain Diab"
/// latitude = 33.595
/// longitude = -7.631
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub weather_endpoint: String,
    pub uv_endpoint: String,

    /// Transport timeout per request, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_cities")]
    pub cities: Vec<City>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weather_endpoint: DEFAULT_WEATHER_ENDPOINT.to_string(),
            uv_endpoint: DEFAULT_UV_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            cities: default_cities(),
        }
    }
}

/// Built-in beaches along the Moroccan coast.
pub fn default_cities() -> Vec<City> {
    vec![
        City {
            name: "Tétouan / Martil Area".to_string(),
            locations: vec![
                Location::new("Martil", 35.621, -5.275),
                Location::new("Capo Negro", 35.671, -5.355),
                Location::new("M'diq", 35.680, -5.319),
                Location::new("Tamuda Bay", 35.692, -5.327),
            ],
        },
        City {
            name: "Casablanca".to_string(),
            locations: vec![Location::new("Ain Diab", 33.595, -7.631)],
        },
        City {
            name: "Tangier".to_string(),
            locations: vec![Location::new("Tangier Beach", 35.7736, -5.8103)],
        },
    ]
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// All locations, city by city, in configuration order.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.cities.iter().flat_map(|c| c.locations.iter())
    }

    /// Check the invariants the fetch cycle relies on.
    pub fn validate(&self) -> Result<()> {
        if self.weather_endpoint.trim().is_empty() {
            bail!("weather_endpoint must not be empty");
        }
        if self.uv_endpoint.trim().is_empty() {
            bail!("uv_endpoint must not be empty");
        }
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be at least 1");
        }
        if self.cities.is_empty() {
            bail!("No cities configured.\nHint: run `beach init` to write the default beaches.");
        }

        for city in &self.cities {
            if city.locations.is_empty() {
                bail!("City '{}' has no locations", city.name);
            }
            for loc in &city.locations {
                if !(-90.0..=90.0).contains(&loc.latitude) {
                    bail!("Location '{}' has latitude {} outside [-90, 90]", loc.name, loc.latitude);
                }
                if !(-180.0..=180.0).contains(&loc.longitude) {
                    bail!(
                        "Location '{}' has longitude {} outside [-180, 180]",
                        loc.name,
                        loc.longitude
                    );
                }
            }
        }

        Ok(())
    }

    /// Load config from the platform path, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, use the built-in beaches.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "beach-watch", "beach-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
