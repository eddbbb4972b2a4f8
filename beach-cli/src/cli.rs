use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, bail};
use beach_core::{
    City, ClockReading, Config, Location, Snapshot, config::DEFAULT_TIMEOUT_SECS, fetch_uv,
    gateway_from_config,
};
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};

use crate::render::{render_detail, render_snapshot, render_uv_line};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "beach", version, about = "Beach conditions from current weather")]
pub struct Cli {
    /// Read configuration from this file instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch current weather for every beach and show one card per city.
    Show {
        /// Print the snapshot as JSON instead of cards.
        #[arg(long)]
        json: bool,
    },

    /// Show details for one beach, including the UV index.
    Detail {
        /// Beach name, case-insensitive, e.g. "Martil".
        beach: String,
    },

    /// List configured cities and beaches.
    Cities,

    /// Write the default configuration file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },

    /// Interactively set gateway endpoints and timeout.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show { json } => {
                let config = load_config(self.config.as_deref())?;
                let gateway = gateway_from_config(&config)?;
                let clock = ClockReading::from_datetime(&Local::now());

                let snapshot = Snapshot::collect(gateway.as_ref(), &config.cities, clock).await;

                if json {
                    let out = serde_json::to_string_pretty(&snapshot)
                        .context("Failed to serialize snapshot")?;
                    println!("{out}");
                } else {
                    print!("{}", render_snapshot(&snapshot));
                }
            }
            Command::Detail { beach } => {
                let config = load_config(self.config.as_deref())?;
                let (city, location) = find_location(&config.cities, &beach)?;
                let gateway = gateway_from_config(&config)?;
                let clock = ClockReading::from_datetime(&Local::now());

                let single = City { name: city.name.clone(), locations: vec![location.clone()] };
                let snapshot =
                    Snapshot::collect(gateway.as_ref(), std::slice::from_ref(&single), clock).await;
                let Some((_, beach)) = snapshot.find_beach(&location.name) else {
                    bail!("Beach '{}' missing from snapshot", location.name);
                };

                print!("{}", render_detail(&city.name, beach));
                io::stdout().flush().context("Failed to flush stdout")?;

                // UV is a secondary lookup; the weather block above is already out.
                let uv = fetch_uv(gateway.as_ref(), location).await;
                println!("{}", render_uv_line(uv));
            }
            Command::Cities => {
                let config = load_config(self.config.as_deref())?;
                for city in &config.cities {
                    println!("{}", city.name);
                    for loc in &city.locations {
                        println!("  - {} ({:.4}, {:.4})", loc.name, loc.latitude, loc.longitude);
                    }
                }
            }
            Command::Init { force } => {
                let path = config_path(self.config)?;
                if path.exists() && !force {
                    bail!(
                        "Config file already exists: {}\nHint: pass --force to overwrite it.",
                        path.display()
                    );
                }
                Config::default().save_to(&path)?;
                println!("Wrote default configuration to {}", path.display());
            }
            Command::Configure => {
                let path = config_path(self.config)?;
                let mut config = Config::load_from(&path)?;

                config.weather_endpoint = Text::new("Weather endpoint:")
                    .with_default(&config.weather_endpoint)
                    .prompt()
                    .context("Failed to read weather endpoint")?;
                config.uv_endpoint = Text::new("UV endpoint:")
                    .with_default(&config.uv_endpoint)
                    .prompt()
                    .context("Failed to read UV endpoint")?;
                config.timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
                    .with_default(config.timeout_secs.max(1))
                    .with_help_message(&format!("default is {DEFAULT_TIMEOUT_SECS}"))
                    .prompt()
                    .context("Failed to read timeout")?;

                config.validate()?;
                config.save_to(&path)?;
                println!("Saved configuration to {}", path.display());
            }
        }

        Ok(())
    }
}

fn config_path(explicit: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => Config::config_file_path(),
    }
}

fn load_config(explicit: Option<&std::path::Path>) -> anyhow::Result<Config> {
    let config = match explicit {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.validate()?;
    tracing::debug!(cities = config.cities.len(), "configuration loaded");
    Ok(config)
}

fn find_location<'a>(cities: &'a [City], name: &str) -> anyhow::Result<(&'a City, &'a Location)> {
    let wanted = name.trim().to_lowercase();
    cities
        .iter()
        .find_map(|city| {
            city.locations
                .iter()
                .find(|loc| loc.name.to_lowercase() == wanted)
                .map(|loc| (city, loc))
        })
        .with_context(|| format!("Unknown beach '{name}'.\nHint: run `beach cities` to list them."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use beach_core::config::default_cities;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["beach", "show", "--json", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Show { json: true }));
    }

    #[test]
    fn parses_detail_with_config_path() {
        let cli =
            Cli::try_parse_from(["beach", "--config", "/tmp/b.toml", "detail", "Ain Diab"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/b.toml")));
        match cli.command {
            Command::Detail { beach } => assert_eq!(beach, "Ain Diab"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn find_location_is_case_insensitive() {
        let cities = default_cities();
        let (city, loc) = find_location(&cities, "m'DIQ").unwrap();
        assert_eq!(city.name, "Tétouan / Martil Area");
        assert_eq!(loc.name, "M'diq");
    }

    #[test]
    fn unknown_beach_suggests_listing() {
        let err = find_location(&default_cities(), "Copacabana").unwrap_err();
        assert!(err.to_string().contains("beach cities"));
    }
}
