//! Core library for the `beach` CLI.
//!
//! This crate defines:
//! - Static beach/city configuration
//! - Abstraction over the weather gateway, plus an HTTP implementation
//! - Pure condition estimates (waves, tide, verdict, icons)
//! - Per-city aggregation and the per-cycle snapshot built from them
//!
//! It is used by `beach-cli`, but can also be reused by other binaries or services.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod estimate;
pub mod fetch;
pub mod gateway;
pub mod icon;
pub mod model;
pub mod snapshot;

pub use aggregate::aggregate;
pub use config::Config;
pub use error::GatewayError;
pub use estimate::{ClockReading, derive_metrics};
pub use fetch::{fetch_all, fetch_uv};
pub use gateway::{WeatherGateway, gateway_from_config};
pub use model::{
    City, CitySummary, DerivedMetrics, IconKey, Location, Observation, TidePhase, UvReading,
    Verdict,
};
pub use snapshot::{BeachSnapshot, CitySnapshot, Snapshot};
