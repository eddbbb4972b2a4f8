use crate::{Config, GatewayError, Location, Observation, gateway::http::HttpGateway};
use anyhow::Context;
use async_trait::async_trait;
use std::fmt::Debug;

pub mod http;

/// Remote source of current weather and UV readings for a coordinate.
#[async_trait]
pub trait WeatherGateway: Send + Sync + Debug {
    async fn current(&self, location: &Location) -> Result<Observation, GatewayError>;

    async fn uv_index(&self, location: &Location) -> Result<f64, GatewayError>;
}

/// Construct the HTTP gateway described by the config.
pub fn gateway_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherGateway>> {
    config.validate()?;

    let gateway = HttpGateway::new(
        config.weather_endpoint.clone(),
        config.uv_endpoint.clone(),
        config.timeout(),
    )
    .context("Failed to build HTTP client for the weather gateway")?;

    Ok(Box::new(gateway))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_from_default_config_builds() {
        let cfg = Config::default();
        assert!(gateway_from_config(&cfg).is_ok());
    }

    #[test]
    fn gateway_from_config_rejects_empty_endpoint() {
        let cfg = Config { weather_endpoint: String::new(), ..Config::default() };
        let err = gateway_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("weather_endpoint"));
    }
}
