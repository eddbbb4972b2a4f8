//! Concurrent retrieval of one observation per location.

use futures::future::join_all;
use tracing::{info, warn};

use crate::{
    gateway::WeatherGateway,
    model::{Location, Observation, UvReading},
};

/// Fetch current weather for every location concurrently.
///
/// The result is parallel to `locations`. A failed request becomes
/// [`Observation::no_data`] for that slot; the batch itself never fails and
/// only returns once every request has settled.
pub async fn fetch_all<G>(gateway: &G, locations: &[Location]) -> Vec<Observation>
where
    G: WeatherGateway + ?Sized,
{
    let requests = locations.iter().map(|location| async move {
        match gateway.current(location).await {
            Ok(observation) => (observation, false),
            Err(err) => {
                warn!(location = %location.name, error = %err, "weather fetch failed");
                (Observation::no_data(), true)
            }
        }
    });

    let settled = join_all(requests).await;

    let failed = settled.iter().filter(|(_, failed)| *failed).count();
    info!(requested = locations.len(), failed, "fetch cycle settled");

    settled.into_iter().map(|(observation, _)| observation).collect()
}

/// Look up the UV index for one location; any failure reads as unavailable.
pub async fn fetch_uv<G>(gateway: &G, location: &Location) -> UvReading
where
    G: WeatherGateway + ?Sized,
{
    match gateway.uv_index(location).await {
        Ok(uv) if uv.is_finite() => UvReading::Index(uv),
        Ok(uv) => {
            warn!(location = %location.name, uv, "UV index is not a finite number");
            UvReading::Unavailable
        }
        Err(err) => {
            warn!(location = %location.name, error = %err, "UV fetch failed");
            UvReading::Unavailable
        }
    }
}
