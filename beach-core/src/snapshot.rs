//! One fetch cycle's worth of results, kept apart from the static city config.

use serde::Serialize;

use crate::{
    aggregate::aggregate,
    estimate::{ClockReading, derive_metrics},
    fetch::fetch_all,
    gateway::WeatherGateway,
    model::{City, CitySummary, DerivedMetrics, Location, Observation},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeachSnapshot {
    pub location: Location,
    pub observation: Observation,
    pub metrics: DerivedMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CitySnapshot {
    pub name: String,
    pub summary: CitySummary,
    pub beaches: Vec<BeachSnapshot>,
}

impl CitySnapshot {
    /// True when no beach in the city returned anything.
    pub fn has_no_data(&self) -> bool {
        self.beaches.iter().all(|b| b.observation.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub cities: Vec<CitySnapshot>,
}

impl Snapshot {
    /// Fetch every location of every city in one concurrent batch, then assemble.
    pub async fn collect<G>(gateway: &G, cities: &[City], clock: ClockReading) -> Self
    where
        G: WeatherGateway + ?Sized,
    {
        let locations: Vec<Location> =
            cities.iter().flat_map(|c| c.locations.iter().cloned()).collect();
        let observations = fetch_all(gateway, &locations).await;
        Self::assemble(cities, observations, clock)
    }

    /// Split a flat, city-ordered observation list back into cities.
    ///
    /// Locations without a matching observation get the no-data placeholder.
    pub fn assemble(cities: &[City], observations: Vec<Observation>, clock: ClockReading) -> Self {
        let mut observations = observations.into_iter();

        let cities = cities
            .iter()
            .map(|city| {
                let city_obs: Vec<Observation> = city
                    .locations
                    .iter()
                    .map(|_| observations.next().unwrap_or_else(Observation::no_data))
                    .collect();

                let summary = aggregate(city, &city_obs);
                let beaches = city
                    .locations
                    .iter()
                    .cloned()
                    .zip(city_obs)
                    .map(|(location, observation)| BeachSnapshot {
                        metrics: derive_metrics(&observation, clock),
                        location,
                        observation,
                    })
                    .collect();

                CitySnapshot { name: city.name.clone(), summary, beaches }
            })
            .collect();

        Self { cities }
    }

    /// Find a beach by case-insensitive name, with its city.
    pub fn find_beach(&self, name: &str) -> Option<(&CitySnapshot, &BeachSnapshot)> {
        let wanted = name.trim().to_lowercase();
        self.cities.iter().find_map(|city| {
            city.beaches
                .iter()
                .find(|b| b.location.name.to_lowercase() == wanted)
                .map(|b| (city, b))
        })
    }
}
