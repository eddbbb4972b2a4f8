use serde::{Deserialize, Serialize};
use std::fmt;

/// Description used for observations that could not be fetched at all.
pub const NO_DATA: &str = "no data";

/// A single named beach point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self { name: name.into(), latitude, longitude }
    }
}

/// A named, ordered group of locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub locations: Vec<Location>,
}

/// Raw per-location snapshot from the weather gateway.
///
/// `None` always means "could not be determined", never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub temperature_c: Option<f64>,
    pub wind_speed_mps: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub condition_code: Option<String>,
    pub description: String,
    pub observed_at: Option<i64>,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}

impl Observation {
    /// Placeholder for a location whose gateway request failed.
    pub fn no_data() -> Self {
        Self {
            temperature_c: None,
            wind_speed_mps: None,
            humidity_pct: None,
            condition_code: None,
            description: NO_DATA.to_string(),
            observed_at: None,
            sunrise: None,
            sunset: None,
        }
    }

    /// True when the gateway gave us nothing usable for this location.
    pub fn is_empty(&self) -> bool {
        self.temperature_c.is_none()
            && self.wind_speed_mps.is_none()
            && self.humidity_pct.is_none()
            && self.condition_code.is_none()
            && self.observed_at.is_none()
            && self.sunrise.is_none()
            && self.sunset.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TidePhase {
    Rising,
    High,
    Falling,
    Low,
}

impl TidePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TidePhase::Rising => "Rising Tide",
            TidePhase::High => "High Tide",
            TidePhase::Falling => "Falling Tide",
            TidePhase::Low => "Low Tide",
        }
    }
}

impl fmt::Display for TidePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tiered beach verdict; first matching rule wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    IdealForSwimming,
    ReasonableForWalk,
    Poor,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::IdealForSwimming => "ideal for swimming",
            Verdict::ReasonableForWalk => "reasonable for a walk",
            Verdict::Poor => "poor conditions",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weather Icons class name, or an explicit unknown when day/night can't be told.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IconKey {
    Icon(&'static str),
    Unknown,
}

impl IconKey {
    pub const UNKNOWN_CLASS: &'static str = "wi-na";

    pub fn as_str(&self) -> &'static str {
        match self {
            IconKey::Icon(class) => *class,
            IconKey::Unknown => Self::UNKNOWN_CLASS,
        }
    }
}

impl fmt::Display for IconKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values computed from one observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub wave_height_m: Option<f64>,
    pub wave_speed_mps: Option<f64>,
    pub tide_phase: Option<TidePhase>,
    pub tide_level_m: Option<f64>,
    pub verdict: Option<Verdict>,
    pub choppy: Option<bool>,
    pub icon_key: IconKey,
}

/// Aggregated view across a city's locations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CitySummary {
    pub average_temp_c: Option<f64>,
    pub average_wind_mps: Option<f64>,
    pub dominant_condition: String,
    pub icon_key: IconKey,
}

/// Secondary enrichment shown only in the detail view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum UvReading {
    Index(f64),
    Unavailable,
}

impl UvReading {
    pub fn index(&self) -> Option<f64> {
        match self {
            UvReading::Index(uv) => Some(*uv),
            UvReading::Unavailable => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_empty() {
        assert!(Observation::no_data().is_empty());
    }

    #[test]
    fn any_single_field_makes_observation_non_empty() {
        let condition_only =
            Observation { condition_code: Some("Clouds".to_string()), ..Observation::no_data() };
        assert!(!condition_only.is_empty());

        let sunrise_only = Observation { sunrise: Some(500), ..Observation::no_data() };
        assert!(!sunrise_only.is_empty());

        let sunset_only = Observation { sunset: Some(2_000), ..Observation::no_data() };
        assert!(!sunset_only.is_empty());
    }
}
