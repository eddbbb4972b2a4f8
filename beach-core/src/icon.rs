//! Day/night icon selection keyed by the gateway's condition code.

use crate::model::{IconKey, Observation};

#[derive(Debug, Clone, Copy)]
struct IconPair {
    day: &'static str,
    night: &'static str,
}

const DEFAULT_ICONS: IconPair = IconPair { day: "wi-day-sunny", night: "wi-night-clear" };

const ICONS: &[(&str, IconPair)] = &[
    ("clear", IconPair { day: "wi-day-sunny", night: "wi-night-clear" }),
    ("clouds", IconPair { day: "wi-day-cloudy", night: "wi-night-alt-cloudy" }),
    ("rain", IconPair { day: "wi-day-rain", night: "wi-night-alt-rain" }),
    ("drizzle", IconPair { day: "wi-day-sprinkle", night: "wi-night-alt-sprinkle" }),
    ("thunderstorm", IconPair { day: "wi-day-thunderstorm", night: "wi-night-alt-thunderstorm" }),
    ("snow", IconPair { day: "wi-day-snow", night: "wi-night-alt-snow" }),
    ("mist", IconPair { day: "wi-day-fog", night: "wi-night-fog" }),
    ("haze", IconPair { day: "wi-day-haze", night: "wi-night-fog" }),
    ("smoke", IconPair { day: "wi-day-fog", night: "wi-night-fog" }),
    ("dust", IconPair { day: "wi-smog", night: "wi-smog" }),
    ("fog", IconPair { day: "wi-day-fog", night: "wi-night-fog" }),
    ("sand", IconPair { day: "wi-sandstorm", night: "wi-sandstorm" }),
    ("ash", IconPair { day: "wi-volcano", night: "wi-volcano" }),
    ("squall", IconPair { day: "wi-day-windy", night: "wi-night-alt-cloudy-windy" }),
    ("tornado", IconPair { day: "wi-tornado", night: "wi-tornado" }),
];

fn icon_pair(condition: &str) -> IconPair {
    let key = condition.trim().to_lowercase();
    ICONS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, pair)| *pair)
        .unwrap_or(DEFAULT_ICONS)
}

/// Inclusive on both ends: an observation taken exactly at sunrise or sunset is daytime.
pub fn is_daytime(observed_at: i64, sunrise: i64, sunset: i64) -> bool {
    sunrise <= observed_at && observed_at <= sunset
}

/// Pick the day or night icon for a condition code. Unknown codes use the default pair.
pub fn select_icon_key(condition: &str, observed_at: i64, sunrise: i64, sunset: i64) -> IconKey {
    let pair = icon_pair(condition);
    if is_daytime(observed_at, sunrise, sunset) {
        IconKey::Icon(pair.day)
    } else {
        IconKey::Icon(pair.night)
    }
}

/// Icon for an observation; [`IconKey::Unknown`] when the timing fields are missing.
pub fn icon_for_observation(observation: &Observation) -> IconKey {
    icon_for_condition(observation.condition_code.as_deref(), observation)
}

/// Like [`icon_for_observation`] but with an overriding condition code,
/// used when a city's dominant condition is drawn with a sample location's timing.
pub fn icon_for_condition(condition: Option<&str>, timing: &Observation) -> IconKey {
    match (timing.observed_at, timing.sunrise, timing.sunset) {
        (Some(at), Some(sunrise), Some(sunset)) => {
            select_icon_key(condition.unwrap_or_default(), at, sunrise, sunset)
        }
        _ => IconKey::Unknown,
    }
}
