//! Per-city summaries folded from per-location observations.

use crate::{
    icon::icon_for_condition,
    model::{City, CitySummary, IconKey, Observation},
};

/// Condition reported when no location has one.
pub const DEFAULT_CONDITION: &str = "clear";

/// Fold the observations of one city into a summary.
///
/// `observations` is parallel to `city.locations`; extra or missing entries
/// are ignored.
pub fn aggregate(city: &City, observations: &[Observation]) -> CitySummary {
    let observations = &observations[..observations.len().min(city.locations.len())];

    let average_temp_c = mean(observations.iter().filter_map(|o| o.temperature_c));
    let average_wind_mps =
        mean(observations.iter().filter_map(|o| o.wind_speed_mps)).map(round_to_tenth);

    let dominant = dominant_condition(observations);
    let icon_key = representative(observations)
        .map(|sample| icon_for_condition(dominant.as_deref(), sample))
        .unwrap_or(IconKey::Unknown);

    CitySummary {
        average_temp_c,
        average_wind_mps,
        dominant_condition: dominant.unwrap_or_else(|| DEFAULT_CONDITION.to_string()),
        icon_key,
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    (count > 0).then(|| sum / count as f64)
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Most frequent condition, lowercased. Ties go to the first one seen.
fn dominant_condition(observations: &[Observation]) -> Option<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();

    for code in observations.iter().filter_map(|o| o.condition_code.as_deref()) {
        let key = code.trim().to_lowercase();
        if key.is_empty() {
            continue;
        }
        match counts.iter_mut().find(|(k, _)| *k == key) {
            Some((_, n)) => *n += 1,
            None => counts.push((key, 1)),
        }
    }

    let mut best: Option<(String, usize)> = None;
    for (key, n) in counts {
        if best.as_ref().is_none_or(|(_, top)| n > *top) {
            best = Some((key, n));
        }
    }
    best.map(|(key, _)| key)
}

/// First location with an observation time, else the city's first location.
fn representative(observations: &[Observation]) -> Option<&Observation> {
    observations
        .iter()
        .find(|o| o.observed_at.is_some())
        .or_else(|| observations.first())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Location;

    fn city(n: usize) -> City {
        City {
            name: "Test City".to_string(),
            locations: (0..n)
                .map(|i| Location::new(format!("Beach {i}"), 35.0, -5.0))
                .collect(),
        }
    }

    fn obs(temp: f64, wind: f64, condition: &str) -> Observation {
        Observation {
            temperature_c: Some(temp),
            wind_speed_mps: Some(wind),
            humidity_pct: Some(60.0),
            condition_code: Some(condition.to_string()),
            description: condition.to_lowercase(),
            observed_at: Some(1_000),
            sunrise: Some(500),
            sunset: Some(2_000),
        }
    }

    #[test]
    fn averages_present_readings() {
        let summary = aggregate(&city(2), &[obs(20.0, 3.0, "Clear"), obs(24.0, 5.0, "Clear")]);
        assert_eq!(summary.average_temp_c, Some(22.0));
        assert_eq!(summary.average_wind_mps, Some(4.0));
        assert_eq!(summary.dominant_condition, "clear");
        assert_eq!(summary.icon_key, IconKey::Icon("wi-day-sunny"));
    }

    #[test]
    fn wind_average_is_rounded_to_one_decimal() {
        let summary = aggregate(
            &city(3),
            &[obs(20.0, 3.0, "Clear"), obs(20.0, 3.0, "Clear"), obs(20.0, 4.0, "Clear")],
        );
        assert_eq!(summary.average_wind_mps, Some(3.3));
    }

    #[test]
    fn absent_readings_are_skipped_not_zeroed() {
        let summary = aggregate(&city(2), &[obs(18.0, 6.0, "Rain"), Observation::no_data()]);
        assert_eq!(summary.average_temp_c, Some(18.0));
        assert_eq!(summary.average_wind_mps, Some(6.0));
        assert_eq!(summary.dominant_condition, "rain");
    }

    #[test]
    fn dominant_condition_is_case_insensitive_with_first_seen_tiebreak() {
        let summary = aggregate(
            &city(4),
            &[obs(20.0, 1.0, "Clouds"), obs(20.0, 1.0, "rain"), obs(20.0, 1.0, "RAIN"), obs(20.0, 1.0, "clouds")],
        );
        assert_eq!(summary.dominant_condition, "clouds");
        assert_eq!(summary.icon_key, IconKey::Icon("wi-day-cloudy"));
    }

    #[test]
    fn icon_timing_comes_from_first_timed_location() {
        let mut night = obs(15.0, 2.0, "Clear");
        night.observed_at = Some(3_000);
        let summary = aggregate(&city(2), &[Observation::no_data(), night]);
        assert_eq!(summary.icon_key, IconKey::Icon("wi-night-clear"));
    }

    #[test]
    fn all_failed_locations_give_absent_summary() {
        let summary = aggregate(&city(3), &vec![Observation::no_data(); 3]);
        assert_eq!(summary.average_temp_c, None);
        assert_eq!(summary.average_wind_mps, None);
        assert_eq!(summary.dominant_condition, DEFAULT_CONDITION);
        assert_eq!(summary.icon_key, IconKey::Unknown);
    }

    #[test]
    fn empty_city_does_not_panic() {
        let summary = aggregate(&city(0), &[]);
        assert_eq!(summary.icon_key, IconKey::Unknown);
        assert_eq!(summary.average_temp_c, None);
    }
}
