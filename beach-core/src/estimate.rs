//! Closed-form beach estimates derived from wind speed and an injected clock.
//!
//! Nothing in here reads the wall clock or the network. Non-finite input
//! yields `None` instead of an error.

use chrono::{DateTime, TimeZone, Timelike, Utc};
use std::f64::consts::PI;

use crate::{
    icon::icon_for_observation,
    model::{DerivedMetrics, Observation, TidePhase, Verdict},
};

const MPS_TO_KNOTS: f64 = 1.94384;
const WAVE_HEIGHT_FACTOR: f64 = 0.016;
const WAVE_SPEED_FACTOR: f64 = 1.5;

const TIDE_AMPLITUDE_M: f64 = 1.5;
const TIDE_PERIOD_H: f64 = 12.0;
const TIDE_PHASE_OFFSET_H: f64 = 6.0;

/// Wind above this is flagged as choppy.
pub const CHOPPY_WIND_MPS: f64 = 7.0;

/// Clock reading supplied by the caller, so estimates stay deterministic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockReading {
    /// Local hour of day, fractional (e.g. 9.5 for 09:30).
    pub local_hour: f64,
    /// UTC hour of day, fractional.
    pub utc_hour: f64,
}

impl ClockReading {
    pub fn new(local_hour: f64, utc_hour: f64) -> Self {
        Self { local_hour, utc_hour }
    }

    pub fn from_datetime<Tz: TimeZone>(at: &DateTime<Tz>) -> Self {
        let utc = at.with_timezone(&Utc);
        Self { local_hour: fractional_hour(at), utc_hour: fractional_hour(&utc) }
    }
}

fn fractional_hour<T: Timelike>(t: &T) -> f64 {
    f64::from(t.hour()) + f64::from(t.minute()) / 60.0
}

/// Wave height in meters: `0.016 * knots²`.
pub fn estimate_wave_height(wind_speed_mps: f64) -> Option<f64> {
    if !wind_speed_mps.is_finite() {
        return None;
    }
    let knots = wind_speed_mps * MPS_TO_KNOTS;
    Some(WAVE_HEIGHT_FACTOR * knots * knots)
}

/// Wave speed in m/s: `1.5 * wind`.
pub fn estimate_wave_speed(wind_speed_mps: f64) -> Option<f64> {
    wind_speed_mps.is_finite().then(|| WAVE_SPEED_FACTOR * wind_speed_mps)
}

/// Four fixed 6-hour windows starting at 04:00.
pub fn estimate_tide_phase(local_hour: f64) -> Option<TidePhase> {
    if !local_hour.is_finite() {
        return None;
    }

    let phase = if (4.0..10.0).contains(&local_hour) {
        TidePhase::High
    } else if (10.0..16.0).contains(&local_hour) {
        TidePhase::Falling
    } else if (16.0..22.0).contains(&local_hour) {
        TidePhase::Low
    } else {
        TidePhase::Rising
    };

    Some(phase)
}

/// Tide level in meters on a 12h sine cycle, zero at 06:00 UTC.
pub fn estimate_tide_level(utc_hour: f64) -> Option<f64> {
    if !utc_hour.is_finite() {
        return None;
    }
    Some(TIDE_AMPLITUDE_M * ((2.0 * PI / TIDE_PERIOD_H) * (utc_hour - TIDE_PHASE_OFFSET_H)).sin())
}

/// Tiered verdict. Both wind bounds are inclusive, so 5 m/s at 23°C still
/// counts as swimming weather.
pub fn classify_verdict(wind_speed_mps: f64, temperature_c: f64) -> Option<Verdict> {
    if !wind_speed_mps.is_finite() || !temperature_c.is_finite() {
        return None;
    }

    let verdict = if temperature_c >= 22.0 && wind_speed_mps <= 5.0 {
        Verdict::IdealForSwimming
    } else if temperature_c >= 15.0 && wind_speed_mps <= 10.0 {
        Verdict::ReasonableForWalk
    } else {
        Verdict::Poor
    };

    Some(verdict)
}

/// Binary caution flag, independent of [`classify_verdict`].
pub fn is_choppy(wind_speed_mps: f64) -> Option<bool> {
    wind_speed_mps.is_finite().then_some(wind_speed_mps > CHOPPY_WIND_MPS)
}

/// Everything the detail view needs for one location.
pub fn derive_metrics(observation: &Observation, clock: ClockReading) -> DerivedMetrics {
    let wind = observation.wind_speed_mps;

    DerivedMetrics {
        wave_height_m: wind.and_then(estimate_wave_height),
        wave_speed_mps: wind.and_then(estimate_wave_speed),
        tide_phase: estimate_tide_phase(clock.local_hour),
        tide_level_m: estimate_tide_level(clock.utc_hour),
        verdict: wind
            .zip(observation.temperature_c)
            .and_then(|(w, t)| classify_verdict(w, t)),
        choppy: wind.and_then(is_choppy),
        icon_key: icon_for_observation(observation),
    }
}
