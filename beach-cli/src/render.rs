//! Plain-text cards and detail views.

use std::fmt::Write;

use beach_core::{BeachSnapshot, CitySnapshot, Snapshot, UvReading, model::NO_DATA};

const ABSENT: &str = "—";

fn or_absent(value: Option<f64>, fmt: impl Fn(f64) -> String) -> String {
    value.map(fmt).unwrap_or_else(|| ABSENT.to_string())
}

fn temp(value: Option<f64>) -> String {
    // `+ 0.0` folds -0.0 into 0.0 so small negatives don't print as "-0°C".
    or_absent(value, |t| format!("{:.0}°C", t.round() + 0.0))
}

fn wind(value: Option<f64>) -> String {
    or_absent(value, |w| format!("{w:.1} m/s"))
}

pub fn render_snapshot(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    for city in &snapshot.cities {
        out.push_str(&render_city(city));
        out.push('\n');
    }
    out
}

pub fn render_city(city: &CitySnapshot) -> String {
    let mut out = String::new();
    let summary = &city.summary;

    let _ = writeln!(out, "[{}] {}", summary.icon_key, city.name);
    if city.has_no_data() {
        let _ = writeln!(out, "  {NO_DATA}");
    } else {
        let _ = writeln!(
            out,
            "  Avg: {} · Wind: {} · Mostly {}",
            temp(summary.average_temp_c),
            wind(summary.average_wind_mps),
            summary.dominant_condition
        );
    }

    let width = city.beaches.iter().map(|b| b.location.name.chars().count()).max().unwrap_or(0);
    for beach in &city.beaches {
        let obs = &beach.observation;
        let _ = writeln!(
            out,
            "  - {:<width$}  [{}] {} · {}",
            beach.location.name,
            beach.metrics.icon_key,
            temp(obs.temperature_c),
            wind(obs.wind_speed_mps),
        );
    }

    out
}

/// Detail view for one beach, without the UV line.
pub fn render_detail(city_name: &str, beach: &BeachSnapshot) -> String {
    let mut out = String::new();
    let obs = &beach.observation;
    let m = &beach.metrics;

    let _ = writeln!(out, "[{}] {} — {}", m.icon_key, beach.location.name, city_name);
    let _ = writeln!(out, "Condition: {}", obs.description);
    let _ = writeln!(out, "Temperature: {}", temp(obs.temperature_c));
    let _ = writeln!(out, "Wind: {}", wind(obs.wind_speed_mps));
    let _ = writeln!(out, "Humidity: {}", or_absent(obs.humidity_pct, |h| format!("{h:.0}%")));
    let _ = writeln!(
        out,
        "Wave Height: {} · Wave Speed: {}",
        or_absent(m.wave_height_m, |h| format!("{h:.2} m")),
        or_absent(m.wave_speed_mps, |s| format!("{s:.1} m/s")),
    );
    let _ = writeln!(
        out,
        "Tide (estimate): {} · Level: {}",
        m.tide_phase.map(|p| p.to_string()).unwrap_or_else(|| ABSENT.to_string()),
        or_absent(m.tide_level_m, |l| format!("{l:.2} m")),
    );
    let _ = writeln!(
        out,
        "Verdict: {}",
        m.verdict.map(|v| v.to_string()).unwrap_or_else(|| ABSENT.to_string())
    );
    let surf = match m.choppy {
        Some(true) => "Choppy, caution",
        Some(false) => "Reasonable",
        None => ABSENT,
    };
    let _ = writeln!(out, "Surf: {surf}");

    out
}

/// Printed after the detail block, once the UV lookup settles.
pub fn render_uv_line(uv: UvReading) -> String {
    match uv {
        UvReading::Index(uv) => format!("UV Index: {uv:.1}"),
        UvReading::Unavailable => "UV Index: unavailable (UV service error or rate limit)".to_string(),
    }
}
