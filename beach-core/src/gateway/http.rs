use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::{
    error::GatewayError,
    model::{Location, NO_DATA, Observation},
};

use super::WeatherGateway;

/// Gateway backed by the two `?lat=&lon=` proxy endpoints.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    weather_endpoint: String,
    uv_endpoint: String,
    http: Client,
}

impl HttpGateway {
    pub fn new(
        weather_endpoint: String,
        uv_endpoint: String,
        timeout: Duration,
    ) -> reqwest::Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http, weather_endpoint, uv_endpoint))
    }

    pub fn with_client(http: Client, weather_endpoint: String, uv_endpoint: String) -> Self {
        Self { weather_endpoint, uv_endpoint, http }
    }

    async fn get_body(&self, endpoint: &str, location: &Location) -> Result<String, GatewayError> {
        debug!(endpoint, location = %location.name, "requesting gateway");

        let transport = |source| GatewayError::Transport { endpoint: endpoint.to_string(), source };

        let res = self
            .http
            .get(endpoint)
            .query(&[("lat", location.latitude), ("lon", location.longitude)])
            .send()
            .await
            .map_err(transport)?;

        let status = res.status();
        let body = res.text().await.map_err(transport)?;

        if !status.is_success() {
            return Err(GatewayError::Status { status: status.as_u16(), body: truncate_body(&body) });
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct GwWeather {
    main: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GwMain {
    temp: Option<f64>,
    humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct GwWind {
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct GwSys {
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct GwCurrentResponse {
    weather: Option<Vec<GwWeather>>,
    main: Option<GwMain>,
    wind: Option<GwWind>,
    dt: Option<i64>,
    sys: Option<GwSys>,
}

#[derive(Debug, Deserialize)]
struct GwUvResult {
    uv: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct GwUvResponse {
    result: Option<GwUvResult>,
    uv: Option<f64>,
}

/// Decode a current-weather body. Missing fields stay absent; a body that
/// isn't the expected JSON shape is an error.
pub fn parse_current(body: &str) -> Result<Observation, GatewayError> {
    let parsed: GwCurrentResponse = serde_json::from_str(body)?;
    let first = parsed.weather.and_then(|w| w.into_iter().next());
    let (condition_code, description) = match first {
        Some(w) => (w.main, w.description),
        None => (None, None),
    };

    Ok(Observation {
        temperature_c: parsed.main.as_ref().and_then(|m| m.temp).filter(|t| t.is_finite()),
        wind_speed_mps: parsed.wind.and_then(|w| w.speed),
        humidity_pct: parsed.main.and_then(|m| m.humidity),
        condition_code: condition_code.filter(|c| !c.trim().is_empty()),
        description: description.unwrap_or_else(|| NO_DATA.to_string()),
        observed_at: parsed.dt,
        sunrise: parsed.sys.as_ref().and_then(|s| s.sunrise),
        sunset: parsed.sys.and_then(|s| s.sunset),
    })
}

/// The UV value may sit under `result.uv` or at the top level.
pub fn parse_uv(body: &str) -> Result<f64, GatewayError> {
    let parsed: GwUvResponse = serde_json::from_str(body)?;
    parsed
        .result
        .and_then(|r| r.uv)
        .or(parsed.uv)
        .ok_or(GatewayError::MissingUv)
}

#[async_trait]
impl WeatherGateway for HttpGateway {
    async fn current(&self, location: &Location) -> Result<Observation, GatewayError> {
        let body = self.get_body(&self.weather_endpoint, location).await?;
        parse_current(&body)
    }

    async fn uv_index(&self, location: &Location) -> Result<f64, GatewayError> {
        let body = self.get_body(&self.uv_endpoint, location).await?;
        parse_uv(&body)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        sync::oneshot,
    };

    const FULL_BODY: &str = r#"{
        "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
        "main": {"temp": 24.3, "feels_like": 24.1, "humidity": 61},
        "wind": {"speed": 4.6, "deg": 250},
        "dt": 1720000000,
        "sys": {"country": "MA", "sunrise": 1719985000, "sunset": 1720037000},
        "name": "Martil"
    }"#;

    /// Accept one connection, answer it, and hand back the request line.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let mut read = 0;
            loop {
                let n = socket.read(&mut buf[read..]).await.unwrap();
                read += n;
                if n == 0 || buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let request = String::from_utf8_lossy(&buf[..read]).to_string();
            let _ = tx.send(request.lines().next().unwrap_or_default().to_string());

            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        (format!("http://{addr}/gateway"), rx)
    }

    fn gateway(weather: String, uv: String) -> HttpGateway {
        let http = Client::builder().no_proxy().build().unwrap();
        HttpGateway::with_client(http, weather, uv)
    }

    fn martil() -> Location {
        Location::new("Martil", 35.621, -5.275)
    }

    #[test]
    fn parses_full_body() {
        let obs = parse_current(FULL_BODY).unwrap();
        assert_eq!(obs.temperature_c, Some(24.3));
        assert_eq!(obs.wind_speed_mps, Some(4.6));
        assert_eq!(obs.humidity_pct, Some(61.0));
        assert_eq!(obs.condition_code.as_deref(), Some("Clear"));
        assert_eq!(obs.description, "clear sky");
        assert_eq!(obs.observed_at, Some(1_720_000_000));
        assert_eq!(obs.sunrise, Some(1_719_985_000));
        assert_eq!(obs.sunset, Some(1_720_037_000));
    }

    #[test]
    fn missing_fields_are_absent_not_zero() {
        let obs = parse_current(r#"{"main": {"humidity": 80}, "weather": []}"#).unwrap();
        assert_eq!(obs.temperature_c, None);
        assert_eq!(obs.wind_speed_mps, None);
        assert_eq!(obs.humidity_pct, Some(80.0));
        assert_eq!(obs.condition_code, None);
        assert_eq!(obs.observed_at, None);
        assert_eq!(obs.sunrise, None);
    }

    #[test]
    fn non_json_body_is_malformed() {
        let err = parse_current("<html>rate limited</html>").unwrap_err();
        assert!(matches!(err, GatewayError::Malformed(_)));
    }

    #[test]
    fn non_object_body_is_malformed() {
        assert!(matches!(parse_current("[]"), Err(GatewayError::Malformed(_))));
    }

    #[test]
    fn wrongly_typed_field_is_malformed() {
        let res = parse_current(r#"{"main": {"temp": "hot"}}"#);
        assert!(matches!(res, Err(GatewayError::Malformed(_))));
    }

    #[test]
    fn uv_is_read_from_result_or_top_level() {
        assert_eq!(parse_uv(r#"{"result": {"uv": 7.2, "uv_max": 9.1}}"#).unwrap(), 7.2);
        assert_eq!(parse_uv(r#"{"uv": 3.5}"#).unwrap(), 3.5);
        assert!(matches!(parse_uv(r#"{"result": {}}"#), Err(GatewayError::MissingUv)));
    }

    #[test]
    fn truncates_long_bodies() {
        let long = "x".repeat(300);
        let out = truncate_body(&long);
        assert_eq!(out.len(), 203);
        assert!(out.ends_with("..."));
    }

    #[tokio::test]
    async fn fetches_current_weather_with_coordinates() {
        let (url, request_line) = serve_once("200 OK", FULL_BODY).await;
        let gw = gateway(url, "http://127.0.0.1:9/uv".to_string());

        let obs = gw.current(&martil()).await.unwrap();
        assert_eq!(obs.temperature_c, Some(24.3));

        let line = request_line.await.unwrap();
        assert!(line.starts_with("GET /gateway?lat=35.621&lon=-5.275"), "{line}");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let (url, _) = serve_once("429 Too Many Requests", r#"{"error":"slow down"}"#).await;
        let gw = gateway(url.clone(), url);

        let err = gw.uv_index(&martil()).await.unwrap_err();
        match err {
            GatewayError::Status { status, body } => {
                assert_eq!(status, 429);
                assert!(body.contains("slow down"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
