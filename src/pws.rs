//! Client for the weather.com personal weather station API.

use reqwest::blocking::{Client, Response};
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::weather::Observation;

pub const BASE_URL: &str = "https://api.weather.com";

const USER_AGENT: &str = concat!("wground/", env!("CARGO_PKG_VERSION"));

/// Fetch and decode the latest observation for the configured station.
pub fn current_observation(config: &Config) -> Result<Observation> {
    let body: Value = get_web_json(config)?.error_for_status()?.json()?;
    let observation = decode(&body)?;

    if let Some(at) = observation.observed_at() {
        let age = chrono::Utc::now().signed_duration_since(at);
        debug!(age_secs = age.num_seconds(), "observation age");
        if age > chrono::Duration::hours(1) {
            warn!(observed_at = %at, "station has not reported in over an hour");
        }
    }

    Ok(observation)
}

/// Pull the first observation out of a decoded response body.
pub fn decode(body: &Value) -> Result<Observation> {
    let observations = present(body, "observations")?;
    let first = observations
        .as_array()
        .and_then(|list| list.first())
        .ok_or(Error::MissingKey("observations[0]"))?;
    present(first, "imperial")?;

    Ok(Observation::deserialize(first)?)
}

fn present<'a>(value: &'a Value, key: &'static str) -> Result<&'a Value> {
    value
        .get(key)
        .filter(|v| !v.is_null())
        .ok_or(Error::MissingKey(key))
}

/// Request URL for the current observation, imperial units.
pub fn observation_url(config: &Config) -> String {
    format!(
        "{}/v2/pws/observations/current?stationId={}&format=json&units=e&apiKey={}",
        config.base_url.trim_end_matches('/'),
        config.station_id,
        config.api_key
    )
}

fn get_web_json(config: &Config) -> Result<Response> {
    let client = Client::builder().user_agent(USER_AGENT).build()?;
    info!(station = %config.station_id, base_url = %config.base_url, "fetching current observation");
    let response = client
        .get(observation_url(config))
        .header(ACCEPT, "application/json")
        .send()?;
    debug!(status = %response.status(), "response received");
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Report;
    use serde_json::json;

    fn config() -> Config {
        Config {
            station_id: "KMAHANOV10".to_string(),
            api_key: "secret".to_string(),
            base_url: "http://localhost:8080/".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn url_carries_station_and_units() {
        assert_eq!(
            observation_url(&config()),
            "http://localhost:8080/v2/pws/observations/current?stationId=KMAHANOV10&format=json&units=e&apiKey=secret"
        );
    }

    #[test]
    fn decode_takes_first_observation() {
        let body = json!({
            "observations": [
                {"stationID": "A", "humidity": 45, "imperial": {"temp": 71}},
                {"stationID": "B", "imperial": {}}
            ]
        });
        let obs = decode(&body).unwrap();
        assert_eq!(obs.station_id.as_deref(), Some("A"));
        assert_eq!(obs.imperial.temp.and_then(|m| m.as_f64()), Some(71.0));
    }

    #[test]
    fn decode_reports_missing_keys() {
        let err = decode(&json!({})).unwrap_err();
        assert!(matches!(err, Error::MissingKey("observations")));

        let err = decode(&json!({"observations": []})).unwrap_err();
        assert!(matches!(err, Error::MissingKey("observations[0]")));

        let err = decode(&json!({"observations": [{"stationID": "A"}]})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error parsing weather data: Missing key 'imperial'"
        );

        let err = decode(&json!({"observations": [{"imperial": null}]})).unwrap_err();
        assert!(matches!(err, Error::MissingKey("imperial")));
    }

    #[test]
    fn decode_keeps_unexpected_field_types() {
        let body = json!({
            "observations": [
                {"neighborhood": 12, "imperial": {"temp": 72, "pressure": true, "dewpt": {"value": 1}}}
            ]
        });
        let obs = decode(&body).unwrap();
        let text = Report::from_observation(&obs).to_plain_string();
        assert!(text.contains("Location:          12, N/A (N/A)\n"));
        assert!(text.contains("Temperature:       72.0°\n"));
        assert!(text.contains("Dew Point:         {\"value\":1}°\n"));
        assert!(text.contains("Pressure:          true inHg\n"));
    }

    #[test]
    fn decode_rejects_non_object_imperial() {
        let body = json!({"observations": [{"imperial": "none"}]});
        let err = decode(&body).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        assert!(err.to_string().starts_with("Error fetching weather data: "));
    }
}
