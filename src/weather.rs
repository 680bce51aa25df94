use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Marker printed wherever a value is absent or cannot be computed.
pub const MISSING: &str = "N/A";

/// A single raw field of an observation.
///
/// Stations report numbers, but a misbehaving station can hand back text or
/// anything else, so every JSON value is accepted and the caller decides
/// what is usable.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Measure {
    Number(serde_json::Number),
    Text(String),
    Other(Value),
}

impl Measure {
    pub fn number(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(Measure::Number)
            .unwrap_or_else(|| Measure::Text(value.to_string()))
    }

    /// Numeric value, if the field is a number or text holding one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Measure::Number(n) => n.as_f64(),
            Measure::Text(s) => s.trim().parse().ok(),
            Measure::Other(_) => None,
        }
    }
}

impl From<&str> for Measure {
    fn from(value: &str) -> Self {
        Measure::Text(value.to_string())
    }
}

impl From<f64> for Measure {
    fn from(value: f64) -> Self {
        Measure::number(value)
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Number(n) => write!(f, "{n}"),
            Measure::Text(s) => f.write_str(s),
            Measure::Other(v) => write!(f, "{v}"),
        }
    }
}

/// Format a float the way it reads after a float conversion: whole numbers
/// keep a trailing `.0`.
pub fn float_text(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Text for an optional field, `N/A` when absent.
pub fn or_missing<T: fmt::Display>(value: Option<&T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => MISSING.to_string(),
    }
}

/// Text fields take whatever the station sent: strings as-is, other
/// values in their JSON form, `null` as absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

/// One current-conditions reading from a personal weather station.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    #[serde(rename = "stationID", default, deserialize_with = "lenient_text")]
    pub station_id: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub obs_time_local: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub obs_time_utc: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub neighborhood: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub country: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub software_type: Option<String>,

    pub humidity: Option<Measure>,

    #[serde(rename = "winddir")]
    pub wind_dir: Option<Measure>,

    pub imperial: Imperial,
}

impl Observation {
    /// UTC time the station took the reading.
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.obs_time_utc.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }

    /// The day's highest gust, falling back to the current gust.
    pub fn high_gust(&self) -> Option<&Measure> {
        self.imperial
            .wind_gust_daily_max
            .as_ref()
            .or(self.imperial.wind_gust.as_ref())
    }
}

/// Values reported in imperial units (°F, mph, inHg, in).
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Imperial {
    pub temp: Option<Measure>,

    pub dewpt: Option<Measure>,

    pub wind_speed: Option<Measure>,

    pub wind_gust: Option<Measure>,

    pub wind_gust_daily_max: Option<Measure>,

    pub pressure: Option<Measure>,

    pub precip_rate: Option<Measure>,

    pub precip_total: Option<Measure>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_accept_numbers_and_text() {
        let m: Measure = serde_json::from_str("72").unwrap();
        assert_eq!(m.as_f64(), Some(72.0));
        assert_eq!(m.to_string(), "72");

        let m: Measure = serde_json::from_str("30.02").unwrap();
        assert_eq!(m.to_string(), "30.02");

        let m: Measure = serde_json::from_str("\" 41.5\"").unwrap();
        assert_eq!(m.as_f64(), Some(41.5));

        let m: Measure = serde_json::from_str("\"bad\"").unwrap();
        assert_eq!(m.as_f64(), None);
        assert_eq!(m.to_string(), "bad");
    }

    #[test]
    fn unexpected_types_are_kept_raw() {
        let m: Measure = serde_json::from_str("true").unwrap();
        assert_eq!(m.as_f64(), None);
        assert_eq!(m.to_string(), "true");

        let m: Measure = serde_json::from_str(r#"{"value":1}"#).unwrap();
        assert_eq!(m.as_f64(), None);
        assert_eq!(m.to_string(), r#"{"value":1}"#);

        let obs: Observation = serde_json::from_str(
            r#"{"neighborhood":12,"country":null,"softwareType":["a"],"imperial":{"pressure":true}}"#,
        )
        .unwrap();
        assert_eq!(obs.neighborhood.as_deref(), Some("12"));
        assert!(obs.country.is_none());
        assert_eq!(obs.software_type.as_deref(), Some(r#"["a"]"#));
        assert_eq!(or_missing(obs.imperial.pressure.as_ref()), "true");
    }

    #[test]
    fn float_text_keeps_decimal() {
        assert_eq!(float_text(72.0), "72.0");
        assert_eq!(float_text(72.5), "72.5");
        assert_eq!(float_text(-3.0), "-3.0");
    }

    #[test]
    fn nulls_decode_as_missing() {
        let obs: Observation = serde_json::from_str(
            r#"{"stationID":"KMAHANOV10","winddir":null,"imperial":{"temp":null,"windGust":4}}"#,
        )
        .unwrap();
        assert_eq!(obs.station_id.as_deref(), Some("KMAHANOV10"));
        assert!(obs.wind_dir.is_none());
        assert!(obs.imperial.temp.is_none());
        assert_eq!(or_missing(obs.imperial.dewpt.as_ref()), MISSING);
    }

    #[test]
    fn high_gust_falls_back_to_current_gust() {
        let mut obs = Observation::default();
        assert!(obs.high_gust().is_none());

        obs.imperial.wind_gust = Some(Measure::from(12.0));
        assert_eq!(obs.high_gust(), Some(&Measure::from(12.0)));

        obs.imperial.wind_gust_daily_max = Some(Measure::from(20.0));
        assert_eq!(obs.high_gust(), Some(&Measure::from(20.0)));
    }

    #[test]
    fn observed_at_parses_utc() {
        let obs = Observation {
            obs_time_utc: Some("2019-02-19T15:06:41Z".to_string()),
            ..Default::default()
        };
        let at = obs.observed_at().unwrap();
        assert_eq!(at.to_rfc3339(), "2019-02-19T15:06:41+00:00");
    }
}
