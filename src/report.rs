//! The printed report: fixed-order labeled lines built from one observation.

use std::io::{self, Write};

use crossterm::style::{Color, Stylize};
use tracing::{info, warn};

use crate::config::Config;
use crate::pws;
use crate::severity::{Reading, Tone, TEMPERATURE, WIND};
use crate::units::{direction::degrees_to_compass, temperature::feels_like};
use crate::weather::{or_missing, Measure, Observation, MISSING};

pub const TITLE: &str = "WEATHER STATION OBSERVATION";

const RULE: &str = "---------------------------";
const LABEL_WIDTH: usize = 19;

#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    Blank,
    Title(&'static str),
    Rule,
    Field {
        label: &'static str,
        parts: Vec<Reading>,
    },
}

impl Line {
    fn field(label: &'static str, parts: Vec<Reading>) -> Self {
        Line::Field { label, parts }
    }

    fn text(label: &'static str, text: impl Into<String>) -> Self {
        Line::field(label, vec![Reading::plain(text)])
    }

    /// Label padded to the value column, e.g. `"Humidity:         "`.
    pub fn padded_label(label: &str) -> String {
        format!("{:width$}", format!("{label}:"), width = LABEL_WIDTH)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub lines: Vec<Line>,
}

impl Report {
    pub fn from_observation(obs: &Observation) -> Self {
        let imperial = &obs.imperial;
        let temp = imperial.temp.as_ref();
        let wind_speed = imperial.wind_speed.as_ref();
        let location = format!(
            "{}, {} ({})",
            or_missing(obs.neighborhood.as_ref()),
            or_missing(obs.country.as_ref()),
            or_missing(obs.station_id.as_ref()),
        );

        let lines = vec![
            Line::Blank,
            Line::Title(TITLE),
            Line::Rule,
            Line::text("Observation Time", or_missing(obs.obs_time_local.as_ref())),
            Line::text("Location", location),
            Line::text("Hardware", or_missing(obs.software_type.as_ref())),
            Line::Blank,
            Line::field("Temperature", vec![TEMPERATURE.classify(temp)]),
            Line::field("Feels like", vec![feels_like_reading(obs)]),
            Line::field("Dew Point", vec![TEMPERATURE.classify(imperial.dewpt.as_ref())]),
            Line::text("Humidity", format!("{}%", or_missing(obs.humidity.as_ref()))),
            Line::field(
                "Wind",
                vec![
                    Reading::plain(compass(obs.wind_dir.as_ref()).unwrap_or(MISSING)),
                    Reading::plain(" @ "),
                    WIND.classify(wind_speed),
                    Reading::plain(" (Gusts @ "),
                    WIND.classify(imperial.wind_gust.as_ref()),
                    Reading::plain(")"),
                ],
            ),
            Line::field("Max Gust", vec![WIND.classify(obs.high_gust())]),
            Line::text("Pressure", format!("{} inHg", or_missing(imperial.pressure.as_ref()))),
            Line::text("Precip Rate", format!("{} in/hr", or_missing(imperial.precip_rate.as_ref()))),
            Line::text("Precip Total", format!("{} in", or_missing(imperial.precip_total.as_ref()))),
            Line::Blank,
        ];
        Self { lines }
    }

    /// Write the report, with ANSI colors when `color` is set.
    pub fn render<W: Write>(&self, out: &mut W, color: bool) -> io::Result<()> {
        for line in &self.lines {
            match line {
                Line::Blank => writeln!(out)?,
                Line::Title(title) if color => writeln!(out, "{}", (*title).dark_red().bold())?,
                Line::Title(title) => writeln!(out, "{title}")?,
                Line::Rule => writeln!(out, "{RULE}")?,
                Line::Field { label, parts } => {
                    write!(out, "{}", Line::padded_label(label))?;
                    for part in parts {
                        match part.tier {
                            Some(tier) if color => {
                                write!(out, "{}", part.text.as_str().with(ansi_color(tier.tone)))?
                            }
                            _ => write!(out, "{}", part.text)?,
                        }
                    }
                    writeln!(out)?;
                }
            }
        }
        Ok(())
    }

    pub fn to_plain_string(&self) -> String {
        let mut buf = Vec::new();
        // writing into a Vec cannot fail
        let _ = self.render(&mut buf, false);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// Compass label for a numeric wind direction field.
pub fn compass(wind_dir: Option<&Measure>) -> Option<&'static str> {
    match wind_dir? {
        Measure::Number(deg) => deg.as_f64().and_then(degrees_to_compass),
        Measure::Text(_) | Measure::Other(_) => None,
    }
}

fn feels_like_reading(obs: &Observation) -> Reading {
    let value = |m: Option<&Measure>| m.and_then(Measure::as_f64);
    match feels_like(
        value(obs.imperial.temp.as_ref()),
        value(obs.imperial.wind_speed.as_ref()),
        value(obs.humidity.as_ref()),
    ) {
        Some(apparent) => TEMPERATURE.classify_value(apparent),
        None => Reading::plain(MISSING),
    }
}

/// Colors as a 16-color terminal shows them.
pub fn ansi_color(tone: Tone) -> Color {
    match tone {
        Tone::White => Color::Grey,
        Tone::Cyan => Color::DarkCyan,
        Tone::LightBlue => Color::Blue,
        Tone::Green => Color::DarkGreen,
        Tone::Yellow => Color::DarkYellow,
        Tone::Magenta => Color::DarkMagenta,
        Tone::Red => Color::DarkRed,
    }
}

/// Fetch the current observation and print either the report or the
/// failure message. Returns the observation on success.
///
/// Fetch and parse failures are part of the output, not errors; only a
/// failed write to `out` is returned as `Err`.
pub fn print_current<W: Write>(config: &Config, out: &mut W) -> io::Result<Option<Observation>> {
    match pws::current_observation(config) {
        Ok(obs) => {
            info!(station = ?obs.station_id, "rendering report");
            Report::from_observation(&obs).render(out, config.color)?;
            Ok(Some(obs))
        }
        Err(err) => {
            warn!(error = ?err, "no report");
            writeln!(out, "{err}")?;
            Ok(None)
        }
    }
}
