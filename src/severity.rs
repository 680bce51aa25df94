//! Severity banding: sort a reading into a colored display tier.

use crate::weather::{float_text, Measure, MISSING};

/// Display color of a tier, independent of the terminal backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    White,
    Cyan,
    LightBlue,
    Green,
    Yellow,
    Magenta,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tier {
    pub label: &'static str,
    pub tone: Tone,
}

impl Tier {
    const fn new(label: &'static str, tone: Tone) -> Self {
        Self { label, tone }
    }
}

/// Ascending thresholds, the tier for each, and the tier above them all.
#[derive(Debug, Clone, Copy)]
pub struct Scale {
    pub thresholds: &'static [f64],
    pub tiers: &'static [Tier],
    pub extreme: Tier,
    pub unit: &'static str,
}

/// Degrees Fahrenheit.
pub const TEMPERATURE: Scale = Scale {
    thresholds: &[32.0, 50.0, 70.0, 85.0],
    tiers: &[
        Tier::new("freezing", Tone::Cyan),
        Tier::new("cold", Tone::LightBlue),
        Tier::new("mild", Tone::Yellow),
        Tier::new("warm", Tone::Magenta),
    ],
    extreme: Tier::new("hot", Tone::Red),
    unit: "°",
};

/// Miles per hour.
pub const WIND: Scale = Scale {
    thresholds: &[0.0, 5.0, 15.0, 25.0],
    tiers: &[
        Tier::new("calm", Tone::White),
        Tier::new("light", Tone::Green),
        Tier::new("breezy", Tone::Yellow),
        Tier::new("windy", Tone::Magenta),
    ],
    extreme: Tier::new("severe", Tone::Red),
    unit: " mph",
};

/// First tier whose threshold is at or above `value`, else `extreme`.
///
/// `thresholds` and `tiers` pair up by position and thresholds must ascend.
pub fn classify_by_threshold<T: Copy>(value: f64, thresholds: &[f64], tiers: &[T], extreme: T) -> T {
    thresholds
        .iter()
        .zip(tiers)
        .find(|(limit, _)| value <= **limit)
        .map(|(_, tier)| *tier)
        .unwrap_or(extreme)
}

/// A reading ready for display: its text and, if it could be classified,
/// its tier.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub text: String,
    pub tier: Option<Tier>,
}

impl Reading {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tier: None,
        }
    }

    pub fn is_classified(&self) -> bool {
        self.tier.is_some()
    }
}

impl Scale {
    pub fn tier_of(&self, value: f64) -> Tier {
        classify_by_threshold(value, self.thresholds, self.tiers, self.extreme)
    }

    /// Classify a number; the text keeps the float form and the unit.
    pub fn classify_value(&self, value: f64) -> Reading {
        Reading {
            text: format!("{}{}", float_text(value), self.unit),
            tier: Some(self.tier_of(value)),
        }
    }

    /// Classify a raw field.
    ///
    /// Text that is not a number passes through unclassified, and a missing
    /// field becomes `N/A`; the unit is appended either way.
    pub fn classify(&self, measure: Option<&Measure>) -> Reading {
        match measure {
            Some(m) => match m.as_f64() {
                Some(value) => self.classify_value(value),
                None => Reading::plain(format!("{m}{}", self.unit)),
            },
            None => Reading::plain(format!("{MISSING}{}", self.unit)),
        }
    }
}
