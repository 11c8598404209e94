use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit a reading's temperature is expressed in.
///
/// Only Celsius drives narrative formatting; any other unit is carried through
/// as an opaque label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TemperatureUnit {
    Celsius,
    Other(String),
}

impl TemperatureUnit {
    pub fn as_str(&self) -> &str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Other(label) => label,
        }
    }
}

impl From<&str> for TemperatureUnit {
    fn from(value: &str) -> Self {
        match value {
            "C" => TemperatureUnit::Celsius,
            other => TemperatureUnit::Other(other.to_string()),
        }
    }
}

impl From<String> for TemperatureUnit {
    fn from(value: String) -> Self {
        if value == "C" { TemperatureUnit::Celsius } else { TemperatureUnit::Other(value) }
    }
}

impl From<TemperatureUnit> for String {
    fn from(unit: TemperatureUnit) -> Self {
        match unit {
            TemperatureUnit::Celsius => "C".to_string(),
            TemperatureUnit::Other(label) => label,
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single normalized weather observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temperature: f64,
    /// Free-form description such as "Partly cloudy".
    pub condition_text: String,
    /// Display name resolved by the provider, which may differ from the query.
    pub location_name: String,
    pub unit: TemperatureUnit,
}

impl WeatherReading {
    pub fn celsius(
        temperature: f64,
        condition_text: impl Into<String>,
        location_name: impl Into<String>,
    ) -> Self {
        Self {
            temperature,
            condition_text: condition_text.into(),
            location_name: location_name.into(),
            unit: TemperatureUnit::Celsius,
        }
    }
}
