//! Narrative messages derived from a [`WeatherReading`](crate::WeatherReading).
//!
//! Every function here is total and side-effect free, except that
//! [`location_message`] reads the local wall clock.

use chrono::{Local, Timelike};

use crate::TemperatureUnit;

/// Whether it is day or night for the person looking at the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPeriod {
    Day,
    Night,
}

impl DayPeriod {
    /// Night is `[18, 24)` and `[0, 6)`.
    pub fn from_hour(hour: u32) -> Self {
        if hour >= 18 || hour < 6 { DayPeriod::Night } else { DayPeriod::Day }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayPeriod::Day => "During the Day",
            DayPeriod::Night => "at Night",
        }
    }
}

pub fn temperature_message(temperature: f64, unit: &TemperatureUnit) -> String {
    // `-0.0 + 0.0` is `0.0`, so negative zero prints without a sign.
    let temperature = temperature + 0.0;

    if *unit != TemperatureUnit::Celsius {
        return format!("{temperature}°{unit}");
    }

    if temperature < 0.0 {
        format!("It's freezing at {temperature}°C! Bundle up!")
    } else if temperature < 10.0 {
        format!("It's quite cold at {temperature}°C. Wear warm clothes.")
    } else if temperature < 20.0 {
        format!("The temperature is {temperature}°C. Comfortable for a light jacket.")
    } else if temperature < 30.0 {
        format!("It's a pleasant {temperature}°C. Enjoy the nice weather!")
    } else {
        format!("It's hot at {temperature}°C. Stay hydrated!")
    }
}

fn canned_condition(key: &str) -> Option<&'static str> {
    let message = match key {
        "sunny" => "It's a beautiful sunny day!",
        "partly cloudy" => "Expect some clouds and sunshine.",
        "cloudy" => "It's cloudy today.",
        "overcast" => "The sky is overcast.",
        "rain" => "Don't forget your umbrella! It's raining.",
        "thunderstorm" => "Thunderstorms are expected today.",
        "snow" => "Bundle up! It's snowing.",
        "mist" => "It's misty outside.",
        "fog" => "Be careful, there's fog outside.",
        _ => return None,
    };
    Some(message)
}

/// Unknown conditions are passed through unchanged.
pub fn condition_message(condition_text: &str) -> String {
    canned_condition(&condition_text.to_lowercase())
        .map(str::to_string)
        .unwrap_or_else(|| condition_text.to_string())
}

/// Uses the caller's local hour, not the local time at the location.
pub fn location_message(location_name: &str) -> String {
    location_message_at(location_name, Local::now().hour())
}

pub fn location_message_at(location_name: &str, hour: u32) -> String {
    format!("{location_name} {}", DayPeriod::from_hour(hour).label())
}
