use crate::{
    SearchState, WeatherReading,
    formatter::{condition_message, location_message_at, temperature_message},
};

pub const TITLE: &str = "Weather Widget";
pub const DESCRIPTION: &str = "Search for the current weather conditions in your city.";
pub const PLACEHOLDER: &str = "Enter a city name";

/// The three narrative lines shown for a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherMessages {
    pub temperature: String,
    pub condition: String,
    pub location: String,
}

impl WeatherMessages {
    pub fn at_hour(reading: &WeatherReading, hour: u32) -> Self {
        Self {
            temperature: temperature_message(reading.temperature, &reading.unit),
            condition: condition_message(&reading.condition_text),
            location: location_message_at(&reading.location_name, hour),
        }
    }
}

/// Everything the rendering layer needs from the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetView {
    pub messages: Option<WeatherMessages>,
    pub error_message: Option<&'static str>,
    pub is_loading: bool,
}

impl WidgetView {
    pub fn at_hour(state: &SearchState, hour: u32) -> Self {
        Self {
            messages: state.reading().map(|reading| WeatherMessages::at_hour(reading, hour)),
            error_message: state.error_message(),
            is_loading: state.is_loading(),
        }
    }

    /// The search button is disabled and relabelled while a lookup is in flight.
    pub fn button_label(&self) -> &'static str {
        if self.is_loading { "Loading..." } else { "Search" }
    }
}
