//! Core library for the weather widget.
//!
//! This crate defines:
//! - The search state machine and its controller
//! - Narrative messages derived from a weather reading
//! - Configuration & credentials handling
//! - Abstraction over the weather provider, with a WeatherAPI.com client
//!
//! It is used by the `weather-widget` binary, but has no terminal dependencies
//! and can drive any other front end.

pub mod config;
pub mod controller;
pub mod error;
pub mod formatter;
pub mod model;
pub mod provider;
pub mod view;

pub use config::{Config, WeatherApiConfig};
pub use controller::{PendingSearch, SearchController, SearchOutcome, SearchState};
pub use error::SearchError;
pub use model::{TemperatureUnit, WeatherReading};
pub use provider::{WeatherApiProvider, WeatherProvider};
pub use view::{WeatherMessages, WidgetView};
