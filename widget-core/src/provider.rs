use crate::WeatherReading;
use async_trait::async_trait;
use std::fmt::Debug;

pub mod weatherapi;

pub use weatherapi::WeatherApiProvider;

/// A remote source of current weather conditions.
///
/// Implementations report every failure (transport, non-success status,
/// malformed body) as an error; callers do not distinguish between them.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, location: &str) -> anyhow::Result<WeatherReading>;
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
