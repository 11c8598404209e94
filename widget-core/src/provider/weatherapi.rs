use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{Config, WeatherReading, provider::truncate_body};

use super::WeatherProvider;

/// Client for the WeatherAPI.com `current.json` endpoint.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String, base_url: impl Into<String>) -> Self {
        Self { api_key, base_url: base_url.into(), http: Client::new() }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.require_api_key()?;
        Ok(Self::new(api_key.to_owned(), config.base_url()))
    }

    fn current_url(&self) -> String {
        format!("{}/current.json", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    location: WaLocation,
    current: WaCurrent,
}

impl From<WaResponse> for WeatherReading {
    fn from(parsed: WaResponse) -> Self {
        WeatherReading::celsius(
            parsed.current.temp_c,
            parsed.current.condition.text,
            parsed.location.name,
        )
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn current(&self, location: &str) -> Result<WeatherReading> {
        // `query` percent-encodes the location.
        let res = self
            .http
            .get(self.current_url())
            .query(&[("key", self.api_key.as_str()), ("q", location)])
            .send()
            .await
            .context("Failed to send request to WeatherAPI.com (current)")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read WeatherAPI current response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "WeatherAPI current request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: WaResponse =
            serde_json::from_str(&body).context("Failed to parse WeatherAPI current JSON")?;

        Ok(parsed.into())
    }
}
