//! The search lifecycle: `Idle -> Loading -> Success | Error`.
//!
//! A search runs in two halves so that the lookup can be awaited without
//! holding the controller: [`SearchController::begin_search`] validates the
//! query and moves to `Loading`, the returned [`PendingSearch`] performs the
//! lookup, and [`SearchController::apply`] commits its [`SearchOutcome`].
//!
//! Every submission gets a sequence number. Only the outcome of the most
//! recent submission is applied; anything older is stale and dropped.

use std::sync::Arc;

use chrono::{Local, Timelike};
use tracing::{debug, info, warn};

use crate::{
    Config, SearchError, WeatherReading,
    provider::{WeatherApiProvider, WeatherProvider},
    view::WidgetView,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Loading,
    Success(WeatherReading),
    Error(SearchError),
}

impl SearchState {
    pub fn reading(&self) -> Option<&WeatherReading> {
        match self {
            SearchState::Success(reading) => Some(reading),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<SearchError> {
        match self {
            SearchState::Error(err) => Some(*err),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.error().map(|err| err.message())
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading)
    }
}

/// A lookup that has been started but whose result is not yet known.
#[derive(Debug)]
pub struct PendingSearch {
    sequence: u64,
    location: String,
    provider: Arc<dyn WeatherProvider>,
}

impl PendingSearch {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// The trimmed location sent to the provider.
    pub fn location(&self) -> &str {
        &self.location
    }

    pub async fn run(self) -> SearchOutcome {
        let result = match self.provider.current(&self.location).await {
            Ok(reading) => Ok(reading),
            Err(err) => {
                warn!(
                    sequence = self.sequence,
                    location = %self.location,
                    error = %format!("{err:#}"),
                    "weather lookup failed"
                );
                Err(SearchError::Lookup)
            }
        };

        SearchOutcome { sequence: self.sequence, result }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    sequence: u64,
    result: Result<WeatherReading, SearchError>,
}

impl SearchOutcome {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn result(&self) -> &Result<WeatherReading, SearchError> {
        &self.result
    }
}

#[derive(Debug)]
pub struct SearchController {
    provider: Arc<dyn WeatherProvider>,
    query: String,
    state: SearchState,
    /// Sequence number of the latest submission; 0 means none yet.
    latest: u64,
}

impl SearchController {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider, query: String::new(), state: SearchState::Idle, latest: 0 }
    }

    /// Builds a controller backed by WeatherAPI.com.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let provider = WeatherApiProvider::from_config(config)?;
        Ok(Self::new(Arc::new(provider)))
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Records raw input as the user types. Does not start a search.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn reading(&self) -> Option<&WeatherReading> {
        self.state.reading()
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.state.error_message()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Validates `raw_query` and, if it is usable, enters `Loading`.
    ///
    /// Returns `None` for an empty query; the state is then
    /// `Error(Validation)` and no lookup must be made. Either way the
    /// submission supersedes any search still in flight.
    pub fn begin_search(&mut self, raw_query: &str) -> Option<PendingSearch> {
        self.latest += 1;
        let sequence = self.latest;

        let location = raw_query.trim();
        if location.is_empty() {
            debug!(sequence, "rejected empty location");
            self.state = SearchState::Error(SearchError::Validation);
            return None;
        }

        debug!(sequence, location, "starting weather lookup");
        self.state = SearchState::Loading;

        Some(PendingSearch {
            sequence,
            location: location.to_string(),
            provider: Arc::clone(&self.provider),
        })
    }

    /// Commits `outcome` unless a newer search has been submitted since.
    ///
    /// Returns whether the outcome was applied.
    pub fn apply(&mut self, outcome: SearchOutcome) -> bool {
        if outcome.sequence != self.latest {
            debug!(
                sequence = outcome.sequence,
                latest = self.latest,
                "discarding stale search outcome"
            );
            return false;
        }

        self.state = match outcome.result {
            Ok(reading) => {
                info!(
                    sequence = outcome.sequence,
                    location = %reading.location_name,
                    temperature = reading.temperature,
                    "weather lookup succeeded"
                );
                SearchState::Success(reading)
            }
            Err(err) => SearchState::Error(err),
        };
        true
    }

    pub async fn submit_search(&mut self, raw_query: &str) {
        if let Some(pending) = self.begin_search(raw_query) {
            let outcome = pending.run().await;
            self.apply(outcome);
        }
    }

    /// Searches for the current query text.
    pub async fn submit(&mut self) {
        let query = self.query.clone();
        self.submit_search(&query).await;
    }

    pub fn view(&self) -> WidgetView {
        self.view_at(Local::now().hour())
    }

    pub fn view_at(&self, hour: u32) -> WidgetView {
        WidgetView::at_hour(&self.state, hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct FakeProvider {
        calls: Mutex<Vec<String>>,
        fail: bool,
    }

    impl FakeProvider {
        fn failing() -> Self {
            Self { fail: true, ..Self::default() }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl WeatherProvider for FakeProvider {
        async fn current(&self, location: &str) -> anyhow::Result<WeatherReading> {
            self.calls.lock().unwrap().push(location.to_string());
            if self.fail {
                anyhow::bail!("WeatherAPI current request failed with status 400 Bad Request");
            }
            Ok(WeatherReading::celsius(22.0, "Sunny", location))
        }
    }

    fn controller() -> (Arc<FakeProvider>, SearchController) {
        let provider = Arc::new(FakeProvider::default());
        let controller = SearchController::new(provider.clone());
        (provider, controller)
    }

    #[test]
    fn starts_idle() {
        let (_, controller) = controller();

        assert_eq!(controller.state(), &SearchState::Idle);
        assert_eq!(controller.query(), "");
        assert!(!controller.is_loading());
        assert!(controller.reading().is_none());
        assert!(controller.error_message().is_none());
    }

    #[tokio::test]
    async fn blank_queries_never_reach_the_provider() {
        let (provider, mut controller) = controller();

        for query in ["", " ", "   ", "\t\n"] {
            controller.submit_search(query).await;

            assert_eq!(controller.state(), &SearchState::Error(SearchError::Validation));
            assert_eq!(controller.error_message(), Some("Please enter a valid location."));
            assert!(controller.reading().is_none());
            assert!(!controller.is_loading());
        }
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn success_stores_reading_and_clears_error() {
        let (provider, mut controller) = controller();

        controller.submit_search("").await;
        controller.submit_search("  Paris ").await;

        assert_eq!(provider.calls(), vec!["Paris".to_string()]);
        assert_eq!(controller.reading(), Some(&WeatherReading::celsius(22.0, "Sunny", "Paris")));
        assert_eq!(controller.error_message(), None);
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn provider_failure_becomes_lookup_error() {
        let provider = Arc::new(FakeProvider::failing());
        let mut controller = SearchController::new(provider.clone());

        controller.submit_search("Nowhereville").await;

        assert_eq!(controller.state(), &SearchState::Error(SearchError::Lookup));
        assert_eq!(controller.error_message(), Some("City not found. Please try again."));
        assert!(controller.reading().is_none());
        assert!(!controller.is_loading());
        assert_eq!(provider.calls(), vec!["Nowhereville".to_string()]);
    }

    #[tokio::test]
    async fn loading_only_while_in_flight() {
        let (_, mut controller) = controller();
        assert!(!controller.is_loading());

        let pending = controller.begin_search("Paris").expect("non-empty query");
        assert!(controller.is_loading());
        assert_eq!(pending.location(), "Paris");

        let outcome = pending.run().await;
        assert!(controller.is_loading());

        assert!(controller.apply(outcome));
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn new_attempt_clears_previous_result() {
        let (_, mut controller) = controller();
        controller.submit_search("Paris").await;
        assert!(controller.reading().is_some());

        let _pending = controller.begin_search("London");

        assert_eq!(controller.state(), &SearchState::Loading);
        assert!(controller.reading().is_none());
        assert!(controller.error_message().is_none());
    }

    #[tokio::test]
    async fn stale_completion_is_discarded() {
        let (_, mut controller) = controller();

        let first = controller.begin_search("Paris").unwrap();
        let second = controller.begin_search("London").unwrap();
        assert!(second.sequence() > first.sequence());

        let second = second.run().await;
        let first = first.run().await;

        assert!(controller.apply(second));
        assert!(!controller.apply(first));
        assert_eq!(controller.reading().map(|r| r.location_name.as_str()), Some("London"));
    }

    #[tokio::test]
    async fn stale_completion_does_not_end_newer_loading() {
        let (_, mut controller) = controller();

        let first = controller.begin_search("Paris").unwrap();
        let _second = controller.begin_search("London").unwrap();

        assert!(!controller.apply(first.run().await));
        assert!(controller.is_loading());
    }

    #[tokio::test]
    async fn empty_submission_supersedes_in_flight_search() {
        let (_, mut controller) = controller();

        let pending = controller.begin_search("Paris").unwrap();
        controller.submit_search("   ").await;

        assert!(!controller.apply(pending.run().await));
        assert_eq!(controller.state(), &SearchState::Error(SearchError::Validation));
    }

    #[tokio::test]
    async fn submit_uses_current_query() {
        let (provider, mut controller) = controller();

        controller.set_query("Ber");
        controller.set_query("Berlin");
        assert!(provider.calls().is_empty());

        controller.submit().await;

        assert_eq!(provider.calls(), vec!["Berlin".to_string()]);
        assert_eq!(controller.query(), "Berlin");
    }

    #[tokio::test]
    async fn view_reflects_success() {
        let (_, mut controller) = controller();
        controller.submit_search("Paris").await;

        let view = controller.view_at(10);
        let messages = view.messages.expect("success has messages");

        assert_eq!(messages.temperature, "It's a pleasant 22°C. Enjoy the nice weather!");
        assert_eq!(messages.condition, "It's a beautiful sunny day!");
        assert_eq!(messages.location, "Paris During the Day");
        assert_eq!(view.error_message, None);
        assert!(!view.is_loading);
    }

    #[test]
    fn from_config_requires_api_key() {
        let err = SearchController::from_config(&Config::default()).unwrap_err();
        assert!(err.to_string().contains("No WeatherAPI key configured"));
    }
}
