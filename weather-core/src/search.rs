use parking_lot::Mutex;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::{SearchOutcome, WeatherReading, provider::WeatherProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Loading,
    Success,
    Failure,
}

/// Snapshot of the three display slots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchView {
    result: Option<WeatherReading>,
    error: Option<String>,
    loading: bool,
}

impl SearchView {
    pub fn result(&self) -> Option<&WeatherReading> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn phase(&self) -> SearchPhase {
        if self.loading {
            SearchPhase::Loading
        } else if self.result.is_some() {
            SearchPhase::Success
        } else if self.error.is_some() {
            SearchPhase::Failure
        } else {
            SearchPhase::Idle
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// Another search has not resolved yet. The new submission was dropped
    /// and the state left untouched.
    #[error("a search is already in progress")]
    InFlight,
}

/// Owns the search display state and allows one outstanding fetch at a time.
#[derive(Debug)]
pub struct SearchSession<P> {
    provider: P,
    state: Mutex<SearchView>,
}

impl<P: WeatherProvider> SearchSession<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            state: Mutex::new(SearchView::default()),
        }
    }

    pub fn view(&self) -> SearchView {
        self.state.lock().clone()
    }

    /// Run one search. Previous result and error are cleared before the
    /// request is issued; exactly one of them is set once it resolves.
    ///
    /// Returns [`SearchError::InFlight`] without touching state if a search
    /// is already outstanding.
    #[instrument(skip(self))]
    pub async fn search(&self, city: &str) -> Result<SearchOutcome, SearchError> {
        let in_flight = self.begin()?;

        let outcome = self.provider.fetch_weather(city).await;
        info!(success = outcome.is_success(), "search finished");

        in_flight.finish(&outcome);
        Ok(outcome)
    }

    fn begin(&self) -> Result<InFlight<'_>, SearchError> {
        let mut state = self.state.lock();
        if state.loading {
            warn!("search rejected, another one is still in flight");
            return Err(SearchError::InFlight);
        }

        state.result = None;
        state.error = None;
        state.loading = true;

        Ok(InFlight { state: &self.state })
    }
}

/// Clears the loading flag when dropped, so an abandoned search future
/// doesn't leave the session stuck in `Loading`.
struct InFlight<'a> {
    state: &'a Mutex<SearchView>,
}

impl InFlight<'_> {
    fn finish(self, outcome: &SearchOutcome) {
        // scoped so the lock is released before Drop takes it again
        {
            let mut state = self.state.lock();
            match outcome {
                SearchOutcome::Success(reading) => state.result = Some(reading.clone()),
                SearchOutcome::Failure(message) => state.error = Some(message.clone()),
            }
            state.loading = false;
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.state.lock().loading = false;
    }
}
