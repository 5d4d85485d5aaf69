//! In-memory country source.
//!
//! Serves a fixed list without touching the network. Used for offline runs and as
//! the test double for the store and worker: it counts how often it was called and
//! can be told to fail a number of times before succeeding.

use crate::domain::error::{CountryError, Result};
use crate::domain::Country;
use crate::storage::backend::CountrySource;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Default)]
pub struct InMemorySource {
    countries: Vec<Country>,
    calls: AtomicUsize,
    failures_left: AtomicUsize,
    delay: Option<Duration>,
}

impl InMemorySource {
    #[must_use]
    pub fn new(countries: Vec<Country>) -> Self {
        Self {
            countries,
            ..Self::default()
        }
    }

    /// Fails the first `count` calls with a network error.
    #[must_use]
    pub fn failing_first(self, count: usize) -> Self {
        self.failures_left.store(count, Ordering::SeqCst);
        self
    }

    /// Sleeps for `delay` before answering each call.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of times the list was requested, successful or not.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CountrySource for InMemorySource {
    async fn list_european_countries(&self) -> Result<Vec<Country>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if failing {
            tracing::debug!(call, "in-memory source simulating network failure");
            return Err(CountryError::Network("simulated connection failure".to_string()));
        }

        Ok(self.countries.clone())
    }
}
