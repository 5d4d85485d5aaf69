//! Fetch-once country store.
//!
//! [`CountryStore`] sits in front of a [`CountrySource`] and keeps the first
//! successful result for the lifetime of the process. Later calls are served from
//! memory. A failed fetch caches nothing, so the next call goes to the source again.
//!
//! Concurrent callers are coalesced: while one fetch is in flight, other callers
//! wait for it instead of issuing their own request.

use crate::domain::error::{CountryError, Result};
use crate::domain::Country;
use crate::storage::backend::CountrySource;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

/// The cached list together with the time it arrived.
#[derive(Debug, Clone)]
struct Snapshot {
    countries: Arc<Vec<Country>>,
    fetched_at: DateTime<Utc>,
}

/// In-memory cache over a remote country source.
///
/// # Examples
///
/// ```
/// use poi_countries::storage::{CountryStore, InMemorySource};
/// use poi_countries::Country;
/// use std::sync::Arc;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> poi_countries::Result<()> {
/// let source = Arc::new(InMemorySource::new(vec![
///     Country::new("FRA", "France", "Western Europe", 67_000_000),
/// ]));
/// let store = CountryStore::new(source.clone());
///
/// let first = store.fetch().await?;
/// let second = store.fetch().await?;
/// assert!(Arc::ptr_eq(&first, &second));
/// assert_eq!(source.calls(), 1);
/// # Ok(())
/// # }
/// ```
pub struct CountryStore {
    source: Arc<dyn CountrySource>,
    cache: RwLock<Option<Snapshot>>,
    /// Held for the duration of a remote call so that only one runs at a time.
    fetching: Mutex<()>,
}

impl CountryStore {
    pub fn new(source: Arc<dyn CountrySource>) -> Self {
        Self {
            source,
            cache: RwLock::new(None),
            fetching: Mutex::new(()),
        }
    }

    /// Returns the country list, fetching it from the source on first use.
    ///
    /// # Errors
    ///
    /// Returns the source's error if the list is not cached yet and the remote call
    /// fails. Nothing is cached in that case.
    pub async fn fetch(&self) -> Result<Arc<Vec<Country>>> {
        self.fetch_once()
            .instrument(tracing::debug_span!("store_fetch"))
            .await
    }

    async fn fetch_once(&self) -> Result<Arc<Vec<Country>>> {
        if let Some(countries) = self.cached().await {
            tracing::debug!(count = countries.len(), "countries served from cache");
            return Ok(countries);
        }

        let _in_flight = self.fetching.lock().await;

        // Another caller may have filled the cache while we waited for the lock.
        if let Some(countries) = self.cached().await {
            tracing::debug!(count = countries.len(), "countries fetched by concurrent caller");
            return Ok(countries);
        }

        tracing::debug!("fetching countries from source");
        let countries = match self.source.list_european_countries().await {
            Ok(countries) => Arc::new(countries),
            Err(e) => {
                tracing::debug!(error = %e, "country fetch failed, cache left empty");
                return Err(e);
            }
        };

        *self.cache.write().await = Some(Snapshot {
            countries: Arc::clone(&countries),
            fetched_at: Utc::now(),
        });

        tracing::debug!(count = countries.len(), "countries cached");
        Ok(countries)
    }

    /// Like [`fetch`](Self::fetch), but gives up as soon as `token` is cancelled.
    ///
    /// An abandoned fetch leaves the cache untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CountryError::Cancelled`] if the token fires first, otherwise the
    /// same errors as [`fetch`](Self::fetch).
    pub async fn fetch_cancellable(&self, token: &CancellationToken) -> Result<Arc<Vec<Country>>> {
        tokio::select! {
            biased;
            () = token.cancelled() => {
                tracing::debug!("country fetch abandoned by requester");
                Err(CountryError::Cancelled)
            }
            result = self.fetch() => result,
        }
    }

    /// The cached list, without contacting the source.
    pub async fn cached(&self) -> Option<Arc<Vec<Country>>> {
        self.cache
            .read()
            .await
            .as_ref()
            .map(|snapshot| Arc::clone(&snapshot.countries))
    }

    /// When the cached list was fetched, if it has been.
    pub async fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.cache.read().await.as_ref().map(|snapshot| snapshot.fetched_at)
    }
}

impl std::fmt::Debug for CountryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountryStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemorySource;
    use std::time::Duration;

    fn countries() -> Vec<Country> {
        vec![
            Country::new("DEU", "Germany", "Western Europe", 83_000_000),
            Country::new("FRA", "France", "Western Europe", 67_000_000),
        ]
    }

    #[tokio::test]
    async fn second_fetch_is_served_from_cache() {
        let source = Arc::new(InMemorySource::new(countries()));
        let store = CountryStore::new(source.clone());

        let first = store.fetch().await.unwrap();
        let second = store.fetch().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.calls(), 1);
        assert!(store.fetched_at().await.is_some());
    }

    #[tokio::test]
    async fn failed_fetch_is_retried_on_next_call() {
        let source = Arc::new(InMemorySource::new(countries()).failing_first(1));
        let store = CountryStore::new(source.clone());

        let err = store.fetch().await.unwrap_err();
        assert!(err.is_network());
        assert!(store.cached().await.is_none());

        let list = store.fetch().await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn concurrent_fetches_share_one_remote_call() {
        let source = Arc::new(InMemorySource::new(countries()).with_delay(Duration::from_millis(50)));
        let store = CountryStore::new(source.clone());

        let (a, b, c) = tokio::join!(store.fetch(), store.fetch(), store.fetch());

        assert_eq!(source.calls(), 1);
        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
        assert_eq!(c.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn cancelled_fetch_caches_nothing() {
        let source = Arc::new(InMemorySource::new(countries()).with_delay(Duration::from_secs(30)));
        let store = CountryStore::new(source.clone());
        let token = CancellationToken::new();
        token.cancel();

        let err = store.fetch_cancellable(&token).await.unwrap_err();
        assert!(matches!(err, CountryError::Cancelled));
        assert!(store.cached().await.is_none());
    }
}
