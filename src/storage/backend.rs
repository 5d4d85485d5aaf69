//! Remote country source abstraction.
//!
//! This module defines the [`CountrySource`] trait that abstracts over where the
//! country list comes from. The store only ever asks for the whole list, so the
//! trait has a single operation.

use crate::domain::error::Result;
use crate::domain::Country;

/// Anything that can produce the European country list.
///
/// # Implementations
///
/// - [`RestCountriesClient`](crate::storage::RestCountriesClient): HTTP client for the
///   public REST Countries API
///
/// Tests provide in-memory implementations to count calls and inject failures.
///
/// # Examples
///
/// ```no_run
/// use poi_countries::storage::{CountrySource, RestCountriesClient};
/// use poi_countries::Config;
///
/// # async fn run() -> poi_countries::Result<()> {
/// let client = RestCountriesClient::new(&Config::default())?;
/// let countries = client.list_european_countries().await?;
/// println!("{} countries", countries.len());
/// # Ok(())
/// # }
/// ```
#[async_trait::async_trait]
pub trait CountrySource: Send + Sync {
    /// Fetches the full, ordered list of countries.
    ///
    /// # Errors
    ///
    /// Returns a network error if the remote call fails, or a decode error if the
    /// response does not have the expected shape.
    async fn list_european_countries(&self) -> Result<Vec<Country>>;
}
