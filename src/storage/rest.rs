//! HTTP country source backed by the public REST Countries API.
//!
//! One GET against `{base_url}region/{region}` returns the whole list as a JSON
//! array. Timeouts come from [`Config`]; there is no retry here, the store decides
//! when to call again.

use crate::domain::error::{CountryError, Result};
use crate::domain::Country;
use crate::storage::backend::CountrySource;
use crate::storage::models::CountryRecord;
use crate::Config;
use tracing::Instrument;

/// REST Countries client.
///
/// Cheap to clone; the underlying `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct RestCountriesClient {
    http: reqwest::Client,
    endpoint: String,
}

impl RestCountriesClient {
    /// Builds a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CountryError::Config`] if the HTTP client cannot be constructed
    /// (for example when no TLS backend is available).
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .user_agent(concat!("poi-countries/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CountryError::Config(format!("failed to build HTTP client: {e}")))?;

        let endpoint = config.endpoint();
        tracing::debug!(endpoint = %endpoint, "REST countries client created");

        Ok(Self { http, endpoint })
    }

    /// Full URL the client fetches from.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl CountrySource for RestCountriesClient {
    async fn list_european_countries(&self) -> Result<Vec<Country>> {
        let span = tracing::debug_span!("rest_list_countries", endpoint = %self.endpoint);

        async {
            let response = self.http.get(&self.endpoint).send().await?;

            let status = response.status();
            if !status.is_success() {
                tracing::debug!(status = status.as_u16(), "request rejected");
                return Err(CountryError::Status(status.as_u16()));
            }

            let records: Vec<CountryRecord> = response.json().await?;
            tracing::debug!(count = records.len(), "countries decoded");

            Ok(records.into_iter().map(Country::from).collect())
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_url_and_region() {
        let client = RestCountriesClient::new(&Config::default()).unwrap();
        assert_eq!(client.endpoint(), "https://restcountries.com/v3.1/region/europe");
    }

    #[test]
    fn endpoint_tolerates_missing_trailing_slash() {
        let config = Config {
            base_url: "http://localhost:8080/v3.1".to_string(),
            region: "asia".to_string(),
            ..Config::default()
        };
        let client = RestCountriesClient::new(&config).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8080/v3.1/region/asia");
    }
}
