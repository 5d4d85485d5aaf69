//! poi-countries: browse the European country list with search, sort and filter.
//!
//! The list is fetched once from the REST Countries API and kept in memory. The
//! user narrows it with a subregion filter, orders it by name or population, and
//! searches it by name prefix. All three criteria stay active together and are
//! replayed whenever the list view comes back.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  Terminal shim (main.rs)                     │
//! └──────────────────────────────────────────────┘
//!                       │ events
//! ┌──────────────────────────────────────────────┐
//! │  Application layer (app/)                    │
//! │  - ListPipeline: filter → sort → search      │
//! │  - handle_event / Action / Session           │
//! └──────────────────────────────────────────────┘
//!        │                 │                │
//! ┌─────────────┐  ┌───────────────┐  ┌──────────────┐
//! │ UI (ui/)    │  │ Worker        │  │ Storage      │
//! │ view models │  │ (worker/)     │  │ (storage/)   │
//! │ text render │  │ fetch tasks   │  │ REST + cache │
//! └─────────────┘  └───────────────┘  └──────────────┘
//!                       │
//! ┌──────────────────────────────────────────────┐
//! │  domain/ (Country, criteria, matching, error)│
//! │  infrastructure/ (paths), observability/     │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use poi_countries::app::{Event, Session};
//! use poi_countries::storage::{CountryStore, InMemorySource};
//! use poi_countries::{Country, SortFeature};
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> poi_countries::Result<()> {
//! let source = Arc::new(InMemorySource::new(vec![
//!     Country::new("NOR", "Norway", "Northern Europe", 5_400_000),
//!     Country::new("SWE", "Sweden", "Northern Europe", 10_500_000),
//! ]));
//! let mut session = Session::new(Arc::new(CountryStore::new(source)));
//!
//! session.dispatch(&Event::Started)?;
//! session.pump().await?;
//! session.dispatch(&Event::SortApplied {
//!     feature: Some(SortFeature::Population),
//!     descending: Some(true),
//! })?;
//!
//! assert_eq!(session.state().pipeline.displayed()[0].name, "Sweden");
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, ListPipeline, ListSnapshot, Session};
pub use domain::{Borders, Country, CountryError, FilterSpec, FlagImage, Result, SortFeature, SortSpec};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1/";
const DEFAULT_REGION: &str = "europe";
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(60);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Runtime configuration.
///
/// Built from a TOML file, from string key/value pairs, or from defaults. Keys in
/// both forms are `base_url`, `region`, `connect_timeout_secs`,
/// `request_timeout_secs`, `trace_level` and `data_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// API root. Default: `https://restcountries.com/v3.1/`
    pub base_url: String,
    /// Region path segment. Default: `europe`
    pub region: String,
    /// Default: 60 seconds.
    pub connect_timeout: Duration,
    /// Upper bound on the whole request. Default: 120 seconds.
    pub request_timeout: Duration,
    /// `trace`, `debug`, `info`, `warn` or `error`; `RUST_LOG` wins if set.
    pub trace_level: Option<String>,
    /// Overrides the platform data directory (supports `~`).
    pub data_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            region: DEFAULT_REGION.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            trace_level: None,
            data_dir: None,
        }
    }
}

/// On-disk shape of the configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    base_url: Option<String>,
    region: Option<String>,
    connect_timeout_secs: Option<u64>,
    request_timeout_secs: Option<u64>,
    trace_level: Option<String>,
    data_dir: Option<String>,
}

impl Config {
    /// Parses configuration from string key/value pairs.
    ///
    /// Missing keys, empty values and unparseable timeouts fall back to defaults.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use std::time::Duration;
    /// use poi_countries::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("region".to_string(), "asia".to_string());
    /// map.insert("connect_timeout_secs".to_string(), "5".to_string());
    /// map.insert("request_timeout_secs".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.region, "asia");
    /// assert_eq!(config.connect_timeout, Duration::from_secs(5));
    /// assert_eq!(config.request_timeout, Duration::from_secs(120));
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let text = |key: &str| map.get(key).map(|v| v.trim()).filter(|v| !v.is_empty()).map(String::from);
        let secs = |key: &str| text(key).and_then(|v| v.parse::<u64>().ok()).map(Duration::from_secs);

        let defaults = Self::default();
        Self {
            base_url: text("base_url").unwrap_or(defaults.base_url),
            region: text("region").unwrap_or(defaults.region),
            connect_timeout: secs("connect_timeout_secs").unwrap_or(defaults.connect_timeout),
            request_timeout: secs("request_timeout_secs").unwrap_or(defaults.request_timeout),
            trace_level: text("trace_level"),
            data_dir: text("data_dir"),
        }
    }

    /// Reads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`CountryError::Io`] if the file cannot be read and
    /// [`CountryError::Config`] if it is not valid TOML or has unknown keys.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let file: ConfigFile = toml::from_str(&content)
            .map_err(|e| CountryError::Config(format!("{}: {e}", path.display())))?;

        let defaults = Self::default();
        Ok(Self {
            base_url: file.base_url.unwrap_or(defaults.base_url),
            region: file.region.unwrap_or(defaults.region),
            connect_timeout: file.connect_timeout_secs.map_or(defaults.connect_timeout, Duration::from_secs),
            request_timeout: file.request_timeout_secs.map_or(defaults.request_timeout, Duration::from_secs),
            trace_level: file.trace_level,
            data_dir: file.data_dir,
        })
    }

    /// Reads the file at the platform config location if it exists, else defaults.
    ///
    /// # Errors
    ///
    /// Same as [`from_file`](Self::from_file) when the file exists but is invalid.
    pub fn load_default_location() -> Result<Self> {
        match infrastructure::config_file() {
            Some(path) if path.exists() => Self::from_file(path),
            _ => Ok(Self::default()),
        }
    }

    /// URL of the region listing, `{base_url}region/{region}`.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/region/{}", self.base_url.trim_end_matches('/'), self.region)
    }
}

/// Sets up tracing and builds a session backed by the REST Countries API.
///
/// # Errors
///
/// Returns [`CountryError::Config`] if the HTTP client cannot be built.
pub fn initialize(config: &Config) -> Result<Session> {
    observability::init_tracing(config);
    tracing::debug!(endpoint = %config.endpoint(), "initializing poi-countries");

    let client = storage::RestCountriesClient::new(config)?;
    let store = storage::CountryStore::new(Arc::new(client));
    Ok(Session::new(Arc::new(store)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_endpoint_is_europe() {
        assert_eq!(Config::default().endpoint(), "https://restcountries.com/v3.1/region/europe");
    }

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_map(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn file_overrides_selected_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "region = \"oceania\"\nrequest_timeout_secs = 10\ntrace_level = \"debug\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();

        assert_eq!(config.region, "oceania");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn unknown_key_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "scan_depth = 4").unwrap();

        assert!(matches!(Config::from_file(file.path()), Err(CountryError::Config(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::from_file(dir.path().join("absent.toml")),
            Err(CountryError::Io(_))
        ));
    }
}
