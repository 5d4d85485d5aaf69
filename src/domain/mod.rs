//! Domain layer for the country browser.
//!
//! This module contains the core domain types and the pure list rules, independent
//! of HTTP, async runtimes or any view toolkit.
//!
//! # Organization
//!
//! - [`country`]: Country record and its border/flag value types
//! - [`criteria`]: Sort and filter criteria
//! - [`error`]: Error types and result aliases
//! - [`matching`]: Search predicate, comparators and subregion filter
//!
//! # Examples
//!
//! ```
//! use poi_countries::domain::{Country, FilterSpec, matching};
//!
//! let countries = vec![
//!     Country::new("DEU", "Germany", "Western Europe", 83_000_000),
//!     Country::new("POL", "Poland", "Central Europe", 38_000_000),
//! ];
//! let western = matching::filter_countries(&countries, &FilterSpec::new(["Western Europe"]));
//! assert_eq!(western.len(), 1);
//! ```

pub mod country;
pub mod criteria;
pub mod error;
pub mod matching;

pub use country::{Borders, Country, FlagImage};
pub use criteria::{FilterSpec, SortFeature, SortSpec};
pub use error::{CountryError, Result};
