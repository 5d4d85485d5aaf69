//! Sort and filter criteria applied to the country list.
//!
//! These are plain values: the list pipeline stores the most recently applied
//! criteria and replays them, and the view reads them back to restore dialog state.

use crate::domain::error::{CountryError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Field a country list can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortFeature {
    Name,
    Population,
}

impl SortFeature {
    /// Label shown on the sort dialog buttons.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Population => "Population",
        }
    }
}

impl fmt::Display for SortFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortFeature {
    type Err = CountryError;

    /// Parses a sort feature label, ignoring case.
    ///
    /// ```
    /// use poi_countries::SortFeature;
    ///
    /// assert_eq!("name".parse::<SortFeature>().unwrap(), SortFeature::Name);
    /// assert_eq!("Population".parse::<SortFeature>().unwrap(), SortFeature::Population);
    /// assert!("area".parse::<SortFeature>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("name") {
            Ok(Self::Name)
        } else if trimmed.eq_ignore_ascii_case("population") {
            Ok(Self::Population)
        } else {
            Err(CountryError::InvalidInput(format!("unknown sort feature: {s}")))
        }
    }
}

/// An active sort: which feature, and in which direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub feature: SortFeature,
    pub descending: bool,
}

impl SortSpec {
    #[must_use]
    pub const fn new(feature: SortFeature, descending: bool) -> Self {
        Self { feature, descending }
    }

    /// Builds a spec only when both parts are present.
    ///
    /// A missing feature or direction is the "clear sort" request, so this returns
    /// `None` in that case.
    #[must_use]
    pub fn from_parts(feature: Option<SortFeature>, descending: Option<bool>) -> Option<Self> {
        Some(Self::new(feature?, descending?))
    }
}

/// Set of subregions a country must belong to in order to stay visible.
///
/// Kept ordered so that dialog state and log output are deterministic. An empty
/// set is never stored as an active filter; it is the "clear filter" request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSpec {
    subregions: BTreeSet<String>,
}

impl FilterSpec {
    #[must_use]
    pub fn new<I, S>(subregions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            subregions: subregions.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, subregion: &str) -> bool {
        self.subregions.contains(subregion)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subregions.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subregions.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.subregions.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for FilterSpec {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_spec_requires_both_parts() {
        assert_eq!(SortSpec::from_parts(Some(SortFeature::Name), None), None);
        assert_eq!(SortSpec::from_parts(None, Some(true)), None);
        assert_eq!(
            SortSpec::from_parts(Some(SortFeature::Population), Some(true)),
            Some(SortSpec::new(SortFeature::Population, true))
        );
    }

    #[test]
    fn filter_spec_deduplicates_and_orders() {
        let spec: FilterSpec = ["Western Europe", "Central Europe", "Western Europe"]
            .into_iter()
            .collect();
        assert_eq!(spec.len(), 2);
        assert_eq!(spec.iter().collect::<Vec<_>>(), vec!["Central Europe", "Western Europe"]);
        assert!(spec.contains("Central Europe"));
        assert!(!spec.contains("central europe"));
    }
}
