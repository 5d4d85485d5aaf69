//! Country domain model.
//!
//! A [`Country`] is an immutable value record fetched once from the remote API and
//! shared by every derived list view. The display `name` doubles as the identity key
//! used when diffing list rows.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Neighbouring-country information for a [`Country`].
///
/// The remote API omits the `borders` field for some records and sends an empty
/// array for others. The two cases are kept apart: `Unknown` means no border data
/// was provided, `Known(vec![])` means the country is confirmed to have no land
/// neighbours.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<Vec<String>>", into = "Option<Vec<String>>")]
pub enum Borders {
    #[default]
    Unknown,
    Known(Vec<String>),
}

impl Borders {
    /// Border codes, empty for both `Unknown` and a confirmed empty list.
    #[must_use]
    pub fn codes(&self) -> &[String] {
        match self {
            Self::Unknown => &[],
            Self::Known(codes) => codes,
        }
    }

    #[must_use]
    pub const fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl From<Option<Vec<String>>> for Borders {
    fn from(value: Option<Vec<String>>) -> Self {
        value.map_or(Self::Unknown, Self::Known)
    }
}

impl From<Borders> for Option<Vec<String>> {
    fn from(value: Borders) -> Self {
        match value {
            Borders::Unknown => None,
            Borders::Known(codes) => Some(codes),
        }
    }
}

/// Reference to the externally hosted flag image.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlagImage {
    /// PNG URL, if the API supplied one.
    pub url: Option<String>,
    /// Accessible text description of the flag.
    pub description: Option<String>,
}

/// A single country as shown in the list and detail screens.
///
/// # Fields
///
/// - `code`: ISO 3166-1 alpha-3 code, unique per fetch
/// - `name`: common display name, used as the search, sort and diff key
/// - `subregion`: geographic sub-classification used for filtering
/// - `population`: head count used for sorting
/// - `area`: surface in square kilometres
/// - `capital`: capitals in API order, possibly empty
/// - `languages`: language code to display name
/// - `borders`: neighbour codes, see [`Borders`]
/// - `flag`: flag image reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    pub name: String,
    pub subregion: String,
    pub population: u64,
    pub area: f64,
    pub capital: Vec<String>,
    pub languages: BTreeMap<String, String>,
    pub borders: Borders,
    pub flag: FlagImage,
}

impl Country {
    /// Creates a country with the fields the list pipeline cares about.
    ///
    /// Everything else starts empty and can be filled in with the `with_*` builders.
    ///
    /// # Examples
    ///
    /// ```
    /// use poi_countries::Country;
    ///
    /// let france = Country::new("FRA", "France", "Western Europe", 67_000_000)
    ///     .with_capital(["Paris"]);
    /// assert_eq!(france.capital_name(), Some("Paris"));
    /// assert!(!france.borders.is_known());
    /// ```
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        subregion: impl Into<String>,
        population: u64,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            subregion: subregion.into(),
            population,
            area: 0.0,
            capital: Vec::new(),
            languages: BTreeMap::new(),
            borders: Borders::Unknown,
            flag: FlagImage::default(),
        }
    }

    #[must_use]
    pub fn with_capital<I, S>(mut self, capital: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.capital = capital.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_borders<I, S>(mut self, borders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.borders = Borders::Known(borders.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_language(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.languages.insert(code.into(), name.into());
        self
    }

    #[must_use]
    pub fn with_area(mut self, area: f64) -> Self {
        self.area = area;
        self
    }

    #[must_use]
    pub fn with_flag(mut self, url: impl Into<String>, description: Option<String>) -> Self {
        self.flag = FlagImage {
            url: Some(url.into()),
            description,
        };
        self
    }

    /// First listed capital, if any.
    #[must_use]
    pub fn capital_name(&self) -> Option<&str> {
        self.capital.first().map(String::as_str)
    }

    #[must_use]
    pub fn flag_url(&self) -> Option<&str> {
        self.flag.url.as_deref()
    }

    #[must_use]
    pub fn flag_description(&self) -> Option<&str> {
        self.flag.description.as_deref()
    }

    /// Language display names in language-code order.
    #[must_use]
    pub fn language_names(&self) -> Vec<&str> {
        self.languages.values().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn borders_round_trip_through_option() {
        let absent: Borders = None.into();
        assert_eq!(absent, Borders::Unknown);

        let empty: Borders = Some(vec![]).into();
        assert_eq!(empty, Borders::Known(vec![]));
        assert!(empty.is_known());
        assert!(empty.codes().is_empty());
    }

    #[test]
    fn borders_serialize_as_optional_list() {
        let country = Country::new("ISL", "Iceland", "Northern Europe", 370_000).with_borders(Vec::<String>::new());
        let json = serde_json::to_value(&country).unwrap();
        assert_eq!(json["borders"], serde_json::json!([]));

        let unknown = Country::new("MLT", "Malta", "Southern Europe", 520_000);
        let json = serde_json::to_value(&unknown).unwrap();
        assert!(json["borders"].is_null());
    }

    #[test]
    fn language_names_follow_code_order() {
        let belgium = Country::new("BEL", "Belgium", "Western Europe", 11_500_000)
            .with_language("nld", "Dutch")
            .with_language("fra", "French")
            .with_language("deu", "German");
        assert_eq!(belgium.language_names(), vec!["German", "French", "Dutch"]);
    }

    #[test]
    fn capital_name_is_none_without_capitals() {
        let country = Country::new("XXX", "Nowhere", "", 0);
        assert_eq!(country.capital_name(), None);
        assert_eq!(country.flag_url(), None);
    }
}
