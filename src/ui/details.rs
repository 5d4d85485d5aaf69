//! Detail screen for a single country.

use crate::domain::Country;

/// Display-ready fields of one country.
///
/// Missing optional data is rendered as an empty string, never as a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryDetails {
    pub name: String,
    pub capital: String,
    pub subregion: String,
    pub population: u64,
    /// Area with unit, e.g. `"357114 km²"`.
    pub area: String,
    /// Language names joined with `", "`.
    pub languages: String,
    pub flag_url: String,
    pub flag_description: String,
    /// Names of neighbouring countries, in the order of the fetched list.
    pub border_names: Vec<String>,
}

impl CountryDetails {
    /// Builds the detail view of `country`.
    ///
    /// Border codes are resolved to names through `all`, normally the full list the
    /// store fetched, and keep that list's order. Codes not found there are skipped.
    #[must_use]
    pub fn new(country: &Country, all: &[Country]) -> Self {
        let codes = country.borders.codes();
        let border_names = all
            .iter()
            .filter(|other| codes.contains(&other.code))
            .map(|neighbour| neighbour.name.clone())
            .collect();

        Self {
            name: country.name.clone(),
            capital: country.capital_name().unwrap_or_default().to_string(),
            subregion: country.subregion.clone(),
            population: country.population,
            area: format!("{} km²", country.area),
            languages: country.language_names().join(", "),
            flag_url: country.flag_url().unwrap_or_default().to_string(),
            flag_description: country.flag_description().unwrap_or_default().to_string(),
            border_names,
        }
    }
}
