//! Wire record models for the REST Countries response.
//!
//! These types mirror the JSON shape returned by the API and are kept separate from
//! the domain [`Country`] so that field renames on the wire stay out of the rest of
//! the crate.

use crate::domain::{Borders, Country, FlagImage};
use serde::Deserialize;
use std::collections::BTreeMap;

/// One element of the `region/{region}` response array.
///
/// Only the fields the application uses are declared; everything else in the
/// payload is ignored by serde.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CountryRecord {
    pub cca3: String,
    pub name: NameRecord,
    #[serde(default)]
    pub subregion: String,
    #[serde(default)]
    pub flags: FlagsRecord,
    #[serde(default)]
    pub capital: Vec<String>,
    #[serde(default)]
    pub area: f64,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub languages: BTreeMap<String, String>,
    /// Left as `None` when the field is missing so that absence survives into
    /// [`Borders::Unknown`].
    #[serde(default)]
    pub borders: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NameRecord {
    pub common: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct FlagsRecord {
    pub png: Option<String>,
    pub alt: Option<String>,
}

impl From<CountryRecord> for Country {
    fn from(record: CountryRecord) -> Self {
        Self {
            code: record.cca3,
            name: record.name.common,
            subregion: record.subregion,
            population: record.population,
            area: record.area,
            capital: record.capital,
            languages: record.languages,
            borders: Borders::from(record.borders),
            flag: FlagImage {
                url: record.flags.png,
                description: record.flags.alt,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "cca3": "FRA",
            "name": {"common": "France", "official": "French Republic"},
            "subregion": "Western Europe",
            "flags": {"png": "https://flagcdn.com/w320/fr.png", "svg": "x", "alt": "Three vertical bands"},
            "capital": ["Paris"],
            "area": 551695.0,
            "population": 67391582,
            "languages": {"fra": "French"},
            "borders": ["AND", "BEL", "DEU"]
        },
        {
            "cca3": "ISL",
            "name": {"common": "Iceland"},
            "subregion": "Northern Europe",
            "flags": {"png": "https://flagcdn.com/w320/is.png"},
            "capital": ["Reykjavik"],
            "area": 103000.0,
            "population": 366425,
            "languages": {"isl": "Icelandic"}
        }
    ]"#;

    #[test]
    fn decodes_api_payload() {
        let records: Vec<CountryRecord> = serde_json::from_str(SAMPLE).unwrap();
        let countries: Vec<Country> = records.into_iter().map(Country::from).collect();

        let france = &countries[0];
        assert_eq!(france.code, "FRA");
        assert_eq!(france.name, "France");
        assert_eq!(france.capital_name(), Some("Paris"));
        assert_eq!(france.flag_description(), Some("Three vertical bands"));
        assert_eq!(france.borders.codes(), ["AND", "BEL", "DEU"]);

        let iceland = &countries[1];
        assert_eq!(iceland.borders, Borders::Unknown);
        assert_eq!(iceland.flag_description(), None);
    }

    #[test]
    fn empty_borders_stay_known() {
        let json = r#"{"cca3":"MLT","name":{"common":"Malta"},"borders":[]}"#;
        let record: CountryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(Country::from(record).borders, Borders::Known(vec![]));
    }
}
