//! Search predicate, comparators and subregion filter over country lists.
//!
//! Everything here is pure: functions take borrowed countries and never touch
//! pipeline state. The list helpers at the bottom build on the single-record
//! predicates so that the pipeline and the tests share one definition of each rule.

use crate::domain::criteria::{FilterSpec, SortFeature, SortSpec};
use crate::domain::Country;
use std::cmp::Ordering;

/// Returns `true` if the country name starts with `query`, ignoring case.
///
/// An empty query matches nothing. Callers treat an empty query as "no search"
/// before reaching this predicate.
///
/// # Examples
///
/// ```
/// use poi_countries::Country;
/// use poi_countries::domain::matching::search_predicate;
///
/// let france = Country::new("FRA", "France", "Western Europe", 67_000_000);
/// assert!(search_predicate("fra", &france));
/// assert!(!search_predicate("ance", &france));
/// assert!(!search_predicate("", &france));
/// ```
#[must_use]
pub fn search_predicate(query: &str, country: &Country) -> bool {
    if query.is_empty() {
        return false;
    }
    country.name.to_lowercase().starts_with(&query.to_lowercase())
}

/// Lexicographic comparison on `name`, reversed when `descending`.
#[must_use]
pub fn name_comparator(a: &Country, b: &Country, descending: bool) -> Ordering {
    directed(a.name.cmp(&b.name), descending)
}

/// Numeric comparison on `population`, reversed when `descending`.
#[must_use]
pub fn population_comparator(a: &Country, b: &Country, descending: bool) -> Ordering {
    directed(a.population.cmp(&b.population), descending)
}

/// Returns `true` if the country's subregion is one of the selected subregions.
#[must_use]
pub fn subregion_predicate(country: &Country, subregions: &FilterSpec) -> bool {
    subregions.contains(&country.subregion)
}

const fn directed(ordering: Ordering, descending: bool) -> Ordering {
    if descending {
        ordering.reverse()
    } else {
        ordering
    }
}

/// Comparator for a full sort spec.
#[must_use]
pub fn compare(a: &Country, b: &Country, spec: SortSpec) -> Ordering {
    match spec.feature {
        SortFeature::Name => name_comparator(a, b, spec.descending),
        SortFeature::Population => population_comparator(a, b, spec.descending),
    }
}

/// Sorts in place with a stable sort, so ties keep their incoming relative order.
pub fn sort_countries(countries: &mut [Country], spec: SortSpec) {
    countries.sort_by(|a, b| compare(a, b, spec));
}

/// Keeps the countries whose subregion is selected, preserving input order.
#[must_use]
pub fn filter_countries(countries: &[Country], subregions: &FilterSpec) -> Vec<Country> {
    countries
        .iter()
        .filter(|country| subregion_predicate(country, subregions))
        .cloned()
        .collect()
}

/// Keeps the countries whose name starts with `query`, preserving input order.
#[must_use]
pub fn search_countries(countries: &[Country], query: &str) -> Vec<Country> {
    countries
        .iter()
        .filter(|country| search_predicate(query, country))
        .cloned()
        .collect()
}
