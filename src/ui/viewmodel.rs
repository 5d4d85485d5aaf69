//! Render-ready projections of the list screen.
//!
//! View models are computed from a [`ListSnapshot`] and contain no logic beyond
//! formatting. A view draws them as they are.

use crate::app::ListSnapshot;
use crate::domain::{Country, FilterSpec, SortFeature, SortSpec};

/// Everything needed to draw the list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListViewModel {
    pub header: HeaderInfo,
    pub rows: Vec<CountryRow>,
    /// Set when there are no rows to show.
    pub empty_state: Option<EmptyState>,
    pub search_bar: SearchBarInfo,
}

/// Title line with the number of displayed countries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    pub count: usize,
    /// Short description of the active sort and filter, empty when neither is set.
    pub criteria: String,
}

/// One line of the country list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryRow {
    pub name: String,
    /// First capital, empty when the country has none.
    pub capital: String,
    pub population: u64,
    pub flag_url: String,
    /// Characters of `name` matched by the search query, as `(start, end)`.
    pub highlight: Option<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState {
    /// The list has not arrived yet.
    Loading,
    /// The list arrived but the active criteria match nothing.
    NoMatches,
}

impl EmptyState {
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Loading => "Loading countries...",
            Self::NoMatches => "No countries match the current search and filter",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
}

/// State of the sort dialog when it opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortDialogState {
    /// Preselected feature, `None` when no sort is active.
    pub feature: Option<SortFeature>,
    pub descending: bool,
}

impl SortDialogState {
    #[must_use]
    pub fn from_active(sort: Option<SortSpec>) -> Self {
        Self {
            feature: sort.map(|spec| spec.feature),
            descending: sort.is_some_and(|spec| spec.descending),
        }
    }
}

/// One checkbox of the filter dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubregionOption {
    pub subregion: String,
    pub checked: bool,
}

/// State of the filter dialog when it opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDialogState {
    pub options: Vec<SubregionOption>,
}

impl FilterDialogState {
    /// Offers every available subregion, checking those in the active filter.
    #[must_use]
    pub fn new(available: Vec<String>, active: Option<&FilterSpec>) -> Self {
        let options = available
            .into_iter()
            .map(|subregion| SubregionOption {
                checked: active.is_some_and(|filter| filter.contains(&subregion)),
                subregion,
            })
            .collect();
        Self { options }
    }

    /// Subregions currently checked, in dialog order.
    #[must_use]
    pub fn checked(&self) -> Vec<String> {
        self.options
            .iter()
            .filter(|option| option.checked)
            .map(|option| option.subregion.clone())
            .collect()
    }
}

impl ListViewModel {
    #[must_use]
    pub fn from_snapshot(snapshot: &ListSnapshot) -> Self {
        let rows: Vec<CountryRow> = snapshot
            .countries
            .iter()
            .map(|country| CountryRow::new(country, &snapshot.search_query))
            .collect();

        let empty_state = match (rows.is_empty(), snapshot.loaded) {
            (false, _) => None,
            (true, false) => Some(EmptyState::Loading),
            (true, true) => Some(EmptyState::NoMatches),
        };

        Self {
            header: HeaderInfo {
                title: "European countries".to_string(),
                count: rows.len(),
                criteria: describe_criteria(snapshot.sort, snapshot.filter.as_ref()),
            },
            rows,
            empty_state,
            search_bar: SearchBarInfo {
                query: snapshot.search_query.clone(),
            },
        }
    }
}

impl CountryRow {
    fn new(country: &Country, query: &str) -> Self {
        let highlight = crate::domain::matching::search_predicate(query, country)
            .then(|| matched_prefix_len(&country.name, query))
            .flatten()
            .map(|end| (0, end));

        Self {
            name: country.name.clone(),
            capital: country.capital_name().unwrap_or_default().to_string(),
            population: country.population,
            flag_url: country.flag_url().unwrap_or_default().to_string(),
            highlight,
        }
    }
}

/// Number of characters of `name` whose lowercase form spells `query` lowercased.
///
/// Lowercasing can change the length (`İ` becomes two characters), so the count
/// is taken on `name` itself.
fn matched_prefix_len(name: &str, query: &str) -> Option<usize> {
    let target = query.to_lowercase();
    let mut folded = String::with_capacity(target.len());
    for (taken, ch) in name.chars().enumerate() {
        folded.extend(ch.to_lowercase());
        if folded == target {
            return Some(taken + 1);
        }
        if !target.starts_with(&folded) {
            return None;
        }
    }
    None
}

fn describe_criteria(sort: Option<SortSpec>, filter: Option<&FilterSpec>) -> String {
    let mut parts = Vec::new();
    if let Some(spec) = sort {
        let direction = if spec.descending { "desc" } else { "asc" };
        parts.push(format!("sorted by {} {direction}", spec.feature.label()));
    }
    if let Some(filter) = filter {
        parts.push(format!("in {}", filter.iter().collect::<Vec<_>>().join(", ")));
    }
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(countries: Vec<Country>, loaded: bool) -> ListSnapshot {
        ListSnapshot {
            countries,
            loaded,
            ..ListSnapshot::default()
        }
    }

    #[test]
    fn empty_before_load_is_loading() {
        let vm = ListViewModel::from_snapshot(&snapshot(vec![], false));
        assert_eq!(vm.empty_state, Some(EmptyState::Loading));
        assert_eq!(vm.header.count, 0);
    }

    #[test]
    fn empty_after_load_is_no_matches() {
        let vm = ListViewModel::from_snapshot(&snapshot(vec![], true));
        assert_eq!(vm.empty_state, Some(EmptyState::NoMatches));
    }

    #[test]
    fn rows_carry_capital_and_highlight() {
        let mut snap = snapshot(
            vec![Country::new("FRA", "France", "Western Europe", 67_000_000).with_capital(["Paris"])],
            true,
        );
        snap.search_query = "fr".to_string();

        let vm = ListViewModel::from_snapshot(&snap);

        assert!(vm.empty_state.is_none());
        assert_eq!(vm.rows[0].capital, "Paris");
        assert_eq!(vm.rows[0].highlight, Some((0, 2)));
        assert_eq!(vm.search_bar.query, "fr");
    }

    #[test]
    fn highlight_counts_characters_of_the_name() {
        let mut snap = snapshot(vec![Country::new("XIZ", "İzmir Coast", "", 0)], true);
        // "i" plus a combining dot, which is what "İ" lowercases to.
        snap.search_query = "i\u{307}z".to_string();

        let vm = ListViewModel::from_snapshot(&snap);

        assert_eq!(vm.rows[0].highlight, Some((0, 2)));
    }

    #[test]
    fn header_describes_criteria() {
        let mut snap = snapshot(vec![], true);
        snap.sort = Some(SortSpec::new(SortFeature::Population, true));
        snap.filter = Some(FilterSpec::new(["Northern Europe"]));

        let vm = ListViewModel::from_snapshot(&snap);
        assert_eq!(vm.header.criteria, "sorted by Population desc, in Northern Europe");
    }

    #[test]
    fn filter_dialog_checks_active_subregions() {
        let active = FilterSpec::new(["Western Europe"]);
        let dialog = FilterDialogState::new(
            vec!["Central Europe".to_string(), "Western Europe".to_string()],
            Some(&active),
        );

        assert!(!dialog.options[0].checked);
        assert!(dialog.options[1].checked);
        assert_eq!(dialog.checked(), vec!["Western Europe"]);
    }

    #[test]
    fn sort_dialog_defaults_without_sort() {
        let dialog = SortDialogState::from_active(None);
        assert_eq!(dialog.feature, None);
        assert!(!dialog.descending);
    }
}
