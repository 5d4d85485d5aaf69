//! The list pipeline: search, sort and subregion filter over the cached list.
//!
//! [`ListPipeline`] owns the active criteria and derives the displayed list from the
//! original list the store fetched. It is the single source of truth for what the
//! list screen shows.
//!
//! # Derivation
//!
//! ```text
//! original ──filter──▶ ──sort──▶ working ──search──▶ displayed
//! ```
//!
//! The working list is always rebuilt from the original list in the fixed order
//! filter, then sort. Search is applied on top of the working list and never stored
//! into it. Every mutating transition ends by re-deriving the displayed list, so
//! clearing one criterion never drops another active one.
//!
//! # Observing
//!
//! Views call [`ListPipeline::subscribe`] and receive a [`ListSnapshot`] every time
//! the derived state changes. Transitions that leave the snapshot unchanged do not
//! notify.
//!
//! # Example
//!
//! ```rust
//! use poi_countries::app::ListPipeline;
//! use poi_countries::{Country, SortFeature};
//! use std::sync::Arc;
//!
//! let mut pipeline = ListPipeline::new();
//! pipeline.load(Arc::new(vec![
//!     Country::new("DEU", "Germany", "Western Europe", 83_000_000),
//!     Country::new("FRA", "France", "Western Europe", 67_000_000),
//!     Country::new("POL", "Poland", "Central Europe", 38_000_000),
//! ]));
//!
//! pipeline.apply_filter(["Western Europe"]);
//! pipeline.apply_sort(Some(SortFeature::Population), Some(true));
//! pipeline.set_search_query("f");
//! pipeline.search();
//!
//! let names: Vec<_> = pipeline.displayed().iter().map(|c| c.name.as_str()).collect();
//! assert_eq!(names, vec!["France"]);
//! ```

use crate::domain::matching;
use crate::domain::{Country, FilterSpec, SortFeature, SortSpec};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::watch;

/// Everything a view needs to render the list screen.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListSnapshot {
    /// The displayed list, after filter, sort and search.
    pub countries: Vec<Country>,
    pub is_sorted: bool,
    pub is_filtered: bool,
    /// Last applied sort, for restoring the sort dialog.
    pub sort: Option<SortSpec>,
    /// Last applied filter, for restoring the filter dialog.
    pub filter: Option<FilterSpec>,
    pub search_query: String,
    /// `false` until the store has delivered the original list.
    pub loaded: bool,
}

/// Search/sort/filter state machine for one browsing session.
#[derive(Debug)]
pub struct ListPipeline {
    /// Set once when the store delivers; never mutated afterwards.
    original: Option<Arc<Vec<Country>>>,
    /// Original list after the active filter and sort, before search.
    working: Option<Vec<Country>>,
    displayed: Vec<Country>,
    active_sort: Option<SortSpec>,
    active_filter: Option<FilterSpec>,
    /// Stored verbatim, including the empty string.
    search_query: Option<String>,
    publisher: watch::Sender<ListSnapshot>,
}

impl Default for ListPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl ListPipeline {
    /// Creates an empty pipeline with no criteria and no data.
    #[must_use]
    pub fn new() -> Self {
        let (publisher, _) = watch::channel(ListSnapshot::default());
        Self {
            original: None,
            working: None,
            displayed: Vec::new(),
            active_sort: None,
            active_filter: None,
            search_query: None,
            publisher,
        }
    }

    /// Subscribes to derived-state changes.
    ///
    /// The receiver starts with the current snapshot marked as seen.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot> {
        self.publisher.subscribe()
    }

    /// Installs the original list once the store has fetched it.
    ///
    /// Criteria applied before the data arrived are kept and replayed over the new
    /// list. A second call is ignored: the original list never changes within a
    /// session.
    pub fn load(&mut self, countries: Arc<Vec<Country>>) {
        let _span = tracing::debug_span!("pipeline_load", count = countries.len()).entered();

        if self.original.is_some() {
            tracing::debug!("original list already set, ignoring reload");
            return;
        }

        self.original = Some(countries);
        self.rebuild_working();
        self.search();
    }

    /// Applies a subregion filter, or clears it when `subregions` is empty.
    ///
    /// Filtering always happens before sorting, so an active sort is re-applied to
    /// the filtered list. Clearing the filter keeps the active sort and search.
    pub fn apply_filter<I, S>(&mut self, subregions: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let spec = FilterSpec::new(subregions);
        let _span = tracing::debug_span!("apply_filter", subregions = spec.len()).entered();

        if spec.is_empty() {
            tracing::debug!("clearing subregion filter");
            self.active_filter = None;
        } else {
            tracing::debug!(filter = ?spec, "filtering by subregion");
            self.active_filter = Some(spec);
        }

        self.rebuild_working();
        self.search();
    }

    /// Applies a sort, or clears it when either argument is `None`.
    ///
    /// Sorting works on the filtered list. Clearing the sort keeps the active
    /// filter and search.
    pub fn apply_sort(&mut self, feature: Option<SortFeature>, descending: Option<bool>) {
        let _span = tracing::debug_span!("apply_sort", feature = ?feature, descending = ?descending).entered();

        match SortSpec::from_parts(feature, descending) {
            Some(spec) => {
                tracing::debug!(sort = ?spec, "sorting country list");
                self.active_sort = Some(spec);
            }
            None => {
                tracing::debug!("clearing sort");
                self.active_sort = None;
            }
        }

        self.rebuild_working();
        self.search();
    }

    /// Stores the search query without recomputing anything.
    ///
    /// Call [`search`](Self::search) to bring the displayed list up to date.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        tracing::trace!(query = %query, "search query updated");
        self.search_query = Some(query);
    }

    /// Re-derives the displayed list from the working list and the search query.
    ///
    /// An empty or unset query shows the working list unchanged. Otherwise the
    /// prefix search runs over the working list, or over the original list when the
    /// working list is unset or empty.
    pub fn search(&mut self) {
        let query = self.search_query.as_deref().unwrap_or_default();

        self.displayed = if query.is_empty() {
            self.working
                .clone()
                .or_else(|| self.original.as_deref().cloned())
                .unwrap_or_default()
        } else {
            match (&self.working, &self.original) {
                (Some(working), _) if !working.is_empty() => matching::search_countries(working, query),
                (_, Some(original)) => matching::search_countries(original, query),
                (_, None) => Vec::new(),
            }
        };

        tracing::debug!(
            query_len = query.len(),
            displayed = self.displayed.len(),
            "displayed list derived"
        );

        self.publish();
    }

    /// Replays the active criteria in the fixed order filter, sort, search.
    ///
    /// Called whenever the list view becomes visible again. The result is the same
    /// whatever order the user originally applied the criteria in.
    pub fn restore(&mut self) {
        let _span = tracing::debug_span!("restore_session",
            filtered = self.is_filtered(),
            sorted = self.is_sorted(),
            searched = self.is_searched()
        ).entered();

        if let Some(filter) = self.active_filter.clone() {
            self.apply_filter(filter.iter().map(str::to_owned).collect::<Vec<_>>());
        }
        if let Some(sort) = self.active_sort {
            self.apply_sort(Some(sort.feature), Some(sort.descending));
        }
        if self.is_searched() {
            self.search();
        }
    }

    /// The list after filter and sort, excluding search.
    fn rebuild_working(&mut self) {
        let Some(original) = self.original.as_deref() else {
            tracing::debug!("no data yet, criteria stored for later");
            return;
        };

        let mut working = match &self.active_filter {
            Some(filter) => matching::filter_countries(original, filter),
            None => original.clone(),
        };

        if let Some(spec) = self.active_sort {
            matching::sort_countries(&mut working, spec);
        }

        self.working = Some(working);
    }

    fn publish(&self) {
        let snapshot = self.snapshot();
        self.publisher.send_if_modified(move |current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }

    /// Current derived state as a snapshot.
    #[must_use]
    pub fn snapshot(&self) -> ListSnapshot {
        ListSnapshot {
            countries: self.displayed.clone(),
            is_sorted: self.is_sorted(),
            is_filtered: self.is_filtered(),
            sort: self.active_sort,
            filter: self.active_filter.clone(),
            search_query: self.search_query.clone().unwrap_or_default(),
            loaded: self.is_loaded(),
        }
    }

    #[must_use]
    pub fn displayed(&self) -> &[Country] {
        &self.displayed
    }

    #[must_use]
    pub fn working(&self) -> Option<&[Country]> {
        self.working.as_deref()
    }

    #[must_use]
    pub fn original(&self) -> Option<&[Country]> {
        self.original.as_deref().map(Vec::as_slice)
    }

    #[must_use]
    pub const fn active_sort(&self) -> Option<SortSpec> {
        self.active_sort
    }

    #[must_use]
    pub const fn active_filter(&self) -> Option<&FilterSpec> {
        self.active_filter.as_ref()
    }

    #[must_use]
    pub fn search_query(&self) -> &str {
        self.search_query.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub const fn is_sorted(&self) -> bool {
        self.active_sort.is_some()
    }

    #[must_use]
    pub const fn is_filtered(&self) -> bool {
        self.active_filter.is_some()
    }

    #[must_use]
    pub fn is_searched(&self) -> bool {
        !self.search_query().is_empty()
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.original.is_some()
    }

    /// Distinct subregions of the original list, sorted.
    #[must_use]
    pub fn available_subregions(&self) -> Vec<String> {
        self.original()
            .unwrap_or_default()
            .iter()
            .filter(|country| !country.subregion.is_empty())
            .map(|country| country.subregion.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Looks a country up in the original list by display name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Country> {
        self.original()?.iter().find(|country| country.name == name)
    }
}
