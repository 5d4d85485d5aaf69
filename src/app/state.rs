//! Application state for one list-screen session.
//!
//! [`AppState`] pairs the [`ListPipeline`] with the status of the background fetch
//! and computes the view models the renderer draws.

use crate::app::pipeline::ListPipeline;
use crate::ui::{CountryDetails, FilterDialogState, ListViewModel, SortDialogState};

/// Where the country fetch stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    InFlight,
    Loaded,
    /// Last attempt failed; the store will try again on the next request.
    Failed(String),
}

#[derive(Debug, Default)]
pub struct AppState {
    pub pipeline: ListPipeline,
    pub fetch: FetchStatus,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a fetch should be posted now.
    ///
    /// True before the first request and after a failed one.
    #[must_use]
    pub const fn needs_fetch(&self) -> bool {
        matches!(self.fetch, FetchStatus::Idle | FetchStatus::Failed(_))
    }

    #[must_use]
    pub fn compute_viewmodel(&self) -> ListViewModel {
        ListViewModel::from_snapshot(&self.pipeline.snapshot())
    }

    #[must_use]
    pub fn sort_dialog(&self) -> SortDialogState {
        SortDialogState::from_active(self.pipeline.active_sort())
    }

    #[must_use]
    pub fn filter_dialog(&self) -> FilterDialogState {
        FilterDialogState::new(self.pipeline.available_subregions(), self.pipeline.active_filter())
    }

    /// Detail view of the country called `name`, if the list holds one.
    #[must_use]
    pub fn details_for(&self, name: &str) -> Option<CountryDetails> {
        let country = self.pipeline.find_by_name(name)?;
        Some(CountryDetails::new(country, self.pipeline.original().unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Country, SortFeature};
    use crate::ui::EmptyState;
    use std::sync::Arc;

    fn loaded_state() -> AppState {
        let mut state = AppState::new();
        state.pipeline.load(Arc::new(vec![
            Country::new("EST", "Estonia", "Northern Europe", 1_300_000).with_borders(["LVA"]),
            Country::new("LVA", "Latvia", "Northern Europe", 1_800_000).with_borders(["EST"]),
            Country::new("AUT", "Austria", "Central Europe", 9_000_000),
        ]));
        state.fetch = FetchStatus::Loaded;
        state
    }

    #[test]
    fn new_state_needs_fetch_and_shows_loading() {
        let state = AppState::new();
        assert!(state.needs_fetch());
        assert_eq!(state.compute_viewmodel().empty_state, Some(EmptyState::Loading));
    }

    #[test]
    fn failed_fetch_needs_another() {
        let state = AppState {
            fetch: FetchStatus::Failed("offline".to_string()),
            ..AppState::default()
        };
        assert!(state.needs_fetch());
    }

    #[test]
    fn dialogs_reflect_active_criteria() {
        let mut state = loaded_state();
        state.pipeline.apply_sort(Some(SortFeature::Population), Some(true));
        state.pipeline.apply_filter(["Northern Europe"]);

        assert_eq!(state.sort_dialog().feature, Some(SortFeature::Population));
        assert_eq!(state.filter_dialog().checked(), vec!["Northern Europe"]);
        assert_eq!(state.filter_dialog().options.len(), 2);
    }

    #[test]
    fn details_resolve_borders_against_full_list() {
        let mut state = loaded_state();
        state.pipeline.apply_filter(["Central Europe"]);

        let details = state.details_for("Estonia").unwrap();
        assert_eq!(details.border_names, vec!["Latvia"]);
        assert!(state.details_for("Atlantis").is_none());
    }
}
