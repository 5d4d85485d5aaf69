//! Event handling and state transitions.
//!
//! [`handle_event`] is the only place [`AppState`] changes. Events arrive one at a
//! time from the view and from the worker, so every pipeline transition runs to
//! completion before the next one starts.
//!
//! # Example
//!
//! ```rust
//! use poi_countries::app::{handle_event, Action, AppState, Event};
//!
//! let mut state = AppState::new();
//! let (render, actions) = handle_event(&mut state, &Event::Started)?;
//! assert!(render);
//! assert!(matches!(actions.as_slice(), [Action::PostToWorker(_)]));
//! # Ok::<(), poi_countries::CountryError>(())
//! ```

use crate::app::state::FetchStatus;
use crate::app::{Action, AppState};
use crate::domain::error::{CountryError, Result};
use crate::domain::SortFeature;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Everything the list screen can be told.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The list screen was created; starts the fetch unless the list is here or
    /// already on its way.
    Started,
    /// The search box text changed.
    SearchQueryChanged(String),
    /// The sort dialog was confirmed. Either part missing clears the sort.
    SortApplied {
        feature: Option<SortFeature>,
        descending: Option<bool>,
    },
    /// The filter dialog was confirmed. An empty list clears the filter.
    FilterApplied(Vec<String>),
    /// The list screen is visible again, e.g. after returning from details.
    BecameVisible,
    /// A row was tapped.
    CountrySelected(String),
    /// The list screen is going away.
    TornDown,
    WorkerResponse(WorkerResponse),
}

/// Applies `event` to `state`.
///
/// Returns whether the view needs to re-render, and the actions to run.
///
/// # Errors
///
/// Returns [`CountryError::InvalidInput`] when a selected country is not in the
/// list.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    match event {
        Event::Started => Ok((true, request_fetch(state))),

        Event::SearchQueryChanged(query) => {
            state.pipeline.set_search_query(query.clone());
            state.pipeline.search();
            Ok((true, vec![]))
        }

        Event::SortApplied { feature, descending } => {
            state.pipeline.apply_sort(*feature, *descending);
            Ok((true, vec![]))
        }

        Event::FilterApplied(subregions) => {
            state.pipeline.apply_filter(subregions.iter().cloned());
            Ok((true, vec![]))
        }

        Event::BecameVisible => {
            state.pipeline.restore();
            Ok((true, vec![]))
        }

        Event::CountrySelected(name) => {
            let details = state
                .details_for(name)
                .ok_or_else(|| CountryError::InvalidInput(format!("no country named {name}")))?;
            tracing::debug!(country = %name, borders = details.border_names.len(), "showing details");
            Ok((false, vec![Action::ShowDetails(details)]))
        }

        Event::TornDown => {
            if state.fetch == FetchStatus::InFlight {
                tracing::debug!("view torn down with fetch in flight, cancelling");
                state.fetch = FetchStatus::Idle;
                return Ok((false, vec![Action::CancelFetch]));
            }
            Ok((false, vec![]))
        }

        Event::WorkerResponse(response) => Ok(handle_worker_response(state, response)),
    }
}

/// Posts a fetch unless one is running or the list is already here.
fn request_fetch(state: &mut AppState) -> Vec<Action> {
    if !state.needs_fetch() {
        return vec![];
    }
    tracing::debug!(previous = ?state.fetch, "requesting country list");
    state.fetch = FetchStatus::InFlight;
    vec![Action::PostToWorker(WorkerMessage::fetch_countries())]
}

fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> (bool, Vec<Action>) {
    // Anything arriving after teardown belongs to an abandoned request.
    if state.fetch != FetchStatus::InFlight {
        tracing::debug!(status = ?state.fetch, "dropping response with no fetch in flight");
        return (false, vec![]);
    }

    match response {
        WorkerResponse::CountriesLoaded { countries } => {
            tracing::debug!(count = countries.len(), "country list arrived");
            state.fetch = FetchStatus::Loaded;
            state.pipeline.load(countries.clone());
            (true, vec![])
        }
        WorkerResponse::FetchFailed { message } => {
            // The list stays as it was; the next Started asks the store again.
            tracing::error!(error = %message, "failed to fetch countries");
            state.fetch = FetchStatus::Failed(message.clone());
            (false, vec![])
        }
    }
}

const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Started => "Started",
        Event::SearchQueryChanged(_) => "SearchQueryChanged",
        Event::SortApplied { .. } => "SortApplied",
        Event::FilterApplied(_) => "FilterApplied",
        Event::BecameVisible => "BecameVisible",
        Event::CountrySelected(_) => "CountrySelected",
        Event::TornDown => "TornDown",
        Event::WorkerResponse(_) => "WorkerResponse",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Country;
    use std::sync::Arc;

    fn countries() -> Arc<Vec<Country>> {
        Arc::new(vec![
            Country::new("DEU", "Germany", "Western Europe", 83_000_000),
            Country::new("FRA", "France", "Western Europe", 67_000_000),
            Country::new("POL", "Poland", "Central Europe", 38_000_000),
        ])
    }

    fn names(state: &AppState) -> Vec<String> {
        state.pipeline.displayed().iter().map(|c| c.name.clone()).collect()
    }

    fn started_and_loaded() -> AppState {
        let mut state = AppState::new();
        handle_event(&mut state, &Event::Started).unwrap();
        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::CountriesLoaded { countries: countries() }),
        )
        .unwrap();
        state
    }

    #[test]
    fn started_posts_a_single_fetch() {
        let mut state = AppState::new();

        let (_, actions) = handle_event(&mut state, &Event::Started).unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(state.fetch, FetchStatus::InFlight);

        let (_, actions) = handle_event(&mut state, &Event::Started).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn search_query_change_searches_immediately() {
        let mut state = started_and_loaded();
        handle_event(&mut state, &Event::SearchQueryChanged("p".to_string())).unwrap();
        assert_eq!(names(&state), vec!["Poland"]);
    }

    #[test]
    fn sort_and_filter_events_drive_pipeline() {
        let mut state = started_and_loaded();

        handle_event(&mut state, &Event::FilterApplied(vec!["Western Europe".to_string()])).unwrap();
        handle_event(
            &mut state,
            &Event::SortApplied {
                feature: Some(SortFeature::Name),
                descending: Some(false),
            },
        )
        .unwrap();
        assert_eq!(names(&state), vec!["France", "Germany"]);

        handle_event(&mut state, &Event::FilterApplied(vec![])).unwrap();
        assert_eq!(names(&state), vec!["France", "Germany", "Poland"]);
    }

    #[test]
    fn failure_leaves_list_untouched_until_next_start() {
        let mut state = AppState::new();
        handle_event(&mut state, &Event::Started).unwrap();

        let (render, actions) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::FetchFailed {
                message: "network error".to_string(),
            }),
        )
        .unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.pipeline.displayed().is_empty());

        let (_, actions) = handle_event(&mut state, &Event::BecameVisible).unwrap();
        assert!(actions.is_empty());

        let (_, actions) = handle_event(&mut state, &Event::Started).unwrap();
        assert!(matches!(actions.as_slice(), [Action::PostToWorker(_)]));
    }

    #[test]
    fn selecting_a_country_shows_details() {
        let mut state = started_and_loaded();

        let (_, actions) = handle_event(&mut state, &Event::CountrySelected("France".to_string())).unwrap();
        match actions.as_slice() {
            [Action::ShowDetails(details)] => assert_eq!(details.subregion, "Western Europe"),
            other => panic!("unexpected actions: {other:?}"),
        }

        let err = handle_event(&mut state, &Event::CountrySelected("Atlantis".to_string())).unwrap_err();
        assert!(matches!(err, CountryError::InvalidInput(_)));
    }

    #[test]
    fn teardown_cancels_only_in_flight_fetch() {
        let mut state = AppState::new();
        handle_event(&mut state, &Event::Started).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::TornDown).unwrap();
        assert_eq!(actions, vec![Action::CancelFetch]);

        let mut state = started_and_loaded();
        let (_, actions) = handle_event(&mut state, &Event::TornDown).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn response_after_teardown_is_ignored() {
        let mut state = AppState::new();
        handle_event(&mut state, &Event::Started).unwrap();
        handle_event(&mut state, &Event::TornDown).unwrap();

        let (render, actions) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::CountriesLoaded { countries: countries() }),
        )
        .unwrap();

        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.fetch, FetchStatus::Idle);
        assert!(!state.pipeline.is_loaded());
    }
}
