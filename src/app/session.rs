//! Runs the handler's actions against the worker.
//!
//! [`Session`] is the action processor: it feeds events to
//! [`handle_event`](crate::app::handle_event), spawns and cancels fetch tasks, and
//! turns worker responses back into events. One session serves one list view.

use crate::app::{handle_event, Action, AppState, Event, ListSnapshot};
use crate::domain::error::{CountryError, Result};
use crate::storage::CountryStore;
use crate::ui::CountryDetails;
use crate::worker::{CountryWorker, WorkerResponse};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

/// What the view should do after an event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    pub render: bool,
    /// Set when the detail screen should open.
    pub details: Option<CountryDetails>,
}

#[derive(Debug)]
pub struct Session {
    state: AppState,
    worker: CountryWorker,
    responses: mpsc::UnboundedReceiver<WorkerResponse>,
    /// Token of the fetch currently running, if any.
    in_flight: Option<CancellationToken>,
}

impl Session {
    #[must_use]
    pub fn new(store: Arc<CountryStore>) -> Self {
        let (worker, responses) = CountryWorker::new(store);
        Self {
            state: AppState::new(),
            worker,
            responses,
            in_flight: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Subscribes to list changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot> {
        self.state.pipeline.subscribe()
    }

    /// Whether a fetch task is running.
    #[must_use]
    pub const fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Handles `event` and carries out the resulting actions.
    ///
    /// Spawning a fetch requires a tokio runtime.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub fn dispatch(&mut self, event: &Event) -> Result<Outcome> {
        if matches!(event, Event::WorkerResponse(_)) {
            self.in_flight = None;
        }

        let (render, actions) = handle_event(&mut self.state, event)?;

        let mut outcome = Outcome {
            render,
            details: None,
        };
        for action in actions {
            self.execute(action, &mut outcome);
        }
        Ok(outcome)
    }

    fn execute(&mut self, action: Action, outcome: &mut Outcome) {
        match action {
            Action::PostToWorker(message) => {
                let token = CancellationToken::new();
                drop(self.worker.spawn(message, token.clone()));
                self.in_flight = Some(token);
            }
            Action::CancelFetch => {
                if let Some(token) = self.in_flight.take() {
                    token.cancel();
                }
                // A task that finished before the cancel may already have answered.
                while let Ok(stale) = self.responses.try_recv() {
                    tracing::debug!(response = ?stale, "discarding response of cancelled fetch");
                }
            }
            Action::ShowDetails(details) => outcome.details = Some(details),
        }
    }

    /// Waits for the next worker response.
    ///
    /// Stays pending while nothing is in flight; meant to be raced against user
    /// input with `tokio::select!`.
    pub async fn next_response(&mut self) -> Option<WorkerResponse> {
        self.responses.recv().await
    }

    /// Waits for the running fetch to answer and dispatches its response.
    ///
    /// Returns `None` immediately when no fetch is running.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`], and returns
    /// [`CountryError::Worker`] if the response channel has closed.
    pub async fn pump(&mut self) -> Result<Option<Outcome>> {
        if self.in_flight.is_none() {
            return Ok(None);
        }
        match self.responses.recv().await {
            Some(response) => self.dispatch(&Event::WorkerResponse(response)).map(Some),
            None => Err(CountryError::Worker("response channel closed".to_string())),
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
    }
}
