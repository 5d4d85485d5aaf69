//! Fetch worker: runs store requests off the event loop.
//!
//! Each request becomes its own tokio task bound to a [`CancellationToken`]
//! supplied by the requester. Results come back over an unbounded channel. A
//! cancelled request delivers nothing, and a dropped receiver turns delivery into a
//! no-op, so tearing the view down mid-fetch is always safe.

use crate::domain::error::CountryError;
use crate::storage::CountryStore;
use crate::worker::{WorkerMessage, WorkerResponse};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

/// Handle to the fetch worker.
///
/// Cheap to clone; clones share the store and the response channel.
#[derive(Debug, Clone)]
pub struct CountryWorker {
    store: Arc<CountryStore>,
    responses: mpsc::UnboundedSender<WorkerResponse>,
}

impl CountryWorker {
    /// Creates a worker and the receiving end of its response channel.
    #[must_use]
    pub fn new(store: Arc<CountryStore>) -> (Self, mpsc::UnboundedReceiver<WorkerResponse>) {
        let (responses, receiver) = mpsc::unbounded_channel();
        (Self { store, responses }, receiver)
    }

    /// Processes one message and returns its response.
    ///
    /// Returns `None` when the request was cancelled before it completed.
    pub async fn handle_message(&self, message: WorkerMessage, token: &CancellationToken) -> Option<WorkerResponse> {
        match message {
            WorkerMessage::FetchCountries { .. } => match self.store.fetch_cancellable(token).await {
                Ok(countries) => {
                    tracing::debug!(count = countries.len(), "countries ready");
                    Some(WorkerResponse::CountriesLoaded { countries })
                }
                Err(CountryError::Cancelled) => {
                    tracing::debug!("fetch cancelled, nothing to deliver");
                    None
                }
                Err(e) => {
                    tracing::debug!(error = %e, network = e.is_network(), "fetch failed");
                    Some(WorkerResponse::FetchFailed {
                        message: format!("fetch countries: {e}"),
                    })
                }
            },
        }
    }

    /// Runs `message` on a new task and sends the response back when it is done.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(&self, message: WorkerMessage, token: CancellationToken) -> JoinHandle<()> {
        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        if let Some(parent) = message.trace_context().and_then(|ctx| ctx.to_parent_context()) {
            use tracing_opentelemetry::OpenTelemetrySpanExt;
            span.set_parent(parent);
        }

        let worker = self.clone();
        tokio::spawn(
            async move {
                let Some(response) = worker.handle_message(message, &token).await else {
                    return;
                };
                if worker.responses.send(response).is_err() {
                    tracing::debug!("response receiver dropped, discarding result");
                }
            }
            .instrument(span),
        )
    }
}
