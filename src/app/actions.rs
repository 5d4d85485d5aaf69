//! Side effects requested by the event handler.
//!
//! The handler only mutates [`AppState`](crate::app::AppState); anything that
//! touches the outside world is returned as an [`Action`] for the runtime to carry
//! out, in order.

use crate::ui::CountryDetails;
use crate::worker::WorkerMessage;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hand a request to the background worker.
    PostToWorker(WorkerMessage),

    /// Abandon the in-flight fetch; its result must not be delivered.
    CancelFetch,

    /// Open the detail screen.
    ShowDetails(CountryDetails),
}
