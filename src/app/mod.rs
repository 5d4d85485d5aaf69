//! Application layer: list state, events in, actions out.
//!
//! ```text
//! View events ─┐
//!              ├─▶ handle_event ─▶ ListPipeline ─▶ ListSnapshot ─▶ view
//! Worker  ─────┘        │
//!                       └─▶ Actions (fetch, cancel, show details)
//! ```
//!
//! - [`pipeline`]: filter, sort and search over the fetched list
//! - [`state`]: pipeline plus fetch status, view model computation
//! - [`handler`]: event processing
//! - [`actions`]: side effects the runtime carries out
//! - [`session`]: carries out actions against the fetch worker

pub mod actions;
pub mod handler;
pub mod pipeline;
pub mod session;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use pipeline::{ListPipeline, ListSnapshot};
pub use session::{Outcome, Session};
pub use state::{AppState, FetchStatus};
