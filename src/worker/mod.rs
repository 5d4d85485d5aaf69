//! Background fetch worker.
//!
//! Keeps the one suspending operation, fetching the country list, off the event
//! loop. The app posts a [`WorkerMessage`], the worker runs it on a tokio task and
//! sends a [`WorkerResponse`] back over a channel.
//!
//! - `messages`: request/response types with trace context propagation
//! - `handler`: the [`CountryWorker`] task spawner

pub mod handler;
pub mod messages;

pub use handler::CountryWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
