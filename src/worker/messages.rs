//! Request and response types exchanged with the fetch worker.
//!
//! Requests carry the trace context of the span that issued them, so the spans the
//! worker task records are linked to the user action that triggered the fetch even
//! though the task runs detached from it.

use crate::domain::Country;
use std::sync::Arc;

/// OpenTelemetry identifiers of the span that posted a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// Trace ID as 32 hex digits.
    pub trace_id: String,
    /// Span ID of the requesting span as 16 hex digits.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the context of the current span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the current span
    /// is not recorded.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Rebuilds a remote parent context for spans created by the worker.
    ///
    /// Returns `None` if either identifier is not valid hex.
    pub fn to_parent_context(&self) -> Option<opentelemetry::Context> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());

        Some(opentelemetry::Context::new().with_remote_span_context(span_context))
    }
}

/// Requests handled by the fetch worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerMessage {
    /// Fetch the country list, from the cache if the store already holds it.
    FetchCountries {
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Builds a fetch request tagged with the current trace context.
    #[must_use]
    pub fn fetch_countries() -> Self {
        Self::FetchCountries {
            trace_context: TraceContext::from_current(),
        }
    }

    pub(crate) const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::FetchCountries { trace_context } => trace_context.as_ref(),
        }
    }
}

/// Results the worker sends back.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerResponse {
    /// The store delivered the list.
    CountriesLoaded {
        countries: Arc<Vec<Country>>,
    },

    /// The fetch failed; the store cached nothing and can be asked again.
    FetchFailed {
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn without_otel_layer_no_context_is_captured() {
        assert_eq!(WorkerMessage::fetch_countries(), WorkerMessage::FetchCountries { trace_context: None });
    }

    #[test]
    fn parent_context_rejects_bad_hex() {
        let context = TraceContext {
            trace_id: "not-hex".to_string(),
            parent_span_id: "00f067aa0ba902b7".to_string(),
        };
        assert!(context.to_parent_context().is_none());
    }

    #[test]
    fn parent_context_round_trips_ids() {
        use opentelemetry::trace::TraceContextExt;

        let context = TraceContext {
            trace_id: "4bf92f3577b34da6a3ce929d0e0e4736".to_string(),
            parent_span_id: "00f067aa0ba902b7".to_string(),
        };
        let parent = context.to_parent_context().unwrap();
        let span = parent.span();
        let span_context = span.span_context();

        assert!(span_context.is_remote());
        assert_eq!(format!("{:032x}", span_context.trace_id()), context.trace_id);
    }
}
