//! One JSON line per finished span.
//!
//! Records are flat and self-contained so the span file can be read with `jq` or
//! loaded line by line without an OTLP collector.

use chrono::{DateTime, Utc};
use opentelemetry::trace::{SpanId, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanRecord {
    pub service: String,
    pub trace_id: String,
    pub span_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_span_id: Option<String>,
    pub name: String,
    pub start: DateTime<Utc>,
    pub duration_us: u64,
    pub attributes: BTreeMap<String, serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<EventRecord>,
    pub status: StatusRecord,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventRecord {
    pub name: String,
    pub time: DateTime<Utc>,
    pub attributes: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "message", rename_all = "lowercase")]
pub enum StatusRecord {
    Unset,
    Ok,
    Error(String),
}

impl SpanRecord {
    #[must_use]
    pub fn from_span(service: &str, span: &SpanData) -> Self {
        let duration = span.end_time.duration_since(span.start_time).unwrap_or_default();

        Self {
            service: service.to_string(),
            trace_id: format!("{:032x}", span.span_context.trace_id()),
            span_id: format!("{:016x}", span.span_context.span_id()),
            parent_span_id: (span.parent_span_id != SpanId::INVALID).then(|| format!("{:016x}", span.parent_span_id)),
            name: span.name.to_string(),
            start: DateTime::<Utc>::from(span.start_time),
            duration_us: u64::try_from(duration.as_micros()).unwrap_or(u64::MAX),
            attributes: attribute_map(&span.attributes),
            events: span
                .events
                .iter()
                .map(|event| EventRecord {
                    name: event.name.to_string(),
                    time: DateTime::<Utc>::from(event.timestamp),
                    attributes: attribute_map(&event.attributes),
                })
                .collect(),
            status: match &span.status {
                Status::Unset => StatusRecord::Unset,
                Status::Ok => StatusRecord::Ok,
                Status::Error { description } => StatusRecord::Error(description.to_string()),
            },
        }
    }
}

fn attribute_map(attributes: &[KeyValue]) -> BTreeMap<String, serde_json::Value> {
    attributes
        .iter()
        .map(|kv| (kv.key.to_string(), attribute_value(&kv.value)))
        .collect()
}

fn attribute_value(value: &Value) -> serde_json::Value {
    match value {
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::I64(i) => serde_json::Value::from(*i),
        Value::F64(f) => serde_json::Value::from(*f),
        Value::String(s) => serde_json::Value::String(s.to_string()),
        Value::Array(_) => serde_json::Value::String(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_values_keep_json_types() {
        let attrs = attribute_map(&[
            KeyValue::new("count", 3_i64),
            KeyValue::new("cached", true),
            KeyValue::new("query", "fr"),
        ]);

        assert_eq!(attrs["count"], serde_json::json!(3));
        assert_eq!(attrs["cached"], serde_json::json!(true));
        assert_eq!(attrs["query"], serde_json::json!("fr"));
    }

    #[test]
    fn status_serializes_with_code() {
        let json = serde_json::to_value(StatusRecord::Error("boom".to_string())).unwrap();
        assert_eq!(json, serde_json::json!({ "code": "error", "message": "boom" }));
        assert_eq!(
            serde_json::to_value(StatusRecord::Ok).unwrap(),
            serde_json::json!({ "code": "ok" })
        );
    }
}
