//! Tracer provider that exports finished spans to a rotated JSON-lines file.

use super::file_writer::{RotatingFile, RotationPolicy};
use super::span_record::SpanRecord;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// Writes each exported span as one [`SpanRecord`] line.
#[derive(Debug)]
struct FileSpanExporter {
    file: RotatingFile,
    service: String,
    is_shutdown: AtomicBool,
}

impl FileSpanExporter {
    fn write_batch(&self, batch: &[SpanData]) -> ExportResult {
        for span in batch {
            let record = SpanRecord::from_span(&self.service, span);
            let line = serde_json::to_string(&record).map_err(|e| TraceError::from(e.to_string()))?;
            self.file.write_line(&line).map_err(|e| TraceError::from(e.to_string()))?;
        }
        Ok(())
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.is_shutdown.load(Ordering::SeqCst) {
            Err(TraceError::from("span exporter is shut down"))
        } else {
            self.write_batch(&batch)
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }

    fn set_resource(&mut self, resource: &Resource) {
        if let Some(name) = resource.get(opentelemetry::Key::from_static_str("service.name")) {
            self.service = name.to_string();
        }
    }
}

/// Builds a provider that writes spans to `file_path` as they end.
pub fn create_tracer_provider(
    file_path: PathBuf,
    policy: RotationPolicy,
    service: &str,
) -> TracerProvider {
    let exporter = FileSpanExporter {
        file: RotatingFile::new(file_path, policy),
        service: service.to_string(),
        is_shutdown: AtomicBool::new(false),
    };

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", service.to_string())]);

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{Tracer, TracerProvider as _};
    use tempfile::TempDir;

    #[test]
    fn finished_spans_become_json_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("spans.json");
        let provider = create_tracer_provider(path.clone(), RotationPolicy::default(), "poi-countries-test");

        provider.tracer("test").in_span("apply_sort", |_cx| {});
        drop(provider);

        let content = std::fs::read_to_string(&path).unwrap();
        let line = content.lines().next().unwrap();
        let record: serde_json::Value = serde_json::from_str(line).unwrap();

        assert_eq!(record["name"], "apply_sort");
        assert_eq!(record["service"], "poi-countries-test");
        assert_eq!(record["traceId"].as_str().unwrap().len(), 32);
    }
}
