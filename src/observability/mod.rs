//! Observability subsystem
//!
//! - Structured logging (JSON lines on stderr)
//! - Pipeline counters
//! - Stage scopes
//!
//! Observability is read-only: it never changes what the pipeline returns,
//! and a failure to write a log line is ignored.
//!
//! # Usage
//!
//! ```ignore
//! use critmetrics::observability::{Logger, Event, ObservationScope};
//!
//! Logger::info("QUERY_COMPLETE", &[("rows", "42")]);
//!
//! let scope = ObservationScope::new("MERGE");
//! // ... do work ...
//! scope.complete();
//! ```

mod events;
mod logger;
mod metrics;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsSnapshot, PipelineMetrics};
pub use scope::ObservationScope;

fn severity_for(event: Event) -> Severity {
    if event.is_error() {
        Severity::Error
    } else if event.is_warning() {
        Severity::Warn
    } else {
        Severity::Info
    }
}

/// Log a pipeline event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity_for(event), event.as_str(), fields);
}
