//! Observable pipeline events
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events of one render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded and validated
    ConfigLoaded,

    // Source
    /// Database connection opened (once per source)
    SourceOpened,
    /// Query returned its rows
    QueryComplete,
    /// Query failed; the text is attached
    QueryFailed,

    // Pipeline
    /// Aggregate rows violate their containment bounds
    AggregateInconsistent,
    /// Aggregates merged into the dataset
    MergeComplete,
    /// Filters applied to the dataset
    FilterApplied,
    /// Render pass abandoned for lack of data
    RenderAborted,

    // Export
    /// Export file written
    ExportComplete,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SourceOpened => "SOURCE_OPENED",
            Event::QueryComplete => "QUERY_COMPLETE",
            Event::QueryFailed => "QUERY_FAILED",
            Event::AggregateInconsistent => "AGGREGATE_INCONSISTENT",
            Event::MergeComplete => "MERGE_COMPLETE",
            Event::FilterApplied => "FILTER_APPLIED",
            Event::RenderAborted => "RENDER_ABORTED",
            Event::ExportComplete => "EXPORT_COMPLETE",
        }
    }

    /// Events reported at ERROR severity.
    ///
    /// Nothing in the pipeline is fatal; a failed pass can be rerun.
    pub fn is_error(&self) -> bool {
        matches!(self, Event::QueryFailed | Event::RenderAborted)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Event::AggregateInconsistent)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_events_have_string_representation() {
        let events = [
            Event::ConfigLoaded,
            Event::SourceOpened,
            Event::QueryComplete,
            Event::QueryFailed,
            Event::AggregateInconsistent,
            Event::MergeComplete,
            Event::FilterApplied,
            Event::RenderAborted,
            Event::ExportComplete,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_error_events() {
        assert!(Event::QueryFailed.is_error());
        assert!(Event::RenderAborted.is_error());
        assert!(!Event::MergeComplete.is_error());
        assert!(Event::AggregateInconsistent.is_warning());
    }
}
