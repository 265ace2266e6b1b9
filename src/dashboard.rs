//! One render pass: aggregate, merge, filter
//!
//! # Flow (strict order)
//!
//! 1. Run the criteria aggregation
//! 2. Run the enrollment aggregation (even if step 1 failed)
//! 3. Merge, or abort with `MissingData` if either step failed
//! 4. Filter the merged rows for the views
//!
//! Everything is recomputed on each pass; nothing is cached between passes.

use crate::aggregate::{
    load_criteria, load_enrollment, CriteriaAggregate, CRITERIA_QUERY, ENROLLMENT_QUERY,
};
use crate::errors::{AggregateKind, DashboardResult};
use crate::merge::{merge_outcomes, Dataset};
use crate::observability::{
    log_event_with_fields, Event, MetricsSnapshot, ObservationScope, PipelineMetrics,
};
use crate::selection::{FilterConfig, Selection};
use crate::source::QuerySource;

/// Owns the query source and runs render passes against it
pub struct Dashboard<S: QuerySource> {
    source: S,
    metrics: PipelineMetrics,
}

impl<S: QuerySource> Dashboard<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            metrics: PipelineMetrics::new(),
        }
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Runs both aggregations and merges them into a dataset
    pub fn load(&self) -> DashboardResult<Dataset> {
        let scope = ObservationScope::new("LOAD");

        let criteria = self.observe(
            AggregateKind::Criteria,
            CRITERIA_QUERY,
            load_criteria(&self.source),
        );
        if let Ok(rows) = &criteria {
            warn_inconsistent(rows);
        }
        let enrollment = self.observe(
            AggregateKind::Enrollment,
            ENROLLMENT_QUERY,
            load_enrollment(&self.source),
        );

        match merge_outcomes(criteria, enrollment) {
            Ok(rows) => {
                self.metrics.record_render();
                let count = rows.len().to_string();
                log_event_with_fields(Event::MergeComplete, &[("rows", count.as_str())]);
                scope.complete_with_fields(&[("rows", count.as_str())]);
                Ok(Dataset::new(rows))
            }
            Err(err) => {
                self.metrics.record_abort();
                let reason = err.to_string();
                log_event_with_fields(
                    Event::RenderAborted,
                    &[("code", err.code()), ("reason", reason.as_str())],
                );
                scope.fail(&reason);
                Err(err)
            }
        }
    }

    /// Applies `filter` to a loaded dataset
    pub fn select<'d>(&self, dataset: &'d Dataset, filter: &FilterConfig) -> Selection<'d> {
        let selection = filter.apply(dataset.rows());

        let total = dataset.len().to_string();
        let kept = selection.len().to_string();
        log_event_with_fields(
            Event::FilterApplied,
            &[("rows_in", total.as_str()), ("rows_out", kept.as_str())],
        );
        selection
    }

    fn observe<T>(
        &self,
        kind: AggregateKind,
        query: &str,
        result: DashboardResult<Vec<T>>,
    ) -> DashboardResult<Vec<T>> {
        match &result {
            Ok(rows) => {
                self.metrics.record_query(rows.len());
                let count = rows.len().to_string();
                log_event_with_fields(
                    Event::QueryComplete,
                    &[("aggregate", kind.as_str()), ("rows", count.as_str())],
                );
            }
            Err(err) => {
                self.metrics.record_query_failure();
                let reason = err.to_string();
                log_event_with_fields(
                    Event::QueryFailed,
                    &[
                        ("aggregate", kind.as_str()),
                        ("code", err.code()),
                        ("query", err.query().unwrap_or(query).trim()),
                        ("reason", reason.as_str()),
                    ],
                );
            }
        }
        result
    }
}

fn warn_inconsistent(rows: &[CriteriaAggregate]) {
    for row in rows.iter().filter(|r| !r.is_consistent()) {
        let id = row.entity.id.to_string();
        log_event_with_fields(
            Event::AggregateInconsistent,
            &[("entity_id", id.as_str()), ("entity", row.entity.name.as_str())],
        );
    }
}
