//! Filtered selection and the per-view projections built on it
//!
//! A `Selection` is computed once per filter change. Every view sorts and
//! truncates its own copy, so the same selection serves every chart.

use serde::Serialize;

use crate::merge::{percent, MergedRow};

use super::metric::Metric;
use super::summary::{CategorySummary, EntityProfile};

/// Rows that passed the active filters, in dataset order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection<'a> {
    rows: Vec<&'a MergedRow>,
}

/// A row in a single-category view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRow<'a> {
    pub row: &'a MergedRow,
    /// Value of the viewed metric
    pub value: f64,
    /// The viewed count as a share of the row's total criteria; absent when
    /// the viewed metric is itself a percentage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_of_criteria: Option<f64>,
}

impl<'a> Selection<'a> {
    pub fn new(rows: Vec<&'a MergedRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[&'a MergedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows ordered by `metric`, highest first.
    ///
    /// The sort is stable: ties keep their dataset order.
    pub fn sorted(&self, metric: Metric) -> Vec<&'a MergedRow> {
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| metric.value(b).total_cmp(&metric.value(a)));
        rows
    }

    /// The `limit` highest rows by `metric`
    pub fn top(&self, metric: Metric, limit: usize) -> Vec<&'a MergedRow> {
        let mut rows = self.sorted(metric);
        rows.truncate(limit);
        rows
    }

    /// Rows with a positive `metric`, highest first
    pub fn category(&self, metric: Metric) -> Vec<CategoryRow<'a>> {
        self.sorted(metric)
            .into_iter()
            .filter(|r| metric.value(r) > 0.0)
            .map(|row| {
                let value = metric.value(row);
                let percent_of_criteria = metric.count(row).map(|c| percent(c, row.total_criteria));
                CategoryRow {
                    row,
                    value,
                    percent_of_criteria,
                }
            })
            .collect()
    }

    /// First row whose entity has this display name
    pub fn entity(&self, name: &str) -> Option<&'a MergedRow> {
        self.rows.iter().copied().find(|r| r.name() == name)
    }

    /// Category profile of one entity
    pub fn profile(&self, name: &str) -> Option<EntityProfile> {
        self.entity(name).map(EntityProfile::from_row)
    }

    /// Totals and shares over every selected row
    pub fn summary(&self) -> CategorySummary {
        CategorySummary::from_rows(self.rows.iter().copied())
    }
}
