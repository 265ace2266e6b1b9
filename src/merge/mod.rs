//! Dataset merge subsystem
//!
//! Joins the criteria and enrollment aggregates into one row per entity and
//! computes every derived percentage in one place.
//!
//! # Invariants
//!
//! - Left join keyed from the criteria side; criteria order is preserved
//! - Missing enrollment counts are zero, never absent
//! - Percentages are rounded to one decimal and zero when the denominator is
//! - Merging the same inputs twice yields identical rows

mod merger;
mod percent;

pub use merger::{merge, merge_outcomes, MergedRow};
pub use percent::{percent, round1};

use serde::Serialize;

/// The merged table for one render pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    rows: Vec<MergedRow>,
}

impl Dataset {
    pub fn new(rows: Vec<MergedRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[MergedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct entity names in row order
    pub fn entity_names(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.rows
            .iter()
            .map(MergedRow::name)
            .filter(|n| seen.insert(*n))
            .collect()
    }

    /// Largest enrollment count, the upper bound for an enrollment threshold
    pub fn max_enrollments(&self) -> u64 {
        self.rows.iter().map(|r| r.total_enrollments).max().unwrap_or(0)
    }

    /// Largest criteria count, the upper bound for a criteria threshold
    pub fn max_criteria(&self) -> u64 {
        self.rows.iter().map(|r| r.total_criteria).max().unwrap_or(0)
    }
}

impl From<Vec<MergedRow>> for Dataset {
    fn from(rows: Vec<MergedRow>) -> Self {
        Self::new(rows)
    }
}
