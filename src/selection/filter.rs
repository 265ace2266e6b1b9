//! Row filtering over the merged dataset
//!
//! Filters are applied in a fixed order:
//! 1. Entity name set (skipped when empty)
//! 2. Minimum enrollments (inclusive)
//! 3. Minimum criteria (inclusive)

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::merge::MergedRow;

use super::view::Selection;

/// Default number of rows shown per view
pub const DEFAULT_DISPLAY_LIMIT: usize = 30;

/// User-supplied filter settings for one render pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Entity names to keep; empty keeps every entity
    #[serde(default)]
    pub selected_entities: BTreeSet<String>,
    #[serde(default)]
    pub min_enrollments: u64,
    #[serde(default)]
    pub min_criteria: u64,
    /// Row cap for top-N views; never applied to the shared selection
    #[serde(default = "default_display_limit")]
    pub display_limit: usize,
}

fn default_display_limit() -> usize {
    DEFAULT_DISPLAY_LIMIT
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            selected_entities: BTreeSet::new(),
            min_enrollments: 0,
            min_criteria: 0,
            display_limit: DEFAULT_DISPLAY_LIMIT,
        }
    }
}

impl FilterConfig {
    pub fn with_entities<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_entities = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_min_enrollments(mut self, min: u64) -> Self {
        self.min_enrollments = min;
        self
    }

    pub fn with_min_criteria(mut self, min: u64) -> Self {
        self.min_criteria = min;
        self
    }

    pub fn with_display_limit(mut self, limit: usize) -> Self {
        self.display_limit = limit;
        self
    }

    /// Checks if a row passes every filter
    pub fn matches(&self, row: &MergedRow) -> bool {
        (self.selected_entities.is_empty() || self.selected_entities.contains(row.name()))
            && row.total_enrollments >= self.min_enrollments
            && row.total_criteria >= self.min_criteria
    }

    /// Narrows `rows` to those passing every filter, keeping their order
    pub fn apply<'a>(&self, rows: &'a [MergedRow]) -> Selection<'a> {
        Selection::new(rows.iter().filter(|r| self.matches(r)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{CriteriaAggregate, EnrollmentAggregate, Entity};
    use crate::merge::merge;

    fn rows() -> Vec<MergedRow> {
        let criteria = vec![
            CriteriaAggregate::new(Entity::new(1, "Alpha"), 12),
            CriteriaAggregate::new(Entity::new(2, "Beta"), 6),
            CriteriaAggregate::new(Entity::new(3, "Gamma"), 2),
            CriteriaAggregate::new(Entity::new(4, "Delta"), 1),
        ];
        let enrollment = vec![
            EnrollmentAggregate {
                entity: Entity::new(1, "Alpha"),
                total_enrollments: 3,
                total_classes: 1,
            },
            EnrollmentAggregate {
                entity: Entity::new(2, "Beta"),
                total_enrollments: 80,
                total_classes: 4,
            },
            EnrollmentAggregate {
                entity: Entity::new(3, "Gamma"),
                total_enrollments: 5,
                total_classes: 1,
            },
        ];
        merge(&criteria, &enrollment)
    }

    fn names<'a>(selection: &Selection<'a>) -> Vec<&'a str> {
        selection.rows().iter().map(|r| r.name()).collect()
    }

    #[test]
    fn test_default_keeps_everything() {
        let rows = rows();
        let selection = FilterConfig::default().apply(&rows);
        assert_eq!(names(&selection), vec!["Alpha", "Beta", "Gamma", "Delta"]);
    }

    #[test]
    fn test_name_restriction() {
        let rows = rows();
        let selection = FilterConfig::default()
            .with_entities(["Gamma", "Alpha", "Nowhere"])
            .apply(&rows);
        assert_eq!(names(&selection), vec!["Alpha", "Gamma"]);
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        let rows = rows();
        let selection = FilterConfig::default()
            .with_min_enrollments(5)
            .with_min_criteria(2)
            .apply(&rows);
        assert_eq!(names(&selection), vec!["Beta", "Gamma"]);
    }

    #[test]
    fn test_zero_filled_rows_fail_positive_enrollment_threshold() {
        let rows = rows();
        let selection = FilterConfig::default().with_min_enrollments(1).apply(&rows);
        assert!(!names(&selection).contains(&"Delta"));
    }

    #[test]
    fn test_display_limit_does_not_truncate_selection() {
        let rows = rows();
        let selection = FilterConfig::default().with_display_limit(1).apply(&rows);
        assert_eq!(selection.len(), 4);
    }
}
