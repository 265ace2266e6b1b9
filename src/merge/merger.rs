//! Left join of criteria and enrollment aggregates

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::aggregate::{CriteriaAggregate, EnrollmentAggregate, Entity};
use crate::errors::{AggregateKind, DashboardError, DashboardResult};

use super::percent::percent;

/// One entity's criteria counts joined with its enrollment counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRow {
    pub entity: Entity,
    pub total_criteria: u64,
    pub custom_formula: u64,
    pub group_criterion: u64,
    pub group_with_parallel_recovery: u64,
    pub group_with_semester_recovery: u64,
    pub formula_with_parallel_recovery: u64,
    pub formula_with_semester_recovery: u64,
    /// Zero when the entity has no classes
    pub total_enrollments: u64,
    /// Zero when the entity has no classes
    pub total_classes: u64,
    /// `custom_formula` as a share of `total_criteria`
    pub percent_formula: f64,
    /// `group_criterion` as a share of `total_criteria`
    pub percent_group: f64,
    /// Shares of `group_criterion`
    pub percent_group_parallel: f64,
    pub percent_group_semester: f64,
    /// Shares of `custom_formula`
    pub percent_formula_parallel: f64,
    pub percent_formula_semester: f64,
}

impl MergedRow {
    /// Builds a row from a criteria aggregate and optional enrollment counts
    pub fn new(criteria: &CriteriaAggregate, enrollment: Option<&EnrollmentAggregate>) -> Self {
        let (total_enrollments, total_classes) = enrollment
            .map(|e| (e.total_enrollments, e.total_classes))
            .unwrap_or((0, 0));

        Self {
            entity: criteria.entity.clone(),
            total_criteria: criteria.total_criteria,
            custom_formula: criteria.custom_formula,
            group_criterion: criteria.group_criterion,
            group_with_parallel_recovery: criteria.group_with_parallel_recovery,
            group_with_semester_recovery: criteria.group_with_semester_recovery,
            formula_with_parallel_recovery: criteria.formula_with_parallel_recovery,
            formula_with_semester_recovery: criteria.formula_with_semester_recovery,
            total_enrollments,
            total_classes,
            percent_formula: percent(criteria.custom_formula, criteria.total_criteria),
            percent_group: percent(criteria.group_criterion, criteria.total_criteria),
            percent_group_parallel: percent(
                criteria.group_with_parallel_recovery,
                criteria.group_criterion,
            ),
            percent_group_semester: percent(
                criteria.group_with_semester_recovery,
                criteria.group_criterion,
            ),
            percent_formula_parallel: percent(
                criteria.formula_with_parallel_recovery,
                criteria.custom_formula,
            ),
            percent_formula_semester: percent(
                criteria.formula_with_semester_recovery,
                criteria.custom_formula,
            ),
        }
    }

    pub fn name(&self) -> &str {
        &self.entity.name
    }
}

/// Joins enrollment counts onto criteria aggregates by entity id.
///
/// Output order is the criteria order. Entities that only appear on the
/// enrollment side are dropped; criteria entities without a match get zero
/// enrollments and classes.
pub fn merge(criteria: &[CriteriaAggregate], enrollment: &[EnrollmentAggregate]) -> Vec<MergedRow> {
    let mut by_id: HashMap<i64, &EnrollmentAggregate> = HashMap::with_capacity(enrollment.len());
    for agg in enrollment {
        by_id.entry(agg.entity.id).or_insert(agg);
    }

    criteria
        .iter()
        .map(|c| MergedRow::new(c, by_id.get(&c.entity.id).copied()))
        .collect()
}

/// Merges two aggregation outcomes.
///
/// If either aggregate failed, returns `MissingData` listing every unavailable
/// aggregate together with the failures that caused it.
pub fn merge_outcomes(
    criteria: DashboardResult<Vec<CriteriaAggregate>>,
    enrollment: DashboardResult<Vec<EnrollmentAggregate>>,
) -> DashboardResult<Vec<MergedRow>> {
    match (criteria, enrollment) {
        (Ok(c), Ok(e)) => Ok(merge(&c, &e)),
        (c, e) => {
            let mut unavailable = Vec::new();
            let mut causes = Vec::new();
            if let Err(err) = c {
                unavailable.push(AggregateKind::Criteria);
                causes.push(err);
            }
            if let Err(err) = e {
                unavailable.push(AggregateKind::Enrollment);
                causes.push(err);
            }
            Err(DashboardError::MissingData {
                unavailable,
                causes,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria(id: i64, name: &str, total: u64, formula: u64, group: u64) -> CriteriaAggregate {
        let mut agg = CriteriaAggregate::new(Entity::new(id, name), total);
        agg.custom_formula = formula;
        agg.group_criterion = group;
        agg
    }

    fn enrollment(id: i64, name: &str, enrollments: u64, classes: u64) -> EnrollmentAggregate {
        EnrollmentAggregate {
            entity: Entity::new(id, name),
            total_enrollments: enrollments,
            total_classes: classes,
        }
    }

    #[test]
    fn test_left_join_keeps_criteria_order() {
        let c = vec![criteria(2, "B", 20, 5, 0), criteria(1, "A", 10, 4, 2)];
        let e = vec![enrollment(1, "A", 50, 2), enrollment(2, "B", 7, 1)];

        let rows = merge(&c, &e);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name(), "B");
        assert_eq!(rows[0].total_enrollments, 7);
        assert_eq!(rows[1].name(), "A");
        assert_eq!(rows[1].total_enrollments, 50);
        assert_eq!(rows[1].total_classes, 2);
    }

    #[test]
    fn test_unmatched_enrollment_is_zero_filled() {
        let c = vec![criteria(1, "A", 10, 4, 0)];
        let rows = merge(&c, &[]);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_enrollments, 0);
        assert_eq!(rows[0].total_classes, 0);
    }

    #[test]
    fn test_enrollment_only_entities_dropped() {
        let c = vec![criteria(1, "A", 10, 4, 0)];
        let e = vec![enrollment(1, "A", 5, 1), enrollment(9, "Z", 500, 9)];

        let rows = merge(&c, &e);
        assert_eq!(rows.len(), 1);
        assert!(rows.iter().all(|r| r.entity.id != 9));
    }

    #[test]
    fn test_derived_percentages() {
        let mut agg = criteria(1, "A", 10, 3, 4);
        agg.group_with_parallel_recovery = 1;
        agg.group_with_semester_recovery = 4;
        agg.formula_with_parallel_recovery = 2;

        let row = MergedRow::new(&agg, None);
        assert_eq!(row.percent_formula, 30.0);
        assert_eq!(row.percent_group, 40.0);
        assert_eq!(row.percent_group_parallel, 25.0);
        assert_eq!(row.percent_group_semester, 100.0);
        assert_eq!(row.percent_formula_parallel, 66.7);
        assert_eq!(row.percent_formula_semester, 0.0);
    }

    #[test]
    fn test_zero_group_and_formula_denominators() {
        let row = MergedRow::new(&criteria(1, "A", 5, 0, 0), None);
        assert_eq!(row.percent_group_parallel, 0.0);
        assert_eq!(row.percent_formula_semester, 0.0);

        let row = MergedRow::new(&criteria(1, "A", 0, 0, 0), None);
        assert_eq!(row.percent_formula, 0.0);
        assert_eq!(row.percent_group, 0.0);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let c = vec![criteria(1, "A", 10, 4, 2), criteria(2, "B", 3, 1, 1)];
        let e = vec![enrollment(2, "B", 9, 1)];
        assert_eq!(merge(&c, &e), merge(&c, &e));
    }

    #[test]
    fn test_missing_criteria_short_circuits() {
        let err = merge_outcomes(
            Err(DashboardError::query_failure("SELECT criteria", "timeout")),
            Ok(vec![enrollment(1, "A", 1, 1)]),
        )
        .unwrap_err();

        match err {
            DashboardError::MissingData {
                unavailable,
                causes,
            } => {
                assert_eq!(unavailable, vec![AggregateKind::Criteria]);
                assert_eq!(causes.len(), 1);
                assert_eq!(causes[0].query(), Some("SELECT criteria"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_both_missing_reports_both() {
        let err = merge_outcomes(
            Err(DashboardError::query_failure("q1", "down")),
            Err(DashboardError::query_failure("q2", "down")),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            DashboardError::MissingData { ref unavailable, .. }
                if unavailable == &[AggregateKind::Criteria, AggregateKind::Enrollment]
        ));
    }
}
