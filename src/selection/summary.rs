//! Aggregate figures over a selection
//!
//! All shares use the same zero-guarded, one-decimal `percent` as the
//! per-row fields: formula and group shares are relative to total criteria,
//! group recovery shares to total group criteria, formula recovery shares to
//! total formula criteria.

use serde::Serialize;

use crate::merge::{percent, MergedRow};

use super::metric::Metric;

/// Totals and shares across the selected entities
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategorySummary {
    pub entities: usize,
    pub total_criteria: u64,
    pub custom_formula: u64,
    pub group_criterion: u64,
    pub group_with_parallel_recovery: u64,
    pub group_with_semester_recovery: u64,
    pub formula_with_parallel_recovery: u64,
    pub formula_with_semester_recovery: u64,
    pub total_enrollments: u64,
    pub total_classes: u64,
    pub percent_formula: f64,
    pub percent_group: f64,
    pub percent_group_parallel: f64,
    pub percent_group_semester: f64,
    pub percent_formula_parallel: f64,
    pub percent_formula_semester: f64,
}

/// Slices of the category breakdown chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Slice {
    FormulaParallel,
    FormulaSemester,
    FormulaOther,
    GroupParallel,
    GroupSemester,
    GroupOther,
    OtherCriteria,
}

impl Slice {
    pub fn label(&self) -> &'static str {
        match self {
            Slice::FormulaParallel => "Custom Formula with Parallel Recovery",
            Slice::FormulaSemester => "Custom Formula with Semester Recovery",
            Slice::FormulaOther => "Custom Formula (other)",
            Slice::GroupParallel => "Group Criterion with Parallel Recovery",
            Slice::GroupSemester => "Group Criterion with Semester Recovery",
            Slice::GroupOther => "Group Criterion (other)",
            Slice::OtherCriteria => "Other Criteria",
        }
    }
}

/// One slice of the breakdown with its quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DistributionEntry {
    pub slice: Slice,
    pub quantity: i64,
}

impl CategorySummary {
    /// Sums every count over `rows` and derives the shares
    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a MergedRow>,
    {
        let mut s = CategorySummary::default();
        for row in rows {
            s.entities += 1;
            s.total_criteria += row.total_criteria;
            s.custom_formula += row.custom_formula;
            s.group_criterion += row.group_criterion;
            s.group_with_parallel_recovery += row.group_with_parallel_recovery;
            s.group_with_semester_recovery += row.group_with_semester_recovery;
            s.formula_with_parallel_recovery += row.formula_with_parallel_recovery;
            s.formula_with_semester_recovery += row.formula_with_semester_recovery;
            s.total_enrollments += row.total_enrollments;
            s.total_classes += row.total_classes;
        }

        s.percent_formula = percent(s.custom_formula, s.total_criteria);
        s.percent_group = percent(s.group_criterion, s.total_criteria);
        s.percent_group_parallel = percent(s.group_with_parallel_recovery, s.group_criterion);
        s.percent_group_semester = percent(s.group_with_semester_recovery, s.group_criterion);
        s.percent_formula_parallel = percent(s.formula_with_parallel_recovery, s.custom_formula);
        s.percent_formula_semester = percent(s.formula_with_semester_recovery, s.custom_formula);
        s
    }

    /// Seven-way breakdown of the criteria, empty slices removed.
    ///
    /// The "other" slices are differences of overlapping counts and can come
    /// out zero or negative; those are dropped along with empty slices.
    pub fn distribution(&self) -> Vec<DistributionEntry> {
        let c = |v: u64| v as i64;
        let formula_other = c(self.custom_formula)
            - c(self.formula_with_parallel_recovery)
            - c(self.formula_with_semester_recovery);
        let group_other = c(self.group_criterion)
            - c(self.group_with_parallel_recovery)
            - c(self.group_with_semester_recovery);
        let other = c(self.total_criteria) - c(self.custom_formula) - c(self.group_criterion);

        [
            (Slice::FormulaParallel, c(self.formula_with_parallel_recovery)),
            (Slice::FormulaSemester, c(self.formula_with_semester_recovery)),
            (Slice::FormulaOther, formula_other),
            (Slice::GroupParallel, c(self.group_with_parallel_recovery)),
            (Slice::GroupSemester, c(self.group_with_semester_recovery)),
            (Slice::GroupOther, group_other),
            (Slice::OtherCriteria, other),
        ]
        .into_iter()
        .filter(|(_, quantity)| *quantity > 0)
        .map(|(slice, quantity)| DistributionEntry { slice, quantity })
        .collect()
    }
}

/// Category counts of a single entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityProfile {
    pub name: String,
    pub total_criteria: u64,
    pub total_enrollments: u64,
    pub total_classes: u64,
    /// Formula categories first, then group categories
    pub categories: Vec<(Metric, u64)>,
}

impl EntityProfile {
    /// Display order of the profile categories
    pub const ORDER: [Metric; 6] = [
        Metric::CustomFormula,
        Metric::FormulaParallelRecovery,
        Metric::FormulaSemesterRecovery,
        Metric::GroupCriterion,
        Metric::GroupParallelRecovery,
        Metric::GroupSemesterRecovery,
    ];

    pub fn from_row(row: &MergedRow) -> Self {
        Self {
            name: row.name().to_string(),
            total_criteria: row.total_criteria,
            total_enrollments: row.total_enrollments,
            total_classes: row.total_classes,
            categories: Self::ORDER
                .iter()
                .map(|m| (*m, m.count(row).unwrap_or(0)))
                .collect(),
        }
    }

    /// Largest category count, zero for an entity without categories
    pub fn peak(&self) -> u64 {
        self.categories.iter().map(|(_, v)| *v).max().unwrap_or(0)
    }
}
