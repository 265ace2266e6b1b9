//! Closed set of numeric columns that views sort and filter by

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DashboardError;
use crate::merge::MergedRow;

/// A numeric column of `MergedRow`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    TotalCriteria,
    CustomFormula,
    GroupCriterion,
    GroupParallelRecovery,
    GroupSemesterRecovery,
    FormulaParallelRecovery,
    FormulaSemesterRecovery,
    TotalEnrollments,
    TotalClasses,
    PercentFormula,
    PercentGroup,
    PercentGroupParallel,
    PercentGroupSemester,
    PercentFormulaParallel,
    PercentFormulaSemester,
}

impl Metric {
    pub const ALL: [Metric; 15] = [
        Metric::TotalCriteria,
        Metric::CustomFormula,
        Metric::GroupCriterion,
        Metric::GroupParallelRecovery,
        Metric::GroupSemesterRecovery,
        Metric::FormulaParallelRecovery,
        Metric::FormulaSemesterRecovery,
        Metric::TotalEnrollments,
        Metric::TotalClasses,
        Metric::PercentFormula,
        Metric::PercentGroup,
        Metric::PercentGroupParallel,
        Metric::PercentGroupSemester,
        Metric::PercentFormulaParallel,
        Metric::PercentFormulaSemester,
    ];

    /// The six overlapping criteria categories, in selector order
    pub const CATEGORIES: [Metric; 6] = [
        Metric::CustomFormula,
        Metric::GroupCriterion,
        Metric::GroupParallelRecovery,
        Metric::GroupSemesterRecovery,
        Metric::FormulaParallelRecovery,
        Metric::FormulaSemesterRecovery,
    ];

    /// Stable column key used in config files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::TotalCriteria => "total_criteria",
            Metric::CustomFormula => "custom_formula",
            Metric::GroupCriterion => "group_criterion",
            Metric::GroupParallelRecovery => "group_parallel_recovery",
            Metric::GroupSemesterRecovery => "group_semester_recovery",
            Metric::FormulaParallelRecovery => "formula_parallel_recovery",
            Metric::FormulaSemesterRecovery => "formula_semester_recovery",
            Metric::TotalEnrollments => "total_enrollments",
            Metric::TotalClasses => "total_classes",
            Metric::PercentFormula => "percent_formula",
            Metric::PercentGroup => "percent_group",
            Metric::PercentGroupParallel => "percent_group_parallel",
            Metric::PercentGroupSemester => "percent_group_semester",
            Metric::PercentFormulaParallel => "percent_formula_parallel",
            Metric::PercentFormulaSemester => "percent_formula_semester",
        }
    }

    /// Human-readable column header
    pub fn label(&self) -> &'static str {
        match self {
            Metric::TotalCriteria => "Total Criteria",
            Metric::CustomFormula => "Custom Formula",
            Metric::GroupCriterion => "Group Criteria",
            Metric::GroupParallelRecovery => "Group with Parallel Recovery",
            Metric::GroupSemesterRecovery => "Group with Semester Recovery",
            Metric::FormulaParallelRecovery => "Formula with Parallel Recovery",
            Metric::FormulaSemesterRecovery => "Formula with Semester Recovery",
            Metric::TotalEnrollments => "Total Enrollments",
            Metric::TotalClasses => "Total Classes",
            Metric::PercentFormula => "% Custom Formula",
            Metric::PercentGroup => "% Group Criteria",
            Metric::PercentGroupParallel => "% Group with Parallel Recovery",
            Metric::PercentGroupSemester => "% Group with Semester Recovery",
            Metric::PercentFormulaParallel => "% Formula with Parallel Recovery",
            Metric::PercentFormulaSemester => "% Formula with Semester Recovery",
        }
    }

    /// True for the derived percentage columns
    pub fn is_percentage(&self) -> bool {
        matches!(
            self,
            Metric::PercentFormula
                | Metric::PercentGroup
                | Metric::PercentGroupParallel
                | Metric::PercentGroupSemester
                | Metric::PercentFormulaParallel
                | Metric::PercentFormulaSemester
        )
    }

    /// Integer value for count columns, `None` for percentages
    pub fn count(&self, row: &MergedRow) -> Option<u64> {
        match self {
            Metric::TotalCriteria => Some(row.total_criteria),
            Metric::CustomFormula => Some(row.custom_formula),
            Metric::GroupCriterion => Some(row.group_criterion),
            Metric::GroupParallelRecovery => Some(row.group_with_parallel_recovery),
            Metric::GroupSemesterRecovery => Some(row.group_with_semester_recovery),
            Metric::FormulaParallelRecovery => Some(row.formula_with_parallel_recovery),
            Metric::FormulaSemesterRecovery => Some(row.formula_with_semester_recovery),
            Metric::TotalEnrollments => Some(row.total_enrollments),
            Metric::TotalClasses => Some(row.total_classes),
            _ => None,
        }
    }

    /// Value of this column in `row`
    pub fn value(&self, row: &MergedRow) -> f64 {
        if let Some(c) = self.count(row) {
            return c as f64;
        }
        match self {
            Metric::PercentFormula => row.percent_formula,
            Metric::PercentGroup => row.percent_group,
            Metric::PercentGroupParallel => row.percent_group_parallel,
            Metric::PercentGroupSemester => row.percent_group_semester,
            Metric::PercentFormulaParallel => row.percent_formula_parallel,
            Metric::PercentFormulaSemester => row.percent_formula_semester,
            _ => 0.0,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<_> = Metric::ALL.iter().map(Metric::as_str).collect();
                DashboardError::Config(format!(
                    "unknown metric '{}', expected one of: {}",
                    s,
                    known.join(", ")
                ))
            })
    }
}
