//! Criteria counts per entity

use serde::{Deserialize, Serialize};

use crate::errors::DashboardResult;
use crate::source::{QuerySource, RowRef};

use super::Entity;

/// Grouped criteria counts.
///
/// Column and table names follow the existing schema and must not change.
/// Entities without criteria are removed by the HAVING clause.
pub const CRITERIA_QUERY: &str = "
    SELECT
        e.id AS entidade_id,
        e.nome AS nome_entidade,
        COUNT(DISTINCT ca.id) AS total_criterios,
        SUM(CASE WHEN ca.formula_personalizada IS NOT NULL THEN 1 ELSE 0 END) AS formula_personalizada,
        SUM(CASE WHEN ca.criterio_calculo_grupo_id IS NOT NULL AND ca.possui_criterios_grupos = true THEN 1 ELSE 0 END) AS criterio_grupo,
        SUM(CASE WHEN ca.criterio_calculo_grupo_id IS NOT NULL
                  AND ca.possui_criterios_grupos = true
                  AND ca.possui_recuperacao_paralela = true THEN 1 ELSE 0 END) AS grupo_rec_paralela,
        SUM(CASE WHEN ca.criterio_calculo_grupo_id IS NOT NULL
                  AND ca.possui_criterios_grupos = true
                  AND ca.possui_recuperacao_semestral = true THEN 1 ELSE 0 END) AS grupo_rec_semestral,
        SUM(CASE WHEN ca.formula_personalizada IS NOT NULL
                  AND ca.possui_recuperacao_paralela = true THEN 1 ELSE 0 END) AS formula_rec_paralela,
        SUM(CASE WHEN ca.formula_personalizada IS NOT NULL
                  AND ca.possui_recuperacao_semestral = true THEN 1 ELSE 0 END) AS formula_rec_semestral
    FROM
        entidades e
    LEFT JOIN
        criterios_avaliativos ca ON ca.entidade_id = e.id
    GROUP BY
        e.id, e.nome
    HAVING
        COUNT(DISTINCT ca.id) > 0
    ORDER BY
        total_criterios DESC, e.id ASC
";

/// Criteria counts for one entity.
///
/// The sub-counts overlap and need not add up to `total_criteria`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriteriaAggregate {
    pub entity: Entity,
    pub total_criteria: u64,
    /// Criteria with a custom formula
    pub custom_formula: u64,
    /// Criteria computed from a criteria group
    pub group_criterion: u64,
    pub group_with_parallel_recovery: u64,
    pub group_with_semester_recovery: u64,
    pub formula_with_parallel_recovery: u64,
    pub formula_with_semester_recovery: u64,
}

impl CriteriaAggregate {
    /// Aggregate with every sub-count at zero
    pub fn new(entity: Entity, total_criteria: u64) -> Self {
        Self {
            entity,
            total_criteria,
            custom_formula: 0,
            group_criterion: 0,
            group_with_parallel_recovery: 0,
            group_with_semester_recovery: 0,
            formula_with_parallel_recovery: 0,
            formula_with_semester_recovery: 0,
        }
    }

    /// Checks the containment bounds between the counts.
    ///
    /// Every sub-count fits in `total_criteria`, group recovery counts fit in
    /// `group_criterion` and formula recovery counts fit in `custom_formula`.
    pub fn is_consistent(&self) -> bool {
        let subs = [
            self.custom_formula,
            self.group_criterion,
            self.group_with_parallel_recovery,
            self.group_with_semester_recovery,
            self.formula_with_parallel_recovery,
            self.formula_with_semester_recovery,
        ];
        subs.iter().all(|&c| c <= self.total_criteria)
            && self.group_with_parallel_recovery <= self.group_criterion
            && self.group_with_semester_recovery <= self.group_criterion
            && self.formula_with_parallel_recovery <= self.custom_formula
            && self.formula_with_semester_recovery <= self.custom_formula
    }

    fn from_row(row: RowRef<'_>) -> DashboardResult<Self> {
        Ok(Self {
            entity: Entity::new(row.id("entidade_id")?, row.text("nome_entidade")?),
            total_criteria: row.count("total_criterios")?,
            custom_formula: row.count("formula_personalizada")?,
            group_criterion: row.count("criterio_grupo")?,
            group_with_parallel_recovery: row.count("grupo_rec_paralela")?,
            group_with_semester_recovery: row.count("grupo_rec_semestral")?,
            formula_with_parallel_recovery: row.count("formula_rec_paralela")?,
            formula_with_semester_recovery: row.count("formula_rec_semestral")?,
        })
    }
}

/// Runs the criteria aggregation and decodes its rows.
///
/// Rows whose `total_criteria` is zero are dropped even if the source
/// returned them, so the merge never sees a zero denominator from here.
pub fn load_criteria<S: QuerySource + ?Sized>(source: &S) -> DashboardResult<Vec<CriteriaAggregate>> {
    let table = source.run(CRITERIA_QUERY)?;

    let mut out = Vec::with_capacity(table.len());
    for row in table.rows() {
        let agg = CriteriaAggregate::from_row(row)?;
        if agg.total_criteria > 0 {
            out.push(agg);
        }
    }
    Ok(out)
}
